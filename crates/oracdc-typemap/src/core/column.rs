//! Column definitions: the canonical per-column record.
//!
//! A [`ColumnDefinition`] is created once per column, either from a catalog
//! row (forward path) or from a previously emitted self-describing field
//! schema (reverse path). It is immutable afterwards and safe to share across
//! binding tasks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::catalog::CatalogColumn;
use crate::core::semantic::{PhysicalKind, SemanticType, SqlNullType, WireType};
use crate::dialect::{classify, reverse_classify, NumericPolicy};
use crate::schema::{emit_connect, emit_field, FieldSchema, KeyValueBuilders};

/// Name of the synthetic row-identity key column.
pub const ROWID_KEY: &str = "ORA$ROW$ID";

/// Where a column's schema is emitted while it is being constructed.
#[derive(Debug)]
pub enum EmitTarget<'b> {
    /// Register the field in the caller's key/value builders.
    Connect(&'b mut KeyValueBuilders),
    /// Attach a self-describing field schema to the column.
    SelfDescribing,
}

/// Canonical column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    name: String,
    is_primary_key: bool,
    semantic_type: SemanticType,
    nullable: bool,
    is_legacy_date: bool,
    sql_type: SqlNullType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_schema: Option<FieldSchema>,
}

impl ColumnDefinition {
    /// Classify a catalog row without emitting any schema.
    pub fn from_catalog(row: &CatalogColumn, policy: NumericPolicy) -> Self {
        let classification = classify(&row.type_info(), policy);
        debug!(
            "Column {} ({}) classified as {}",
            row.column_name, row.data_type, classification.semantic_type
        );
        Self {
            name: row.column_name.clone(),
            is_primary_key: row.is_pk(),
            semantic_type: classification.semantic_type,
            nullable: row.is_nullable(),
            is_legacy_date: classification.is_legacy_date,
            sql_type: classification.semantic_type.sql_type(),
            field_schema: None,
        }
    }

    /// Classify a catalog row and emit its schema in the same step.
    ///
    /// With [`EmitTarget::Connect`] the field goes into the caller's builders
    /// and the column holds no schema of its own; with
    /// [`EmitTarget::SelfDescribing`] the field schema is attached.
    pub fn discover(row: &CatalogColumn, policy: NumericPolicy, target: EmitTarget<'_>) -> Self {
        let column = Self::from_catalog(row, policy);
        match target {
            EmitTarget::Connect(builders) => {
                emit_connect(&column, builders);
                column
            }
            EmitTarget::SelfDescribing => {
                let field_schema = emit_field(&column);
                Self {
                    field_schema: Some(field_schema),
                    ..column
                }
            }
        }
    }

    /// Rebuild a column from a self-describing field schema.
    ///
    /// The field schema does not record key membership, so the caller
    /// supplies it.
    ///
    /// A required string field named [`ROWID_KEY`] is the row-identity key
    /// written by [`ColumnDefinition::row_id_key`] and is rebuilt as one.
    pub fn from_field_schema(field_schema: FieldSchema, is_primary_key: bool) -> Self {
        let semantic_type = reverse_classify(&field_schema);
        let is_row_id = field_schema.field == ROWID_KEY
            && semantic_type == SemanticType::StringText
            && !field_schema.optional;
        if is_row_id {
            debug!("Field {} rebuilt as the row-identity key", ROWID_KEY);
        }
        Self {
            name: field_schema.field.clone(),
            is_primary_key: is_primary_key || is_row_id,
            semantic_type,
            nullable: field_schema.optional,
            is_legacy_date: false,
            sql_type: if is_row_id {
                SqlNullType::RowId
            } else {
                semantic_type.sql_type()
            },
            field_schema: Some(field_schema),
        }
    }

    /// Synthetic row-identity key for tables without a primary key.
    ///
    /// The key field is registered in the builders, or the required string
    /// field schema is attached, as part of construction.
    pub fn row_id_key(target: EmitTarget<'_>) -> Self {
        info!("No primary key, using {} as the key column", ROWID_KEY);
        let wire = WireType::required(PhysicalKind::String);
        let field_schema = match target {
            EmitTarget::Connect(builders) => {
                builders.key.field(ROWID_KEY, wire);
                None
            }
            EmitTarget::SelfDescribing => Some(FieldSchema::new(ROWID_KEY, wire)),
        };
        Self {
            name: ROWID_KEY.to_string(),
            is_primary_key: true,
            semantic_type: SemanticType::StringText,
            nullable: false,
            is_legacy_date: false,
            sql_type: SqlNullType::RowId,
            field_schema,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the column belongs to the key schema.
    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    /// Semantic type tag.
    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    /// Whether the column allows NULL.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Decimal scale; 0 for every other type.
    pub fn scale(&self) -> u32 {
        self.semantic_type.scale()
    }

    /// True when a date-only source type was widened to a timestamp.
    pub fn is_legacy_date(&self) -> bool {
        self.is_legacy_date
    }

    /// Wire type used when binding this column.
    pub fn sql_type(&self) -> SqlNullType {
        self.sql_type
    }

    /// Schema decision for this column.
    pub fn wire_type(&self) -> WireType {
        WireType::for_column(self.semantic_type, self.nullable)
    }

    /// Attached self-describing field schema, if any.
    pub fn field_schema(&self) -> Option<&FieldSchema> {
        self.field_schema.as_ref()
    }

    /// Whether the column is emitted into the key schema.
    ///
    /// Only non-nullable primary-key columns are key members; a nullable
    /// primary-key column is routed to the value schema.
    pub fn is_key_member(&self) -> bool {
        self.is_primary_key && !self.nullable
    }
}
