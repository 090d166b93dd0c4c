//! Per-table discovery.
//!
//! A discovery pass walks the catalog rows of one table exactly once,
//! classifies every column and emits its schema into the representation
//! selected by [`SchemaMode`]. The resulting [`TableDefinition`] is immutable
//! and can be shared by the tasks binding rows for that table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bind::bind_column;
use crate::core::catalog::CatalogColumn;
use crate::core::column::{ColumnDefinition, EmitTarget, ROWID_KEY};
use crate::core::semantic::SqlNullType;
use crate::core::traits::WriteStatement;
use crate::core::value::Row;
use crate::dialect::NumericPolicy;
use crate::error::{Result, TypeMapError};
use crate::schema::{emit_field, ConnectSchema, FieldSchema, KeyValueBuilders};

/// Downstream schema representation produced by discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Structured key and value schemas.
    #[default]
    Connect,
    /// Self-describing field schema attached to each column.
    SelfDescribing,
}

impl std::fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMode::Connect => write!(f, "connect"),
            SchemaMode::SelfDescribing => write!(f, "self_describing"),
        }
    }
}

/// Options for one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub numeric_policy: NumericPolicy,
    pub mode: SchemaMode,
    /// Prepended to `<OWNER>.<TABLE>` in structured schema names.
    pub topic_prefix: String,
    /// Add the row-identity key column to tables without a primary key.
    pub use_row_id: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            numeric_policy: NumericPolicy::default(),
            mode: SchemaMode::default(),
            topic_prefix: String::new(),
            use_row_id: true,
        }
    }
}

impl DiscoveryOptions {
    /// Base name of the key and value schemas for a table.
    pub fn schema_base_name(&self, owner: &str, table: &str) -> String {
        format!("{}{}.{}", self.topic_prefix, owner, table)
    }
}

/// Classified table: columns in slot order plus the emitted schemas.
#[derive(Debug, Clone, Serialize)]
pub struct TableDefinition {
    pub owner: String,
    pub table: String,
    pub columns: Vec<ColumnDefinition>,
    /// Present only for [`SchemaMode::Connect`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_schema: Option<ConnectSchema>,
    /// Present only for [`SchemaMode::Connect`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_schema: Option<ConnectSchema>,
}

impl TableDefinition {
    /// Run a discovery pass over the catalog rows of one table.
    ///
    /// When no row is flagged as primary key and `use_row_id` is set, the
    /// row-identity column is created first and becomes the only key field.
    pub fn discover<I>(
        owner: &str,
        table: &str,
        rows: I,
        options: &DiscoveryOptions,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogColumn>,
    {
        let rows: Vec<CatalogColumn> = rows.into_iter().collect();
        if rows.is_empty() {
            return Err(TypeMapError::Schema(format!(
                "table {}.{} has no columns",
                owner, table
            )));
        }
        check_unique(owner, table, rows.iter().map(|r| r.column_name.as_str()))?;

        let add_row_id = options.use_row_id && !rows.iter().any(CatalogColumn::is_pk);
        if add_row_id && rows.iter().any(|r| r.column_name == ROWID_KEY) {
            return Err(TypeMapError::Schema(format!(
                "table {}.{} already has a column named {}",
                owner, table, ROWID_KEY
            )));
        }

        let policy = options.numeric_policy;
        let mut columns = Vec::with_capacity(rows.len() + usize::from(add_row_id));

        let (key_schema, value_schema) = match options.mode {
            SchemaMode::Connect => {
                let mut builders =
                    KeyValueBuilders::new(&options.schema_base_name(owner, table));
                if add_row_id {
                    columns.push(ColumnDefinition::row_id_key(EmitTarget::Connect(
                        &mut builders,
                    )));
                }
                for row in &rows {
                    columns.push(ColumnDefinition::discover(
                        row,
                        policy,
                        EmitTarget::Connect(&mut builders),
                    ));
                }
                let (key, value) = builders.build();
                (Some(key), Some(value))
            }
            SchemaMode::SelfDescribing => {
                if add_row_id {
                    columns.push(ColumnDefinition::row_id_key(EmitTarget::SelfDescribing));
                }
                for row in &rows {
                    columns.push(ColumnDefinition::discover(
                        row,
                        policy,
                        EmitTarget::SelfDescribing,
                    ));
                }
                (None, None)
            }
        };

        info!(
            "Discovered {}.{}: {} columns, mode {}, policy {}",
            owner,
            table,
            columns.len(),
            options.mode,
            policy
        );

        Ok(Self {
            owner: owner.to_string(),
            table: table.to_string(),
            columns,
            key_schema,
            value_schema,
        })
    }

    /// Rebuild a table on the sink side from self-describing field schemas.
    ///
    /// `pk_names` lists the key columns; every name must match a field.
    pub fn from_field_schemas(
        owner: &str,
        table: &str,
        schemas: Vec<FieldSchema>,
        pk_names: &[String],
    ) -> Result<Self> {
        check_unique(owner, table, schemas.iter().map(|s| s.field.as_str()))?;
        if let Some(missing) = pk_names
            .iter()
            .find(|pk| !schemas.iter().any(|s| &s.field == *pk))
        {
            return Err(TypeMapError::Schema(format!(
                "primary key column {} not found in {}.{}",
                missing, owner, table
            )));
        }

        let columns: Vec<ColumnDefinition> = schemas
            .into_iter()
            .map(|schema| {
                let is_pk = pk_names.iter().any(|pk| *pk == schema.field);
                ColumnDefinition::from_field_schema(schema, is_pk)
            })
            .collect();
        debug!(
            "Rebuilt {}.{} from {} field schemas",
            owner,
            table,
            columns.len()
        );

        Ok(Self {
            owner: owner.to_string(),
            table: table.to_string(),
            columns,
            key_schema: None,
            value_schema: None,
        })
    }

    /// Fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner, self.table)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Columns emitted into the key schema.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.is_key_member())
    }

    /// Columns emitted into the value schema.
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| !c.is_key_member())
    }

    /// Columns written to the target table, in slot order.
    ///
    /// The row-identity column only identifies the message key and has no
    /// target column, so it is not part of the write.
    pub fn write_columns(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|c| c.sql_type() != SqlNullType::RowId)
            .collect()
    }

    /// Self-describing schema of every column, in column order.
    pub fn field_schemas(&self) -> Vec<FieldSchema> {
        self.columns
            .iter()
            .map(|c| c.field_schema().cloned().unwrap_or_else(|| emit_field(c)))
            .collect()
    }

    /// Bind one row onto slots `1..=n` of [`write_columns`](Self::write_columns).
    ///
    /// Returns the number of slots bound.
    pub fn bind_row<S>(&self, row: &Row<'_>, statement: &mut S) -> Result<usize>
    where
        S: WriteStatement + ?Sized,
    {
        let columns = self.write_columns();
        for (idx, column) in columns.iter().enumerate() {
            bind_column(column, row, statement, idx + 1)?;
        }
        Ok(columns.len())
    }
}

fn check_unique<'a>(
    owner: &str,
    table: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TypeMapError::Schema(format!(
                "duplicate column {} in {}.{}",
                name, owner, table
            )));
        }
    }
    Ok(())
}
