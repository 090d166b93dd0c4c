//! Self-describing field schemas.
//!
//! A [`FieldSchema`] carries its own kind, optionality, logical tag and scale
//! inline, so a consumer can rebuild the column without the source catalog.
//! The JSON layout follows the Kafka Connect JSON converter:
//!
//! ```json
//! {"type":"bytes","optional":true,"name":"org.apache.kafka.connect.data.Decimal",
//!  "version":1,"parameters":{"scale":"2"},"field":"SAL"}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::semantic::{LogicalType, PhysicalKind, WireType};
use crate::error::Result;

/// Self-describing schema of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FieldSchemaRepr", try_from = "FieldSchemaRepr")]
pub struct FieldSchema {
    /// Field (column) name.
    pub field: String,
    /// Physical kind.
    pub kind: PhysicalKind,
    /// Whether the field accepts null.
    pub optional: bool,
    /// Logical type tag, if any.
    pub logical: Option<LogicalType>,
    /// Decimal scale, present only with the decimal tag.
    pub scale: Option<u32>,
}

impl FieldSchema {
    /// Build a field schema from a wire type.
    pub fn new(field: impl Into<String>, wire_type: WireType) -> Self {
        Self {
            field: field.into(),
            kind: wire_type.kind,
            optional: wire_type.optional,
            logical: wire_type.logical,
            scale: wire_type.scale,
        }
    }

    /// Wire type described by this schema.
    pub fn wire_type(&self) -> WireType {
        WireType {
            kind: self.kind,
            optional: self.optional,
            logical: self.logical,
            scale: self.scale,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldSchemaRepr {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<Parameters>,
    field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Parameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<String>,
}

impl From<FieldSchema> for FieldSchemaRepr {
    fn from(schema: FieldSchema) -> Self {
        Self {
            kind: schema.kind.to_string(),
            optional: schema.optional,
            name: schema.logical.map(|l| l.name().to_string()),
            version: schema.logical.map(|_| 1),
            parameters: schema.scale.map(|s| Parameters {
                scale: Some(s.to_string()),
            }),
            field: schema.field,
        }
    }
}

impl TryFrom<FieldSchemaRepr> for FieldSchema {
    type Error = String;

    fn try_from(repr: FieldSchemaRepr) -> std::result::Result<Self, Self::Error> {
        // Names outside the Connect logical types (Debezium, user structs) carry no tag
        let logical = repr.name.as_deref().and_then(|name| {
            [LogicalType::Date, LogicalType::Timestamp, LogicalType::Decimal]
                .into_iter()
                .find(|l| l.name() == name)
        });
        let scale = match repr.parameters.and_then(|p| p.scale) {
            Some(s) => Some(
                s.parse::<u32>()
                    .map_err(|_| format!("field {}: invalid decimal scale '{}'", repr.field, s))?,
            ),
            None => None,
        };
        Ok(Self {
            field: repr.field,
            kind: PhysicalKind::from_name(&repr.kind),
            optional: repr.optional,
            logical,
            scale,
        })
    }
}
