//! Structured schema builders for Kafka Connect key and value schemas.
//!
//! A [`SchemaBuilder`] accumulates fields in registration order. One
//! [`KeyValueBuilders`] pair exists per table and is owned by the discovery
//! task working on that table; it is not meant to be shared across threads
//! while fields are being added.

use serde::{Serialize, Serializer};

use crate::core::semantic::WireType;

use super::field::FieldSchema;

/// One registered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectField {
    pub name: String,
    pub wire_type: WireType,
}

/// Mutable accumulator for a struct schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<ConnectField>,
}

impl SchemaBuilder {
    /// Create an empty builder for a struct schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(&mut self, name: impl Into<String>, wire_type: WireType) -> &mut Self {
        self.fields.push(ConnectField {
            name: name.into(),
            wire_type,
        });
        self
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields registered so far.
    pub fn fields(&self) -> &[ConnectField] {
        &self.fields
    }

    /// Whether no field has been registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish the schema.
    pub fn build(self) -> ConnectSchema {
        ConnectSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Key and value accumulators for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueBuilders {
    pub key: SchemaBuilder,
    pub value: SchemaBuilder,
}

impl KeyValueBuilders {
    /// Builders named `<base>.Key` and `<base>.Value`.
    pub fn new(base_name: &str) -> Self {
        Self {
            key: SchemaBuilder::new(format!("{}.Key", base_name)),
            value: SchemaBuilder::new(format!("{}.Value", base_name)),
        }
    }

    /// Finish both schemas as `(key, value)`.
    pub fn build(self) -> (ConnectSchema, ConnectSchema) {
        (self.key.build(), self.value.build())
    }
}

/// Finished struct schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectSchema {
    pub name: String,
    pub fields: Vec<ConnectField>,
}

impl ConnectSchema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&ConnectField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Fields rendered as self-describing field schemas.
    pub fn field_schemas(&self) -> Vec<FieldSchema> {
        self.fields
            .iter()
            .map(|f| FieldSchema::new(f.name.clone(), f.wire_type))
            .collect()
    }
}

#[derive(Serialize)]
struct StructSchemaRepr<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    optional: bool,
    fields: Vec<FieldSchema>,
}

impl Serialize for ConnectSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StructSchemaRepr {
            kind: "struct",
            name: &self.name,
            optional: false,
            fields: self.field_schemas(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::semantic::{PhysicalKind, SemanticType};

    #[test]
    fn test_builder_keeps_registration_order() {
        let mut builder = SchemaBuilder::new("SCOTT.EMP.Value");
        builder
            .field("ENAME", WireType::for_column(SemanticType::StringText, true))
            .field("SAL", WireType::for_column(SemanticType::Decimal { scale: 2 }, true));
        let schema = builder.build();
        assert_eq!(schema.field_names(), vec!["ENAME", "SAL"]);
        assert_eq!(schema.field("SAL").unwrap().wire_type.scale, Some(2));
        assert!(schema.field("MISSING").is_none());
    }

    #[test]
    fn test_key_value_names() {
        let builders = KeyValueBuilders::new("SCOTT.DEPT");
        assert_eq!(builders.key.name(), "SCOTT.DEPT.Key");
        assert_eq!(builders.value.name(), "SCOTT.DEPT.Value");
        assert!(builders.key.is_empty());
    }

    #[test]
    fn test_struct_json() {
        let mut builders = KeyValueBuilders::new("SCOTT.DEPT");
        builders
            .key
            .field("DEPTNO", WireType::required(PhysicalKind::Int16));
        let (key, _) = builders.build();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["type"], "struct");
        assert_eq!(json["name"], "SCOTT.DEPT.Key");
        assert_eq!(json["fields"][0]["field"], "DEPTNO");
        assert_eq!(json["fields"][0]["type"], "int16");
    }
}
