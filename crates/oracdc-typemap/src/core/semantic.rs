//! Semantic type tags and the wire types derived from them.
//!
//! [`SemanticType`] is the closed classification every column reduces to.
//! Adding a new source type never changes this set, only the classifier's
//! mapping rules. The remaining types here are the two target vocabularies a
//! semantic type is projected onto:
//!
//! - [`WireType`] (built from [`PhysicalKind`] and [`LogicalType`]) for the
//!   Kafka Connect style schemas
//! - [`SqlNullType`] for parameters bound on a write statement

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SemanticType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Fixed-point decimal. Scale is always non-negative.
    Decimal { scale: u32 },
    Date,
    Timestamp,
    StringText,
    BinaryBytes,
    Boolean,
}

impl SemanticType {
    /// Scale carried by the type (0 for everything except `Decimal`).
    #[must_use]
    pub fn scale(&self) -> u32 {
        match self {
            SemanticType::Decimal { scale } => *scale,
            _ => 0,
        }
    }

    /// Write-statement wire type used for this semantic type.
    #[must_use]
    pub fn sql_type(&self) -> SqlNullType {
        match self {
            SemanticType::Int8 => SqlNullType::TinyInt,
            SemanticType::Int16 => SqlNullType::SmallInt,
            SemanticType::Int32 => SqlNullType::Integer,
            SemanticType::Int64 => SqlNullType::BigInt,
            SemanticType::Float32 => SqlNullType::Float,
            SemanticType::Float64 => SqlNullType::Double,
            SemanticType::Decimal { .. } => SqlNullType::Decimal,
            SemanticType::Date => SqlNullType::Date,
            SemanticType::Timestamp => SqlNullType::Timestamp,
            SemanticType::StringText => SqlNullType::Varchar,
            SemanticType::BinaryBytes => SqlNullType::Binary,
            SemanticType::Boolean => SqlNullType::Boolean,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Int8 => write!(f, "Int8"),
            SemanticType::Int16 => write!(f, "Int16"),
            SemanticType::Int32 => write!(f, "Int32"),
            SemanticType::Int64 => write!(f, "Int64"),
            SemanticType::Float32 => write!(f, "Float32"),
            SemanticType::Float64 => write!(f, "Float64"),
            SemanticType::Decimal { scale } => write!(f, "Decimal({})", scale),
            SemanticType::Date => write!(f, "Date"),
            SemanticType::Timestamp => write!(f, "Timestamp"),
            SemanticType::StringText => write!(f, "StringText"),
            SemanticType::BinaryBytes => write!(f, "BinaryBytes"),
            SemanticType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Primitive kind of a schema field.
///
/// `Array`, `Map`, `Struct` and `Unknown` are never emitted for a column; they
/// exist so that a schema produced elsewhere can still be read and mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    Array,
    Map,
    Struct,
    /// Any kind name outside the Connect primitive set.
    Unknown,
}

impl PhysicalKind {
    /// Parse a schema `type` name. Unrecognized names become `Unknown`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "int8" => PhysicalKind::Int8,
            "int16" => PhysicalKind::Int16,
            "int32" => PhysicalKind::Int32,
            "int64" => PhysicalKind::Int64,
            "float32" => PhysicalKind::Float32,
            "float64" => PhysicalKind::Float64,
            "boolean" => PhysicalKind::Boolean,
            "string" => PhysicalKind::String,
            "bytes" => PhysicalKind::Bytes,
            "array" => PhysicalKind::Array,
            "map" => PhysicalKind::Map,
            "struct" => PhysicalKind::Struct,
            _ => PhysicalKind::Unknown,
        }
    }
}

impl fmt::Display for PhysicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhysicalKind::Int8 => "int8",
            PhysicalKind::Int16 => "int16",
            PhysicalKind::Int32 => "int32",
            PhysicalKind::Int64 => "int64",
            PhysicalKind::Float32 => "float32",
            PhysicalKind::Float64 => "float64",
            PhysicalKind::Boolean => "boolean",
            PhysicalKind::String => "string",
            PhysicalKind::Bytes => "bytes",
            PhysicalKind::Array => "array",
            PhysicalKind::Map => "map",
            PhysicalKind::Struct => "struct",
            PhysicalKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Logical type tag layered over a physical kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// Days since epoch on an `int32`.
    #[serde(rename = "org.apache.kafka.connect.data.Date")]
    Date,
    /// Milliseconds since epoch on an `int64`.
    #[serde(rename = "org.apache.kafka.connect.data.Timestamp")]
    Timestamp,
    /// Unscaled big-endian integer on `bytes`, scale carried alongside.
    #[serde(rename = "org.apache.kafka.connect.data.Decimal")]
    Decimal,
}

impl LogicalType {
    /// Fully qualified logical type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Date => "org.apache.kafka.connect.data.Date",
            LogicalType::Timestamp => "org.apache.kafka.connect.data.Timestamp",
            LogicalType::Decimal => "org.apache.kafka.connect.data.Decimal",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single schema decision for a column: kind, optionality, logical tag
/// and scale. Both schema representations are built from one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireType {
    pub kind: PhysicalKind,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<LogicalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl WireType {
    /// Derive the wire type of a column. Nullable columns get the optional variant.
    #[must_use]
    pub fn for_column(semantic: SemanticType, nullable: bool) -> Self {
        let (kind, logical, scale) = match semantic {
            SemanticType::Int8 => (PhysicalKind::Int8, None, None),
            SemanticType::Int16 => (PhysicalKind::Int16, None, None),
            SemanticType::Int32 => (PhysicalKind::Int32, None, None),
            SemanticType::Int64 => (PhysicalKind::Int64, None, None),
            SemanticType::Float32 => (PhysicalKind::Float32, None, None),
            SemanticType::Float64 => (PhysicalKind::Float64, None, None),
            SemanticType::Boolean => (PhysicalKind::Boolean, None, None),
            SemanticType::StringText => (PhysicalKind::String, None, None),
            SemanticType::BinaryBytes => (PhysicalKind::Bytes, None, None),
            SemanticType::Decimal { scale } => {
                (PhysicalKind::Bytes, Some(LogicalType::Decimal), Some(scale))
            }
            SemanticType::Date => (PhysicalKind::Int32, Some(LogicalType::Date), None),
            SemanticType::Timestamp => {
                (PhysicalKind::Int64, Some(LogicalType::Timestamp), None)
            }
        };
        Self {
            kind,
            optional: nullable,
            logical,
            scale,
        }
    }

    /// Required variant of a plain primitive.
    #[must_use]
    pub fn required(kind: PhysicalKind) -> Self {
        Self {
            kind,
            optional: false,
            logical: None,
            scale: None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.logical {
            Some(LogicalType::Decimal) => {
                write!(f, "{}({})", LogicalType::Decimal, self.scale.unwrap_or(0))?
            }
            Some(logical) => write!(f, "{}", logical)?,
            None => write!(f, "{}", self.kind)?,
        }
        if self.optional {
            write!(f, " optional")
        } else {
            write!(f, " required")
        }
    }
}

/// Wire type of a write-statement parameter, used to type NULL binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlNullType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Date,
    Timestamp,
    Varchar,
    Binary,
    Boolean,
    /// Physical row address of the synthetic row-identity column.
    RowId,
}

impl fmt::Display for SqlNullType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlNullType::TinyInt => "TINYINT",
            SqlNullType::SmallInt => "SMALLINT",
            SqlNullType::Integer => "INTEGER",
            SqlNullType::BigInt => "BIGINT",
            SqlNullType::Float => "FLOAT",
            SqlNullType::Double => "DOUBLE",
            SqlNullType::Decimal => "DECIMAL",
            SqlNullType::Date => "DATE",
            SqlNullType::Timestamp => "TIMESTAMP",
            SqlNullType::Varchar => "VARCHAR",
            SqlNullType::Binary => "BINARY",
            SqlNullType::Boolean => "BOOLEAN",
            SqlNullType::RowId => "ROWID",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_type_display() {
        assert_eq!(SemanticType::Int32.to_string(), "Int32");
        assert_eq!(SemanticType::Decimal { scale: 4 }.to_string(), "Decimal(4)");
        assert_eq!(SemanticType::StringText.to_string(), "StringText");
    }

    #[test]
    fn test_scale_only_for_decimal() {
        assert_eq!(SemanticType::Decimal { scale: 3 }.scale(), 3);
        assert_eq!(SemanticType::Int64.scale(), 0);
        assert_eq!(SemanticType::Timestamp.scale(), 0);
    }

    #[test]
    fn test_wire_type_temporal_tags() {
        let date = WireType::for_column(SemanticType::Date, false);
        assert_eq!(date.kind, PhysicalKind::Int32);
        assert_eq!(date.logical, Some(LogicalType::Date));

        let ts = WireType::for_column(SemanticType::Timestamp, true);
        assert_eq!(ts.kind, PhysicalKind::Int64);
        assert_eq!(ts.logical, Some(LogicalType::Timestamp));
        assert!(ts.optional);
    }

    #[test]
    fn test_wire_type_decimal_carries_scale() {
        let dec = WireType::for_column(SemanticType::Decimal { scale: 2 }, false);
        assert_eq!(dec.kind, PhysicalKind::Bytes);
        assert_eq!(dec.logical, Some(LogicalType::Decimal));
        assert_eq!(dec.scale, Some(2));
        assert_eq!(
            dec.to_string(),
            "org.apache.kafka.connect.data.Decimal(2) required"
        );
    }

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(SemanticType::Int8.sql_type(), SqlNullType::TinyInt);
        assert_eq!(SemanticType::Int64.sql_type(), SqlNullType::BigInt);
        assert_eq!(SemanticType::StringText.sql_type(), SqlNullType::Varchar);
        assert_eq!(SqlNullType::RowId.to_string(), "ROWID");
    }

    #[test]
    fn test_physical_kind_names() {
        for kind in [PhysicalKind::Int8, PhysicalKind::Float64, PhysicalKind::Bytes, PhysicalKind::Struct] {
            assert_eq!(PhysicalKind::from_name(&kind.to_string()), kind);
        }
        assert_eq!(PhysicalKind::from_name("float"), PhysicalKind::Unknown);
        assert_eq!(PhysicalKind::from_name("INT32"), PhysicalKind::Unknown);
    }

    #[test]
    fn test_logical_type_serde_names() {
        let json = serde_json::to_string(&LogicalType::Timestamp).unwrap();
        assert_eq!(json, "\"org.apache.kafka.connect.data.Timestamp\"");
        let back: LogicalType =
            serde_json::from_str("\"org.apache.kafka.connect.data.Date\"").unwrap();
        assert_eq!(back, LogicalType::Date);
    }
}
