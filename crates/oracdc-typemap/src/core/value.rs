//! Tagged row values handed to the value binder.
//!
//! The row-decoding layer produces one [`SqlValue`] per column, so width
//! mismatches between what the decoder emitted and what the column declares
//! surface as explicit variant matches in the binder instead of runtime casts.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::column::ColumnDefinition;
use crate::core::semantic::SemanticType;
use crate::error::{Result, TypeMapError};

/// SQL value enum for type-safe row handling.
///
/// Uses `Cow` for string and byte data so rows decoded from a borrowed buffer
/// can be bound without copying.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// NULL. The wire type comes from the column, not the value.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 8-bit signed integer.
    I8(i8),

    /// 16-bit signed integer.
    I16(i16),

    /// 32-bit signed integer.
    I32(i32),

    /// 64-bit signed integer. Also carries epoch milliseconds for dates and timestamps.
    I64(i64),

    /// 32-bit floating point.
    F32(f32),

    /// 64-bit floating point.
    F64(f64),

    /// Decimal value with arbitrary precision.
    Decimal(Decimal),

    /// Text/string data with zero-copy support.
    Text(Cow<'a, str>),

    /// Binary data with zero-copy support.
    Bytes(Cow<'a, [u8]>),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null => SqlValue::Null,
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::I8(v) => SqlValue::I8(v),
            SqlValue::I16(v) => SqlValue::I16(v),
            SqlValue::I32(v) => SqlValue::I32(v),
            SqlValue::I64(v) => SqlValue::I64(v),
            SqlValue::F32(v) => SqlValue::F32(v),
            SqlValue::F64(v) => SqlValue::F64(v),
            SqlValue::Decimal(v) => SqlValue::Decimal(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
            SqlValue::Bytes(v) => SqlValue::Bytes(Cow::Owned(v.into_owned())),
        }
    }

    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Name of the representation, used in mismatch errors.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::I8(_) => "i8",
            SqlValue::I16(_) => "i16",
            SqlValue::I32(_) => "i32",
            SqlValue::I64(_) => "i64",
            SqlValue::F32(_) => "f32",
            SqlValue::F64(_) => "f64",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(v) => write!(f, "{}", v),
            SqlValue::I8(v) => write!(f, "{}", v),
            SqlValue::I16(v) => write!(f, "{}", v),
            SqlValue::I32(v) => write!(f, "{}", v),
            SqlValue::I64(v) => write!(f, "{}", v),
            SqlValue::F32(v) => write!(f, "{}", v),
            SqlValue::F64(v) => write!(f, "{}", v),
            SqlValue::Decimal(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "{}", v),
            SqlValue::Bytes(v) => write!(f, "0x{}", hex::encode(v)),
        }
    }
}

// Convenience constructors for common cases
impl<'a> SqlValue<'a> {
    /// Create a text value from a borrowed string slice.
    #[must_use]
    pub fn text_borrowed(s: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(s))
    }

    /// Create a text value from an owned String.
    #[must_use]
    pub fn text_owned(s: String) -> SqlValue<'static> {
        SqlValue::Text(Cow::Owned(s))
    }

    /// Create a bytes value from an owned Vec<u8>.
    #[must_use]
    pub fn bytes_owned(b: Vec<u8>) -> SqlValue<'static> {
        SqlValue::Bytes(Cow::Owned(b))
    }
}

impl From<bool> for SqlValue<'static> {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i8> for SqlValue<'static> {
    fn from(v: i8) -> Self {
        SqlValue::I8(v)
    }
}

impl From<i16> for SqlValue<'static> {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}

impl From<i32> for SqlValue<'static> {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue<'static> {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f32> for SqlValue<'static> {
    fn from(v: f32) -> Self {
        SqlValue::F32(v)
    }
}

impl From<f64> for SqlValue<'static> {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<Decimal> for SqlValue<'static> {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue<'static> {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(Cow::Owned(v))
    }
}

impl<T> From<Option<T>> for SqlValue<'static>
where
    T: Into<SqlValue<'static>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// One output row: column name to tagged value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row<'a> {
    values: HashMap<String, SqlValue<'a>>,
}

static NULL_VALUE: SqlValue<'static> = SqlValue::Null;

impl<'a> Row<'a> {
    /// Create an empty row.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a column value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SqlValue<'a>>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue<'a>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value for a column. Missing columns read as NULL.
    pub fn get(&self, name: &str) -> &SqlValue<'a> {
        self.values.get(name).unwrap_or(&NULL_VALUE)
    }

    /// Whether the row carries an explicit entry for the column.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a fully owned row.
    pub fn into_owned(self) -> Row<'static> {
        Row {
            values: self
                .values
                .into_iter()
                .map(|(k, v)| (k, v.into_owned()))
                .collect(),
        }
    }
}

impl Row<'static> {
    /// Decode a JSON object into tagged values, driven by the column definitions.
    ///
    /// Integer columns narrower than 64 bits decode as `I32`, the width generic
    /// row encoders emit; `Int64`, `Date` and `Timestamp` decode as `I64`
    /// (epoch milliseconds for the temporal types). Decimals accept strings or
    /// numbers, bytes are hex strings. Keys not named by a column are ignored.
    pub fn from_json(columns: &[ColumnDefinition], json: &serde_json::Value) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| {
            TypeMapError::value_decode("<row>", "row must be a JSON object")
        })?;

        let mut row = Row::new();
        for column in columns {
            let Some(raw) = object.get(column.name()) else {
                continue;
            };
            let value = decode_json_value(column, raw)?;
            row.insert(column.name(), value);
        }
        Ok(row)
    }
}

fn decode_json_value(
    column: &ColumnDefinition,
    raw: &serde_json::Value,
) -> Result<SqlValue<'static>> {
    use serde_json::Value;

    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    let name = column.name();
    let mismatch = |expected: &str| {
        TypeMapError::value_decode(name, format!("expected {}, got {}", expected, raw))
    };

    let value = match column.semantic_type() {
        SemanticType::Int8 | SemanticType::Int16 | SemanticType::Int32 => {
            let v = raw.as_i64().ok_or_else(|| mismatch("integer"))?;
            let v = i32::try_from(v)
                .map_err(|_| TypeMapError::value_decode(name, format!("{} exceeds 32 bits", v)))?;
            SqlValue::I32(v)
        }
        SemanticType::Int64 | SemanticType::Date | SemanticType::Timestamp => {
            SqlValue::I64(raw.as_i64().ok_or_else(|| mismatch("integer"))?)
        }
        SemanticType::Float32 => {
            SqlValue::F32(raw.as_f64().ok_or_else(|| mismatch("number"))? as f32)
        }
        SemanticType::Float64 => SqlValue::F64(raw.as_f64().ok_or_else(|| mismatch("number"))?),
        SemanticType::Decimal { .. } => {
            let text = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(mismatch("decimal string or number")),
            };
            let d = Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|e| TypeMapError::value_decode(name, e.to_string()))?;
            SqlValue::Decimal(d)
        }
        SemanticType::Boolean => SqlValue::Bool(raw.as_bool().ok_or_else(|| mismatch("boolean"))?),
        SemanticType::StringText => match raw {
            Value::String(s) => SqlValue::text_owned(s.clone()),
            other => SqlValue::text_owned(other.to_string()),
        },
        SemanticType::BinaryBytes => {
            let s = raw.as_str().ok_or_else(|| mismatch("hex string"))?;
            let bytes =
                hex::decode(s).map_err(|e| TypeMapError::value_decode(name, e.to_string()))?;
            SqlValue::bytes_owned(bytes)
        }
    };
    Ok(value)
}
