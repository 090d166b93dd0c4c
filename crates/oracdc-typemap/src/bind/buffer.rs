//! In-memory write statement.
//!
//! [`ParameterBuffer`] records bound parameters in slot order and can render
//! them as an Oracle `INSERT` with literal values. It backs the CLI `bind`
//! command and the binder tests.

use serde::Serialize;

use crate::core::semantic::SqlNullType;
use crate::core::traits::{BoundValue, WriteStatement};
use crate::error::{Result, TypeMapError};

/// One recorded parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundParameter {
    /// Typed NULL.
    Null(SqlNullType),
    /// Non-null scalar.
    Value(BoundValue<'static>),
}

impl BoundParameter {
    /// Wire type of the parameter.
    pub fn sql_type(&self) -> SqlNullType {
        match self {
            BoundParameter::Null(t) => *t,
            BoundParameter::Value(v) => v.sql_type(),
        }
    }

    /// Render as an Oracle SQL literal.
    pub fn to_literal(&self) -> String {
        match self {
            BoundParameter::Null(_) => "NULL".to_string(),
            BoundParameter::Value(v) => bound_value_to_literal(v),
        }
    }
}

#[derive(Serialize)]
struct ParameterRepr {
    slot: usize,
    sql_type: String,
    value: Option<String>,
}

/// Write statement that buffers parameters in memory.
///
/// Slots must arrive as `1, 2, 3, ...`; anything else is rejected with
/// [`TypeMapError::Statement`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBuffer {
    params: Vec<BoundParameter>,
}

impl ParameterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters bound so far; index 0 is slot 1.
    pub fn params(&self) -> &[BoundParameter] {
        &self.params
    }

    /// Parameter at a 1-indexed slot.
    pub fn get(&self, slot: usize) -> Option<&BoundParameter> {
        slot.checked_sub(1).and_then(|idx| self.params.get(idx))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Drop all parameters so the buffer can be reused for the next row.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Literal rendering of every parameter in slot order.
    pub fn literals(&self) -> Vec<String> {
        self.params.iter().map(BoundParameter::to_literal).collect()
    }

    /// Build an `INSERT` statement with literal values.
    pub fn insert_sql(&self, owner: &str, table: &str, column_names: &[&str]) -> String {
        let col_list = column_names
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {}.{} ({}) VALUES ({})",
            quote_ident(owner),
            quote_ident(table),
            col_list,
            self.literals().join(", ")
        )
    }

    /// JSON view of the buffer: slot, wire type and display value per parameter.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let repr: Vec<ParameterRepr> = self
            .params
            .iter()
            .enumerate()
            .map(|(idx, p)| ParameterRepr {
                slot: idx + 1,
                sql_type: p.sql_type().to_string(),
                value: match p {
                    BoundParameter::Null(_) => None,
                    BoundParameter::Value(v) => Some(v.to_string()),
                },
            })
            .collect();
        Ok(serde_json::to_value(repr)?)
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        let expected = self.params.len() + 1;
        if slot != expected {
            return Err(TypeMapError::statement(
                slot,
                format!("expected slot {}", expected),
            ));
        }
        Ok(())
    }
}

impl WriteStatement for ParameterBuffer {
    fn bind_null(&mut self, slot: usize, sql_type: SqlNullType) -> Result<()> {
        self.check_slot(slot)?;
        self.params.push(BoundParameter::Null(sql_type));
        Ok(())
    }

    fn bind(&mut self, slot: usize, value: BoundValue<'_>) -> Result<()> {
        self.check_slot(slot)?;
        self.params.push(BoundParameter::Value(value.into_owned()));
        Ok(())
    }
}

/// Quote an Oracle identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape a string for SQL literal use.
fn escape_sql_string(s: &str) -> String {
    s.replace('\'', "''")
}

fn bound_value_to_literal(value: &BoundValue<'_>) -> String {
    match value {
        BoundValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        BoundValue::TinyInt(n) => n.to_string(),
        BoundValue::SmallInt(n) => n.to_string(),
        BoundValue::Integer(n) => n.to_string(),
        BoundValue::BigInt(n) => n.to_string(),
        BoundValue::Float(f) => {
            if f.is_nan() {
                "BINARY_FLOAT_NAN".to_string()
            } else if f.is_infinite() {
                if f.is_sign_positive() {
                    "BINARY_FLOAT_INFINITY".to_string()
                } else {
                    "-BINARY_FLOAT_INFINITY".to_string()
                }
            } else {
                format!("{}f", f)
            }
        }
        BoundValue::Double(f) => {
            if f.is_nan() {
                "BINARY_DOUBLE_NAN".to_string()
            } else if f.is_infinite() {
                if f.is_sign_positive() {
                    "BINARY_DOUBLE_INFINITY".to_string()
                } else {
                    "-BINARY_DOUBLE_INFINITY".to_string()
                }
            } else {
                format!("{}d", f)
            }
        }
        BoundValue::Decimal(d) => d.to_string(),
        BoundValue::Date(d) => format!("DATE '{}'", d.format("%Y-%m-%d")),
        BoundValue::Timestamp(ts) => {
            format!("TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.3f"))
        }
        BoundValue::Varchar(s) => format!("'{}'", escape_sql_string(s)),
        BoundValue::Binary(b) => format!("HEXTORAW('{}')", hex::encode_upper(b)),
    }
}
