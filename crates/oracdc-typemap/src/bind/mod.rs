//! Binding row values onto write-statement parameters.
//!
//! Each [`ColumnDefinition`] drives one parameter slot. NULLs are bound with
//! the column's own wire type without looking at any conversion rule; non-null
//! values are converted to the exact scalar the column's wire type expects.
//!
//! # Representation fallbacks
//!
//! Row decoders do not always preserve integer width, so:
//!
//! - `TINYINT`/`SMALLINT` narrow any integer representation (truncating `as` casts)
//! - `INTEGER` widens `i8`/`i16`
//! - `BIGINT` widens `i32` and narrower
//!
//! Every other mismatch is a caller error and is returned as
//! [`TypeMapError::ValueMismatch`].
//!
//! # Temporal values
//!
//! `DATE` and `TIMESTAMP` take epoch milliseconds and build a naive value in
//! UTC. No timezone adjustment is performed.

mod buffer;

pub use buffer::{BoundParameter, ParameterBuffer};

use std::borrow::Cow;

use chrono::DateTime;
use tracing::{debug, warn};

use crate::core::column::ColumnDefinition;
use crate::core::semantic::SqlNullType;
use crate::core::traits::{BoundValue, WriteStatement};
use crate::core::value::{Row, SqlValue};
use crate::error::{Result, TypeMapError};

/// Bind one column of a row onto `slot`.
///
/// On error nothing is bound for this slot; earlier slots keep their values.
pub fn bind_column<S>(
    column: &ColumnDefinition,
    row: &Row<'_>,
    statement: &mut S,
    slot: usize,
) -> Result<()>
where
    S: WriteStatement + ?Sized,
{
    let value = row.get(column.name());
    let sql_type = column.sql_type();

    let bound = match sql_type {
        SqlNullType::RowId => {
            return Err(TypeMapError::unsupported_type(column.name(), sql_type));
        }
        _ if value.is_null() => {
            if !column.is_nullable() {
                warn!(
                    "NULL value for NOT NULL column {}, binding NULL {}",
                    column.name(),
                    sql_type
                );
            }
            return statement.bind_null(slot, sql_type);
        }
        SqlNullType::TinyInt => BoundValue::TinyInt(match value {
            SqlValue::I8(v) => *v,
            SqlValue::I16(v) => *v as i8,
            SqlValue::I32(v) => *v as i8,
            SqlValue::I64(v) => *v as i8,
            other => return Err(mismatch(column, "i8", other)),
        }),
        SqlNullType::SmallInt => BoundValue::SmallInt(match value {
            SqlValue::I8(v) => i16::from(*v),
            SqlValue::I16(v) => *v,
            SqlValue::I32(v) => *v as i16,
            SqlValue::I64(v) => *v as i16,
            other => return Err(mismatch(column, "i16", other)),
        }),
        SqlNullType::Integer => BoundValue::Integer(match value {
            SqlValue::I8(v) => i32::from(*v),
            SqlValue::I16(v) => i32::from(*v),
            SqlValue::I32(v) => *v,
            other => return Err(mismatch(column, "i32", other)),
        }),
        SqlNullType::BigInt => BoundValue::BigInt(match value {
            SqlValue::I64(v) => *v,
            other => match narrower_integer(other) {
                Some(v) => {
                    debug!(
                        "Widening {} value of column {} to i64",
                        other.kind_name(),
                        column.name()
                    );
                    v
                }
                None => return Err(mismatch(column, "i64", other)),
            },
        }),
        SqlNullType::Float => match value {
            SqlValue::F32(v) => BoundValue::Float(*v),
            other => return Err(mismatch(column, "f32", other)),
        },
        SqlNullType::Double => match value {
            SqlValue::F64(v) => BoundValue::Double(*v),
            other => return Err(mismatch(column, "f64", other)),
        },
        SqlNullType::Decimal => match value {
            SqlValue::Decimal(v) => BoundValue::Decimal(*v),
            other => return Err(mismatch(column, "decimal", other)),
        },
        SqlNullType::Date => {
            let millis = epoch_millis(column, value)?;
            let dt = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                TypeMapError::InvalidTimestamp {
                    column: column.name().to_string(),
                    millis,
                }
            })?;
            BoundValue::Date(dt.date_naive())
        }
        SqlNullType::Timestamp => {
            let millis = epoch_millis(column, value)?;
            let dt = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                TypeMapError::InvalidTimestamp {
                    column: column.name().to_string(),
                    millis,
                }
            })?;
            BoundValue::Timestamp(dt.naive_utc())
        }
        SqlNullType::Varchar => match value {
            SqlValue::Text(s) => BoundValue::Varchar(Cow::Borrowed(s.as_ref())),
            other => return Err(mismatch(column, "text", other)),
        },
        SqlNullType::Binary => match value {
            SqlValue::Bytes(b) => BoundValue::Binary(Cow::Borrowed(b.as_ref())),
            other => return Err(mismatch(column, "bytes", other)),
        },
        SqlNullType::Boolean => match value {
            SqlValue::Bool(v) => BoundValue::Boolean(*v),
            other => return Err(mismatch(column, "bool", other)),
        },
    };

    statement.bind(slot, bound)
}

/// Bind every column of a row, in column order, onto slots `1..=columns.len()`.
///
/// Returns the number of slots bound. Stops at the first error; slots bound
/// before the failure are left as they are.
pub fn bind_row<S>(columns: &[ColumnDefinition], row: &Row<'_>, statement: &mut S) -> Result<usize>
where
    S: WriteStatement + ?Sized,
{
    for (idx, column) in columns.iter().enumerate() {
        bind_column(column, row, statement, idx + 1)?;
    }
    Ok(columns.len())
}

fn epoch_millis(column: &ColumnDefinition, value: &SqlValue<'_>) -> Result<i64> {
    match value {
        SqlValue::I64(v) => Ok(*v),
        other => Err(mismatch(column, "i64 epoch milliseconds", other)),
    }
}

fn narrower_integer(value: &SqlValue<'_>) -> Option<i64> {
    match value {
        SqlValue::I32(v) => Some(i64::from(*v)),
        SqlValue::I16(v) => Some(i64::from(*v)),
        SqlValue::I8(v) => Some(i64::from(*v)),
        _ => None,
    }
}

fn mismatch(column: &ColumnDefinition, expected: &str, found: &SqlValue<'_>) -> TypeMapError {
    TypeMapError::value_mismatch(column.name(), expected, found.kind_name())
}
