//! Traits at the boundary between the binder and the write path.
//!
//! - [`WriteStatement`]: a parameterized statement the binder writes into
//! - [`BoundValue`]: the exact scalar handed to a statement slot

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::semantic::SqlNullType;
use crate::error::Result;

/// Scalar bound to one statement parameter.
///
/// One variant per wire type with a bind rule. Borrowed text and bytes point
/// into the row being bound.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue<'a> {
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Varchar(Cow<'a, str>),
    Binary(Cow<'a, [u8]>),
}

impl BoundValue<'_> {
    /// Wire type of this value.
    #[must_use]
    pub fn sql_type(&self) -> SqlNullType {
        match self {
            BoundValue::Boolean(_) => SqlNullType::Boolean,
            BoundValue::TinyInt(_) => SqlNullType::TinyInt,
            BoundValue::SmallInt(_) => SqlNullType::SmallInt,
            BoundValue::Integer(_) => SqlNullType::Integer,
            BoundValue::BigInt(_) => SqlNullType::BigInt,
            BoundValue::Float(_) => SqlNullType::Float,
            BoundValue::Double(_) => SqlNullType::Double,
            BoundValue::Decimal(_) => SqlNullType::Decimal,
            BoundValue::Date(_) => SqlNullType::Date,
            BoundValue::Timestamp(_) => SqlNullType::Timestamp,
            BoundValue::Varchar(_) => SqlNullType::Varchar,
            BoundValue::Binary(_) => SqlNullType::Binary,
        }
    }

    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> BoundValue<'static> {
        match self {
            BoundValue::Boolean(v) => BoundValue::Boolean(v),
            BoundValue::TinyInt(v) => BoundValue::TinyInt(v),
            BoundValue::SmallInt(v) => BoundValue::SmallInt(v),
            BoundValue::Integer(v) => BoundValue::Integer(v),
            BoundValue::BigInt(v) => BoundValue::BigInt(v),
            BoundValue::Float(v) => BoundValue::Float(v),
            BoundValue::Double(v) => BoundValue::Double(v),
            BoundValue::Decimal(v) => BoundValue::Decimal(v),
            BoundValue::Date(v) => BoundValue::Date(v),
            BoundValue::Timestamp(v) => BoundValue::Timestamp(v),
            BoundValue::Varchar(v) => BoundValue::Varchar(Cow::Owned(v.into_owned())),
            BoundValue::Binary(v) => BoundValue::Binary(Cow::Owned(v.into_owned())),
        }
    }
}

impl fmt::Display for BoundValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Boolean(v) => write!(f, "{}", v),
            BoundValue::TinyInt(v) => write!(f, "{}", v),
            BoundValue::SmallInt(v) => write!(f, "{}", v),
            BoundValue::Integer(v) => write!(f, "{}", v),
            BoundValue::BigInt(v) => write!(f, "{}", v),
            BoundValue::Float(v) => write!(f, "{}", v),
            BoundValue::Double(v) => write!(f, "{}", v),
            BoundValue::Decimal(v) => write!(f, "{}", v),
            BoundValue::Date(v) => write!(f, "{}", v),
            BoundValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.3f")),
            BoundValue::Varchar(v) => write!(f, "{}", v),
            BoundValue::Binary(v) => write!(f, "0x{}", hex::encode(v)),
        }
    }
}

/// A parameterized write statement.
///
/// Slots are 1-indexed and contiguous, assigned in column order. A statement
/// instance is not assumed to be safe for concurrent use: all binder calls
/// against one instance must be serialized, in increasing slot order.
pub trait WriteStatement {
    /// Bind SQL NULL typed with the given wire type.
    fn bind_null(&mut self, slot: usize, sql_type: SqlNullType) -> Result<()>;

    /// Bind a non-null scalar.
    fn bind(&mut self, slot: usize, value: BoundValue<'_>) -> Result<()>;
}

impl<S: WriteStatement + ?Sized> WriteStatement for &mut S {
    fn bind_null(&mut self, slot: usize, sql_type: SqlNullType) -> Result<()> {
        (**self).bind_null(slot, sql_type)
    }

    fn bind(&mut self, slot: usize, value: BoundValue<'_>) -> Result<()> {
        (**self).bind(slot, value)
    }
}
