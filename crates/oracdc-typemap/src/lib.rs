//! # oracdc-typemap
//!
//! Type mapping and value binding for Oracle change-data-capture pipelines.
//!
//! This library turns Oracle catalog metadata into downstream schemas and
//! binds captured row values onto parameterized write statements:
//!
//! - **Classification** of Oracle column types into a closed semantic type set
//! - **Schema emission** as Kafka Connect key/value schemas or as
//!   self-describing per-field schemas
//! - **Reverse classification** of self-describing schemas on the sink side
//! - **Value binding** with explicit, typed conversions per wire type
//!
//! ## Example
//!
//! ```rust
//! use oracdc_typemap::{
//!     CatalogColumn, DiscoveryOptions, ParameterBuffer, Row, TableDefinition,
//! };
//!
//! # fn main() -> oracdc_typemap::Result<()> {
//! let rows = vec![
//!     CatalogColumn::new("DEPTNO", "NUMBER")
//!         .with_precision(Some(2), Some(0))
//!         .not_null()
//!         .primary_key(),
//!     CatalogColumn::new("DNAME", "VARCHAR2"),
//! ];
//! let table = TableDefinition::discover("SCOTT", "DEPT", rows, &DiscoveryOptions::default())?;
//!
//! let row = Row::new().with("DEPTNO", 10i32).with("DNAME", "ACCOUNTING");
//! let mut statement = ParameterBuffer::new();
//! table.bind_row(&row, &mut statement)?;
//! assert_eq!(statement.literals(), vec!["10", "'ACCOUNTING'"]);
//! # Ok(())
//! # }
//! ```

pub mod bind;
pub mod config;
pub mod core;
pub mod dialect;
pub mod discovery;
pub mod error;
pub mod schema;

// Re-exports for convenient access
pub use bind::{bind_column, bind_row, BoundParameter, ParameterBuffer};
pub use config::{ClassifierConfig, Config, SchemaConfig};
pub use self::core::{
    BoundValue, CatalogColumn, ColumnDefinition, ColumnTypeInfo, EmitTarget, LogicalType,
    PhysicalKind, Row, SemanticType, SqlNullType, SqlValue, WireType, WriteStatement, ROWID_KEY,
};
pub use dialect::{classify, reverse_classify, Classification, NumericPolicy};
pub use discovery::{DiscoveryOptions, SchemaMode, TableDefinition};
pub use error::{Result, TypeMapError};
pub use schema::{ConnectSchema, FieldSchema, KeyValueBuilders, SchemaBuilder};
