//! Core types shared by the classifier, the schema emitters and the binder.
//!
//! - [`semantic`]: the closed semantic type tag and its wire projections
//! - [`catalog`]: catalog metadata rows consumed during discovery
//! - [`column`]: the immutable column definition
//! - [`value`]: tagged row values produced by the row decoder
//! - [`traits`]: the write-statement seam used by the binder

pub mod catalog;
pub mod column;
pub mod semantic;
pub mod traits;
pub mod value;

// Re-export commonly used types for convenience
pub use catalog::{CatalogColumn, ColumnTypeInfo};
pub use column::{ColumnDefinition, EmitTarget, ROWID_KEY};
pub use semantic::{LogicalType, PhysicalKind, SemanticType, SqlNullType, WireType};
pub use traits::{BoundValue, WriteStatement};
pub use value::{Row, SqlValue};
