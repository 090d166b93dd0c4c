//! Downstream schema representations.
//!
//! - [`connect`]: structured key/value builders (Kafka Connect `SchemaBuilder` style)
//! - [`field`]: self-describing per-field schemas
//! - [`emit`]: projection of a classified column onto either representation

pub mod connect;
pub mod emit;
pub mod field;

pub use connect::{ConnectField, ConnectSchema, KeyValueBuilders, SchemaBuilder};
pub use emit::{emit_connect, emit_field};
pub use field::FieldSchema;
