//! Schema emission for classified columns.
//!
//! Both emitters start from [`ColumnDefinition::wire_type`], so the structured
//! builders and the self-describing schemas always describe a column the same
//! way. Emission never fails.

use crate::core::column::ColumnDefinition;

use super::connect::KeyValueBuilders;
use super::field::FieldSchema;

/// Register a column in the key or value builder.
///
/// Non-nullable primary-key columns go to the key schema; every other column
/// goes to the value schema.
pub fn emit_connect(column: &ColumnDefinition, builders: &mut KeyValueBuilders) {
    let wire_type = column.wire_type();
    if column.is_key_member() {
        builders.key.field(column.name(), wire_type);
    } else {
        builders.value.field(column.name(), wire_type);
    }
}

/// Self-describing field schema for a column.
pub fn emit_field(column: &ColumnDefinition) -> FieldSchema {
    FieldSchema::new(column.name(), column.wire_type())
}
