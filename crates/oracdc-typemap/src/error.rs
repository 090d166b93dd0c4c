//! Error types for the type-mapping library.

use thiserror::Error;

use crate::core::SqlNullType;

/// Exit code for configuration and schema errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for value binding errors.
pub const EXIT_BIND_ERROR: u8 = 2;
/// Exit code for IO errors (missing files, etc.).
pub const EXIT_IO_ERROR: u8 = 7;
/// Exit code for malformed YAML/JSON input.
pub const EXIT_PARSE_ERROR: u8 = 8;

/// Main error type for type mapping and binding operations.
///
/// Classification and schema emission never fail; every binding variant is
/// fatal to the current row's bind sequence and is not retried.
#[derive(Error, Debug)]
pub enum TypeMapError {
    /// Configuration error (invalid values, unknown policy, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The column's wire type has no bind rule.
    #[error("Unsupported data type {sql_type} for column {column}")]
    UnsupportedType {
        column: String,
        sql_type: SqlNullType,
    },

    /// The row value's representation does not match the column's semantic type.
    #[error("Value for column {column} has representation {found}, expected {expected}")]
    ValueMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Epoch offset outside the range chrono can represent.
    #[error("Epoch offset {millis} for column {column} is out of range")]
    InvalidTimestamp { column: String, millis: i64 },

    /// A row value could not be decoded from its serialized form.
    #[error("Cannot decode value for column {column}: {message}")]
    ValueDecode { column: String, message: String },

    /// Table schema is inconsistent (duplicate columns, etc.)
    #[error("Schema error: {0}")]
    Schema(String),

    /// The write statement rejected a parameter.
    #[error("Write statement error at slot {slot}: {message}")]
    Statement { slot: usize, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TypeMapError {
    /// Create an UnsupportedType error for a column.
    pub fn unsupported_type(column: impl Into<String>, sql_type: SqlNullType) -> Self {
        TypeMapError::UnsupportedType {
            column: column.into(),
            sql_type,
        }
    }

    /// Create a ValueMismatch error.
    pub fn value_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        TypeMapError::ValueMismatch {
            column: column.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a ValueDecode error.
    pub fn value_decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        TypeMapError::ValueDecode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a Statement error for a parameter slot.
    pub fn statement(slot: usize, message: impl Into<String>) -> Self {
        TypeMapError::Statement {
            slot,
            message: message.into(),
        }
    }

    /// Whether this error came out of the value binder.
    pub fn is_bind_error(&self) -> bool {
        matches!(
            self,
            TypeMapError::UnsupportedType { .. }
                | TypeMapError::ValueMismatch { .. }
                | TypeMapError::InvalidTimestamp { .. }
                | TypeMapError::ValueDecode { .. }
                | TypeMapError::Statement { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            TypeMapError::Config(_) | TypeMapError::Schema(_) => EXIT_CONFIG_ERROR,
            TypeMapError::Io(_) => EXIT_IO_ERROR,
            TypeMapError::Yaml(_) | TypeMapError::Json(_) => EXIT_PARSE_ERROR,
            _ => EXIT_BIND_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for type mapping operations.
pub type Result<T> = std::result::Result<T, TypeMapError>;
