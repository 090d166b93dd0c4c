//! Oracle type classification in both directions.
//!
//! - [`classify`]: catalog metadata → [`SemanticType`](crate::core::SemanticType)
//! - [`reverse_classify`]: self-describing field schema → semantic type
//!
//! # Numeric policies
//!
//! Two precision tables exist for scale-0 `NUMBER` columns and the caller
//! picks one with [`NumericPolicy`]. They agree up to `Int32` and differ
//! above it:
//!
//! | precision | `SchemaBuilder` | `Standalone` |
//! |-----------|-----------------|--------------|
//! | 10..=18   | Int64           | Int64        |
//! | >= 19     | Decimal(0)      | Int64        |
//!
//! `Standalone` also reads a zero precision as an unconstrained `NUMBER`.

mod classify;
mod reverse;

pub use classify::{classify, Classification};
pub use reverse::reverse_classify;

use serde::{Deserialize, Serialize};

/// Precision table used for scale-0 `NUMBER` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Table used when building Kafka Connect schemas: 19+ digits become Decimal(0).
    #[default]
    SchemaBuilder,

    /// Table used by the standalone converter: everything from 10 digits is Int64.
    Standalone,
}

impl std::fmt::Display for NumericPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericPolicy::SchemaBuilder => write!(f, "schema_builder"),
            NumericPolicy::Standalone => write!(f, "standalone"),
        }
    }
}

impl std::str::FromStr for NumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "schema_builder" => Ok(NumericPolicy::SchemaBuilder),
            "standalone" => Ok(NumericPolicy::Standalone),
            other => Err(format!(
                "unknown numeric policy '{}', expected schema_builder or standalone",
                other
            )),
        }
    }
}
