//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::dialect::NumericPolicy;
use crate::discovery::{DiscoveryOptions, SchemaMode};

/// Root configuration structure.
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Type classifier settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Schema emission settings.
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Config {
    /// Discovery options described by this configuration.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            numeric_policy: self.classifier.numeric_policy,
            mode: self.schema.mode,
            topic_prefix: self.schema.topic_prefix.clone(),
            use_row_id: self.schema.use_row_id,
        }
    }
}

/// Type classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Precision table for scale-0 NUMBER columns (default: schema_builder).
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
}

/// Schema emission configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Representation produced by discovery (default: connect).
    #[serde(default)]
    pub mode: SchemaMode,

    /// Prefix for key/value schema names (default: empty).
    #[serde(default)]
    pub topic_prefix: String,

    /// Synthesize the row-identity key for tables without a primary key
    /// (default: true).
    #[serde(default = "default_true")]
    pub use_row_id: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            mode: SchemaMode::default(),
            topic_prefix: String::new(),
            use_row_id: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.classifier.numeric_policy, NumericPolicy::SchemaBuilder);
        assert_eq!(config.schema.mode, SchemaMode::Connect);
        assert!(config.schema.use_row_id);
    }

    #[test]
    fn test_partial_section() {
        let yaml = r#"
schema:
  topic_prefix: "cdc."
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schema.topic_prefix, "cdc.");
        assert!(config.schema.use_row_id);
        assert_eq!(config.schema.mode, SchemaMode::Connect);
    }

    #[test]
    fn test_discovery_options() {
        let yaml = r#"
classifier:
  numeric_policy: standalone
schema:
  mode: self_describing
  use_row_id: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let opts = config.discovery_options();
        assert_eq!(opts.numeric_policy, NumericPolicy::Standalone);
        assert_eq!(opts.mode, SchemaMode::SelfDescribing);
        assert!(!opts.use_row_id);
        assert!(opts.topic_prefix.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "schema:\n  topic: x\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
