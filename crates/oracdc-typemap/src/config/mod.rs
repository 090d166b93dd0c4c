//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document is accepted and yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::NumericPolicy;
    use crate::error::TypeMapError;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "classifier:\n  numeric_policy: standalone").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.classifier.numeric_policy, NumericPolicy::Standalone);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/oracdc.yaml").unwrap_err();
        assert!(matches!(err, TypeMapError::Io(_)));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_and_invalid_values() {
        let err = Config::from_yaml("classifier: [").unwrap_err();
        assert!(matches!(err, TypeMapError::Yaml(_)));

        let err = Config::from_yaml("classifier:\n  numeric_policy: wide\n").unwrap_err();
        assert!(matches!(err, TypeMapError::Yaml(_)));

        let err = Config::from_yaml("schema:\n  topic_prefix: \"a b\"\n").unwrap_err();
        assert!(matches!(err, TypeMapError::Config(_)));
    }
}
