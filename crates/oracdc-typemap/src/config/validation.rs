//! Configuration validation.

use super::Config;
use crate::error::{Result, TypeMapError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Schema names become topic names downstream
    if let Some(c) = config
        .schema
        .topic_prefix
        .chars()
        .find(|c| !is_topic_char(*c))
    {
        return Err(TypeMapError::Config(format!(
            "schema.topic_prefix contains invalid character {:?}",
            c
        )));
    }

    Ok(())
}

fn is_topic_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
