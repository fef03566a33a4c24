use super::traits::ConfigSection;
use crate::error::EvoError;
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter for env_logger when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConfigSection for LoggingConfig {
    fn section_name() -> &'static str {
        "logging"
    }

    fn validate(&self) -> Result<(), EvoError> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(EvoError::Configuration(format!(
                "Unknown log level '{}', expected one of {:?}",
                self.level, LEVELS
            )));
        }
        Ok(())
    }
}
