use super::{
    evolution::EvolutionConfig,
    logging::LoggingConfig,
    traits::ConfigSection,
};
use crate::error::EvoError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvoError> {
        self.evolution.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, EvoError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| EvoError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, EvoError> {
        toml::to_string_pretty(self)
            .map_err(|e| EvoError::Configuration(format!("Failed to serialize: {}", e)))
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EvoError::Configuration(format!("Failed to read config: {}", e)))?;

        let config = AppConfig::from_toml_str(&contents)?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoError> {
        let toml_str = self.get().to_toml_string()?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvoError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Applies `f` to a copy and commits it only if the result validates
    pub fn update<F>(&self, f: F) -> Result<(), EvoError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [evolution]
            population_size = 40
            generations = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.evolution.population_size, 40);
        assert_eq!(config.evolution.generations, 10);
        assert_eq!(config.evolution.tournament_size, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_toml_values_are_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [evolution]
            mutant_prob = 2.0
            "#,
        );
        assert!(matches!(result, Err(EvoError::Configuration(_))));
    }

    #[test]
    fn update_keeps_previous_config_on_failure() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.population_size = 0);

        assert!(result.is_err());
        assert_eq!(manager.get().evolution.population_size, 300);

        manager.update(|c| c.evolution.population_size = 12).unwrap();
        assert_eq!(manager.get().evolution.population_size, 12);
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.evolution.seed, Some(64));
    }
}
