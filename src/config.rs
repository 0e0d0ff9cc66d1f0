use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub namespace: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    /// JSON array of recipes standing in for the recipe backend
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u16,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

fn default_window_days() -> u16 {
    7
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALBOOK__STORAGE__DATA_DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("storage.data_dir", "./data")?
            .set_default("storage.namespace", "mealbook")?
            .set_default("recipes.path", "./data/recipes.json")?
            .set_default("observability.log_level", "info")?
            .set_default("plan.window_days", 7)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALBOOK")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err("Storage data_dir must not be empty".to_string());
        }
        if self.storage.namespace.trim().is_empty() {
            return Err("Storage namespace must not be empty".to_string());
        }
        if !(1..=31).contains(&self.plan.window_days) {
            return Err("Plan window_days must be between 1 and 31".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            storage: StorageConfig {
                data_dir: PathBuf::from("./data"),
                namespace: "mealbook".to_string(),
            },
            recipes: RecipesConfig {
                path: PathBuf::from("./data/recipes.json"),
            },
            observability: ObservabilityConfig::default(),
            plan: PlanConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_namespace() {
        let mut config = config();
        config.storage.namespace = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_data_dir() {
        let mut config = config();
        config.storage.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_window_out_of_range() {
        let mut config = config();
        config.plan.window_days = 0;
        assert!(config.validate().is_err());
        config.plan.window_days = 32;
        assert!(config.validate().is_err());
        config.plan.window_days = 14;
        assert!(config.validate().is_ok());
    }
}
