use crate::errors::GatewayResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration struct for the analysis gateway
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model_name: Option<String>,
    pub log_level: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: Some("https://api.openai.com/v1".to_string()),
            model_name: Some("gpt-4o".to_string()),
            log_level: None,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> GatewayResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                crate::errors::GatewayError::ConfigError(format!(
                    "Failed to read config file: {}",
                    e
                ))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                crate::errors::GatewayError::ConfigError(format!(
                    "Failed to parse config file: {}",
                    e
                ))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> GatewayResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            crate::errors::GatewayError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::errors::GatewayError::ConfigError(format!(
                    "Failed to create config directory: {}",
                    e
                ))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            crate::errors::GatewayError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            api_base: other.api_base.clone().or_else(|| self.api_base.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Loads the effective configuration: defaults, overlaid with the config
    /// file, overlaid with environment variables.
    pub fn load() -> Self {
        let mut config = get_default_config_file("mealroast")
            .and_then(|path| Self::load_from_file(&path))
            .unwrap_or_default();

        if let Ok(key) = std::env::var("MEALROAST_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(base) = std::env::var("MEALROAST_API_BASE") {
            config.api_base = Some(base);
        }
        if let Ok(model) = std::env::var("MEALROAST_MODEL") {
            config.model_name = Some(model);
        }

        config
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> GatewayResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        crate::errors::GatewayError::ConfigError("Could not determine home directory".to_string())
    })?;

    let config_dir = home_dir.join(".config").join(app_name);

    Ok(config_dir)
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> GatewayResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}
