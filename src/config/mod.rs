//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CIRCULARITY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use circularity_tradeoffs::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading model from {}", config.io.model_path.display());
//! ```

mod error;
mod io;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use io::IoConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Dataset-specific settings (regions, indicators, scenarios) belong in the
/// analysis plan, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model, plan and output locations
    #[serde(default)]
    pub io: IoConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CIRCULARITY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CIRCULARITY__IO__MODEL_PATH=data/model.json` -> `io.model_path`
    /// - `CIRCULARITY__LOGGING__JSON=true` -> `logging.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CIRCULARITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for empty paths, an output path that is a
    /// file, or an unparsable log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.io.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CIRCULARITY__IO__MODEL_PATH");
        env::remove_var("CIRCULARITY__IO__OUTPUT_DIR");
        env::remove_var("CIRCULARITY__LOGGING__JSON");
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.io.plan_path, PathBuf::from("plan.yaml"));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIRCULARITY__IO__MODEL_PATH", "data/exio.json");
        env::set_var("CIRCULARITY__IO__OUTPUT_DIR", "out");
        env::set_var("CIRCULARITY__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.io.model_path, PathBuf::from("data/exio.json"));
        assert_eq!(config.io.output_dir, PathBuf::from("out"));
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
