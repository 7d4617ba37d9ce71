//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using
//! the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CAMPUS_HUB_` prefix and nested values use underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use campus_hub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Enrichment model: {}", config.ai.model);
//! ```

mod ai;
mod error;
mod session;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the campus hub client.
/// Load using [`AppConfig::load()`] which reads from environment
/// variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI enrichment provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Session bootstrap configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAMPUS_HUB` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CAMPUS_HUB__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `CAMPUS_HUB__AI__MODEL=...` -> `ai.model = ...`
    /// - `CAMPUS_HUB__SESSION__SEED_DEMO_DATA=false` -> `session.seed_demo_data = false`
    ///
    /// Every section has defaults, so an empty environment yields a
    /// valid configuration running against the mock provider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAMPUS_HUB")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CAMPUS_HUB__AI__GEMINI_API_KEY");
        env::remove_var("CAMPUS_HUB__AI__MODEL");
        env::remove_var("CAMPUS_HUB__AI__TIMEOUT_SECS");
        env::remove_var("CAMPUS_HUB__SESSION__SEED_DEMO_DATA");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(!config.ai.has_gemini());
        assert!(config.session.seed_demo_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_api_key_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAMPUS_HUB__AI__GEMINI_API_KEY", "test-key");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_gemini());
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_custom_model_and_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAMPUS_HUB__AI__MODEL", "gemini-3-pro");
        env::set_var("CAMPUS_HUB__AI__TIMEOUT_SECS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gemini-3-pro");
        assert_eq!(config.ai.timeout_secs, 5);
    }

    #[test]
    fn test_seed_flag_can_be_disabled() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAMPUS_HUB__SESSION__SEED_DEMO_DATA", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.session.seed_demo_data);
    }
}
