use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project-local adapter files.
pub const CONFIG_DIR: &str = ".deno-deploy";

/// Prefix of environment variable overrides, e.g. `DENO_DEPLOY_RETRY__MAX_ATTEMPTS`.
pub const ENV_PREFIX: &str = "DENO_DEPLOY_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base_url: '{0}'. Must be an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_attempts: {0}. Cannot be 0")]
    InvalidMaxAttempts(u32),

    #[error("Invalid base_delay_ms: {0}. Cannot be 0")]
    InvalidBaseDelay(u64),

    #[error("Invalid backoff configuration: base_delay_ms ({0}) must not exceed max_delay_ms ({1})")]
    InvalidBackoff(u64, u64),

    #[error("Invalid {0}: must be at least 1")]
    InvalidPageSize(&'static str),

    #[error("Invalid trigger window_size: {0}. Must be at least 1")]
    InvalidWindowSize(u32),

    #[error("Invalid trigger interval_secs: {0}. Must be at least 1")]
    InvalidInterval(u64),

    #[error("Invalid trigger default_event: {0}")]
    InvalidEvent(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .deno-deploy/config.yaml (project config)
    /// 3. .deno-deploy/local.yaml (local overrides, optional)
    /// 4. Environment variables (DENO_DEPLOY_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(config.api.base_url.clone()));
        }
        if config.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.api.timeout_secs));
        }

        if config.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(config.retry.max_attempts));
        }
        if config.retry.base_delay_ms == 0 {
            return Err(ConfigError::InvalidBaseDelay(config.retry.base_delay_ms));
        }
        if config.retry.base_delay_ms > config.retry.max_delay_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.base_delay_ms,
                config.retry.max_delay_ms,
            ));
        }

        if config.pagination.page_size == 0 {
            return Err(ConfigError::InvalidPageSize("page_size"));
        }
        if config.pagination.cursor_page_size == 0 {
            return Err(ConfigError::InvalidPageSize("cursor_page_size"));
        }
        if config.pagination.max_cursor_pages == 0 {
            return Err(ConfigError::InvalidPageSize("max_cursor_pages"));
        }

        if config.trigger.window_size == 0 {
            return Err(ConfigError::InvalidWindowSize(config.trigger.window_size));
        }
        if config.trigger.interval_secs == 0 {
            return Err(ConfigError::InvalidInterval(config.trigger.interval_secs));
        }
        if crate::domain::models::event::EventFilter::from_str(&config.trigger.default_event)
            .is_none()
        {
            return Err(ConfigError::InvalidEvent(config.trigger.default_event.clone()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::DEFAULT_BASE_URL;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 1000);
        assert_eq!(config.retry.max_delay_ms, 60_000);
        assert_eq!(config.pagination.page_size, 100);
        assert_eq!(config.pagination.max_cursor_pages, 1000);
        assert_eq!(config.trigger.window_size, 10);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
api:
  base_url: http://localhost:8080/v1
  timeout_secs: 5
retry:
  max_attempts: 2
trigger:
  window_size: 25
  default_event: deployment.any
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.api.base_url, "http://localhost:8080/v1");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.base_delay_ms, 1000, "unset fields keep defaults");
        assert_eq!(config.trigger.window_size, 25);
        assert_eq!(config.trigger.interval_secs, 60);
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "api.deno.com".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validate_zero_max_attempts() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxAttempts(0))
        ));
    }

    #[test]
    fn test_validate_invalid_backoff() {
        let mut config = Config::default();
        config.retry.base_delay_ms = 30_000;
        config.retry.max_delay_ms = 10_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(30_000, 10_000))
        ));
    }

    #[test]
    fn test_validate_zero_page_sizes() {
        let mut config = Config::default();
        config.pagination.cursor_page_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPageSize("cursor_page_size"))
        ));
    }

    #[test]
    fn test_validate_trigger() {
        let mut config = Config::default();
        config.trigger.window_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidWindowSize(0))
        ));

        let mut config = Config::default();
        config.trigger.default_event = "deployment.deleted".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("DENO_DEPLOY_RETRY__MAX_ATTEMPTS", Some("7")),
                ("DENO_DEPLOY_TRIGGER__WINDOW_SIZE", Some("20")),
                ("DENO_DEPLOY_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load().expect("config should load");
                assert_eq!(config.retry.max_attempts, 7);
                assert_eq!(config.trigger.window_size, 20);
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_env_override_is_validated() {
        temp_env::with_var("DENO_DEPLOY_PAGINATION__PAGE_SIZE", Some("0"), || {
            assert!(ConfigLoader::load().is_err());
        });
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "retry:\n  max_attempts: 3\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "retry:\n  max_attempts: 8\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.retry.max_attempts, 8, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pagination:\n  max_cursor_pages: 3").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.pagination.max_cursor_pages, 3);
        assert_eq!(config.pagination.page_size, 100);
    }
}
