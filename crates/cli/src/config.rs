use persistence::ConnectionConfig;
use serde::Deserialize;
use shared::validation::validate_database_name;

/// Built-in defaults, applied beneath every other source.
const DEFAULTS: &str = r#"
    [database]
    host = "localhost"
    port = 5432
    user = "postgres"
    password = ""
    admin_database = "postgres"
    name = "client_db"

    [logging]
    level = "info"
    format = "pretty"
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: ConnectionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` or `pretty`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. built-in defaults
    /// 2. config/default.toml (optional)
    /// 3. config/local.toml - local overrides (optional, not in git)
    /// 4. Environment variables with CLIENTS__ prefix
    /// 5. `overrides`, keyed like `database.user`
    pub fn load(overrides: &[(&str, String)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CLIENTS").separator("__"));

        for (key, value) in overrides {
            builder = builder.set_override(*key, value.clone())?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Uses only the built-in defaults and the overrides, without config files
    /// or the environment.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.user.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CLIENTS__DATABASE__USER must not be empty".to_string(),
            ));
        }

        if validate_database_name(&self.database.name).is_err() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "database.name '{}' is not a plain identifier",
                self.database.name
            )));
        }

        if self.database.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Database port cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}
