use crate::{env_lookup, parse_or};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        }
    }

    pub fn is_development(&self) -> bool {
        *self == AppEnv::Development
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub app_env: AppEnv,
    pub metrics_enabled: bool,
    /// Fallback log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for rotated JSON logs. Unset disables file logging.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_or(&lookup, "PORT", 5000),
            app_env: lookup("APP_ENV")
                .map(|v| AppEnv::parse(&v))
                .unwrap_or(AppEnv::Development),
            metrics_enabled: parse_or(&lookup, "METRICS_ENABLED", true),
            log_level: lookup("LOG_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()),
        }
    }
}
