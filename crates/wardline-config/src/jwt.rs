use crate::{env_lookup, parse_or};

pub const DEFAULT_JWT_SECRET: &str = "wardline-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            access_token_expiry: parse_or(&lookup, "JWT_EXPIRY", 86400), // 1 day
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = JwtConfig::from_lookup(|_| None);
        assert_eq!(config.access_token_expiry, 86400);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn reads_secret_and_expiry() {
        let config = JwtConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_EXPIRY" => Some("3600".to_string()),
            _ => None,
        });
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 3600);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn unparsable_expiry_falls_back() {
        let config = JwtConfig::from_lookup(|key| (key == "JWT_EXPIRY").then(|| "1d".to_string()));
        assert_eq!(config.access_token_expiry, 86400);
    }
}
