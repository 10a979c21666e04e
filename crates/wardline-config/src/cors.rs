use crate::env_lookup;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("CLIENT_URL")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_url() {
        let config = CorsConfig::from_lookup(|_| None);
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn splits_comma_separated_origins() {
        let config = CorsConfig::from_lookup(|_| {
            Some("https://app.wardline.io, https://admin.wardline.io,,".to_string())
        });
        assert_eq!(
            config.allowed_origins,
            vec!["https://app.wardline.io", "https://admin.wardline.io"]
        );
    }
}
