use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Upper bound on a single metadata fetch, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Length of generated feature vectors
    #[serde(default = "default_feature_dimension")]
    pub feature_dimension: usize,

    /// Seed for feature vector generation. Random when unset.
    #[serde(default)]
    pub feature_seed: Option<u64>,

    /// Seed for the trending sampler. Random when unset.
    #[serde(default)]
    pub trending_seed: Option<u64>,

    /// JSON catalog file. The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Number of recommendations returned when the request does not say
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    4000
}

fn default_feature_dimension() -> usize {
    5
}

fn default_k() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![("OMDB_API_KEY".to_string(), "abc123".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.omdb_api_key, "abc123");
        assert_eq!(config.omdb_api_url, "http://www.omdbapi.com");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(4));
        assert_eq!(config.feature_dimension, 5);
        assert_eq!(config.feature_seed, None);
        assert_eq!(config.default_k, 5);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_seed_parsed() {
        let vars = vec![
            ("OMDB_API_KEY".to_string(), "abc123".to_string()),
            ("FEATURE_SEED".to_string(), "42".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.feature_seed, Some(42));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let vars: Vec<(String, String)> = vec![];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
