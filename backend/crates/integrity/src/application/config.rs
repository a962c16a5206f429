//! Application Configuration

use std::time::Duration;

/// Edge-function client configuration
#[derive(Debug, Clone)]
pub struct EdgeClientConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Bearer key sent with every call
    pub api_key: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for EdgeClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl EdgeClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Local functions runtime with a short timeout
    pub fn development() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            api_key: "dev-anon-key".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_timeout() {
        let config = EdgeClientConfig::new("https://example.test", "key");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_with_timeout() {
        let config = EdgeClientConfig::development().with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.base_url.starts_with("http://127.0.0.1"));
    }
}
