//! Session provider configuration

/// Session provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub provider: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create session config from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("SESSION_PROVIDER")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "mock".to_string());

        Self { provider }
    }
}
