//! Fitroom session provider
//!
//! Tracks which user is signed in on this client:
//! - `SessionProvider` trait for login, logout and registration
//! - In-memory provider for development and tests
//! - Configurable provider selection from the environment

mod config;
mod error;
pub mod mock;
mod types;

pub use config::SessionConfig;
pub use error::AuthError;
pub use mock::InMemorySessionProvider;
pub use types::User;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Session provider trait for different identity backends
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Sign in with email and password
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Sign out; a no-op when nobody is signed in
    async fn logout(&self) -> Result<(), AuthError>;

    /// Create an account and sign it in
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError>;

    /// The signed-in user, if any
    async fn current(&self) -> Option<User>;
}

/// Factory for creating SessionProvider implementations
pub struct SessionProviderFactory;

impl SessionProviderFactory {
    pub fn create(config: SessionConfig) -> Result<Box<dyn SessionProvider>, AuthError> {
        match config.provider.as_str() {
            "mock" => {
                tracing::info!("Creating in-memory session provider");
                Ok(Box::new(InMemorySessionProvider::new()))
            }
            provider => Err(AuthError::Configuration(format!(
                "Unknown session provider: {}. Supported providers: mock",
                provider
            ))),
        }
    }
}
