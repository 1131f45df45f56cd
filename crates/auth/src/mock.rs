//! In-memory session provider
//!
//! Keeps accounts in a map keyed by lowercased email, with passwords stored
//! as salted hashes. Used by the mock composition root and by tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use fitroom_common::{hash_secret, verify_secret_hash};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{AuthError, SessionProvider, User, MIN_PASSWORD_LEN};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<User>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts
    pub fn account_count(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn set_current(&self, user: Option<User>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait::async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let key = normalize_email(email);
        let account = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();

        let user = match account {
            Some(account) if verify_secret_hash(password, &account.password_hash) => account.user,
            _ => {
                tracing::warn!(email = %key, "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        tracing::info!(user_id = %user.id, "User signed in");
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        Ok(())
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        let key = normalize_email(email);
        if !key.validate_email() {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let password_hash = hash_secret(password).map_err(|e| AuthError::Provider(e.to_string()))?;
        let user = User {
            id: Uuid::new_v4(),
            email: key.clone(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };

        {
            let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailTaken(key));
            }
            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    password_hash,
                },
            );
        }

        tracing::info!(user_id = %user.id, "Registered user");
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn current(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
