//! Session provider and session persistence
//!
//! The catalog only ever looks at the role of a session. Tokens are issued
//! and checked here and are opaque everywhere else.

use tracing::{info, warn};

use crate::db::KeyValueStore;
use crate::models::{Credentials, Role, Session};
use crate::utils::auth::{
    create_jwt, validate_email, verify_jwt, AuthError, Claims, MIN_PASSWORD_LEN,
};

/// Default storage key for the saved session
pub const SESSION_KEY: &str = "yapple_auth";

/// Turns credentials into a session
pub trait SessionProvider {
    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Issues signed tokens locally, no account database involved
#[derive(Debug, Clone)]
pub struct LocalSessionProvider {
    secret: String,
    ttl_secs: u64,
}

impl LocalSessionProvider {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    /// Check a token issued by this provider
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        verify_jwt(token, &self.secret)
    }

    /// Check a restored session still carries a valid token for its own role
    pub fn validate(&self, session: &Session) -> Result<Role, AuthError> {
        let claims = self.verify(&session.token)?;
        if claims.sub != session.email || claims.role != session.role {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(claims.role)
    }
}

impl SessionProvider for LocalSessionProvider {
    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials.email.trim();
        validate_email(email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidPassword);
        }

        let token = create_jwt(email, credentials.role, &self.secret, self.ttl_secs)?;
        info!("Session issued for {} as {}", email, credentials.role);

        Ok(Session {
            email: email.to_string(),
            role: credentials.role,
            token,
        })
    }
}

/// Keeps the current session in a key-value store between runs
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The saved session, `None` when absent or unreadable
    pub fn load(&self) -> Option<Session> {
        let bytes = match self.store.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read saved session: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Failed to parse saved session: {}", e);
                None
            }
        }
    }

    pub fn save(&mut self, session: &Session) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec(session)?;
        self.store.set(&self.key, &bytes)?;
        Ok(())
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.store.remove(&self.key)?;
        info!("Session cleared");
        Ok(())
    }
}
