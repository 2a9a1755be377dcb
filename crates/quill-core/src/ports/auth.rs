//! Authentication ports: login sessions and password hashing.

use uuid::Uuid;

/// Claims carried by a verified session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub remember: bool,
    pub exp: i64,
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub value: String,
    /// Cookie lifetime in seconds. `None` means a browser-session cookie.
    pub max_age: Option<i64>,
}

/// Issues and verifies the tokens stored in the session cookie.
pub trait SessionService: Send + Sync {
    /// Start a session for a user. `remember` selects the long-lived variant.
    fn issue_session(&self, user_id: Uuid, remember: bool) -> Result<SessionToken, AuthError>;

    /// Verify a token taken from a cookie.
    fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
