//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, SessionService, UserRepository};
use quill_infra::{Argon2PasswordService, InMemoryDatabase, JwtSessionService};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use quill_infra::{PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<dyn SessionService>,
    pub secure_cookies: bool,
}

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[cfg(feature = "postgres")]
    #[error("database connection failed: {0}")]
    Database(#[from] quill_core::error::RepoError),

    #[error("password hasher misconfigured: {0}")]
    Hasher(#[from] quill_core::ports::AuthError),
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StateError> {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::from_env()?);
        let sessions: Arc<dyn SessionService> =
            Arc::new(JwtSessionService::new(config.session.clone()));

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                let conn = quill_infra::connect(db_config).await?;
                tracing::info!("Application state initialized (postgres)");
                return Ok(Self {
                    users: Arc::new(PostgresUserRepository::new(conn.clone())),
                    posts: Arc::new(PostgresPostRepository::new(conn)),
                    passwords,
                    sessions,
                    secure_cookies: config.secure_cookies,
                });
            }
        }

        tracing::warn!("DATABASE_URL not set. Running with the in-memory store; data is not persisted.");
        Ok(Self::in_memory(
            InMemoryDatabase::new(),
            passwords,
            sessions,
            config.secure_cookies,
        ))
    }

    /// State backed by the in-memory store.
    pub fn in_memory(
        db: InMemoryDatabase,
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionService>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            users: Arc::new(db.users()),
            posts: Arc::new(db.posts()),
            passwords,
            sessions,
            secure_cookies,
        }
    }
}
