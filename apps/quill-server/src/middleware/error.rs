//! Error handling - converts failures into HTML error pages or redirects.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;

use crate::middleware::flash::FlashMessage;
use crate::views::{self, ErrorPage, PageContext};

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Forbidden,
    /// A protected page was requested without a session.
    LoginRequired,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::LoginRequired => write!(f, "Login required"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn page(&self) -> ErrorPage {
        let (heading, detail) = match self {
            AppError::NotFound(_) => (
                "Oops. Page Not Found (404)",
                "That page does not exist. Please try a different location.",
            ),
            AppError::Forbidden => (
                "You don't have permission to do that (403)",
                "Please check your account and try again.",
            ),
            AppError::Conflict(_) => (
                "That username or email is already in use (409)",
                "Please go back and choose another one.",
            ),
            AppError::LoginRequired | AppError::Internal(_) => (
                "Something went wrong (500)",
                "We're experiencing some trouble on our end. Please try again in the near future.",
            ),
        };

        ErrorPage {
            page: PageContext::anonymous(heading),
            heading: heading.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::LoginRequired => {
                return views::redirect_with_flash(
                    "/login",
                    FlashMessage::info("Please log in to access this page."),
                );
            }
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            other => tracing::debug!("Request failed: {}", other),
        }

        match views::render_html(&self.page()) {
            Ok(body) => HttpResponse::build(self.status_code())
                .content_type(actix_web::http::header::ContentType::html())
                .body(body),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                HttpResponse::build(self.status_code()).finish()
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PostNotFound(id) => AppError::NotFound(format!("post {}", id)),
            DomainError::NotAuthor { user_id, post_id } => {
                tracing::warn!(%user_id, %post_id, "Rejected change to another user's post");
                AppError::Forbidden
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("template rendering failed: {}", err))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
