//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains entities, ports and form validation with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ports;

pub use error::{DomainError, RepoError};
