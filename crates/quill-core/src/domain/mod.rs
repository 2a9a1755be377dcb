//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Author, Post, PostWithAuthor};
pub use user::{DEFAULT_IMAGE_FILE, User};
