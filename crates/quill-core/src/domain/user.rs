use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile picture assigned to every new account.
pub const DEFAULT_IMAGE_FILE: &str = "default.jpg";

/// User entity - a registered author.
///
/// `password_hash` is a PHC string; the plaintext password never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_file: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, default picture and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Public URL of the profile picture.
    pub fn image_url(&self) -> String {
        format!("/static/profile_pics/{}", self.image_file)
    }
}
