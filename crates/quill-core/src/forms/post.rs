use serde::Deserialize;

use super::{Field, FormErrors, Rule, validate_fields};
use crate::domain::Post;

/// Create/edit form for a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }

    pub fn validate(&self) -> FormErrors {
        validate_fields(&[
            Field::new("title", &self.title).rule(Rule::Required),
            Field::new("content", &self.content).rule(Rule::Required),
        ])
    }
}
