use serde::Deserialize;

use super::{Field, FormErrors, Rule, validate_fields};

/// Sign-in form. Only the shape is checked here; credentials are checked by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        validate_fields(&[
            Field::new("email", &self.email)
                .rule(Rule::Required)
                .rule(Rule::Email),
            Field::new("password", &self.password).rule(Rule::Required),
        ])
    }

    /// Whether the "Remember Me" checkbox was ticked.
    pub fn remember_me(&self) -> bool {
        matches!(
            self.remember.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }
}
