use serde::Deserialize;

use super::{EMAIL_TAKEN, Field, FormErrors, Rule, USERNAME_TAKEN, validate_fields};
use crate::domain::User;
use crate::error::RepoError;
use crate::ports::UserRepository;

/// Profile form: username and email of the signed-in user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountForm {
    pub username: String,
    pub email: String,
}

impl AccountForm {
    /// Pre-filled with the user's stored values.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }

    /// Uniqueness is only checked for values that differ from `current`.
    pub async fn validate(
        &self,
        current: &User,
        users: &dyn UserRepository,
    ) -> Result<FormErrors, RepoError> {
        let mut errors = validate_fields(&[
            Field::new("username", &self.username)
                .rule(Rule::Required)
                .rule(Rule::Length { min: 2, max: 20 }),
            Field::new("email", &self.email)
                .rule(Rule::Required)
                .rule(Rule::Email),
        ]);

        if !errors.is_halted("username")
            && self.username != current.username
            && users.find_by_username(&self.username).await?.is_some()
        {
            errors.add("username", USERNAME_TAKEN);
        }
        if !errors.is_halted("email")
            && self.email != current.email
            && users.find_by_email(&self.email).await?.is_some()
        {
            errors.add("email", EMAIL_TAKEN);
        }

        Ok(errors)
    }
}
