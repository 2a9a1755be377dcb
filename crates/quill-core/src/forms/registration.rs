use serde::Deserialize;

use super::{EMAIL_TAKEN, Field, FormErrors, Rule, USERNAME_TAKEN, validate_fields};
use crate::error::RepoError;
use crate::ports::UserRepository;

/// Sign-up form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    fn check_structure(&self) -> FormErrors {
        validate_fields(&[
            Field::new("username", &self.username)
                .rule(Rule::Required)
                .rule(Rule::Length { min: 2, max: 20 }),
            Field::new("email", &self.email)
                .rule(Rule::Required)
                .rule(Rule::Email),
            Field::new("password", &self.password).rule(Rule::Required),
            Field::new("confirm_password", &self.confirm_password)
                .rule(Rule::Required)
                .rule(Rule::EqualTo {
                    field: "password",
                    value: &self.password,
                }),
        ])
    }

    /// Structural rules first, then username/email uniqueness against the store.
    pub async fn validate(&self, users: &dyn UserRepository) -> Result<FormErrors, RepoError> {
        let mut errors = self.check_structure();

        if !errors.is_halted("username") && users.find_by_username(&self.username).await?.is_some()
        {
            errors.add("username", USERNAME_TAKEN);
        }
        if !errors.is_halted("email") && users.find_by_email(&self.email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN);
        }

        Ok(errors)
    }
}
