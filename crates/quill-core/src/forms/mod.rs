//! HTML form payloads and their validation.
//!
//! Each form deserializes from an urlencoded body (missing fields become empty
//! strings), runs its structural rules, then any checks that need the user
//! store. The result is a [`FormErrors`] map; an empty map means the
//! submission is valid.

mod account;
mod login;
mod post;
mod registration;
mod rules;

use std::collections::{BTreeMap, BTreeSet};

pub use account::AccountForm;
pub use login::LoginForm;
pub use post::PostForm;
pub use registration::RegistrationForm;
pub use rules::{Field, Rule, validate_fields};

pub const USERNAME_TAKEN: &str = "That username is taken. Use a new one instead";
pub const EMAIL_TAKEN: &str = "That email is taken. Use a new one instead";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    halted: BTreeSet<&'static str>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Messages for one field, in the order they were raised.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the field's rule chain stopped early. Custom checks skip halted fields.
    pub fn is_halted(&self, field: &str) -> bool {
        self.halted.contains(field)
    }

    pub(crate) fn halt(&mut self, field: &'static str) {
        self.halted.insert(field);
    }

    /// All messages across all fields.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.fields.values().flatten().map(String::as_str)
    }
}
