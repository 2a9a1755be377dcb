//! Field rules and the engine that runs them.
//!
//! Every field owns an ordered list of [`Rule`]s. Rules are evaluated in
//! declaration order and each failure appends its message to the field's
//! errors. A failed [`Rule::Required`] halts the field: later rules and any
//! custom check for that field are skipped.

use validator::ValidateEmail;

use super::FormErrors;

/// A structural constraint on a single field value.
#[derive(Debug, Clone)]
pub enum Rule<'a> {
    /// Non-empty after trimming whitespace.
    Required,
    /// Length in characters, inclusive on both ends.
    Length { min: usize, max: usize },
    /// Well-formed email address.
    Email,
    /// Must match the value of another field.
    EqualTo { field: &'static str, value: &'a str },
}

enum Outcome {
    Pass,
    Fail(String),
    Halt(String),
}

impl Rule<'_> {
    fn check(&self, value: &str) -> Outcome {
        match self {
            Rule::Required if value.trim().is_empty() => {
                Outcome::Halt("This field is required.".to_string())
            }
            Rule::Length { min, max } => {
                let len = value.chars().count();
                if len < *min || len > *max {
                    Outcome::Fail(format!(
                        "Field must be between {min} and {max} characters long."
                    ))
                } else {
                    Outcome::Pass
                }
            }
            Rule::Email if !value.validate_email() => {
                Outcome::Fail("Invalid email address.".to_string())
            }
            Rule::EqualTo { field, value: other } if value != *other => {
                Outcome::Fail(format!("Field must be equal to {field}."))
            }
            _ => Outcome::Pass,
        }
    }
}

/// A named field value together with its rule chain.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    name: &'static str,
    value: &'a str,
    rules: Vec<Rule<'a>>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a str) -> Self {
        Self {
            name,
            value,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule<'a>) -> Self {
        self.rules.push(rule);
        self
    }

    fn run(&self, errors: &mut FormErrors) {
        for rule in &self.rules {
            match rule.check(self.value) {
                Outcome::Pass => {}
                Outcome::Fail(message) => errors.add(self.name, message),
                Outcome::Halt(message) => {
                    errors.add(self.name, message);
                    errors.halt(self.name);
                    return;
                }
            }
        }
    }
}

/// Run every field's chain and collect the failures.
pub fn validate_fields(fields: &[Field<'_>]) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in fields {
        field.run(&mut errors);
    }
    errors
}
