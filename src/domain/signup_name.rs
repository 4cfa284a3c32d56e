//! src/domain/signup_name.rs

use crate::domain::{trim_input, ValidationError, FORM_WHITESPACE_CLASS};
use once_cell::sync::Lazy;
use regex::Regex;

// Latin-1 letters without the multiplication and division signs.
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[a-zA-ZÀ-ÖØ-öø-ÿ{}]{{2,50}}$", FORM_WHITESPACE_CLASS))
        .expect("name pattern is valid")
});

/// Returns `true` if the trimmed input is 2 to 50 letters or whitespace characters.
pub fn is_valid_name(s: &str) -> bool {
    NAME_PATTERN.is_match(trim_input(s))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupName(String);

impl SignupName {
    /// Returns an instance of `SignupName` holding the trimmed input if it
    /// satisfies all our validation constraints on signup names.
    pub fn parse(s: String) -> Result<SignupName, ValidationError> {
        let trimmed = trim_input(&s);
        if NAME_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::InvalidName(s))
        }
    }
}

impl AsRef<str> for SignupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
