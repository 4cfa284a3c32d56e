//! src/domain/new_signup.rs

use crate::domain::{trim_input, SignupEmail, SignupName, ValidationError};

/// Raw form values, trimmed of surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
}

impl SignupInput {
    pub fn new(name: impl AsRef<str>, email: impl AsRef<str>) -> Self {
        Self {
            name: trim_input(name.as_ref()).to_owned(),
            email: trim_input(email.as_ref()).to_owned(),
        }
    }
}

/// Validated signup, the only thing a transport accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub name: SignupName,
    pub email: SignupEmail,
}

impl TryFrom<SignupInput> for NewSignup {
    type Error = ValidationError;

    // name is checked first, so an invalid name wins over an invalid email
    fn try_from(value: SignupInput) -> Result<Self, Self::Error> {
        let name = SignupName::parse(value.name)?;
        let email = SignupEmail::parse(value.email)?;
        Ok(Self { name, email })
    }
}
