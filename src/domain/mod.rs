//! src/domain/mod.rs

mod new_signup;
mod signup_email;
mod signup_name;

pub use new_signup::{NewSignup, SignupInput};
pub use signup_email::{is_valid_email, SignupEmail};
pub use signup_name::{is_valid_name, SignupName};

/// Whitespace as browsers see it in form input: Unicode space separators,
/// the ASCII controls `\t \n \v \f \r`, line and paragraph separators and
/// the byte order mark. NEL (U+0085) is not part of it.
pub(crate) const FORM_WHITESPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Strip surrounding form whitespace, leaving NEL and other controls in place.
pub fn trim_input(s: &str) -> &str {
    s.trim_matches(is_form_whitespace)
}

/// Validation error for signup form data.
///
/// The display text is the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid name (letters and spaces only, 2-50 characters)")]
    InvalidName(String),
    #[error("Please enter a valid email address")]
    InvalidEmail(String),
}

impl ValidationError {
    /// The form field the error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidName(_) => Field::Name,
            ValidationError::InvalidEmail(_) => Field::Email,
        }
    }
}

/// Stable handles of the two form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
        }
    }
}
