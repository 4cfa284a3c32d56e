//! src/error.rs

use crate::domain::ValidationError;

pub type SignupResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Failure of the outbound signup request.
#[derive(thiserror::Error)]
pub enum TransportError {
    #[error("Failed to dispatch the signup request.")]
    Dispatch(#[source] reqwest::Error),
    #[error("The signup endpoint rejected the request with status {0}.")]
    Rejected(u16),
}

impl std::fmt::Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid input for signup")]
    ValidationError(#[from] ValidationError),
    #[error("Signup request failed")]
    TransportError(#[from] TransportError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
