//! src/signup_client.rs

use crate::domain::NewSignup;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;

/// What a transport learned about a dispatched signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReceipt {
    /// HTTP status, if the transport could read one. `None` means the
    /// response was opaque.
    pub status: Option<u16>,
}

impl DispatchReceipt {
    pub fn opaque() -> Self {
        Self { status: None }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// `true` only if a status was read and it is a 2xx.
    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

/// Sends a validated signup to the mailing list.
///
/// Implementations issue exactly one outbound request per call and must only
/// return `Err` on a transport-level failure.
#[async_trait]
pub trait SignupTransport: Send + Sync {
    async fn dispatch(&self, signup: &NewSignup) -> Result<DispatchReceipt, TransportError>;
}

/// Posts the signup form-encoded to the form action url of the mailing list.
#[derive(Debug, Clone)]
pub struct FormActionClient {
    http_client: Client,
    action_url: String,
}

#[derive(serde::Serialize)]
struct SignupFormBody<'a> {
    name: &'a str,
    email: &'a str,
}

impl FormActionClient {
    pub fn new(action_url: String) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            action_url,
        })
    }

    pub fn action_url(&self) -> &str {
        &self.action_url
    }
}

#[async_trait]
impl SignupTransport for FormActionClient {
    #[tracing::instrument(
        name = "Dispatch signup to form action",
        skip(self, signup),
        fields(action_url = %self.action_url)
    )]
    async fn dispatch(&self, signup: &NewSignup) -> Result<DispatchReceipt, TransportError> {
        let request_body = SignupFormBody {
            name: signup.name.as_ref(),
            email: signup.email.as_ref(),
        };
        // the response body is never read
        let response = self
            .http_client
            .post(&self.action_url)
            .form(&request_body)
            .send()
            .await
            .map_err(TransportError::Dispatch)?;
        Ok(DispatchReceipt::with_status(response.status().as_u16()))
    }
}
