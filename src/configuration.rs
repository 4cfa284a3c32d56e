//! src/configuration.rs

use crate::signup_client::FormActionClient;
use crate::submission::SubmissionPolicy;
use config::ConfigError;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub signup: SignupSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SignupSettings {
    /// Form action url of the mailing list.
    pub action_url: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub assume_success_after_dispatch: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub success_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub reset_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub pulse_milliseconds: u64,
}

impl SignupSettings {
    pub fn client(&self) -> Result<FormActionClient, reqwest::Error> {
        FormActionClient::new(self.action_url.clone())
    }

    pub fn policy(&self) -> SubmissionPolicy {
        SubmissionPolicy {
            assume_success_after_dispatch: self.assume_success_after_dispatch,
            success_delay: Duration::from_millis(self.success_delay_milliseconds),
            reset_delay: Duration::from_millis(self.reset_delay_milliseconds),
            pulse_duration: Duration::from_millis(self.pulse_milliseconds),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_SIGNUP__ACTION_URL=https://...` would set `Settings.signup.action_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
