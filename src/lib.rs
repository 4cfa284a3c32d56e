//! src/lib.rs
pub mod configuration;
pub mod console;
pub mod domain;
pub mod error;
pub mod form;
pub mod signup_client;
pub mod submission;
pub mod telemetry;
