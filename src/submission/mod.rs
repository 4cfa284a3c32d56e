//! src/submission/mod.rs

mod controller;
mod presenter;
mod state;

pub use controller::*;
pub use presenter::*;
pub use state::SubmissionState;
