//! main.rs

use signup_form::configuration::get_configuration;
use signup_form::console::{run_console, ConsoleForm};
use signup_form::submission::SubmissionController;
use signup_form::telemetry::{get_subscriber, init_subscriber};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // the console form owns stdout, logs go to stderr
    let subscriber = get_subscriber("signup_form".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;
    let form = ConsoleForm::default();
    let controller = SubmissionController::new(
        form.handles(),
        configuration.signup.client()?,
        configuration.signup.policy(),
    );

    match run_console(&controller, &form, BufReader::new(tokio::io::stdin())).await {
        Ok(signups) => {
            tracing::info!(signups, "Signup form has exited");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Signup form failed"
            );
            Err(e)
        }
    }
}
