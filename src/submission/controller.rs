//! src/submission/controller.rs

use crate::domain::{is_valid_email, is_valid_name, Field, NewSignup, ValidationError};
use crate::error::TransportError;
use crate::form::SignupForm;
use crate::signup_client::{DispatchReceipt, SignupTransport};
use crate::submission::{button_visual, field_cue, FieldCue, SubmissionState};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{field::display, Span};
use uuid::Uuid;

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// How the controller paces a submission and judges its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPolicy {
    /// Count a dispatch without transport error as success, whatever the
    /// endpoint answered.
    pub assume_success_after_dispatch: bool,
    /// Loading indicator stays visible this long after the dispatch.
    pub success_delay: Duration,
    /// Success indicator stays visible this long before the form resets.
    pub reset_delay: Duration,
    pub pulse_duration: Duration,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            assume_success_after_dispatch: true,
            success_delay: Duration::from_millis(1500),
            reset_delay: Duration::from_millis(3000),
            pulse_duration: Duration::from_millis(200),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent.
    Rejected(ValidationError),
    /// Another submission is in flight, nothing was sent.
    Ignored,
    Succeeded,
    Failed(TransportError),
}

pub struct SubmissionController<T> {
    form: SignupForm,
    transport: T,
    policy: SubmissionPolicy,
    state: Mutex<SubmissionState>,
}

impl<T: SignupTransport> SubmissionController<T> {
    pub fn new(form: SignupForm, transport: T, policy: SubmissionPolicy) -> Self {
        let controller = Self {
            form,
            transport,
            policy,
            state: Mutex::new(SubmissionState::Idle),
        };
        controller.transition(SubmissionState::Idle);
        controller
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    /// Live validation of a single input, run on every change event.
    pub fn on_input(&self, field: Field) -> FieldCue {
        let input = self.form.input(field);
        let value = input.value();
        let is_valid = match field {
            Field::Name => is_valid_name(&value),
            Field::Email => is_valid_email(&value),
        };
        let cue = field_cue(&value, is_valid);
        input.show_cue(cue);
        cue
    }

    pub fn on_name_input(&self) -> FieldCue {
        self.on_input(Field::Name)
    }

    pub fn on_email_input(&self) -> FieldCue {
        self.on_input(Field::Email)
    }

    /// Validate the form and, if valid, send it.
    ///
    /// Resolves once the submission has run its full course: rejected,
    /// failed, or succeeded and reset.
    #[tracing::instrument(
        name = "Submitting signup form",
        skip(self),
        fields(
            submission_id = %Uuid::new_v4(),
            signup_name = tracing::field::Empty,
            signup_email = tracing::field::Empty
        )
    )]
    pub async fn submit(&self) -> SubmitOutcome {
        let in_flight = match self.begin_validation() {
            Some(in_flight) => in_flight,
            None => {
                tracing::warn!("A signup is already in flight, ignoring submit.");
                return SubmitOutcome::Ignored;
            }
        };
        let outcome = self.run_submission().await;
        in_flight.complete();
        outcome
    }

    async fn run_submission(&self) -> SubmitOutcome {
        let input = self.form.read_input();
        Span::current()
            .record("signup_name", &display(&input.name))
            .record("signup_email", &display(&input.email));

        let signup = match NewSignup::try_from(input) {
            Ok(signup) => signup,
            Err(e) => {
                self.reject(&e);
                return SubmitOutcome::Rejected(e);
            }
        };

        self.transition(SubmissionState::Submitting);
        match self.transport.dispatch(&signup).await {
            Ok(receipt) if self.counts_as_success(&receipt) => {
                self.succeed().await;
                SubmitOutcome::Succeeded
            }
            Ok(receipt) => {
                let e = TransportError::Rejected(receipt.status.unwrap_or_default());
                self.fail(&e);
                SubmitOutcome::Failed(e)
            }
            Err(e) => {
                self.fail(&e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn counts_as_success(&self, receipt: &DispatchReceipt) -> bool {
        self.policy.assume_success_after_dispatch || receipt.is_confirmed()
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves `Idle` to `Validating` in one step; any other state means a
    /// submission is already running.
    fn begin_validation(&self) -> Option<InFlight<'_>> {
        {
            let mut state = self.lock_state();
            if !state.accepts_submit() {
                return None;
            }
            *state = SubmissionState::Validating;
        }
        self.form.render(&button_visual(SubmissionState::Validating));
        Some(InFlight {
            state: &self.state,
            form: &self.form,
            completed: false,
        })
    }

    fn transition(&self, next: SubmissionState) {
        *self.lock_state() = next;
        self.form.render(&button_visual(next));
        tracing::debug!(state = %next, "Signup form changed state.");
    }

    fn reject(&self, e: &ValidationError) {
        tracing::info!(error.message = %e, "Signup form failed validation.");
        self.form.alerts.alert(&e.to_string());
        self.form.input(e.field()).focus();
        self.transition(SubmissionState::Idle);
    }

    fn fail(&self, e: &TransportError) {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to send the signup."
        );
        self.transition(SubmissionState::Failed);
        self.form.alerts.alert(TRANSPORT_FAILURE_MESSAGE);
        self.transition(SubmissionState::Idle);
    }

    async fn succeed(&self) {
        tokio::time::sleep(self.policy.success_delay).await;

        *self.lock_state() = SubmissionState::Success;
        self.form
            .render(&button_visual(SubmissionState::Success).with_pulse(true));
        tracing::info!("Signup sent.");

        tokio::time::sleep(self.policy.pulse_duration).await;
        self.form.button.set_pulse(false);
        tokio::time::sleep(
            self.policy
                .reset_delay
                .saturating_sub(self.policy.pulse_duration),
        )
        .await;

        self.form.clear_inputs();
        self.transition(SubmissionState::Idle);
    }
}

/// Held for the lifetime of one submission. Dropping it before `complete`
/// (the `submit` future was cancelled) puts the form back to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    form: &'a SignupForm,
    completed: bool,
}

impl InFlight<'_> {
    fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let abandoned = std::mem::replace(
            &mut *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            SubmissionState::Idle,
        );
        self.form.render(&button_visual(SubmissionState::Idle));
        tracing::warn!(
            state = %abandoned,
            "Signup submission was cancelled, resetting the form."
        );
    }
}
