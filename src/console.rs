//! src/console.rs

use crate::domain::Field;
use crate::form::{AlertHandle, ButtonHandle, InputHandle, RegionHandle, SignupForm};
use crate::signup_client::SignupTransport;
use crate::submission::{ButtonTheme, FieldCue, SubmissionController, SubmitOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct ConsoleInput {
    field: Field,
    value: Mutex<String>,
}

impl ConsoleInput {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            value: Mutex::new(String::new()),
        }
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }
}

impl InputHandle for ConsoleInput {
    fn value(&self) -> String {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        self.set_value(String::new());
    }

    fn focus(&self) {
        println!("-> please check your {}", self.field.as_ref());
    }

    fn show_cue(&self, cue: FieldCue) {
        match cue {
            FieldCue::Valid => println!("   {} ok", self.field.as_ref()),
            FieldCue::Invalid => println!("   {} looks invalid", self.field.as_ref()),
            FieldCue::Neutral => {}
        }
    }
}

/// Prints its caption whenever it becomes visible.
pub struct ConsoleRegion {
    caption: &'static str,
    visible: AtomicBool,
}

impl ConsoleRegion {
    pub fn new(caption: &'static str) -> Self {
        Self {
            caption,
            visible: AtomicBool::new(false),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl RegionHandle for ConsoleRegion {
    fn set_visible(&self, visible: bool) {
        let was_visible = self.visible.swap(visible, Ordering::SeqCst);
        if visible && !was_visible {
            println!("[ {} ]", self.caption);
        }
    }
}

pub struct ConsoleButton {
    enabled: AtomicBool,
    success_accent: AtomicBool,
}

impl ConsoleButton {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn has_success_accent(&self) -> bool {
        self.success_accent.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleButton {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            success_accent: AtomicBool::new(false),
        }
    }
}

impl ButtonHandle for ConsoleButton {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn set_theme(&self, theme: ButtonTheme) {
        self.success_accent
            .store(theme == ButtonTheme::SuccessAccent, Ordering::SeqCst);
    }

    // no scale animation on a terminal
    fn set_pulse(&self, _pulse: bool) {}
}

pub struct ConsoleAlert;

impl AlertHandle for ConsoleAlert {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Terminal rendition of the signup form.
pub struct ConsoleForm {
    pub name: Arc<ConsoleInput>,
    pub email: Arc<ConsoleInput>,
    pub label: Arc<ConsoleRegion>,
    pub loading: Arc<ConsoleRegion>,
    pub success: Arc<ConsoleRegion>,
    pub button: Arc<ConsoleButton>,
}

impl Default for ConsoleForm {
    fn default() -> Self {
        Self {
            name: Arc::new(ConsoleInput::new(Field::Name)),
            email: Arc::new(ConsoleInput::new(Field::Email)),
            label: Arc::new(ConsoleRegion::new("Sign up")),
            loading: Arc::new(ConsoleRegion::new("Sending...")),
            success: Arc::new(ConsoleRegion::new("Subscribed!")),
            button: Arc::new(ConsoleButton::default()),
        }
    }
}

impl ConsoleForm {
    pub fn handles(&self) -> SignupForm {
        SignupForm {
            name: self.name.clone(),
            email: self.email.clone(),
            label: self.label.clone(),
            loading: self.loading.clone(),
            success: self.success.clone(),
            button: self.button.clone(),
            alerts: Arc::new(ConsoleAlert),
        }
    }
}

/// Read name and email line pairs from `reader` and submit each pair.
///
/// Returns the number of successful signups once `reader` is exhausted.
pub async fn run_console<T, R>(
    controller: &SubmissionController<T>,
    form: &ConsoleForm,
    reader: R,
) -> anyhow::Result<usize>
where
    T: SignupTransport,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut signups = 0;
    loop {
        println!("name:");
        let Some(name) = lines.next_line().await? else {
            break;
        };
        form.name.set_value(name);
        controller.on_name_input();

        println!("email:");
        let Some(email) = lines.next_line().await? else {
            break;
        };
        form.email.set_value(email);
        controller.on_email_input();

        if !form.button.is_enabled() {
            continue;
        }
        if let SubmitOutcome::Succeeded = controller.submit().await {
            signups += 1;
        }
    }
    Ok(signups)
}
