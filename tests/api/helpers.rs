//! tests/api/helpers.rs

use async_trait::async_trait;
use once_cell::sync::Lazy;
use signup_form::domain::{Field, NewSignup};
use signup_form::error::TransportError;
use signup_form::form::{AlertHandle, ButtonHandle, InputHandle, RegionHandle, SignupForm};
use signup_form::signup_client::{DispatchReceipt, FormActionClient, SignupTransport};
use signup_form::submission::{
    ButtonTheme, FieldCue, SubmissionController, SubmissionPolicy, SubmissionState,
};
use signup_form::telemetry::{get_subscriber, init_subscriber};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::Notify;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`, therefore
    // both branches have to initialise on their own.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise tracing.");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise tracing.");
    }
});

/// Everything the controller did to the form, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Focus(Field),
    Cleared(Field),
    Cue(Field, FieldCue),
    Visible(&'static str),
    Enabled(bool),
    Theme(ButtonTheme),
    Pulse(bool),
    Alert(String),
    /// What the user could see while an alert was open.
    AlertShownIn {
        state: SubmissionState,
        button_enabled: bool,
    },
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<UiEvent>>>);

impl Recorder {
    fn push(&self, event: UiEvent) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeInput {
    field: Field,
    value: Mutex<String>,
    recorder: Recorder,
}

impl FakeInput {
    pub fn set(&self, value: &str) {
        *self.value.lock().unwrap() = value.to_string();
    }

    pub fn current(&self) -> String {
        self.value.lock().unwrap().clone()
    }
}

impl InputHandle for FakeInput {
    fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.value.lock().unwrap().clear();
        self.recorder.push(UiEvent::Cleared(self.field));
    }

    fn focus(&self) {
        self.recorder.push(UiEvent::Focus(self.field));
    }

    fn show_cue(&self, cue: FieldCue) {
        self.recorder.push(UiEvent::Cue(self.field, cue));
    }
}

pub struct FakeRegion {
    name: &'static str,
    visible: Mutex<bool>,
    recorder: Recorder,
}

impl FakeRegion {
    pub fn is_visible(&self) -> bool {
        *self.visible.lock().unwrap()
    }
}

impl RegionHandle for FakeRegion {
    fn set_visible(&self, visible: bool) {
        let mut current = self.visible.lock().unwrap();
        if visible && !*current {
            self.recorder.push(UiEvent::Visible(self.name));
        }
        *current = visible;
    }
}

pub struct FakeButton {
    enabled: Mutex<bool>,
    theme: Mutex<ButtonTheme>,
    recorder: Recorder,
}

impl FakeButton {
    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock().unwrap()
    }

    pub fn theme(&self) -> ButtonTheme {
        *self.theme.lock().unwrap()
    }
}

impl ButtonHandle for FakeButton {
    fn set_enabled(&self, enabled: bool) {
        let mut current = self.enabled.lock().unwrap();
        if *current != enabled {
            self.recorder.push(UiEvent::Enabled(enabled));
        }
        *current = enabled;
    }

    fn set_theme(&self, theme: ButtonTheme) {
        let mut current = self.theme.lock().unwrap();
        if *current != theme {
            self.recorder.push(UiEvent::Theme(theme));
        }
        *current = theme;
    }

    fn set_pulse(&self, pulse: bool) {
        self.recorder.push(UiEvent::Pulse(pulse));
    }
}

type StateReader = Box<dyn Fn() -> SubmissionState + Send + Sync>;

pub struct FakeAlerts {
    recorder: Recorder,
    button: Arc<FakeButton>,
    controller_state: Arc<OnceLock<StateReader>>,
}

impl AlertHandle for FakeAlerts {
    fn alert(&self, message: &str) {
        self.recorder.push(UiEvent::Alert(message.to_string()));
        if let Some(read_state) = self.controller_state.get() {
            self.recorder.push(UiEvent::AlertShownIn {
                state: read_state(),
                button_enabled: self.button.is_enabled(),
            });
        }
    }
}

pub struct TestForm {
    pub name: Arc<FakeInput>,
    pub email: Arc<FakeInput>,
    pub label: Arc<FakeRegion>,
    pub loading: Arc<FakeRegion>,
    pub success: Arc<FakeRegion>,
    pub button: Arc<FakeButton>,
    pub recorder: Recorder,
    controller_state: Arc<OnceLock<StateReader>>,
}

impl TestForm {
    pub fn new() -> Self {
        let recorder = Recorder::default();
        let input = |field| {
            Arc::new(FakeInput {
                field,
                value: Mutex::new(String::new()),
                recorder: recorder.clone(),
            })
        };
        let region = |name| {
            Arc::new(FakeRegion {
                name,
                visible: Mutex::new(false),
                recorder: recorder.clone(),
            })
        };
        Self {
            name: input(Field::Name),
            email: input(Field::Email),
            label: region("label"),
            loading: region("loading"),
            success: region("success"),
            button: Arc::new(FakeButton {
                enabled: Mutex::new(true),
                theme: Mutex::new(ButtonTheme::Default),
                recorder: recorder.clone(),
            }),
            recorder,
            controller_state: Arc::default(),
        }
    }

    pub fn handles(&self) -> SignupForm {
        SignupForm {
            name: self.name.clone(),
            email: self.email.clone(),
            label: self.label.clone(),
            loading: self.loading.clone(),
            success: self.success.clone(),
            button: self.button.clone(),
            alerts: Arc::new(FakeAlerts {
                recorder: self.recorder.clone(),
                button: self.button.clone(),
                controller_state: self.controller_state.clone(),
            }),
        }
    }

    pub fn fill(&self, name: &str, email: &str) {
        self.name.set(name);
        self.email.set(email);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.recorder
            .events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn focused(&self) -> Vec<Field> {
        self.recorder
            .events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Focus(field) => Some(field),
                _ => None,
            })
            .collect()
    }

    /// Position of the first recorded event matching `predicate`.
    pub fn position_of(&self, predicate: impl Fn(&UiEvent) -> bool) -> Option<usize> {
        self.recorder.events().iter().position(predicate)
    }

    /// Names of the button sub-regions in the order they became visible.
    pub fn shown_regions(&self) -> Vec<&'static str> {
        self.recorder
            .events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Visible(region) => Some(region),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Copy)]
pub enum Reply {
    Opaque,
    Status(u16),
    Unreachable,
}

/// In-memory transport recording every dispatched signup.
#[derive(Clone)]
pub struct FakeTransport {
    sent: Arc<Mutex<Vec<NewSignup>>>,
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn replying(reply: Reply) -> Self {
        Self {
            sent: Arc::default(),
            reply,
            gate: None,
        }
    }

    /// Holds every dispatch until `release` is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::replying(Reply::Opaque)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn sent(&self) -> Vec<NewSignup> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignupTransport for FakeTransport {
    async fn dispatch(&self, signup: &NewSignup) -> Result<DispatchReceipt, TransportError> {
        self.sent.lock().unwrap().push(signup.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.reply {
            Reply::Opaque => Ok(DispatchReceipt::opaque()),
            Reply::Status(status) => Ok(DispatchReceipt::with_status(status)),
            Reply::Unreachable => Err(TransportError::Dispatch(unreachable_error())),
        }
    }
}

/// A genuine `reqwest::Error`, produced without touching the network.
fn unreachable_error() -> reqwest::Error {
    reqwest::Client::new()
        .post("not a url")
        .build()
        .expect_err("an invalid url must not build a request")
}

pub struct TestApp<T> {
    pub form: TestForm,
    pub controller: Arc<SubmissionController<T>>,
}

impl<T: SignupTransport + 'static> TestApp<T> {
    pub fn new(transport: T, policy: SubmissionPolicy) -> Self {
        Lazy::force(&TRACING);
        let form = TestForm::new();
        let controller = Arc::new(SubmissionController::new(
            form.handles(),
            transport,
            policy,
        ));
        let weak = Arc::downgrade(&controller);
        let _ = form.controller_state.set(Box::new(move || {
            weak.upgrade()
                .map(|controller| controller.state())
                .unwrap_or_default()
        }));
        Self { form, controller }
    }
}

/// Controller wired to an in-memory transport with the default pacing.
pub fn spawn_form(transport: FakeTransport) -> TestApp<FakeTransport> {
    TestApp::new(transport, SubmissionPolicy::default())
}

/// Short delays, for tests running against a real mock server.
pub fn fast_policy() -> SubmissionPolicy {
    SubmissionPolicy {
        success_delay: Duration::from_millis(10),
        reset_delay: Duration::from_millis(30),
        pulse_duration: Duration::from_millis(5),
        ..SubmissionPolicy::default()
    }
}

/// Controller posting to a mock form action endpoint.
pub fn spawn_form_against(
    mock_server: &MockServer,
    policy: SubmissionPolicy,
) -> TestApp<FormActionClient> {
    let client = FormActionClient::new(format!("{}/subscribe", mock_server.uri()))
        .expect("Failed to build the form action client.");
    TestApp::new(client, policy)
}
