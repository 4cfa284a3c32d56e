//! src/form.rs

use crate::domain::{Field, SignupInput};
use crate::submission::{ButtonTheme, ButtonVisual, FieldCue};
use std::sync::Arc;

/// A text input of the signup form.
pub trait InputHandle: Send + Sync {
    fn value(&self) -> String;
    fn clear(&self);
    fn focus(&self);
    fn show_cue(&self, cue: FieldCue);
}

/// One of the label, loading and success sub-regions of the submit button.
pub trait RegionHandle: Send + Sync {
    fn set_visible(&self, visible: bool);
}

pub trait ButtonHandle: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn set_theme(&self, theme: ButtonTheme);
    fn set_pulse(&self, pulse: bool);
}

/// Shows a message and returns once the user acknowledged it.
pub trait AlertHandle: Send + Sync {
    fn alert(&self, message: &str);
}

/// The handles of a signup form, injected into the submission controller.
#[derive(Clone)]
pub struct SignupForm {
    pub name: Arc<dyn InputHandle>,
    pub email: Arc<dyn InputHandle>,
    pub label: Arc<dyn RegionHandle>,
    pub loading: Arc<dyn RegionHandle>,
    pub success: Arc<dyn RegionHandle>,
    pub button: Arc<dyn ButtonHandle>,
    pub alerts: Arc<dyn AlertHandle>,
}

impl SignupForm {
    pub fn input(&self, field: Field) -> &dyn InputHandle {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
        }
    }

    /// Read both inputs, trimmed.
    pub fn read_input(&self) -> SignupInput {
        SignupInput::new(self.name.value(), self.email.value())
    }

    pub fn render(&self, visual: &ButtonVisual) {
        let (label, loading, success) = visual.region_visibility();
        self.label.set_visible(label);
        self.loading.set_visible(loading);
        self.success.set_visible(success);
        self.button.set_enabled(visual.enabled);
        self.button.set_theme(visual.theme);
        self.button.set_pulse(visual.pulse);
    }

    /// Clear both inputs and their validation cues.
    pub fn clear_inputs(&self) {
        for input in [&self.name, &self.email] {
            input.clear();
            input.show_cue(FieldCue::Neutral);
        }
    }
}
