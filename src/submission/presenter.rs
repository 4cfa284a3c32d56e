//! src/submission/presenter.rs

use crate::submission::SubmissionState;

/// Which of the three mutually exclusive button sub-regions is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Text,
    Loading,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTheme {
    Default,
    SuccessAccent,
}

/// Everything a UI binding needs to draw the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonVisual {
    pub label: ButtonLabel,
    pub enabled: bool,
    pub theme: ButtonTheme,
    /// transient scale pulse
    pub pulse: bool,
}

impl ButtonVisual {
    pub fn with_pulse(self, pulse: bool) -> Self {
        Self { pulse, ..self }
    }

    /// Visibility of the (text, loading, success) sub-regions.
    pub fn region_visibility(&self) -> (bool, bool, bool) {
        (
            self.label == ButtonLabel::Text,
            self.label == ButtonLabel::Loading,
            self.label == ButtonLabel::Success,
        )
    }
}

pub fn button_visual(state: SubmissionState) -> ButtonVisual {
    match state {
        SubmissionState::Idle | SubmissionState::Validating | SubmissionState::Failed => {
            ButtonVisual {
                label: ButtonLabel::Text,
                enabled: true,
                theme: ButtonTheme::Default,
                pulse: false,
            }
        }
        SubmissionState::Submitting => ButtonVisual {
            label: ButtonLabel::Loading,
            enabled: false,
            theme: ButtonTheme::Default,
            pulse: false,
        },
        SubmissionState::Success => ButtonVisual {
            label: ButtonLabel::Success,
            enabled: false,
            theme: ButtonTheme::SuccessAccent,
            pulse: false,
        },
    }
}

/// Live validation feedback for a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCue {
    Neutral,
    Valid,
    Invalid,
}

/// An empty input stays neutral, it is not flagged as invalid while typing.
pub fn field_cue(value: &str, is_valid: bool) -> FieldCue {
    if is_valid {
        FieldCue::Valid
    } else if !value.is_empty() {
        FieldCue::Invalid
    } else {
        FieldCue::Neutral
    }
}
