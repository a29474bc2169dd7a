//! Rationale dialog definitions for permission flows.
//!
//! This crate provides the value types a host environment needs to render
//! the "why we ask" dialog shown before a permission prompt. Rendering is
//! left entirely to the host; the flow logic only supplies the content
//! and receives the button choice back.

#![warn(missing_docs)]

/// Which dialog button the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogChoice {
    /// The affirmative button: proceed to the permission prompt.
    Affirmative,
    /// The negative button: skip the prompt.
    Negative,
}

/// Content of a rationale dialog: a title, a message and two button labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalePrompt {
    /// Title of the dialog.
    pub title: String,
    /// Message body explaining why the permission is needed.
    pub message: String,
    /// Label of the affirmative button.
    pub affirmative: String,
    /// Label of the negative button.
    pub negative: String,
}

impl RationalePrompt {
    /// Create a new prompt with default "OK" / "Cancel" button labels.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            affirmative: "OK".into(),
            negative: "Cancel".into(),
        }
    }

    /// Override the button labels.
    #[must_use]
    pub fn with_buttons(
        mut self,
        affirmative: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        self.affirmative = affirmative.into();
        self.negative = negative.into();
        self
    }
}
