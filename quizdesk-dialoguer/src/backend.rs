//! Dialoguer implementation of the `Prompter` trait.

use dialoguer::{Input, Select, theme::ColorfulTheme};
use quizdesk::{Prompter, SurveyError};
use thiserror::Error;

/// Error type for the Dialoguer prompter.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the session (e.g., pressed Ctrl+C or Escape).
    #[error("Session cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<DialoguerError> for SurveyError {
    fn from(err: DialoguerError) -> Self {
        match err {
            DialoguerError::Cancelled => SurveyError::Cancelled,
            other => SurveyError::backend(other),
        }
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn map_err(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer prompter for interactive terminal sessions.
///
/// Messages go to stdout; lines are read with `Input` and menus are
/// shown as an arrow-key `Select`.
#[derive(Debug, Default, Clone)]
pub struct DialoguerPrompter {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerPrompter {
    /// Create a new Dialoguer prompter with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a prompter with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    pub fn is_colorful(&self) -> bool {
        self.colorful
    }
}

impl Prompter for DialoguerPrompter {
    type Error = DialoguerError;

    fn show(&mut self, message: &str) -> Result<(), Self::Error> {
        println!("{message}");
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Self::Error> {
        let mut _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        if !prompt.is_empty() {
            builder = builder.with_prompt(prompt);
        }
        builder.allow_empty(true).interact_text().map_err(map_err)
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, Self::Error> {
        let mut _theme;
        let mut builder: Select;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder.with_prompt(prompt).items(options).default(0);
        builder.interact().map_err(map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompter_creation() {
        assert!(DialoguerPrompter::new().is_colorful());
        assert!(!DialoguerPrompter::plain().is_colorful());
    }

    #[test]
    fn cancellation_maps_to_survey_error() {
        let err = DialoguerError::Cancelled;
        assert_eq!(err.to_string(), "Session cancelled by user");
        assert!(SurveyError::from(err).is_cancelled());

        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        assert!(matches!(
            map_err(dialoguer::Error::IO(io)),
            DialoguerError::Cancelled
        ));
    }

    #[test]
    fn other_failures_are_backend_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: SurveyError = map_err(dialoguer::Error::IO(io)).into();
        assert!(matches!(err, SurveyError::Backend(_)));
    }
}
