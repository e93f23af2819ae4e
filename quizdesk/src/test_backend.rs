//! Test prompter for running sessions without user interaction.
//!
//! `TestPrompter` replays a script of input lines and records everything
//! shown to the user, so interactive flows can be asserted on.
//!
//! # Example
//!
//! ```rust
//! use quizdesk::{Console, TestPrompter};
//!
//! let mut console = Console::new(TestPrompter::new().with_inputs(["", "Alice"]));
//! let name = console.text("Enter your name:").unwrap();
//!
//! assert_eq!(name, "Alice");
//! assert!(console.prompter().saw("Invalid input. Try again."));
//! ```

use std::collections::VecDeque;

use crate::{Prompter, SurveyError};

/// A prompter that returns pre-scripted lines.
#[derive(Debug, Clone, Default)]
pub struct TestPrompter {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
}

/// Error type for TestPrompter.
#[derive(Debug, thiserror::Error)]
pub enum TestPrompterError {
    #[error("Ran out of scripted input at prompt {0:?}")]
    Exhausted(String),
}

impl From<TestPrompterError> for SurveyError {
    fn from(err: TestPrompterError) -> Self {
        SurveyError::backend(err)
    }
}

impl TestPrompter {
    /// Create a prompter with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one input line.
    pub fn with_input(mut self, line: impl Into<String>) -> Self {
        self.inputs.push_back(line.into());
        self
    }

    /// Queue several input lines, in order.
    pub fn with_inputs<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Everything shown, plus every non-empty prompt, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// The transcript as one newline-separated string.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// Check if any transcript entry contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Prompter for TestPrompter {
    type Error = TestPrompterError;

    fn show(&mut self, message: &str) -> Result<(), Self::Error> {
        self.transcript.push(message.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Self::Error> {
        if !prompt.is_empty() {
            self.transcript.push(prompt.to_string());
        }
        self.inputs
            .pop_front()
            .ok_or_else(|| TestPrompterError::Exhausted(prompt.to_string()))
    }
}
