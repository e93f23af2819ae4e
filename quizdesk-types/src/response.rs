use serde::{Deserialize, Serialize};

/// Answers recorded against one question.
///
/// `submitted` holds what a taker entered; `correct` holds the answer key
/// (tests only). Both are positional: slot `i` of one side is compared
/// with slot `i` of the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    submitted: Vec<String>,

    #[serde(default)]
    correct: Vec<String>,
}

impl Response {
    /// Create an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted answer.
    pub fn push_submitted(&mut self, answer: impl Into<String>) {
        self.submitted.push(answer.into());
    }

    /// Append a correct answer to the key.
    pub fn push_correct(&mut self, answer: impl Into<String>) {
        self.correct.push(answer.into());
    }

    /// Replace all submitted answers.
    pub fn set_submitted(&mut self, answers: Vec<String>) {
        self.submitted = answers;
    }

    /// Replace the answer key.
    pub fn set_correct(&mut self, answers: Vec<String>) {
        self.correct = answers;
    }

    pub fn clear_submitted(&mut self) {
        self.submitted.clear();
    }

    pub fn clear_correct(&mut self) {
        self.correct.clear();
    }

    /// Get the submitted answers.
    pub fn submitted(&self) -> &[String] {
        &self.submitted
    }

    /// Get the answer key.
    pub fn correct(&self) -> &[String] {
        &self.correct
    }

    /// Check if an answer key has been recorded.
    pub fn has_key(&self) -> bool {
        !self.correct.is_empty()
    }

    /// Compare one slot. A slot missing on either side never matches.
    pub fn slot_matches(&self, index: usize) -> bool {
        match (self.submitted.get(index), self.correct.get(index)) {
            (Some(given), Some(expected)) => given == expected,
            _ => false,
        }
    }

    /// Check that the first `slots` positions all match the key.
    pub fn matches_key(&self, slots: usize) -> bool {
        slots > 0 && (0..slots).all(|i| self.slot_matches(i))
    }
}
