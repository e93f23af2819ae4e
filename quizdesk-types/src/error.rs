/// Error type for interactive survey operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// User cancelled the session (Ctrl+C, end of input, etc.)
    #[error("Session cancelled by user")]
    Cancelled,

    /// Prompter failure (terminal I/O, exhausted script, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
