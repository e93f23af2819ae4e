use crate::SurveyError;

/// Trait for console backends that talk to the person at the keyboard.
///
/// A prompter only moves text: it shows messages and reads raw lines.
/// Validation and re-prompting happen above it, so every backend gets
/// the same input rules.
pub trait Prompter {
    /// The error type for this backend.
    ///
    /// Converting into `SurveyError` lets a backend report cancellation
    /// (`SurveyError::Cancelled`) separately from I/O failures.
    type Error: Into<SurveyError>;

    /// Show a message to the user.
    fn show(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Read one line of input. An empty prompt means "just read".
    ///
    /// The returned line may be empty; callers decide whether that is valid.
    fn read_line(&mut self, prompt: &str) -> Result<String, Self::Error>;

    /// Let the user pick one of `options`, returning its zero-based index.
    ///
    /// Implementations must return an index below `options.len()`; callers
    /// treat anything else as an invalid selection. The default
    /// implementation prints a numbered menu and keeps reading until it
    /// gets an integer in range.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, Self::Error> {
        if !prompt.is_empty() {
            self.show(prompt)?;
        }
        for (i, option) in options.iter().enumerate() {
            self.show(&format!("{}) {option}", i + 1))?;
        }
        loop {
            let line = self.read_line("")?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                Ok(_) => self.show("Index out of range. Try again.")?,
                Err(_) => self.show("Invalid number, try again.")?,
            }
        }
    }
}
