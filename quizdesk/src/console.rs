//! Validated input on top of a raw `Prompter`.
//!
//! Every reader loops until the line it gets is acceptable, printing a
//! short correction message in between. Only prompter failures escape.

use std::ops::RangeInclusive;

use quizdesk_types::{
    MAX_CHOICES, Prompter, SurveyError, canonical_date, choice_label, normalize_date_format,
};

/// A prompter wrapped with input validation.
#[derive(Debug)]
pub struct Console<P> {
    prompter: P,
}

impl<P: Prompter> Console<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    /// Get the underlying prompter.
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Unwrap the underlying prompter.
    pub fn into_inner(self) -> P {
        self.prompter
    }

    /// Show a message.
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), SurveyError> {
        self.prompter.show(message.as_ref()).map_err(Into::into)
    }

    /// Read a raw line, trimmed. May be empty.
    pub fn line(&mut self, prompt: &str) -> Result<String, SurveyError> {
        self.prompter
            .read_line(prompt)
            .map(|line| line.trim().to_string())
            .map_err(Into::into)
    }

    /// Pick one of `options` by number, returning its zero-based index.
    pub fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, SurveyError> {
        self.prompter.choose(prompt, options).map_err(Into::into)
    }

    /// Keep reading until `parse` accepts the line.
    fn read_valid<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Result<T, SurveyError> {
        loop {
            let line = self.line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(msg) => self.say(msg)?,
            }
        }
    }

    /// Read non-empty text.
    pub fn text(&mut self, prompt: &str) -> Result<String, SurveyError> {
        self.read_valid(prompt, |line| {
            if line.is_empty() {
                Err("Invalid input. Try again.".to_string())
            } else {
                Ok(line.to_string())
            }
        })
    }

    /// Read an integer within `range`.
    pub fn number_in(
        &mut self,
        prompt: &str,
        range: RangeInclusive<usize>,
    ) -> Result<usize, SurveyError> {
        self.read_valid(prompt, |line| match line.parse::<usize>() {
            Ok(n) if range.contains(&n) => Ok(n),
            Ok(_) => Err(format!(
                "Number must be between {} and {}. Try again.",
                range.start(),
                range.end()
            )),
            Err(_) => Err("Invalid number, try again.".to_string()),
        })
    }

    /// Read a positive integer. A blank line yields `default` when one is given.
    pub fn count(&mut self, prompt: &str, default: Option<usize>) -> Result<usize, SurveyError> {
        self.read_valid(prompt, |line| match (line.parse::<usize>(), default) {
            (Ok(n), _) if n > 0 => Ok(n),
            (Ok(_), _) => Err("Number must be at least 1. Try again.".to_string()),
            (Err(_), Some(default)) if line.is_empty() => Ok(default),
            (Err(_), _) => Err("Invalid number, try again.".to_string()),
        })
    }

    /// Read a 1-based position into a list of `len` items, returning it zero-based.
    pub fn index(&mut self, prompt: &str, len: usize) -> Result<usize, SurveyError> {
        self.read_valid(prompt, |line| match line.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
            Ok(_) => Err("Index out of range. Try again.".to_string()),
            Err(_) => Err("Value is not an integer. Try again.".to_string()),
        })
    }

    /// Read a yes/no answer.
    pub fn yes_no(&mut self, prompt: &str) -> Result<bool, SurveyError> {
        self.read_valid(prompt, |line| match line.to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(true),
            "no" | "n" => Ok(false),
            _ => Err("Please answer yes or no.".to_string()),
        })
    }

    /// Read a true/false answer, normalized to `"T"` or `"F"`.
    pub fn true_false(&mut self, prompt: &str) -> Result<String, SurveyError> {
        self.read_valid(prompt, |line| match line.to_ascii_uppercase().as_str() {
            "T" | "TRUE" => Ok("T".to_string()),
            "F" | "FALSE" => Ok("F".to_string()),
            _ => Err("Answer must be T or F. Try again.".to_string()),
        })
    }

    /// Read a choice letter among the first `count` letters, returning its index.
    pub fn choice_letter(&mut self, prompt: &str, count: usize) -> Result<usize, SurveyError> {
        let count = count.clamp(1, MAX_CHOICES);
        let last = choice_label(count - 1);
        self.read_valid(prompt, |line| {
            let mut chars = line.chars();
            match (chars.next().map(|c| c.to_ascii_uppercase()), chars.next()) {
                (Some(c @ 'A'..='Z'), None) if ((c as u8 - b'A') as usize) < count => {
                    Ok((c as u8 - b'A') as usize)
                }
                _ => Err(format!("Answer must be a letter from A to {last}. Try again.")),
            }
        })
    }

    /// Read a date written in `format`, returned zero-padded in that format.
    pub fn date(&mut self, prompt: &str, format: &str) -> Result<String, SurveyError> {
        self.read_valid(prompt, |line| {
            canonical_date(line, format)
                .ok_or_else(|| format!("Date must be in the format {format}. Try again."))
        })
    }

    /// Read a date pattern. Blank or unusable input yields `None`.
    pub fn date_format(&mut self, prompt: &str) -> Result<Option<String>, SurveyError> {
        let line = self.line(prompt)?;
        Ok(normalize_date_format(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestPrompter;

    fn console(inputs: &[&str]) -> Console<TestPrompter> {
        Console::new(TestPrompter::new().with_inputs(inputs.iter().copied()))
    }

    #[test]
    fn text_reprompts_on_empty_line() {
        let mut c = console(&["", "  ", "Hello"]);
        assert_eq!(c.text("Prompt:").unwrap(), "Hello");
        assert_eq!(
            c.prompter()
                .transcript()
                .iter()
                .filter(|l| *l == "Invalid input. Try again.")
                .count(),
            2
        );
    }

    #[test]
    fn count_uses_default_only_for_blank() {
        let mut c = console(&["", "x", "0", "3"]);
        assert_eq!(c.count("How many?", Some(1)).unwrap(), 1);
        assert_eq!(c.count("How many?", None).unwrap(), 3);
        assert!(c.prompter().saw("Invalid number, try again."));
        assert!(c.prompter().saw("Number must be at least 1. Try again."));
    }

    #[test]
    fn index_is_bounds_checked() {
        let mut c = console(&["abc", "0", "4", "2"]);
        assert_eq!(c.index("Which?", 3).unwrap(), 1);
        assert!(c.prompter().saw("Value is not an integer. Try again."));
        assert!(c.prompter().saw("Index out of range. Try again."));
    }

    #[test]
    fn true_false_accepts_only_t_or_f() {
        let mut c = console(&["maybe", "", "t"]);
        assert_eq!(c.true_false("T or F?").unwrap(), "T");
        assert!(c.prompter().saw("Answer must be T or F. Try again."));

        let mut c = console(&["false"]);
        assert_eq!(c.true_false("T or F?").unwrap(), "F");
    }

    #[test]
    fn choice_letters_stay_in_range() {
        let mut c = console(&["D", "AB", "c"]);
        assert_eq!(c.choice_letter("Pick", 3).unwrap(), 2);
        assert!(c.prompter().saw("Answer must be a letter from A to C. Try again."));
    }

    #[test]
    fn dates_must_match_format() {
        let mut c = console(&["2024-03-09", "03-09-2024"]);
        assert_eq!(c.date("When?", "MM-dd-yyyy").unwrap(), "03-09-2024");
        assert!(c.prompter().saw("Date must be in the format MM-dd-yyyy. Try again."));
    }

    #[test]
    fn dates_are_stored_zero_padded() {
        let mut c = console(&["3-9-2024", "9/3/2024"]);
        assert_eq!(c.date("When?", "MM-dd-yyyy").unwrap(), "03-09-2024");
        assert_eq!(c.date("When?", "dd/MM/yyyy").unwrap(), "09/03/2024");
    }

    #[test]
    fn exhausted_script_is_a_backend_error() {
        let mut c = console(&[]);
        let err = c.text("Anything?").unwrap_err();
        assert!(matches!(err, SurveyError::Backend(_)));
    }
}
