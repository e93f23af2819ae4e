use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Response, format_date, parse_date};

/// Choice-based questions label their choices `A`..`Z`.
pub const MAX_CHOICES: usize = 26;

/// The letter shown in front of the choice at `index` (`0` -> `A`).
///
/// # Panics
/// Panics if `index >= MAX_CHOICES`.
pub fn choice_label(index: usize) -> char {
    assert!(index < MAX_CHOICES, "choice index {index} has no label");
    char::from(b'A' + index as u8)
}

/// Error type for structural question edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("A question must accept at least one answer.")]
    ZeroAnswers,

    #[error(
        "Number of answers cannot exceed number of choices ({requested} requested, {available} available)."
    )]
    ExceedsChoices { requested: usize, available: usize },

    #[error("This question always takes exactly {required} answer(s).")]
    FixedAnswerCount { required: usize },

    #[error(
        "Matching questions need as many possible answers as statements ({statements} statements, {answers} possible answers)."
    )]
    MatchingMismatch { statements: usize, answers: usize },

    #[error("Choice questions take between 1 and 26 choices, got {0}.")]
    ChoiceCount(usize),

    #[error("There is no entry #{index}; this question has {len}.")]
    NoSuchEntry { index: usize, len: usize },

    #[error("{kind} questions do not support {operation}.")]
    Unsupported {
        operation: &'static str,
        kind: QuestionType,
    },
}

/// The variant tag of a question, without any variant data.
///
/// Doubles as the authoring menu: `ALL` lists the variants in the order
/// they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
    ShortAnswer,
    Essay,
    Date,
    Matching,
}

impl QuestionType {
    /// All question types in menu order.
    pub const ALL: [QuestionType; 6] = [
        Self::TrueFalse,
        Self::MultipleChoice,
        Self::ShortAnswer,
        Self::Essay,
        Self::Date,
        Self::Matching,
    ];

    /// Short human-readable name, e.g. `"multiple-choice"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::TrueFalse => "T/F",
            Self::MultipleChoice => "multiple-choice",
            Self::ShortAnswer => "short answer",
            Self::Essay => "essay",
            Self::Date => "date",
            Self::Matching => "matching",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of question, with the data specific to each variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answered with `T` or `F`.
    TrueFalse,

    /// Pick one or more lettered choices.
    MultipleChoice { choices: Vec<String> },

    /// Pair each lettered statement with a numbered possible answer.
    Matching {
        statements: Vec<String>,
        answers: Vec<String>,
    },

    /// Free text, auto-graded against the key.
    ShortAnswer,

    /// Free text, never auto-graded.
    Essay,

    /// A date written in `format` (e.g. `MM-dd-yyyy`).
    Date { format: String },
}

impl QuestionKind {
    /// Get the data-less tag of this kind.
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::TrueFalse => QuestionType::TrueFalse,
            Self::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Self::Matching { .. } => QuestionType::Matching,
            Self::ShortAnswer => QuestionType::ShortAnswer,
            Self::Essay => QuestionType::Essay,
            Self::Date { .. } => QuestionType::Date,
        }
    }

    /// Number of choices an answer is picked from, for choice-based kinds.
    pub fn choice_limit(&self) -> Option<usize> {
        match self {
            Self::TrueFalse => Some(2),
            Self::MultipleChoice { choices } => Some(choices.len()),
            Self::Matching { statements, .. } => Some(statements.len()),
            Self::ShortAnswer | Self::Essay | Self::Date { .. } => None,
        }
    }

    /// Answer count this kind forces, if it does not let the author pick.
    fn fixed_answer_count(&self) -> Option<usize> {
        match self {
            Self::TrueFalse => Some(1),
            Self::Matching { statements, .. } => Some(statements.len()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), QuestionError> {
        match self {
            Self::MultipleChoice { choices } => check_choice_count(choices.len()),
            Self::Matching {
                statements,
                answers,
            } => {
                check_choice_count(statements.len())?;
                if statements.len() != answers.len() {
                    return Err(QuestionError::MatchingMismatch {
                        statements: statements.len(),
                        answers: answers.len(),
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn check_choice_count(count: usize) -> Result<(), QuestionError> {
    if (1..=MAX_CHOICES).contains(&count) {
        Ok(())
    } else {
        Err(QuestionError::ChoiceCount(count))
    }
}

/// A single question in a survey or test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt text shown to the user.
    prompt: String,

    /// How many answers a taker gives for this question.
    answer_count: usize,

    /// The kind of question (determines choices and validation).
    kind: QuestionKind,

    /// Submitted answers and, for tests, the answer key.
    #[serde(default)]
    response: Response,
}

impl Question {
    /// Create a new question with the default answer count for its kind.
    pub fn new(prompt: impl Into<String>, kind: QuestionKind) -> Result<Self, QuestionError> {
        kind.validate()?;
        Ok(Self {
            prompt: prompt.into(),
            answer_count: kind.fixed_answer_count().unwrap_or(1),
            kind,
            response: Response::new(),
        })
    }

    pub fn true_false(prompt: impl Into<String>) -> Self {
        Self::infallible(prompt, QuestionKind::TrueFalse)
    }

    pub fn multiple_choice(
        prompt: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<Self, QuestionError> {
        Self::new(prompt, QuestionKind::MultipleChoice { choices })
    }

    pub fn matching(
        prompt: impl Into<String>,
        statements: Vec<String>,
        answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        Self::new(
            prompt,
            QuestionKind::Matching {
                statements,
                answers,
            },
        )
    }

    pub fn short_answer(prompt: impl Into<String>) -> Self {
        Self::infallible(prompt, QuestionKind::ShortAnswer)
    }

    pub fn essay(prompt: impl Into<String>) -> Self {
        Self::infallible(prompt, QuestionKind::Essay)
    }

    pub fn date(prompt: impl Into<String>, format: impl Into<String>) -> Self {
        Self::infallible(
            prompt,
            QuestionKind::Date {
                format: format.into(),
            },
        )
    }

    // Only for kinds without structural data to validate.
    fn infallible(prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            prompt: prompt.into(),
            answer_count: 1,
            kind,
            response: Response::new(),
        }
    }

    /// A copy with the same prompt, kind and answer count but an empty response.
    pub fn blank_copy(&self) -> Self {
        Self {
            prompt: self.prompt.clone(),
            answer_count: self.answer_count,
            kind: self.kind.clone(),
            response: Response::new(),
        }
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Get the number of answers a taker gives.
    pub fn answer_count(&self) -> usize {
        self.answer_count
    }

    /// Set the number of answers a taker gives.
    ///
    /// Rejects zero, counts above the number of choices, and any change to
    /// kinds whose count is fixed. On error the stored count is unchanged.
    pub fn set_answer_count(&mut self, count: usize) -> Result<(), QuestionError> {
        if count == 0 {
            return Err(QuestionError::ZeroAnswers);
        }
        if let Some(required) = self.kind.fixed_answer_count() {
            if count != required {
                return Err(QuestionError::FixedAnswerCount { required });
            }
        } else if let Some(available) = self.kind.choice_limit()
            && count > available
        {
            return Err(QuestionError::ExceedsChoices {
                requested: count,
                available,
            });
        }
        self.answer_count = count;
        Ok(())
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get the data-less tag of this question.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Number of choices an answer is picked from, for choice-based kinds.
    pub fn choice_limit(&self) -> Option<usize> {
        self.kind.choice_limit()
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    pub fn is_essay(&self) -> bool {
        matches!(self.kind, QuestionKind::Essay)
    }

    /// Score this question against its key: `None` for essays.
    pub fn grade(&self) -> Option<bool> {
        (!self.is_essay()).then(|| self.response.matches_key(self.answer_count))
    }

    /// Replace a multiple-choice choice or a matching statement.
    pub fn set_choice(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), QuestionError> {
        let kind = self.question_type();
        let entries = match &mut self.kind {
            QuestionKind::MultipleChoice { choices } => choices,
            QuestionKind::Matching { statements, .. } => statements,
            _ => {
                return Err(QuestionError::Unsupported {
                    operation: "editing choices",
                    kind,
                });
            }
        };
        replace_entry(entries, index, text.into())
    }

    /// Replace one of a matching question's possible answers.
    pub fn set_possible_answer(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), QuestionError> {
        match &mut self.kind {
            QuestionKind::Matching { answers, .. } => replace_entry(answers, index, text.into()),
            other => Err(QuestionError::Unsupported {
                operation: "editing possible answers",
                kind: other.question_type(),
            }),
        }
    }

    /// Replace a date question's format.
    ///
    /// Recorded answers are rewritten into the new format, so an existing key
    /// stays matchable.
    pub fn set_date_format(&mut self, new_format: impl Into<String>) -> Result<(), QuestionError> {
        match &mut self.kind {
            QuestionKind::Date { format } => {
                let new_format = new_format.into();
                let rewrite = |answers: &[String]| -> Vec<String> {
                    answers
                        .iter()
                        .map(|answer| {
                            parse_date(answer, format)
                                .map(|date| format_date(date, &new_format))
                                .unwrap_or_else(|| answer.clone())
                        })
                        .collect()
                };
                let correct = rewrite(self.response.correct());
                let submitted = rewrite(self.response.submitted());
                self.response.set_correct(correct);
                self.response.set_submitted(submitted);
                *format = new_format;
                Ok(())
            }
            other => Err(QuestionError::Unsupported {
                operation: "date formats",
                kind: other.question_type(),
            }),
        }
    }

    /// The choice block shown while answering, for choice-based kinds.
    pub fn display_choices(&self) -> Option<String> {
        match &self.kind {
            QuestionKind::TrueFalse => Some("T/F".to_string()),
            QuestionKind::MultipleChoice { choices } => Some(
                choices
                    .iter()
                    .enumerate()
                    .map(|(i, choice)| format!("{}) {choice}", choice_label(i)))
                    .collect::<Vec<_>>()
                    .join("\t"),
            ),
            QuestionKind::Matching {
                statements,
                answers,
            } => Some(
                statements
                    .iter()
                    .zip(answers)
                    .enumerate()
                    .map(|(i, (statement, answer))| {
                        format!("{}) {statement}\t{}) {answer}", choice_label(i), i + 1)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            QuestionKind::ShortAnswer | QuestionKind::Essay | QuestionKind::Date { .. } => None,
        }
    }

    /// Placeholders describing the answers this question expects.
    pub fn display_slots(&self) -> String {
        let n = self.answer_count;
        match &self.kind {
            QuestionKind::TrueFalse => "Enter T or F.".to_string(),
            QuestionKind::MultipleChoice { .. } if n == 1 => {
                "A choice will be accepted here.".to_string()
            }
            QuestionKind::MultipleChoice { .. } => (1..=n)
                .map(|i| format!("Choice #{i} will go here"))
                .collect::<Vec<_>>()
                .join("\n"),
            QuestionKind::Matching { .. } => {
                "Each statement is matched with one possible answer.".to_string()
            }
            QuestionKind::ShortAnswer if n == 1 => "A short form answer is accepted.".to_string(),
            QuestionKind::ShortAnswer => {
                lettered_slots(n, |i| format!("Short form answer #{i} will go here"))
            }
            QuestionKind::Essay if n == 1 => "A long form answer is accepted.".to_string(),
            QuestionKind::Essay => {
                lettered_slots(n, |i| format!("Long form answer #{i} will go here"))
            }
            QuestionKind::Date { format } if n == 1 => {
                format!("A date should be in the following format: {format}")
            }
            QuestionKind::Date { format } => {
                lettered_slots(n, |_| format!("A date in the format {format} will go here"))
            }
        }
    }

    /// Render a list of answers for this question, e.g. a key or a submission.
    ///
    /// Matching answers are shown next to the statement letter they belong to.
    pub fn describe_answers(&self, answers: &[String]) -> String {
        match &self.kind {
            QuestionKind::Matching { .. } => answers
                .iter()
                .enumerate()
                .map(|(i, answer)| {
                    let label = if i < MAX_CHOICES {
                        choice_label(i).to_string()
                    } else {
                        (i + 1).to_string()
                    };
                    format!("{label}) {answer}")
                })
                .collect::<Vec<_>>()
                .join(", "),
            _ => answers.join(", "),
        }
    }

    /// The authoring view followed by the recorded answer key.
    pub fn display_with_answer_key(&self) -> String {
        let key = if self.is_essay() {
            "Essay questions are graded by hand.".to_string()
        } else if self.response.has_key() {
            format!(
                "Correct answer(s): {}",
                self.describe_answers(self.response.correct())
            )
        } else {
            "No answer key recorded.".to_string()
        };
        format!("{self}\n{key}")
    }
}

fn replace_entry(entries: &mut [String], index: usize, text: String) -> Result<(), QuestionError> {
    let len = entries.len();
    match entries.get_mut(index) {
        Some(entry) => {
            *entry = text;
            Ok(())
        }
        None => Err(QuestionError::NoSuchEntry {
            index: index + 1,
            len,
        }),
    }
}

fn lettered_slots(n: usize, line: impl Fn(usize) -> String) -> String {
    (1..=n)
        .map(|i| {
            let label = if i <= MAX_CHOICES {
                choice_label(i - 1).to_string()
            } else {
                i.to_string()
            };
            format!("{label}) {}", line(i))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QuestionKind::TrueFalse => write!(f, "{}\nT/F", self.prompt),
            QuestionKind::MultipleChoice { .. } => write!(
                f,
                "{}\n{}\n{}",
                self.prompt,
                self.display_choices().unwrap_or_default(),
                self.display_slots()
            ),
            QuestionKind::Matching { .. } => write!(
                f,
                "{}\n{}",
                self.prompt,
                self.display_choices().unwrap_or_default()
            ),
            QuestionKind::ShortAnswer | QuestionKind::Essay | QuestionKind::Date { .. } => {
                write!(f, "{}\n{}", self.prompt, self.display_slots())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn answer_count_cannot_exceed_choices() {
        let mut q = Question::multiple_choice("Pick", strings(&["Red", "Blue"])).unwrap();

        let err = q.set_answer_count(3).unwrap_err();
        assert_eq!(
            err,
            QuestionError::ExceedsChoices {
                requested: 3,
                available: 2
            }
        );
        assert_eq!(q.answer_count(), 1);

        q.set_answer_count(2).unwrap();
        assert_eq!(q.answer_count(), 2);
    }

    #[test]
    fn zero_answers_rejected_for_every_kind() {
        for mut q in [
            Question::true_false("t"),
            Question::short_answer("s"),
            Question::essay("e"),
            Question::date("d", "MM-dd-yyyy"),
        ] {
            assert_eq!(q.set_answer_count(0), Err(QuestionError::ZeroAnswers));
            assert_eq!(q.answer_count(), 1);
        }
    }

    #[test]
    fn fixed_counts_for_true_false_and_matching() {
        let mut tf = Question::true_false("Sky is blue");
        assert_eq!(
            tf.set_answer_count(2),
            Err(QuestionError::FixedAnswerCount { required: 1 })
        );

        let mut m = Question::matching(
            "Match",
            strings(&["Dog", "Cat", "Cow"]),
            strings(&["Moo", "Woof", "Meow"]),
        )
        .unwrap();
        assert_eq!(m.answer_count(), 3);
        assert_eq!(
            m.set_answer_count(2),
            Err(QuestionError::FixedAnswerCount { required: 3 })
        );
    }

    #[test]
    fn free_text_counts_are_unbounded() {
        let mut q = Question::short_answer("Name three colors");
        q.set_answer_count(3).unwrap();
        assert_eq!(q.answer_count(), 3);
        assert_eq!(q.choice_limit(), None);
    }

    #[test]
    fn matching_needs_equal_lengths() {
        let err = Question::matching("Match", strings(&["a", "b"]), strings(&["1"])).unwrap_err();
        assert_eq!(
            err,
            QuestionError::MatchingMismatch {
                statements: 2,
                answers: 1
            }
        );
    }

    #[test]
    fn choice_count_bounds() {
        assert_eq!(
            Question::multiple_choice("Empty", Vec::new()).unwrap_err(),
            QuestionError::ChoiceCount(0)
        );
        let too_many = (0..27).map(|i| i.to_string()).collect();
        assert_eq!(
            Question::multiple_choice("Big", too_many).unwrap_err(),
            QuestionError::ChoiceCount(27)
        );
    }

    #[test]
    fn displays_each_kind() {
        assert_eq!(Question::true_false("Sky is blue").to_string(), "Sky is blue\nT/F");

        let mut mc = Question::multiple_choice("Pick", strings(&["Red", "Blue"])).unwrap();
        assert_eq!(
            mc.to_string(),
            "Pick\nA) Red\tB) Blue\nA choice will be accepted here."
        );
        mc.set_answer_count(2).unwrap();
        assert_eq!(
            mc.to_string(),
            "Pick\nA) Red\tB) Blue\nChoice #1 will go here\nChoice #2 will go here"
        );

        let m = Question::matching("Match", strings(&["Dog", "Cat"]), strings(&["Woof", "Meow"]))
            .unwrap();
        assert_eq!(m.to_string(), "Match\nA) Dog\t1) Woof\nB) Cat\t2) Meow");

        let mut sa = Question::short_answer("Colors");
        assert_eq!(sa.to_string(), "Colors\nA short form answer is accepted.");
        sa.set_answer_count(2).unwrap();
        assert_eq!(
            sa.to_string(),
            "Colors\nA) Short form answer #1 will go here\nB) Short form answer #2 will go here"
        );

        assert_eq!(
            Question::essay("Why").to_string(),
            "Why\nA long form answer is accepted."
        );
        assert_eq!(
            Question::date("When", "dd/MM/yyyy").to_string(),
            "When\nA date should be in the following format: dd/MM/yyyy"
        );
    }

    #[test]
    fn answer_key_display() {
        let mut m =
            Question::matching("Match", strings(&["Dog", "Cat"]), strings(&["Woof", "Meow"]))
                .unwrap();
        assert!(m.display_with_answer_key().ends_with("No answer key recorded."));

        m.response_mut().set_correct(strings(&["1", "2"]));
        assert!(
            m.display_with_answer_key()
                .ends_with("Correct answer(s): A) 1, B) 2")
        );
        assert!(
            Question::essay("Why")
                .display_with_answer_key()
                .ends_with("graded by hand.")
        );
    }

    #[test]
    fn editing_choices_and_formats() {
        let mut mc = Question::multiple_choice("Pick", strings(&["Red", "Blue"])).unwrap();
        mc.set_choice(1, "Green").unwrap();
        assert_eq!(mc.display_choices().unwrap(), "A) Red\tB) Green");
        assert_eq!(
            mc.set_choice(5, "Nope"),
            Err(QuestionError::NoSuchEntry { index: 6, len: 2 })
        );
        assert!(matches!(
            mc.set_date_format("yyyy-MM-dd"),
            Err(QuestionError::Unsupported { .. })
        ));

        let mut d = Question::date("When", "MM-dd-yyyy");
        d.set_date_format("yyyy-MM-dd").unwrap();
        assert_eq!(
            d.kind(),
            &QuestionKind::Date {
                format: "yyyy-MM-dd".to_string()
            }
        );
    }

    #[test]
    fn new_date_format_rewrites_the_key() {
        let mut d = Question::date("When", "MM-dd-yyyy");
        d.response_mut().push_correct("03-09-2024");
        d.set_date_format("dd/MM/yyyy").unwrap();

        assert_eq!(d.response().correct(), ["09/03/2024"]);

        d.response_mut().push_submitted("09/03/2024");
        assert_eq!(d.grade(), Some(true));
    }

    #[test]
    fn essays_are_not_graded() {
        let mut essay = Question::essay("Why");
        essay.response_mut().push_submitted("Because");
        assert_eq!(essay.grade(), None);

        let mut tf = Question::true_false("Sky is blue");
        tf.response_mut().push_correct("T");
        tf.response_mut().push_submitted("T");
        assert_eq!(tf.grade(), Some(true));
    }

    #[test]
    fn blank_copy_drops_answers() {
        let mut q = Question::short_answer("Name");
        q.set_answer_count(2).unwrap();
        q.response_mut().push_submitted("Ada");
        q.response_mut().push_correct("Ada");

        let copy = q.blank_copy();
        assert_eq!(copy.prompt(), "Name");
        assert_eq!(copy.answer_count(), 2);
        assert_eq!(copy.response(), &Response::new());
    }

    #[test]
    fn serialized_kind_is_tagged() {
        let q = Question::date("When", "MM-dd-yyyy");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["kind"]["type"], "date");
        assert_eq!(json["kind"]["format"], "MM-dd-yyyy");

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }
}
