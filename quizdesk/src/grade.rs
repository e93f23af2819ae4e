//! Scoring a test submission against the answer key it carries.

use std::fmt;

use quizdesk_types::Submission;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

/// How a single question was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Essays are left for a human grader.
    Ungraded,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Ungraded => "graded by hand",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct QuestionGrade {
    #[tabled(rename = "#")]
    pub number: usize,
    #[tabled(rename = "Question")]
    pub prompt: String,
    #[tabled(rename = "Given")]
    pub given: String,
    #[tabled(rename = "Expected")]
    pub expected: String,
    #[tabled(rename = "Result")]
    pub outcome: Outcome,
}

/// The result of grading one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub taker: String,
    pub document_id: u32,
    pub questions: Vec<QuestionGrade>,
}

impl GradeReport {
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn correct(&self) -> usize {
        self.count(Outcome::Correct)
    }

    pub fn essays(&self) -> usize {
        self.count(Outcome::Ungraded)
    }

    /// Number of questions scored automatically.
    pub fn gradable(&self) -> usize {
        self.total() - self.essays()
    }

    /// Score out of 100, where every question is worth the same.
    pub fn score(&self) -> f64 {
        percent(self.correct(), self.total())
    }

    /// The part of the 100 points that could be scored automatically.
    pub fn gradable_points(&self) -> f64 {
        percent(self.gradable(), self.total())
    }

    /// Percentage over the auto-graded questions only, `None` if every
    /// question is an essay.
    pub fn auto_graded_percentage(&self) -> Option<f64> {
        (self.gradable() > 0).then(|| percent(self.correct(), self.gradable()))
    }

    /// One-line verdict shown to the grader.
    pub fn summary(&self) -> String {
        let score = self.score();
        match self.essays() {
            0 => format!("You received a {score:.0} on the test."),
            essays => format!(
                "You received a {score:.0} on the test. The test was worth 100 points, but only {:.0} points could be auto-graded because there were {essays} essay question(s).",
                self.gradable_points()
            ),
        }
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.questions.iter().filter(|q| q.outcome == outcome).count()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Grade every question of `submission` against its recorded key.
///
/// A non-essay question is correct when each of its answer slots equals the
/// key at the same position.
pub fn grade(submission: &Submission) -> GradeReport {
    let questions = submission
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let response = question.response();
            let outcome = match question.grade() {
                None => Outcome::Ungraded,
                Some(true) => Outcome::Correct,
                Some(false) => Outcome::Incorrect,
            };
            let expected = if question.is_essay() {
                String::new()
            } else {
                question.describe_answers(response.correct())
            };
            QuestionGrade {
                number: i + 1,
                prompt: question.prompt().to_string(),
                given: question.describe_answers(response.submitted()),
                expected,
                outcome,
            }
        })
        .collect();

    GradeReport {
        taker: submission.taker().to_string(),
        document_id: submission.document_id(),
        questions,
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!("Test {}: {}", self.document_id, self.taker);
        let footer = match self.auto_graded_percentage() {
            Some(pct) => format!(
                "{} of {} auto-graded question(s) correct ({pct:.0}%)",
                self.correct(),
                self.gradable()
            ),
            None => "No question could be auto-graded".to_string(),
        };
        let table = Table::new(&self.questions)
            .with(Panel::header(heading))
            .with(Panel::footer(footer))
            .with(Style::modern())
            .to_string();
        write!(f, "{table}\n{}", self.summary())
    }
}
