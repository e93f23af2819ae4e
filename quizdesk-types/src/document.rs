use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Question;

/// Whether a document is a survey or a test.
///
/// Tests carry an answer key for every non-essay question and can be graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Survey,
    Test,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [Self::Survey, Self::Test];

    /// Lowercase name, also used as the file name prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Survey => "survey",
            Self::Test => "test",
        }
    }

    /// Capitalized name for menus and headings.
    pub fn title(self) -> &'static str {
        match self {
            Self::Survey => "Survey",
            Self::Test => "Test",
        }
    }

    /// Check if authoring collects correct answers for this kind.
    pub fn collects_answer_key(self) -> bool {
        matches!(self, Self::Test)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A survey or test: an ordered set of questions with an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    kind: DocumentKind,

    /// Sequential identifier, unique per kind within a data directory.
    id: u32,

    questions: Vec<Question>,
}

impl Document {
    /// Create an empty document.
    pub fn new(kind: DocumentKind, id: u32) -> Self {
        Self {
            kind,
            id,
            questions: Vec::new(),
        }
    }

    /// Create a document with the given questions.
    pub fn with_questions(kind: DocumentKind, id: u32, questions: Vec<Question>) -> Self {
        Self { kind, id, questions }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get a mutable reference to the questions.
    pub fn questions_mut(&mut self) -> &mut Vec<Question> {
        &mut self.questions
    }

    /// Append a question.
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Check if the document has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Render every question, numbered from 1.
    ///
    /// Tests include each question's answer key.
    pub fn render(&self) -> String {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let body = match self.kind {
                    DocumentKind::Survey => question.to_string(),
                    DocumentKind::Test => question.display_with_answer_key(),
                };
                format!("{}) {body}\n", i + 1)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
