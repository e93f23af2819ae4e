use serde::{Deserialize, Serialize};

use crate::{Document, DocumentKind, Question};

/// One taker's answers to a document.
///
/// Each question is a copy of the document's question whose response holds
/// the submitted answers. Test submissions keep the answer key too, so a
/// submission can be graded without its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    kind: DocumentKind,
    document_id: u32,
    taker: String,
    questions: Vec<Question>,
}

impl Submission {
    /// Create a submission for `document` with already-answered questions.
    pub fn new(document: &Document, taker: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            kind: document.kind(),
            document_id: document.id(),
            taker: taker.into(),
            questions,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn document_id(&self) -> u32 {
        self.document_id
    }

    /// The name the taker entered.
    pub fn taker(&self) -> &str {
        &self.taker
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
