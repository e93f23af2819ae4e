//! Core types for quizdesk.
//!
//! This crate provides the foundational types for surveys and tests:
//! - `Document` and `DocumentKind` - A survey or test with its ordered questions
//! - `Question`, `QuestionKind` and `QuestionType` - Individual questions and their variants
//! - `Response` - Submitted answers and the answer key of one question
//! - `Submission` - One taker's recorded answers for a document
//! - `Prompter` trait - For implementing console backends

mod date_format;
pub use date_format::{
    DEFAULT_DATE_FORMAT, canonical_date, format_date, normalize_date_format, parse_date,
};

mod response;
pub use response::Response;

mod question;
pub use question::{MAX_CHOICES, Question, QuestionError, QuestionKind, QuestionType, choice_label};

mod document;
pub use document::{Document, DocumentKind};

mod submission;
pub use submission::Submission;

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::Prompter;
