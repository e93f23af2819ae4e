//! # quizdesk
//!
//! Author, store, administer, tabulate and grade console surveys and tests.
//! Backend-agnostic: every interaction goes through a [`Prompter`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quizdesk::{Session, Store};
//!
//! let store = Store::new("data");
//! store.ensure_root()?;
//!
//! // Run the menu loop with a backend
//! Session::new(backend, store).run()?;
//! ```
//!
//! ## Pieces
//!
//! - [`Console`] - validated input on top of a raw prompter
//! - [`authoring`] - creating and modifying documents
//! - [`take`] - administering a document to a taker
//! - [`Store`] - versioned JSON files in a data directory
//! - [`tabulate`](tabulate::tabulate) - answer frequencies across submissions
//! - [`grade`](grade::grade) - scoring a test submission against its key
//! - [`Session`] - the menu loop holding the loaded document
//!
//! ## Backends
//!
//! Backends are separate crates that implement `Prompter`:
//! - `quizdesk-dialoguer` - CLI prompts via dialoguer

// Re-export all types from quizdesk-types
pub use quizdesk_types::*;

mod console;
pub use console::Console;

pub mod authoring;
pub mod grade;
pub mod session;
pub mod storage;
pub mod tabulate;
pub mod take;

pub use grade::GradeReport;
pub use session::{Action, Session};
pub use storage::{Store, StoreError};
pub use tabulate::Tabulation;

// Test prompter for running sessions without user interaction
mod test_backend;
pub use test_backend::{TestPrompter, TestPrompterError};
