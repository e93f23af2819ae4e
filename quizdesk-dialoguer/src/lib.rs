//! # quizdesk-dialoguer
//!
//! Dialoguer prompter for quizdesk.
//!
//! This crate provides a terminal `Prompter` built on the `dialoguer`
//! library: free-text answers are read with a line editor and menus are
//! arrow-key selections. Validation stays in `quizdesk::Console`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quizdesk::{Session, Store};
//! use quizdesk_dialoguer::DialoguerPrompter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = Store::new("data");
//!     Session::new(DialoguerPrompter::new(), store).run()?;
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerError, DialoguerPrompter};
