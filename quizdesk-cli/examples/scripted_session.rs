//! Runs a whole session from a script instead of the keyboard:
//! create a one-question test, save it, take it twice and grade both takers.
//!
//! ```sh
//! cargo run -p quizdesk-cli --example scripted_session
//! ```

use anyhow::Result;
use quizdesk::{Session, Store, TestPrompter};

fn main() -> Result<()> {
    let dir = std::env::temp_dir().join("quizdesk-scripted-session");
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    let store = Store::new(&dir);
    store.ensure_root()?;

    let script = [
        "2", // Test menu
        "1", "1", "Rust has a garbage collector", "F", "7", // create
        "4", // save
        "5", "Ada", "F", // take
        "5", "Bo", "T", // take
        "8", "1", "1", // grade Ada
        "8", "1", "2", // grade Bo
        "9", "3",
    ];

    let mut session = Session::new(TestPrompter::new().with_inputs(script), store);
    session.run()?;

    println!("{}", session.into_prompter().output());
    println!("\nFiles written to {}", dir.display());
    Ok(())
}
