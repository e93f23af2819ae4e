//! # quizdesk
//!
//! Menu-driven console for authoring, taking, tabulating and grading
//! surveys and tests. Documents and answers are kept as JSON files in a
//! data directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use quizdesk::{Session, Store};
use quizdesk_dialoguer::DialoguerPrompter;
use tracing::{Level, info, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Command line options.
#[derive(Debug, Clone)]
struct Options {
    /// Directory holding documents and submissions
    dir: PathBuf,
    /// Disable the colorful prompt theme
    plain: bool,
    /// Number of `-v` flags
    verbose: usize,
}

/// Build the command line parser
fn options() -> OptionParser<Options> {
    let dir = short('d')
        .long("dir")
        .env("QUIZDESK_DIR")
        .help("Directory holding surveys, tests and answers")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from("."))
        .format_fallback(|path, f| write!(f, "{}", path.display()));

    let plain = long("plain")
        .help("Use plain prompts without colors")
        .switch();

    let verbose = short('v')
        .long("verbose")
        .help("Log more; repeat for debug output")
        .req_flag(())
        .count();

    construct!(Options {
        dir,
        plain,
        verbose
    })
    .to_options()
    .descr("Author, take, tabulate and grade surveys and tests")
}

fn level(verbose: usize) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn main() -> Result<()> {
    let opts = options().run();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(level(opts.verbose));
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let store = Store::new(&opts.dir);
    store
        .ensure_root()
        .with_context(|| format!("Failed to prepare data directory {}", opts.dir.display()))?;
    info!(dir = %opts.dir.display(), "using data directory");

    let prompter = if opts.plain {
        DialoguerPrompter::plain()
    } else {
        DialoguerPrompter::new()
    };

    match Session::new(prompter, store).run() {
        Ok(()) => Ok(()),
        Err(e) if e.is_cancelled() => {
            eprintln!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_invariants() {
        options().check_invariants(false);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = options()
            .run_inner(&["-d", "data", "--plain", "-vv"])
            .unwrap();
        assert_eq!(opts.dir, PathBuf::from("data"));
        assert!(opts.plain);
        assert_eq!(level(opts.verbose), Level::DEBUG);

        let opts = options().run_inner(&[] as &[&str]).unwrap();
        assert!(!opts.plain);
        assert_eq!(level(opts.verbose), Level::WARN);
    }
}
