//! The menu-driven session tying prompts, storage and the loaded document together.

use std::path::Path;

use quizdesk_types::{Document, DocumentKind, Prompter, SurveyError};
use tracing::{debug, warn};

use crate::{
    Console, Store, StoreError, authoring,
    grade::grade,
    tabulate::tabulate,
    take::administer,
};

/// One entry of the per-kind menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Display,
    Load,
    Save,
    Take,
    Modify,
    Tabulate,
    Grade,
    Return,
}

impl Action {
    /// The actions offered for `kind`, in menu order.
    pub fn menu(kind: DocumentKind) -> Vec<Action> {
        let mut actions = vec![
            Self::Create,
            Self::Display,
            Self::Load,
            Self::Save,
            Self::Take,
            Self::Modify,
            Self::Tabulate,
        ];
        if kind == DocumentKind::Test {
            actions.push(Self::Grade);
        }
        actions.push(Self::Return);
        actions
    }

    pub fn label(self, kind: DocumentKind) -> String {
        let title = kind.title();
        match self {
            Self::Create => format!("Create a new {title}"),
            Self::Display => format!("Display an existing {title}"),
            Self::Load => format!("Load an existing {title}"),
            Self::Save => format!("Save the current {title}"),
            Self::Take => format!("Take the current {title}"),
            Self::Modify => format!("Modify the current {title}"),
            Self::Tabulate => format!("Tabulate a {title}"),
            Self::Grade => format!("Grade a {title}"),
            Self::Return => "Return to previous menu".to_string(),
        }
    }
}

/// Interactive state: the console, the data directory and the loaded document.
#[derive(Debug)]
pub struct Session<P> {
    console: Console<P>,
    store: Store,
    current: Option<Document>,
}

impl<P: Prompter> Session<P> {
    pub fn new(prompter: P, store: Store) -> Self {
        Self {
            console: Console::new(prompter),
            store,
            current: None,
        }
    }

    /// The document currently loaded, if any.
    pub fn current(&self) -> Option<&Document> {
        self.current.as_ref()
    }

    pub fn console(&self) -> &Console<P> {
        &self.console
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_prompter(self) -> P {
        self.console.into_inner()
    }

    /// Run the top-level menu until the user quits.
    pub fn run(&mut self) -> Result<(), SurveyError> {
        let mut options: Vec<String> = DocumentKind::ALL
            .iter()
            .map(|kind| kind.title().to_string())
            .collect();
        options.push("Quit".to_string());

        loop {
            let choice = self.console.choose("Main menu:", &options)?;
            match DocumentKind::ALL.get(choice) {
                Some(&kind) => self.run_menu(kind)?,
                None => {
                    self.console.say("Exiting...")?;
                    return Ok(());
                }
            }
        }
    }

    /// Run the menu for one document kind until the user returns.
    pub fn run_menu(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let actions = Action::menu(kind);
        let labels: Vec<String> = actions.iter().map(|a| a.label(kind)).collect();

        loop {
            let choice = self.console.choose(&format!("{} menu:", kind.title()), &labels)?;
            let action = actions.get(choice).copied().unwrap_or(Action::Return);
            debug!(?action, %kind, "menu selection");
            if action == Action::Return {
                return Ok(());
            }
            self.dispatch(kind, action)?;
        }
    }

    /// Perform one menu action.
    pub fn dispatch(&mut self, kind: DocumentKind, action: Action) -> Result<(), SurveyError> {
        match action {
            Action::Create => self.create(kind),
            Action::Display => self.display(kind),
            Action::Load => self.load(kind),
            Action::Save => self.save(kind),
            Action::Take => self.take(kind),
            Action::Modify => self.modify(kind),
            Action::Tabulate => self.tabulate(kind),
            Action::Grade => self.grade(),
            Action::Return => Ok(()),
        }
    }

    /// Author a new document. It becomes current only if it has questions.
    pub fn create(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let id = match self.next_id(kind) {
            Ok(id) => id,
            Err(err) => return self.report(err),
        };
        if let Some(document) = authoring::create_document(&mut self.console, kind, id)? {
            self.console
                .say(format!("{} {id} created. Save it to keep it.", kind.title()))?;
            self.current = Some(document);
        }
        Ok(())
    }

    pub fn display(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(document) = self.loaded(kind) else {
            return self.not_loaded(kind, "display");
        };
        let rendered = document.render();
        self.console.say(rendered)
    }

    /// Pick a saved document and make it current.
    pub fn load(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(id) = self.select_document(kind, "load")? else {
            return Ok(());
        };
        match self.store.load_document(kind, id) {
            Ok(document) => {
                self.console.say(format!("Loaded {kind} {id}."))?;
                self.current = Some(document);
                Ok(())
            }
            Err(err) => self.report(err),
        }
    }

    pub fn save(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(document) = self.loaded(kind) else {
            return self.not_loaded(kind, "save");
        };
        let id = document.id();
        match self.store.save_document(document) {
            Ok(_) => self.console.say(format!("Saved {kind} {id}.")),
            Err(err) => self.report(err),
        }
    }

    /// Administer the current document and record the submission.
    pub fn take(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(document) = self.current.as_ref().filter(|d| d.kind() == kind) else {
            return self.not_loaded(kind, "take");
        };
        let submission = administer(&mut self.console, document)?;
        match self.store.save_submission(&submission) {
            Ok(_) => self.console.say("Your answers have been recorded."),
            Err(err) => self
                .console
                .say(format!("Your answers could not be recorded: {err}")),
        }
    }

    pub fn modify(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(document) = self.current.as_mut().filter(|d| d.kind() == kind) else {
            return self.not_loaded(kind, "modify");
        };
        authoring::modify_document(&mut self.console, document)
    }

    /// Pick a saved document and tally every submission to it.
    pub fn tabulate(&mut self, kind: DocumentKind) -> Result<(), SurveyError> {
        let Some(id) = self.select_document(kind, "tabulate")? else {
            return Ok(());
        };
        let (document, paths) = match self
            .store
            .load_document(kind, id)
            .and_then(|d| Ok((d, self.store.submission_paths(kind, id)?)))
        {
            Ok(found) => found,
            Err(err) => return self.report(err),
        };
        if paths.is_empty() {
            return self.console.say("No user answers to load");
        }

        let mut submissions = Vec::with_capacity(paths.len());
        for path in &paths {
            match self.store.load_submission(path) {
                Ok(submission) => submissions.push(submission),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable submission");
                    self.console
                        .say(format!("Failed to read user file: {}", file_name(path)))?;
                }
            }
        }

        let tabulation = tabulate(&document, &submissions);
        self.console.say(tabulation.to_string())
    }

    /// Pick a saved test and one of its submissions, and grade it.
    pub fn grade(&mut self) -> Result<(), SurveyError> {
        let kind = DocumentKind::Test;
        let Some(id) = self.select_document(kind, "grade")? else {
            return Ok(());
        };
        let paths = match self.store.submission_paths(kind, id) {
            Ok(paths) => paths,
            Err(err) => return self.report(err),
        };
        if paths.is_empty() {
            return self.console.say("No tests to grade");
        }

        let names: Vec<String> = paths.iter().map(|p| file_name(p)).collect();
        let choice = self
            .console
            .choose("Select an existing response set:", &names)?;
        let Some(path) = paths.get(choice) else {
            return self.console.say("Invalid selection.");
        };
        match self.store.load_submission(path) {
            Ok(submission) => self.console.say(grade(&submission).to_string()),
            Err(err) => self.console.say(format!(
                "There was a problem grading the test. Error: {err}"
            )),
        }
    }

    fn loaded(&self, kind: DocumentKind) -> Option<&Document> {
        self.current.as_ref().filter(|d| d.kind() == kind)
    }

    fn not_loaded(&mut self, kind: DocumentKind, verb: &str) -> Result<(), SurveyError> {
        self.console.say(format!(
            "You must have a {kind} loaded in order to {verb} it."
        ))
    }

    fn report(&mut self, err: StoreError) -> Result<(), SurveyError> {
        warn!(error = %err, "storage operation failed");
        self.console.say(err.to_string())
    }

    /// The id for a new document: past every saved one and the unsaved current one.
    fn next_id(&self, kind: DocumentKind) -> Result<u32, StoreError> {
        let saved = self.store.next_id(kind)?;
        let unsaved = match self.loaded(kind) {
            Some(document) => {
                let last = document.id();
                last.checked_add(1).ok_or(StoreError::IdsExhausted { kind, last })?
            }
            None => 0,
        };
        Ok(saved.max(unsaved))
    }

    /// List saved documents of `kind` and let the user pick one.
    fn select_document(
        &mut self,
        kind: DocumentKind,
        verb: &str,
    ) -> Result<Option<u32>, SurveyError> {
        let ids = match self.store.document_ids(kind) {
            Ok(ids) => ids,
            Err(err) => {
                self.report(err)?;
                return Ok(None);
            }
        };
        if ids.is_empty() {
            self.console.say(format!("No {kind}s to {verb}"))?;
            return Ok(None);
        }

        let names: Vec<String> = ids.iter().map(|id| format!("{kind}{id}")).collect();
        let choice = self.console.choose(
            &format!("Please select a {kind} to {verb} (enter a number):"),
            &names,
        )?;
        let id = ids.get(choice).copied();
        if id.is_none() {
            self.console.say("Invalid selection.")?;
        }
        Ok(id)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use quizdesk_types::{Question, Submission};

    use super::*;
    use crate::TestPrompter;

    fn session(inputs: &[&str]) -> Session<TestPrompter> {
        let dir = std::env::temp_dir().join(format!("quizdesk-session-{}", uuid::Uuid::new_v4()));
        Session::new(
            TestPrompter::new().with_inputs(inputs.iter().copied()),
            Store::new(dir),
        )
    }

    #[test]
    fn test_menu_offers_grading() {
        let labels: Vec<String> = Action::menu(DocumentKind::Test)
            .into_iter()
            .map(|a| a.label(DocumentKind::Test))
            .collect();
        assert_eq!(labels[0], "Create a new Test");
        assert_eq!(labels[7], "Grade a Test");
        assert_eq!(labels.last().map(String::as_str), Some("Return to previous menu"));

        assert!(!Action::menu(DocumentKind::Survey).contains(&Action::Grade));
    }

    #[test]
    fn actions_need_a_loaded_document_of_that_kind() {
        let mut s = session(&[]);
        for (action, verb) in [
            (Action::Display, "display"),
            (Action::Save, "save"),
            (Action::Take, "take"),
            (Action::Modify, "modify"),
        ] {
            s.dispatch(DocumentKind::Survey, action).unwrap();
            let expected = format!("You must have a survey loaded in order to {verb} it.");
            assert!(s.console().prompter().saw(&expected));
        }
    }

    #[test]
    fn nothing_saved_means_nothing_to_load() {
        let mut s = session(&[]);
        s.load(DocumentKind::Test).unwrap();
        s.tabulate(DocumentKind::Survey).unwrap();
        s.grade().unwrap();

        let prompter = s.console().prompter();
        assert!(prompter.saw("No tests to load"));
        assert!(prompter.saw("No surveys to tabulate"));
        assert!(prompter.saw("No tests to grade"));
    }

    #[test]
    fn empty_create_keeps_the_previous_document() {
        let mut s = session(&["3", "Name?", "", "7", "7"]);
        s.create(DocumentKind::Survey).unwrap();
        assert_eq!(s.current().map(Document::id), Some(1));

        s.create(DocumentKind::Survey).unwrap();
        assert_eq!(s.current().map(Document::len), Some(1));
        assert!(s.console().prompter().saw("The survey will not be created."));
    }

    #[test]
    fn unsaved_documents_still_advance_the_id() {
        let mut s = session(&["4", "Why?", "", "7", "4", "How?", "", "7"]);
        s.create(DocumentKind::Test).unwrap();
        s.create(DocumentKind::Test).unwrap();
        assert_eq!(s.current().map(Document::id), Some(2));
    }

    #[test]
    fn exhausted_ids_are_reported_on_create() {
        let mut s = session(&["1", "Name?"]);
        s.store().ensure_root().unwrap();
        std::fs::write(s.store().document_path(DocumentKind::Survey, u32::MAX), "{}").unwrap();

        s.create(DocumentKind::Survey).unwrap();
        assert!(s.current().is_none());
        assert!(s.console().prompter().saw("No survey ids are left after 4294967295"));
        assert_eq!(s.console().prompter().remaining(), 2);

        std::fs::remove_dir_all(s.store().root()).unwrap();
    }

    /// Picks the first entry of every menu but answers the response-set
    /// menu with an index past its end.
    struct OutOfRange(TestPrompter);

    impl Prompter for OutOfRange {
        type Error = <TestPrompter as Prompter>::Error;

        fn show(&mut self, message: &str) -> Result<(), Self::Error> {
            self.0.show(message)
        }

        fn read_line(&mut self, prompt: &str) -> Result<String, Self::Error> {
            self.0.read_line(prompt)
        }

        fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, Self::Error> {
            self.0.show(prompt)?;
            if prompt.starts_with("Select an existing response set") {
                Ok(options.len())
            } else {
                Ok(0)
            }
        }
    }

    #[test]
    fn out_of_range_response_set_is_rejected() {
        let dir = std::env::temp_dir().join(format!("quizdesk-session-{}", uuid::Uuid::new_v4()));
        let store = Store::new(&dir);
        let test = Document::with_questions(
            DocumentKind::Test,
            1,
            vec![Question::true_false("Rust has a garbage collector")],
        );
        store.save_document(&test).unwrap();
        store
            .save_submission(&Submission::new(&test, "Ada", test.questions().to_vec()))
            .unwrap();

        let mut s = Session::new(OutOfRange(TestPrompter::new()), store);
        s.grade().unwrap();

        let prompter = &s.console().prompter().0;
        assert!(prompter.saw("Select an existing response set:"));
        assert!(prompter.saw("Invalid selection."));
        assert!(!prompter.saw("You received"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn quit_exits_the_main_menu() {
        let mut s = session(&["2", "9", "3"]);
        s.run().unwrap();

        let prompter = s.into_prompter();
        assert!(prompter.saw("Test menu:"));
        assert!(prompter.saw("8) Grade a Test"));
        assert!(prompter.saw("Exiting..."));
        assert_eq!(prompter.remaining(), 0);
    }
}
