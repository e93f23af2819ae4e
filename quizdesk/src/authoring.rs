//! Interactive creation and modification of documents.

use quizdesk_types::{
    DEFAULT_DATE_FORMAT, Document, DocumentKind, MAX_CHOICES, Prompter, Question, QuestionError,
    QuestionKind, QuestionType, SurveyError,
};

use crate::{Console, take::read_answers};

/// Run the authoring menu for a new document.
///
/// Returns `None` if the author leaves without adding any question.
pub fn create_document<P: Prompter>(
    console: &mut Console<P>,
    kind: DocumentKind,
    id: u32,
) -> Result<Option<Document>, SurveyError> {
    let mut options: Vec<String> = QuestionType::ALL
        .iter()
        .map(|t| format!("Add a new {t} question"))
        .collect();
    options.push("Return to previous menu".to_string());

    let mut document = Document::new(kind, id);
    loop {
        let choice = console.choose(&format!("Add questions to {kind} {id}:"), &options)?;
        match QuestionType::ALL.get(choice) {
            Some(&question_type) => {
                let question = author_question(console, question_type, kind.collects_answer_key())?;
                document.push(question);
            }
            None if document.is_empty() => {
                console.say(format!(
                    "You must add at least one question. The {kind} will not be created."
                ))?;
                return Ok(None);
            }
            None => return Ok(Some(document)),
        }
    }
}

/// Author one question of the given type.
///
/// With `with_key`, every non-essay question also asks for its correct answers.
pub fn author_question<P: Prompter>(
    console: &mut Console<P>,
    question_type: QuestionType,
    with_key: bool,
) -> Result<Question, SurveyError> {
    let prompt = console.text(&format!("Enter the prompt for your {question_type} question:"))?;

    let mut question = match question_type {
        QuestionType::TrueFalse => Question::true_false(prompt),
        QuestionType::MultipleChoice => {
            let mut question = loop {
                let choices = read_entries(
                    console,
                    "Enter the number of choices for your multiple-choice question:",
                    "Enter choice",
                )?;
                match Question::multiple_choice(prompt.clone(), choices) {
                    Ok(question) => break question,
                    Err(err) => console.say(err.to_string())?,
                }
            };
            read_answer_count(console, &mut question)?;
            question
        }
        QuestionType::ShortAnswer => {
            let mut question = Question::short_answer(prompt);
            read_answer_count(console, &mut question)?;
            question
        }
        QuestionType::Essay => {
            let mut question = Question::essay(prompt);
            read_answer_count(console, &mut question)?;
            question
        }
        QuestionType::Date => {
            let format = read_date_format(
                console,
                "What format should a date be entered in? Leave blank for default (MM-dd-yyyy)",
            )?;
            let mut question = Question::date(prompt, format);
            read_answer_count(console, &mut question)?;
            question
        }
        QuestionType::Matching => loop {
            let count = console.number_in(
                "Enter the number of statements for your matching question:",
                1..=MAX_CHOICES,
            )?;
            let statements = read_n(console, count, "Enter statement")?;
            let answers = read_n(console, count, "Enter possible answer")?;
            match Question::matching(prompt.clone(), statements, answers) {
                Ok(question) => break question,
                Err(err) => console.say(err.to_string())?,
            }
        },
    };

    if with_key && !question.is_essay() {
        read_answer_key(console, &mut question)?;
    }
    Ok(question)
}

/// Ask for the correct answers of `question`, replacing any previous key.
pub fn read_answer_key<P: Prompter>(
    console: &mut Console<P>,
    question: &mut Question,
) -> Result<(), SurveyError> {
    let heading = match question.question_type() {
        QuestionType::Matching => "Enter the correct pairings:",
        _ if question.answer_count() > 1 => "Enter the correct answers (one per line):",
        _ => "Enter the correct answer:",
    };
    console.say(heading)?;
    if let Some(choices) = question.display_choices() {
        console.say(choices)?;
    }
    let key = read_answers(console, question)?;
    question.response_mut().set_correct(key);
    Ok(())
}

/// Let the author pick a question of `document` and edit it.
pub fn modify_document<P: Prompter>(
    console: &mut Console<P>,
    document: &mut Document,
) -> Result<(), SurveyError> {
    if document.is_empty() {
        return console.say(format!("This {} has no questions to modify.", document.kind()));
    }
    let with_key = document.kind().collects_answer_key();

    console.say(document.render())?;
    let index = console.index("What question do you wish to modify?", document.len())?;
    let question = &mut document.questions_mut()[index];
    console.say(question.to_string())?;

    modify_question(console, question)?;

    if with_key
        && !question.is_essay()
        && console.yes_no("Do you wish to modify the correct answers?")?
    {
        read_answer_key(console, question)?;
    }
    Ok(())
}

/// Edit the prompt and the kind-specific parts of one question.
pub fn modify_question<P: Prompter>(
    console: &mut Console<P>,
    question: &mut Question,
) -> Result<(), SurveyError> {
    if console.yes_no("Do you wish to modify the prompt?")? {
        console.say(question.prompt())?;
        let prompt = console.text("Enter a new prompt:")?;
        question.set_prompt(prompt);
    }

    match question.question_type() {
        QuestionType::MultipleChoice => {
            if console.yes_no("Do you wish to modify choices?")? {
                edit_choice(console, question, "choice")?;
            }
        }
        QuestionType::Matching => {
            if console.yes_no("Do you wish to modify statements?")? {
                edit_choice(console, question, "statement")?;
            }
            if console.yes_no("Do you wish to modify possible answers?")? {
                edit_possible_answer(console, question)?;
            }
        }
        QuestionType::Date => {
            if console.yes_no("Do you wish to modify the date format?")? {
                console.say(format!("Current format: {}", date_format_of(question)))?;
                let format = read_date_format(
                    console,
                    "Enter the new date format (leave blank for default format MM-dd-yyyy):",
                )?;
                report(console, question.set_date_format(format))?;
            }
        }
        QuestionType::TrueFalse | QuestionType::ShortAnswer | QuestionType::Essay => {}
    }
    Ok(())
}

fn edit_choice<P: Prompter>(
    console: &mut Console<P>,
    question: &mut Question,
    noun: &str,
) -> Result<(), SurveyError> {
    let Some(limit) = question.choice_limit() else {
        return Ok(());
    };
    if let Some(choices) = question.display_choices() {
        console.say(choices)?;
    }
    let index = console.choice_letter(&format!("Which {noun} do you wish to modify?"), limit)?;
    let text = console.text(&format!("Enter the new {noun}:"))?;
    report(console, question.set_choice(index, text))
}

fn edit_possible_answer<P: Prompter>(
    console: &mut Console<P>,
    question: &mut Question,
) -> Result<(), SurveyError> {
    let Some(limit) = question.choice_limit() else {
        return Ok(());
    };
    if let Some(choices) = question.display_choices() {
        console.say(choices)?;
    }
    let number = console.number_in(
        "Which possible answer do you wish to modify? Please enter a number:",
        1..=limit,
    )?;
    let text = console.text("Enter the new possible answer:")?;
    report(console, question.set_possible_answer(number - 1, text))
}

fn date_format_of(question: &Question) -> &str {
    match question.kind() {
        QuestionKind::Date { format } => format,
        _ => DEFAULT_DATE_FORMAT,
    }
}

fn read_date_format<P: Prompter>(
    console: &mut Console<P>,
    prompt: &str,
) -> Result<String, SurveyError> {
    match console.date_format(prompt)? {
        Some(format) => Ok(format),
        None => {
            console.say("Default format will be used.")?;
            Ok(DEFAULT_DATE_FORMAT.to_string())
        }
    }
}

/// Keep asking for an answer count until the question accepts it.
fn read_answer_count<P: Prompter>(
    console: &mut Console<P>,
    question: &mut Question,
) -> Result<(), SurveyError> {
    let default = question.choice_limit().is_none().then_some(1);
    let prompt = match default {
        Some(_) => "How many answers are allowed for this question? Leave blank for 1.",
        None => "How many answers are allowed for this question?",
    };
    loop {
        let count = console.count(prompt, default)?;
        match question.set_answer_count(count) {
            Ok(()) => return Ok(()),
            Err(err) => console.say(err.to_string())?,
        }
    }
}

fn read_entries<P: Prompter>(
    console: &mut Console<P>,
    count_prompt: &str,
    entry_prompt: &str,
) -> Result<Vec<String>, SurveyError> {
    let count = console.number_in(count_prompt, 1..=MAX_CHOICES)?;
    read_n(console, count, entry_prompt)
}

fn read_n<P: Prompter>(
    console: &mut Console<P>,
    count: usize,
    entry_prompt: &str,
) -> Result<Vec<String>, SurveyError> {
    (1..=count)
        .map(|i| console.text(&format!("{entry_prompt} #{i}:")))
        .collect()
}

fn report<P: Prompter>(
    console: &mut Console<P>,
    outcome: Result<(), QuestionError>,
) -> Result<(), SurveyError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) => console.say(err.to_string()),
    }
}
