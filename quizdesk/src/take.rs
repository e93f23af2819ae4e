//! Administering a document: walking a taker through every question.

use quizdesk_types::{
    Document, DocumentKind, Prompter, Question, QuestionKind, Submission, SurveyError,
    choice_label,
};

use crate::Console;

/// Read the answers `question` expects, one per slot, with per-kind validation.
///
/// Used both by takers and by authors entering an answer key.
pub fn read_answers<P: Prompter>(
    console: &mut Console<P>,
    question: &Question,
) -> Result<Vec<String>, SurveyError> {
    let n = question.answer_count();
    let slot_prompt = |j: usize, single: &str| {
        if n == 1 {
            single.to_string()
        } else {
            format!("Enter answer #{j} of {n}:")
        }
    };

    let mut answers = Vec::with_capacity(n);
    match question.kind() {
        QuestionKind::TrueFalse => answers.push(console.true_false("Enter T or F:")?),
        QuestionKind::MultipleChoice { choices } => {
            for j in 1..=n {
                let prompt = slot_prompt(j, "Enter your choice:");
                let index = console.choice_letter(&prompt, choices.len())?;
                answers.push(choice_label(index).to_string());
            }
        }
        QuestionKind::Matching {
            statements,
            answers: possible,
        } => {
            for i in 0..statements.len() {
                let prompt = format!(
                    "Enter the number of the answer matching statement {}:",
                    choice_label(i)
                );
                let number = console.number_in(&prompt, 1..=possible.len())?;
                answers.push(number.to_string());
            }
        }
        QuestionKind::ShortAnswer | QuestionKind::Essay => {
            for j in 1..=n {
                answers.push(console.text(&slot_prompt(j, "Enter your answer:"))?);
            }
        }
        QuestionKind::Date { format } => {
            for j in 1..=n {
                let single = format!("Enter a date ({format}):");
                answers.push(console.date(&slot_prompt(j, &single), format)?);
            }
        }
    }
    Ok(answers)
}

/// Walk a taker through `document` and collect their answers.
///
/// Survey submissions hold blank copies of the questions; test submissions
/// keep the answer key so they can be graded on their own.
pub fn administer<P: Prompter>(
    console: &mut Console<P>,
    document: &Document,
) -> Result<Submission, SurveyError> {
    let taker = console.text("Enter your name:")?;

    let mut answered = Vec::with_capacity(document.len());
    for (i, question) in document.questions().iter().enumerate() {
        console.say(format!("{}) {}", i + 1, question.prompt()))?;
        if let Some(choices) = question.display_choices() {
            console.say(choices)?;
        }

        let answers = read_answers(console, question)?;
        let mut copy = match document.kind() {
            DocumentKind::Survey => question.blank_copy(),
            DocumentKind::Test => question.clone(),
        };
        copy.response_mut().set_submitted(answers);
        answered.push(copy);
    }

    Ok(Submission::new(document, taker, answered))
}
