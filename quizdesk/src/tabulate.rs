//! Aggregating every submission to one document, question by question.

use std::fmt;

use quizdesk_types::{Document, DocumentKind, QuestionKind, Submission, choice_label};
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

/// Aggregated answers to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    /// How often each answer was given.
    Counts(Vec<(String, usize)>),

    /// Every answer, verbatim and in submission order.
    Responses(Vec<String>),

    /// How often each complete matching was given.
    Pairings(Vec<(Vec<String>, usize)>),
}

/// The tally of one question together with what was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTally {
    pub prompt: String,
    pub choices: Option<String>,
    pub tally: Tally,
}

/// Tallies for every question of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabulation {
    pub kind: DocumentKind,
    pub document_id: u32,
    pub submissions: usize,
    pub questions: Vec<QuestionTally>,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Answer")]
    answer: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answers")]
    answers: usize,
}

/// Tally `submissions` against `document`.
///
/// Submissions are matched to questions by position; questions a
/// submission does not cover are skipped for that submission.
pub fn tabulate(document: &Document, submissions: &[Submission]) -> Tabulation {
    let questions = document
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answers = submissions
                .iter()
                .filter_map(|s| s.questions().get(i))
                .map(|q| q.response().submitted());

            let tally = match question.kind() {
                QuestionKind::TrueFalse => {
                    count_into(seeded(["T".to_string(), "F".to_string()]), answers.flatten())
                }
                QuestionKind::MultipleChoice { choices } => count_into(
                    seeded((0..choices.len()).map(|c| choice_label(c).to_string())),
                    answers.flatten(),
                ),
                QuestionKind::ShortAnswer | QuestionKind::Date { .. } => {
                    count_into(Vec::new(), answers.flatten())
                }
                QuestionKind::Essay => Tally::Responses(answers.flatten().cloned().collect()),
                QuestionKind::Matching { statements, .. } => {
                    let mut pairings: Vec<(Vec<String>, usize)> = Vec::new();
                    for block in answers.flat_map(|a| a.chunks_exact(statements.len())) {
                        match pairings.iter_mut().find(|(seen, _)| seen.as_slice() == block) {
                            Some((_, count)) => *count += 1,
                            None => pairings.push((block.to_vec(), 1)),
                        }
                    }
                    Tally::Pairings(pairings)
                }
            };

            QuestionTally {
                prompt: question.prompt().to_string(),
                choices: question.display_choices(),
                tally,
            }
        })
        .collect();

    Tabulation {
        kind: document.kind(),
        document_id: document.id(),
        submissions: submissions.len(),
        questions,
    }
}

fn seeded(labels: impl IntoIterator<Item = String>) -> Vec<(String, usize)> {
    labels.into_iter().map(|label| (label, 0)).collect()
}

/// Count `answers` on top of `counts`, appending unseen answers in first-seen order.
fn count_into<'a>(
    mut counts: Vec<(String, usize)>,
    answers: impl Iterator<Item = &'a String>,
) -> Tally {
    for answer in answers {
        match counts.iter_mut().find(|(seen, _)| seen == answer) {
            Some((_, count)) => *count += 1,
            None => counts.push((answer.clone(), 1)),
        }
    }
    Tally::Counts(counts)
}

fn describe_pairing(block: &[String]) -> String {
    block
        .iter()
        .enumerate()
        .map(|(i, answer)| format!("{}) {answer}", choice_label(i)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for QuestionTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(choices) = &self.choices {
            writeln!(f, "{choices}")?;
        }
        match &self.tally {
            Tally::Counts(counts) if counts.is_empty() => write!(f, "No answers."),
            Tally::Counts(counts) => {
                let rows = counts.iter().map(|(answer, count)| CountRow {
                    answer: answer.clone(),
                    count: *count,
                });
                write!(f, "{}", Table::new(rows).with(Style::modern()))
            }
            Tally::Responses(responses) if responses.is_empty() => write!(f, "No answers."),
            Tally::Responses(responses) => write!(f, "{}", responses.join("\n")),
            Tally::Pairings(pairings) if pairings.is_empty() => write!(f, "No answers."),
            Tally::Pairings(pairings) => {
                let rows = pairings.iter().map(|(block, count)| CountRow {
                    answer: describe_pairing(block),
                    count: *count,
                });
                write!(f, "{}", Table::new(rows).with(Style::modern()))
            }
        }
    }
}

impl fmt::Display for Tabulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!(
            "{} {}: {} submission(s)",
            self.kind.title(),
            self.document_id,
            self.submissions
        );
        let overview = Table::new(self.questions.iter().enumerate().map(|(i, q)| OverviewRow {
            question: format!("{}) {}", i + 1, q.prompt),
            answers: answered(&q.tally),
        }))
        .with(Panel::header(heading))
        .with(Style::modern())
        .to_string();
        writeln!(f, "{overview}")?;

        for (i, question) in self.questions.iter().enumerate() {
            write!(f, "\n{}) {}\n{question}\n", i + 1, question.prompt)?;
        }
        Ok(())
    }
}

fn answered(tally: &Tally) -> usize {
    match tally {
        Tally::Counts(counts) => counts.iter().map(|(_, n)| n).sum(),
        Tally::Responses(responses) => responses.len(),
        Tally::Pairings(pairings) => pairings.iter().map(|(_, n)| n).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdesk_types::Question;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn submit(document: &Document, taker: &str, answers: &[&[&str]]) -> Submission {
        let questions = document
            .questions()
            .iter()
            .zip(answers)
            .map(|(q, a)| {
                let mut copy = q.blank_copy();
                copy.response_mut().set_submitted(strings(a));
                copy
            })
            .collect();
        Submission::new(document, taker, questions)
    }

    fn survey() -> Document {
        let mut mc =
            Question::multiple_choice("Colors", strings(&["Red", "Blue", "Green"])).unwrap();
        mc.set_answer_count(2).unwrap();
        Document::with_questions(
            DocumentKind::Survey,
            2,
            vec![
                Question::true_false("Sky is blue"),
                mc,
                Question::short_answer("Pet"),
                Question::essay("Why?"),
                Question::matching("Match", strings(&["Dog", "Cat"]), strings(&["Woof", "Meow"]))
                    .unwrap(),
            ],
        )
    }

    #[test]
    fn counts_are_seeded_and_ordered() {
        let document = survey();
        let submissions = [
            submit(&document, "a", &[&["T"], &["A", "C"], &["cat"], &["Because"], &["1", "2"]]),
            submit(&document, "b", &[&["T"], &["C", "B"], &["dog"], &["Why not"], &["2", "1"]]),
            submit(&document, "c", &[&["F"], &["C", "A"], &["cat"], &["No"], &["1", "2"]]),
        ];

        let tabulation = tabulate(&document, &submissions);
        assert_eq!(tabulation.submissions, 3);
        let tallies: Vec<&Tally> = tabulation.questions.iter().map(|q| &q.tally).collect();

        assert_eq!(
            tallies[0],
            &Tally::Counts(vec![("T".into(), 2), ("F".into(), 1)])
        );
        assert_eq!(
            tallies[1],
            &Tally::Counts(vec![("A".into(), 2), ("B".into(), 1), ("C".into(), 3)])
        );
        assert_eq!(
            tallies[2],
            &Tally::Counts(vec![("cat".into(), 2), ("dog".into(), 1)])
        );
        assert_eq!(
            tallies[3],
            &Tally::Responses(strings(&["Because", "Why not", "No"]))
        );
    }

    #[test]
    fn identical_matchings_share_a_count() {
        let document = survey();
        let submissions = [
            submit(&document, "a", &[&["T"], &["A"], &["x"], &["x"], &["1", "2"]]),
            submit(&document, "b", &[&["T"], &["A"], &["x"], &["x"], &["2", "1"]]),
            submit(&document, "c", &[&["T"], &["A"], &["x"], &["x"], &["1", "2"]]),
        ];

        let tabulation = tabulate(&document, &submissions);
        assert_eq!(
            tabulation.questions[4].tally,
            Tally::Pairings(vec![(strings(&["1", "2"]), 2), (strings(&["2", "1"]), 1)])
        );
    }

    #[test]
    fn unseeded_kinds_start_empty() {
        let document = survey();
        let tabulation = tabulate(&document, &[]);

        assert_eq!(
            tabulation.questions[0].tally,
            Tally::Counts(vec![("T".into(), 0), ("F".into(), 0)])
        );
        assert_eq!(tabulation.questions[2].tally, Tally::Counts(Vec::new()));
        assert_eq!(tabulation.questions[4].tally, Tally::Pairings(Vec::new()));
    }

    #[test]
    fn rendering_lists_every_question() {
        let document = survey();
        let submissions = [submit(
            &document,
            "a",
            &[&["T"], &["A", "B"], &["cat"], &["Because"], &["2", "1"]],
        )];

        let rendered = tabulate(&document, &submissions).to_string();
        assert!(rendered.contains("Survey 2: 1 submission(s)"));
        assert!(rendered.contains("1) Sky is blue"));
        assert!(rendered.contains("A) Red\tB) Blue\tC) Green"));
        assert!(rendered.contains("A) 2, B) 1"));
        assert!(rendered.contains("Because"));
    }
}
