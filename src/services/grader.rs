use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::question::QuestionWithChoices;

pub const NO_ANSWER_TEXT: &str = "No answer selected";
pub const INVALID_CHOICE_TEXT: &str = "Invalid choice";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Unanswered,
    InvalidChoice,
}

/// One row of the results breakdown, in the same order the questions were
/// presented.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetail {
    pub question_id: Uuid,
    pub question: String,
    pub your_answer: String,
    pub result: AnswerOutcome,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradedAttempt {
    pub score: f64,
    pub correct: i32,
    pub total: i32,
    pub details: Vec<AnswerDetail>,
}

/// Submitted answer entries are arbitrary JSON; anything without a parseable
/// `question`/`choice` uuid pair is dropped, and the first entry per
/// question wins. One bad entry never blocks the rest.
pub fn collect_answers(entries: &[JsonValue]) -> HashMap<Uuid, Uuid> {
    let mut answers = HashMap::new();
    for entry in entries {
        let Some(question) = entry.get("question").and_then(value_as_uuid) else {
            continue;
        };
        let Some(choice) = entry.get("choice").and_then(value_as_uuid) else {
            continue;
        };
        answers.entry(question).or_insert(choice);
    }
    answers
}

/// Question ids answered in submission order, deduplicated. Used as the
/// last-resort visible-id list when a submission carries neither an attempt
/// token nor an explicit list.
pub fn answered_ids(entries: &[JsonValue]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(|entry| entry.get("question").and_then(value_as_uuid))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Lenient id list parsing for the client-declared visible set: bad entries
/// drop out instead of failing the submission.
pub fn parse_id_list(entries: &[JsonValue]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(value_as_uuid)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn value_as_uuid(value: &JsonValue) -> Option<Uuid> {
    value.as_str().and_then(|s| Uuid::parse_str(s).ok())
}

/// Grade a submission against the delivered set. Pure: the same inputs
/// always produce the same score and classifications.
///
/// Per visible question, in the supplied order: no submitted answer is
/// `unanswered`; a choice id that does not belong to the question is
/// `invalid_choice`; otherwise the correctness flag decides. Visible ids
/// with no authoritative question behind them are dropped from the total.
pub fn grade(
    visible_ids: &[Uuid],
    answers: &HashMap<Uuid, Uuid>,
    questions: &HashMap<Uuid, QuestionWithChoices>,
) -> GradedAttempt {
    let mut details = Vec::new();
    let mut correct = 0i32;
    let mut total = 0i32;
    let mut seen = HashSet::new();

    for question_id in visible_ids {
        if !seen.insert(*question_id) {
            continue;
        }
        let Some(qwc) = questions.get(question_id) else {
            continue;
        };
        total += 1;

        let (result, your_answer) = match answers.get(question_id) {
            None => (AnswerOutcome::Unanswered, NO_ANSWER_TEXT.to_string()),
            Some(choice_id) => match qwc.choices.iter().find(|c| c.id == *choice_id) {
                None => (AnswerOutcome::InvalidChoice, INVALID_CHOICE_TEXT.to_string()),
                Some(choice) if choice.is_correct => {
                    correct += 1;
                    (AnswerOutcome::Correct, choice.text.clone())
                }
                Some(choice) => (AnswerOutcome::Wrong, choice.text.clone()),
            },
        };

        details.push(AnswerDetail {
            question_id: *question_id,
            question: qwc.question.text.clone(),
            your_answer,
            result,
            explanation: qwc.question.explanation.clone(),
        });
    }

    GradedAttempt {
        score: percentage(correct, total),
        correct,
        total,
        details,
    }
}

/// `round(correct / total * 100, 2)`; zero when nothing was gradable.
pub fn percentage(correct: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round2(f64::from(correct) / f64::from(total) * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
