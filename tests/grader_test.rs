use std::collections::HashMap;

use serde_json::json;
use uuid::Uuid;

use quiz_backend::models::choice::Choice;
use quiz_backend::models::question::{Question, QuestionOwner, QuestionType, QuestionWithChoices};
use quiz_backend::services::grader::{
    self, AnswerOutcome, INVALID_CHOICE_TEXT, NO_ANSWER_TEXT,
};

/// Builds a standalone question whose choices are (text, is_correct) pairs.
fn question(text: &str, choices: &[(&str, bool)]) -> QuestionWithChoices {
    let question = Question {
        id: Uuid::new_v4(),
        text: text.to_string(),
        explanation: format!("Because {text}"),
        question_type: QuestionType::MultipleChoice,
        owner: Some(QuestionOwner::Standalone(Uuid::new_v4())),
    };
    let choices = choices
        .iter()
        .map(|(text, correct)| Choice {
            id: Uuid::new_v4(),
            question_id: question.id,
            text: text.to_string(),
            is_correct: *correct,
        })
        .collect();
    QuestionWithChoices { question, choices }
}

fn correct_choice(qwc: &QuestionWithChoices) -> &Choice {
    qwc.choices.iter().find(|c| c.is_correct).expect("has a correct choice")
}

fn wrong_choice(qwc: &QuestionWithChoices) -> &Choice {
    qwc.choices.iter().find(|c| !c.is_correct).expect("has a wrong choice")
}

fn lookup(questions: &[QuestionWithChoices]) -> HashMap<Uuid, QuestionWithChoices> {
    questions.iter().map(|q| (q.id(), q.clone())).collect()
}

#[test]
fn partial_submission_grades_leniently() {
    let a = question("A", &[("yes", true), ("no", false)]);
    let b = question("B", &[("yes", true), ("no", false)]);
    let c = question("C", &[("yes", true), ("no", false)]);
    let visible = vec![a.id(), b.id(), c.id()];
    let mut answers = HashMap::new();
    answers.insert(a.id(), correct_choice(&a).id);
    answers.insert(b.id(), wrong_choice(&b).id);

    let graded = grader::grade(&visible, &answers, &lookup(&[a, b, c]));

    assert_eq!(graded.correct, 1);
    assert_eq!(graded.total, 3);
    assert_eq!(graded.score, 33.33);
    assert_eq!(graded.details.len(), 3);
    assert_eq!(graded.details[0].result, AnswerOutcome::Correct);
    assert_eq!(graded.details[1].result, AnswerOutcome::Wrong);
    assert_eq!(graded.details[2].result, AnswerOutcome::Unanswered);
    assert_eq!(graded.details[2].your_answer, NO_ANSWER_TEXT);
}

#[test]
fn details_follow_the_visible_order() {
    let a = question("A", &[("x", true)]);
    let b = question("B", &[("x", true)]);
    let visible = vec![b.id(), a.id()];

    let graded = grader::grade(&visible, &HashMap::new(), &lookup(&[a.clone(), b.clone()]));

    assert_eq!(graded.details[0].question_id, b.id());
    assert_eq!(graded.details[1].question_id, a.id());
}

#[test]
fn foreign_choice_id_is_classified_invalid() {
    let a = question("A", &[("yes", true), ("no", false)]);
    let b = question("B", &[("yes", true), ("no", false)]);
    let visible = vec![a.id()];
    let mut answers = HashMap::new();
    // a choice that belongs to B, submitted for A
    answers.insert(a.id(), correct_choice(&b).id);

    let graded = grader::grade(&visible, &answers, &lookup(&[a, b]));

    assert_eq!(graded.correct, 0);
    assert_eq!(graded.total, 1);
    assert_eq!(graded.details[0].result, AnswerOutcome::InvalidChoice);
    assert_eq!(graded.details[0].your_answer, INVALID_CHOICE_TEXT);
}

#[test]
fn questions_without_a_correct_choice_never_grade_correct() {
    let q = question("impossible", &[("a", false), ("b", false), ("c", false)]);
    let visible = vec![q.id()];

    for choice in &q.choices {
        let mut answers = HashMap::new();
        answers.insert(q.id(), choice.id);
        let graded = grader::grade(&visible, &answers, &lookup(std::slice::from_ref(&q)));
        assert_eq!(graded.details[0].result, AnswerOutcome::Wrong);
        assert_eq!(graded.correct, 0);
    }
}

#[test]
fn grading_is_idempotent() {
    let a = question("A", &[("yes", true), ("no", false)]);
    let b = question("B", &[("yes", true), ("no", false)]);
    let visible = vec![a.id(), b.id()];
    let mut answers = HashMap::new();
    answers.insert(a.id(), correct_choice(&a).id);
    let questions = lookup(&[a, b]);

    let first = grader::grade(&visible, &answers, &questions);
    let second = grader::grade(&visible, &answers, &questions);

    assert_eq!(first.score, second.score);
    assert_eq!(first.correct, second.correct);
    let first_results: Vec<AnswerOutcome> = first.details.iter().map(|d| d.result).collect();
    let second_results: Vec<AnswerOutcome> = second.details.iter().map(|d| d.result).collect();
    assert_eq!(first_results, second_results);
}

#[test]
fn unknown_visible_ids_are_dropped_from_the_total() {
    let a = question("A", &[("yes", true)]);
    let visible = vec![a.id(), Uuid::new_v4(), Uuid::new_v4()];
    let mut answers = HashMap::new();
    answers.insert(a.id(), correct_choice(&a).id);

    let graded = grader::grade(&visible, &answers, &lookup(std::slice::from_ref(&a)));

    assert_eq!(graded.total, 1);
    assert_eq!(graded.score, 100.0);
}

#[test]
fn duplicate_visible_ids_count_once() {
    let a = question("A", &[("yes", true)]);
    let visible = vec![a.id(), a.id(), a.id()];

    let graded = grader::grade(&visible, &HashMap::new(), &lookup(std::slice::from_ref(&a)));

    assert_eq!(graded.total, 1);
    assert_eq!(graded.details.len(), 1);
}

#[test]
fn empty_visible_set_scores_zero() {
    let graded = grader::grade(&[], &HashMap::new(), &HashMap::new());
    assert_eq!(graded.total, 0);
    assert_eq!(graded.score, 0.0);
    assert!(graded.details.is_empty());
}

#[test]
fn all_correct_scores_one_hundred() {
    let questions: Vec<QuestionWithChoices> = (0..7)
        .map(|i| question(&format!("Q{i}"), &[("right", true), ("wrong", false)]))
        .collect();
    let visible: Vec<Uuid> = questions.iter().map(|q| q.id()).collect();
    let answers: HashMap<Uuid, Uuid> = questions
        .iter()
        .map(|q| (q.id(), correct_choice(q).id))
        .collect();

    let graded = grader::grade(&visible, &answers, &lookup(&questions));

    assert_eq!(graded.score, 100.0);
    assert_eq!(graded.correct, 7);
}

#[test]
fn collect_answers_drops_malformed_entries_and_keeps_first_duplicate() {
    let q = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let entries = vec![
        json!({ "question": q.to_string(), "choice": first.to_string() }),
        json!({ "question": q.to_string(), "choice": second.to_string() }),
        json!({ "question": "not-a-uuid", "choice": first.to_string() }),
        json!({ "question": q.to_string() }),
        json!({ "choice": first.to_string() }),
        json!(42),
        json!(null),
    ];

    let answers = grader::collect_answers(&entries);

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get(&q), Some(&first));
}

#[test]
fn answered_ids_preserve_submission_order_without_duplicates() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let entries = vec![
        json!({ "question": b.to_string(), "choice": Uuid::new_v4().to_string() }),
        json!({ "question": a.to_string(), "choice": Uuid::new_v4().to_string() }),
        json!({ "question": b.to_string(), "choice": Uuid::new_v4().to_string() }),
        json!({ "question": 17, "choice": 3 }),
    ];

    assert_eq!(grader::answered_ids(&entries), vec![b, a]);
}

#[test]
fn parse_id_list_ignores_garbage_entries() {
    let a = Uuid::new_v4();
    let entries = vec![
        json!(a.to_string()),
        json!("nope"),
        json!(12),
        json!(a.to_string()),
    ];

    assert_eq!(grader::parse_id_list(&entries), vec![a]);
}

#[test]
fn percentage_rounds_to_two_decimals() {
    assert_eq!(grader::percentage(1, 3), 33.33);
    assert_eq!(grader::percentage(2, 3), 66.67);
    assert_eq!(grader::percentage(0, 0), 0.0);
    assert_eq!(grader::percentage(5, 5), 100.0);
}
