use std::collections::HashSet;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use quiz_backend::models::choice::Choice;
use quiz_backend::models::dataset::Dataset;
use quiz_backend::models::passage::Passage;
use quiz_backend::models::question::{Question, QuestionOwner, QuestionType, QuestionWithChoices};
use quiz_backend::models::quiz::{Category, Quiz};
use quiz_backend::services::content::{DatasetContent, PassageContent, QuizContent};
use quiz_backend::services::sampler::{
    self, AUTHORED_CEILING, MAX_GROUPS_PER_DELIVERY, MAX_QUESTIONS_PER_GROUP,
    RANDOM_PRACTICE_CEILING,
};

fn quiz(category: Category) -> Quiz {
    Quiz {
        id: Uuid::new_v4(),
        title: "Practice Set".to_string(),
        category,
        description: String::new(),
        time_limit: 0,
        is_random_practice: false,
        created_at: Utc::now(),
    }
}

fn question(owner: QuestionOwner, label: &str) -> QuestionWithChoices {
    let question = Question {
        id: Uuid::new_v4(),
        text: format!("Question {label}"),
        explanation: String::new(),
        question_type: QuestionType::MultipleChoice,
        owner: Some(owner),
    };
    let choices = (0..4)
        .map(|i| Choice {
            id: Uuid::new_v4(),
            question_id: question.id,
            text: format!("Option {i}"),
            is_correct: i == 0,
        })
        .collect();
    QuestionWithChoices { question, choices }
}

fn standalone_questions(quiz_id: Uuid, count: usize) -> Vec<QuestionWithChoices> {
    (0..count)
        .map(|i| question(QuestionOwner::Standalone(quiz_id), &format!("S{i}")))
        .collect()
}

fn passage_content(quiz_id: Uuid, question_count: usize) -> PassageContent {
    let passage = Passage {
        id: Uuid::new_v4(),
        quiz_id,
        title: "A Passage".to_string(),
        body: "Lorem ipsum.".to_string(),
    };
    let questions = (0..question_count)
        .map(|i| question(QuestionOwner::Passage(passage.id), &format!("P{i}")))
        .collect();
    PassageContent { passage, questions }
}

fn dataset_content(quiz_id: Uuid, question_count: usize) -> DatasetContent {
    let dataset = Dataset {
        id: Uuid::new_v4(),
        quiz_id,
        title: "A Table".to_string(),
        description: String::new(),
        image: None,
    };
    let questions = (0..question_count)
        .map(|i| question(QuestionOwner::Dataset(dataset.id), &format!("D{i}")))
        .collect();
    DatasetContent { dataset, questions }
}

fn content(quiz: Quiz, standalone: usize) -> QuizContent {
    let standalone = standalone_questions(quiz.id, standalone);
    QuizContent {
        quiz,
        standalone,
        passages: Vec::new(),
        datasets: Vec::new(),
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn small_quiz_delivers_all_questions_without_duplicates() {
    let content = content(quiz(Category::Clerical), 3);
    let source_ids: HashSet<Uuid> = content.standalone.iter().map(|q| q.id()).collect();

    let set = sampler::sample_quiz(&content, &mut rng());

    assert_eq!(set.delivered(), 3);
    let visible = set.visible_ids();
    let unique: HashSet<Uuid> = visible.iter().copied().collect();
    assert_eq!(unique.len(), visible.len());
    assert_eq!(unique, source_ids);
}

#[test]
fn plain_quiz_respects_the_ceiling() {
    let content = content(quiz(Category::General), 50);
    let source_ids: HashSet<Uuid> = content.standalone.iter().map(|q| q.id()).collect();

    let set = sampler::sample_quiz(&content, &mut rng());

    assert_eq!(set.delivered(), AUTHORED_CEILING);
    let visible = set.visible_ids();
    let unique: HashSet<Uuid> = visible.iter().copied().collect();
    assert_eq!(unique.len(), AUTHORED_CEILING);
    assert!(unique.is_subset(&source_ids));
}

#[test]
fn empty_quiz_yields_an_empty_set() {
    let content = content(quiz(Category::Analytical), 0);
    let set = sampler::sample_quiz(&content, &mut rng());
    assert!(set.is_empty());
    assert!(set.visible_ids().is_empty());
}

#[test]
fn verbal_quiz_mixes_passages_and_standalone_up_to_the_ceiling() {
    let quiz = quiz(Category::Verbal);
    let mut content = content(quiz.clone(), 30);
    content.passages = vec![passage_content(quiz.id, 8), passage_content(quiz.id, 8)];

    let set = sampler::sample_quiz(&content, &mut rng());

    assert_eq!(set.passages.len(), MAX_GROUPS_PER_DELIVERY);
    for group in &set.passages {
        assert!(group.questions.len() <= MAX_QUESTIONS_PER_GROUP);
    }
    let nested: usize = set.passages.iter().map(|g| g.questions.len()).sum();
    assert_eq!(set.standalone.len(), AUTHORED_CEILING - nested);
    assert_eq!(set.delivered(), AUTHORED_CEILING);

    // presentation order is standalone first, then passage questions
    let visible = set.visible_ids();
    let standalone_ids: Vec<Uuid> = set.standalone.iter().map(|q| q.id()).collect();
    assert_eq!(&visible[..standalone_ids.len()], standalone_ids.as_slice());
}

#[test]
fn verbal_quiz_without_passages_falls_back_to_plain_sampling() {
    let content = content(quiz(Category::Verbal), 12);
    let set = sampler::sample_quiz(&content, &mut rng());
    assert!(set.passages.is_empty());
    assert_eq!(set.delivered(), 12);
}

#[test]
fn numerical_quiz_draws_from_datasets() {
    let quiz = quiz(Category::Numerical);
    let mut content = content(quiz.clone(), 40);
    content.datasets = vec![dataset_content(quiz.id, 6), dataset_content(quiz.id, 2)];

    let set = sampler::sample_quiz(&content, &mut rng());

    assert_eq!(set.datasets.len(), MAX_GROUPS_PER_DELIVERY);
    for group in &set.datasets {
        assert!(group.questions.len() <= MAX_QUESTIONS_PER_GROUP);
    }
    assert_eq!(set.delivered(), AUTHORED_CEILING);
    assert!(set.passages.is_empty());
}

#[test]
fn same_seed_reproduces_the_same_selection() {
    let quiz = quiz(Category::Verbal);
    let mut content = content(quiz.clone(), 25);
    content.passages = vec![passage_content(quiz.id, 7), passage_content(quiz.id, 7)];

    let mut first = StdRng::seed_from_u64(7);
    let mut second = StdRng::seed_from_u64(7);
    let a = sampler::sample_quiz(&content, &mut first);
    let b = sampler::sample_quiz(&content, &mut second);

    assert_eq!(a.visible_ids(), b.visible_ids());
}

#[test]
fn pool_sampling_caps_at_the_random_practice_ceiling() {
    let pool: Vec<QuizContent> = (0..3)
        .map(|_| content(quiz(Category::Clerical), 15))
        .collect();

    let set = sampler::sample_category_pool(&pool, Category::Clerical, &mut rng());

    assert_eq!(set.delivered(), RANDOM_PRACTICE_CEILING);
    let visible = set.visible_ids();
    let unique: HashSet<Uuid> = visible.iter().copied().collect();
    assert_eq!(unique.len(), visible.len());
}

#[test]
fn pool_sampling_never_pads_a_sparse_category() {
    let pool = vec![content(quiz(Category::General), 4)];
    let set = sampler::sample_category_pool(&pool, Category::General, &mut rng());
    assert_eq!(set.delivered(), 4);
}

#[test]
fn verbal_pool_shares_one_passage_across_quizzes() {
    let pool: Vec<QuizContent> = (0..3)
        .map(|_| {
            let quiz = quiz(Category::Verbal);
            let mut c = content(quiz.clone(), 10);
            c.passages = vec![passage_content(quiz.id, 6)];
            c
        })
        .collect();

    let set = sampler::sample_category_pool(&pool, Category::Verbal, &mut rng());

    assert_eq!(set.passages.len(), 1);
    assert!(set.passages[0].questions.len() <= MAX_QUESTIONS_PER_GROUP);
    assert!(set.delivered() <= RANDOM_PRACTICE_CEILING);
}

#[test]
fn numerical_pool_draws_up_to_two_shared_datasets() {
    let pool: Vec<QuizContent> = (0..2)
        .map(|_| {
            let quiz = quiz(Category::Numerical);
            let mut c = content(quiz.clone(), 20);
            c.datasets = vec![dataset_content(quiz.id, 5), dataset_content(quiz.id, 5)];
            c
        })
        .collect();

    let set = sampler::sample_category_pool(&pool, Category::Numerical, &mut rng());

    assert_eq!(set.datasets.len(), MAX_GROUPS_PER_DELIVERY);
    assert!(set.delivered() <= RANDOM_PRACTICE_CEILING);
}

#[test]
fn empty_pool_yields_an_empty_set() {
    let set = sampler::sample_category_pool(&[], Category::Verbal, &mut rng());
    assert!(set.is_empty());
}
