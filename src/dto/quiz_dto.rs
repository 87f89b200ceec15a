use serde::Serialize;
use uuid::Uuid;

use crate::models::question::{QuestionType, QuestionWithChoices};
use crate::models::quiz::{Category, Quiz};
use crate::services::sampler::{PresentedSet, SampledDataset, SampledPassage};

/// Choice as the client sees it. The correctness flag never crosses the
/// wire; this type is the only serialization path for choices.
#[derive(Debug, Clone, Serialize)]
pub struct PresentedChoice {
    pub id: Uuid,
    pub text: String,
}

/// Question as the client sees it. Explanations are withheld until grading.
#[derive(Debug, Clone, Serialize)]
pub struct PresentedQuestion {
    pub id: Uuid,
    pub text: String,
    pub question_type: QuestionType,
    pub choices: Vec<PresentedChoice>,
}

impl From<&QuestionWithChoices> for PresentedQuestion {
    fn from(qwc: &QuestionWithChoices) -> Self {
        PresentedQuestion {
            id: qwc.question.id,
            text: qwc.question.text.clone(),
            question_type: qwc.question.question_type,
            choices: qwc
                .choices
                .iter()
                .map(|c| PresentedChoice {
                    id: c.id,
                    text: c.text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentedPassage {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub questions: Vec<PresentedQuestion>,
}

impl From<&SampledPassage> for PresentedPassage {
    fn from(group: &SampledPassage) -> Self {
        PresentedPassage {
            id: group.passage.id,
            title: group.passage.title.clone(),
            text: group.passage.body.clone(),
            questions: group.questions.iter().map(PresentedQuestion::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentedDataset {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub questions: Vec<PresentedQuestion>,
}

impl From<&SampledDataset> for PresentedDataset {
    fn from(group: &SampledDataset) -> Self {
        PresentedDataset {
            id: group.dataset.id,
            title: group.dataset.title.clone(),
            description: group.dataset.description.clone(),
            image: group.dataset.image.clone(),
            questions: group.questions.iter().map(PresentedQuestion::from).collect(),
        }
    }
}

/// One authored-quiz delivery. The caller keeps `visible_question_ids` (or
/// better, `attempt_token`) and echoes them back at submission time.
#[derive(Debug, Clone, Serialize)]
pub struct PresentedQuizResponse {
    pub id: Uuid,
    pub title: String,
    pub quiz_type: Category,
    pub description: String,
    pub time_limit: i32,
    pub delivered: usize,
    pub passages: Vec<PresentedPassage>,
    pub datasets: Vec<PresentedDataset>,
    pub questions: Vec<PresentedQuestion>,
    pub visible_question_ids: Vec<Uuid>,
    pub attempt_token: String,
}

impl PresentedQuizResponse {
    pub fn from_parts(quiz: &Quiz, set: &PresentedSet, attempt_token: String) -> Self {
        PresentedQuizResponse {
            id: quiz.id,
            title: quiz.title.clone(),
            quiz_type: quiz.category,
            description: quiz.description.clone(),
            time_limit: quiz.time_limit,
            delivered: set.delivered(),
            passages: set.passages.iter().map(PresentedPassage::from).collect(),
            datasets: set.datasets.iter().map(PresentedDataset::from).collect(),
            questions: set.standalone.iter().map(PresentedQuestion::from).collect(),
            visible_question_ids: set.visible_ids(),
            attempt_token,
        }
    }
}

/// One cross-quiz random-practice delivery. The client contract carries a
/// single nullable passage and a dataset list.
#[derive(Debug, Clone, Serialize)]
pub struct RandomQuizResponse {
    pub mode: &'static str,
    pub quiz_type: Category,
    pub delivered: usize,
    pub has_passage: bool,
    pub passage: Option<PresentedPassage>,
    pub datasets: Vec<PresentedDataset>,
    pub questions: Vec<PresentedQuestion>,
    pub visible_question_ids: Vec<Uuid>,
    pub attempt_token: String,
}

impl RandomQuizResponse {
    pub fn from_parts(category: Category, set: &PresentedSet, attempt_token: String) -> Self {
        let passage = set.passages.first().map(PresentedPassage::from);
        RandomQuizResponse {
            mode: "random_practice",
            quiz_type: category,
            delivered: set.delivered(),
            has_passage: passage.is_some(),
            passage,
            datasets: set.datasets.iter().map(PresentedDataset::from).collect(),
            questions: set.standalone.iter().map(PresentedQuestion::from).collect(),
            visible_question_ids: set.visible_ids(),
            attempt_token,
        }
    }
}
