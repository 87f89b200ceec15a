use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::models::dataset::Dataset;
use crate::models::passage::Passage;
use crate::models::question::QuestionWithChoices;
use crate::models::quiz::Category;
use crate::services::content::QuizContent;

/// Questions delivered per attempt of an authored quiz.
pub const AUTHORED_CEILING: usize = 20;
/// Questions delivered per cross-quiz random-practice attempt.
pub const RANDOM_PRACTICE_CEILING: usize = 25;
/// Passages or datasets included per authored delivery.
pub const MAX_GROUPS_PER_DELIVERY: usize = 2;
/// Questions drawn from each included passage or dataset.
pub const MAX_QUESTIONS_PER_GROUP: usize = 5;

/// Closed set of per-category sampling algorithms. Adding a category means
/// extending this match, not an open-ended branch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    Plain,
    PassageBased,
    DatasetBased,
}

impl SamplingPolicy {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Verbal => SamplingPolicy::PassageBased,
            Category::Numerical => SamplingPolicy::DatasetBased,
            Category::Analytical | Category::Clerical | Category::General => SamplingPolicy::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampledPassage {
    pub passage: Passage,
    pub questions: Vec<QuestionWithChoices>,
}

#[derive(Debug, Clone)]
pub struct SampledDataset {
    pub dataset: Dataset,
    pub questions: Vec<QuestionWithChoices>,
}

/// The bounded, shuffled subset chosen for one delivery. Stable only within
/// the response that produced it; the id list is what ties a later
/// submission back to this exact set.
#[derive(Debug, Clone, Default)]
pub struct PresentedSet {
    pub standalone: Vec<QuestionWithChoices>,
    pub passages: Vec<SampledPassage>,
    pub datasets: Vec<SampledDataset>,
}

impl PresentedSet {
    /// Flattened question ids in presentation order: standalone first, then
    /// passage-sourced, then dataset-sourced.
    pub fn visible_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.standalone.iter().map(|q| q.id()).collect();
        for group in &self.passages {
            ids.extend(group.questions.iter().map(|q| q.id()));
        }
        for group in &self.datasets {
            ids.extend(group.questions.iter().map(|q| q.id()));
        }
        ids
    }

    pub fn delivered(&self) -> usize {
        self.standalone.len()
            + self.passages.iter().map(|g| g.questions.len()).sum::<usize>()
            + self.datasets.iter().map(|g| g.questions.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered() == 0
    }
}

/// Assemble the Presented Set for one authored quiz.
pub fn sample_quiz<R: Rng + ?Sized>(content: &QuizContent, rng: &mut R) -> PresentedSet {
    match SamplingPolicy::for_category(content.quiz.category) {
        SamplingPolicy::PassageBased if !content.passages.is_empty() => {
            let picked: Vec<usize> =
                pick_indices(content.passages.len(), MAX_GROUPS_PER_DELIVERY, rng);
            let passages: Vec<SampledPassage> = picked
                .into_iter()
                .map(|i| {
                    let group = &content.passages[i];
                    SampledPassage {
                        passage: group.passage.clone(),
                        questions: take_random(&group.questions, MAX_QUESTIONS_PER_GROUP, rng),
                    }
                })
                .collect();
            let nested: usize = passages.iter().map(|g| g.questions.len()).sum();
            PresentedSet {
                standalone: take_random(
                    &content.standalone,
                    AUTHORED_CEILING.saturating_sub(nested),
                    rng,
                ),
                passages,
                datasets: Vec::new(),
            }
        }
        SamplingPolicy::DatasetBased if !content.datasets.is_empty() => {
            let picked: Vec<usize> =
                pick_indices(content.datasets.len(), MAX_GROUPS_PER_DELIVERY, rng);
            let datasets: Vec<SampledDataset> = picked
                .into_iter()
                .map(|i| {
                    let group = &content.datasets[i];
                    SampledDataset {
                        dataset: group.dataset.clone(),
                        questions: take_random(&group.questions, MAX_QUESTIONS_PER_GROUP, rng),
                    }
                })
                .collect();
            let nested: usize = datasets.iter().map(|g| g.questions.len()).sum();
            PresentedSet {
                standalone: take_random(
                    &content.standalone,
                    AUTHORED_CEILING.saturating_sub(nested),
                    rng,
                ),
                passages: Vec::new(),
                datasets,
            }
        }
        // Plain categories, and passage/dataset quizzes with no groups.
        _ => PresentedSet {
            standalone: take_random(&content.standalone, AUTHORED_CEILING, rng),
            passages: Vec::new(),
            datasets: Vec::new(),
        },
    }
}

/// Assemble a Presented Set across every authored quiz of one category:
/// one shared passage pick (Verbal) or dataset pick (Numerical) over the
/// pooled groups, then a per-quiz proportional share of standalone
/// questions, capped globally.
pub fn sample_category_pool<R: Rng + ?Sized>(
    pool: &[QuizContent],
    category: Category,
    rng: &mut R,
) -> PresentedSet {
    let mut set = PresentedSet::default();

    match SamplingPolicy::for_category(category) {
        SamplingPolicy::PassageBased => {
            let all: Vec<&crate::services::content::PassageContent> =
                pool.iter().flat_map(|c| c.passages.iter()).collect();
            if let Some(group) = all.choose(rng) {
                set.passages.push(SampledPassage {
                    passage: group.passage.clone(),
                    questions: take_random(&group.questions, MAX_QUESTIONS_PER_GROUP, rng),
                });
            }
        }
        SamplingPolicy::DatasetBased => {
            let all: Vec<&crate::services::content::DatasetContent> =
                pool.iter().flat_map(|c| c.datasets.iter()).collect();
            for i in pick_indices(all.len(), MAX_GROUPS_PER_DELIVERY, rng) {
                let group = all[i];
                set.datasets.push(SampledDataset {
                    dataset: group.dataset.clone(),
                    questions: take_random(&group.questions, MAX_QUESTIONS_PER_GROUP, rng),
                });
            }
        }
        SamplingPolicy::Plain => {}
    }

    let nested = set.delivered();
    let remaining = RANDOM_PRACTICE_CEILING.saturating_sub(nested);
    let contributing = pool.iter().filter(|c| !c.standalone.is_empty()).count();
    if remaining > 0 && contributing > 0 {
        let share = remaining.div_ceil(contributing);
        let mut standalone: Vec<QuestionWithChoices> = Vec::new();
        for content in pool {
            standalone.extend(take_random(&content.standalone, share, rng));
        }
        standalone.shuffle(rng);
        standalone.truncate(remaining);
        set.standalone = standalone;
    }

    set
}

/// Shuffled sample of up to `limit` items. Fewer eligible items than the
/// limit yields all of them, never padded or duplicated.
fn take_random<R: Rng + ?Sized, T: Clone>(items: &[T], limit: usize, rng: &mut R) -> Vec<T> {
    let mut picked: Vec<T> = items.to_vec();
    picked.shuffle(rng);
    picked.truncate(limit);
    picked
}

/// Up to `limit` distinct indices into a collection of `len` items.
fn pick_indices<R: Rng + ?Sized>(len: usize, limit: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices.truncate(limit);
    indices
}
