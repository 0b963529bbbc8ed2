//! Question catalog. The store behind it is external; `InMemoryQuestionBank`
//! stands at that boundary, loaded from a JSON seed file or the built-in set.
//!
//! `AppState` holds an `Arc<dyn QuestionBank>`.

pub mod handlers;
pub mod seed;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::{normalize_domain, Difficulty, NewQuestion, Question, QuestionUpdate};

/// How `find` picks questions when more match than were asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// The first `limit` matches in catalog order.
    FirstN,
    /// A random sample of `limit` matches. The n-th draw from a bank is the
    /// same for a given seed, so a restarted service replays the same sequence.
    Seeded(u64),
}

impl SelectionPolicy {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(SelectionPolicy::Seeded)
            .unwrap_or(SelectionPolicy::FirstN)
    }
}

#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Active questions matching `domain` (case-insensitive) and `difficulty`,
    /// at most `limit`, chosen by the bank's selection policy.
    async fn find(
        &self,
        domain: &str,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<Question>, AppError>;

    /// Every question, optionally filtered, in catalog order.
    async fn list(
        &self,
        domain: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, AppError>;

    async fn insert(&self, question: Question) -> Result<Question, AppError>;

    /// Applies a partial edit. Sessions already holding the question keep
    /// their own copy.
    async fn update(&self, id: Uuid, update: QuestionUpdate) -> Result<Question, AppError>;

    /// Deletes a question and returns it.
    async fn remove(&self, id: Uuid) -> Result<Question, AppError>;
}

fn question_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Question {id} not found"))
}

pub struct InMemoryQuestionBank {
    questions: RwLock<Vec<Question>>,
    policy: SelectionPolicy,
    /// Seeded draws made so far; offsets the rng seed of the next draw.
    draws: AtomicU64,
}

impl InMemoryQuestionBank {
    pub fn new(questions: Vec<Question>, policy: SelectionPolicy) -> Self {
        Self {
            questions: RwLock::new(questions),
            policy,
            draws: AtomicU64::new(0),
        }
    }

    /// Loads catalog questions from a JSON array of `NewQuestion` objects.
    pub fn from_json_file(path: impl AsRef<Path>, policy: SelectionPolicy) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank {}", path.display()))?;
        let entries: Vec<NewQuestion> = serde_json::from_str(&raw)
            .with_context(|| format!("Question bank {} is not valid JSON", path.display()))?;

        let questions = entries
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                q.into_question()
                    .map_err(|e| anyhow::anyhow!("Question #{i} in {}: {e}", path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        info!("Loaded {} questions from {}", questions.len(), path.display());
        Ok(Self::new(questions, policy))
    }

    pub fn seeded(policy: SelectionPolicy) -> Self {
        Self::new(seed::default_questions(), policy)
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn find(
        &self,
        domain: &str,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<Question>, AppError> {
        let domain = normalize_domain(domain);
        let questions = self.questions.read().await;
        let matching: Vec<&Question> = questions
            .iter()
            .filter(|q| q.is_active && q.domain == domain && q.difficulty == difficulty)
            .collect();

        let selected = match self.policy {
            SelectionPolicy::FirstN => matching.into_iter().take(limit).cloned().collect(),
            SelectionPolicy::Seeded(seed) => {
                let draw = self.draws.fetch_add(1, Ordering::Relaxed);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(draw));
                matching
                    .choose_multiple(&mut rng, limit)
                    .map(|q| (*q).clone())
                    .collect()
            }
        };
        Ok(selected)
    }

    async fn list(
        &self,
        domain: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, AppError> {
        let domain = domain.map(normalize_domain);
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| domain.as_deref().map_or(true, |d| q.domain == d))
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .cloned()
            .collect())
    }

    async fn insert(&self, question: Question) -> Result<Question, AppError> {
        let mut questions = self.questions.write().await;
        if questions.iter().any(|q| q.id == question.id) {
            return Err(AppError::Validation(format!(
                "Question {} already exists",
                question.id
            )));
        }
        questions.push(question.clone());
        Ok(question)
    }

    async fn update(&self, id: Uuid, update: QuestionUpdate) -> Result<Question, AppError> {
        let mut questions = self.questions.write().await;
        let slot = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| question_not_found(id))?;
        *slot = update.apply(slot)?;
        Ok(slot.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<Question, AppError> {
        let mut questions = self.questions.write().await;
        let index = questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| question_not_found(id))?;
        Ok(questions.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn question(domain: &str, difficulty: Difficulty, prompt: &str) -> Question {
        Question {
            id: Uuid::new_v4(),
            domain: domain.to_string(),
            difficulty,
            prompt: prompt.to_string(),
            model_answer: format!("model answer for {prompt}"),
            keywords: vec![],
            category: "general".to_string(),
            is_active: true,
        }
    }

    fn bank(policy: SelectionPolicy) -> InMemoryQuestionBank {
        let questions = (0..8)
            .map(|i| question("backend", Difficulty::Medium, &format!("q{i}")))
            .chain([question("frontend", Difficulty::Medium, "f0")])
            .collect();
        InMemoryQuestionBank::new(questions, policy)
    }

    #[tokio::test]
    async fn test_find_first_n_keeps_catalog_order() {
        let found = bank(SelectionPolicy::FirstN)
            .find("backend", Difficulty::Medium, 3)
            .await
            .unwrap();
        let prompts: Vec<_> = found.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["q0", "q1", "q2"]);
    }

    #[tokio::test]
    async fn test_find_normalizes_domain_case() {
        let found = bank(SelectionPolicy::FirstN)
            .find("  BackEnd ", Difficulty::Medium, 10)
            .await
            .unwrap();
        assert_eq!(found.len(), 8);
    }

    #[tokio::test]
    async fn test_find_without_matches_is_empty() {
        let found = bank(SelectionPolicy::FirstN)
            .find("backend", Difficulty::Hard, 5)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_skips_inactive_questions() {
        let mut inactive = question("data", Difficulty::Easy, "old");
        inactive.is_active = false;
        let bank = InMemoryQuestionBank::new(
            vec![inactive, question("data", Difficulty::Easy, "new")],
            SelectionPolicy::FirstN,
        );
        let found = bank.find("data", Difficulty::Easy, 5).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].prompt, "new");
    }

    async fn draws(bank: &InMemoryQuestionBank, n: usize) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        for _ in 0..n {
            let found = bank.find("backend", Difficulty::Medium, 4).await.unwrap();
            assert_eq!(found.len(), 4);
            assert!(found.iter().all(|q| q.domain == "backend"));
            out.push(found.into_iter().map(|q| q.prompt).collect());
        }
        out
    }

    #[tokio::test]
    async fn test_seeded_selection_replays_per_seed() {
        let a = draws(&bank(SelectionPolicy::Seeded(7)), 5).await;
        let b = draws(&bank(SelectionPolicy::Seeded(7)), 5).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_seeded_selection_varies_between_interviews() {
        let sequence = draws(&bank(SelectionPolicy::Seeded(7)), 5).await;
        assert!(sequence.iter().any(|draw| draw != &sequence[0]));
    }

    #[tokio::test]
    async fn test_list_filters_by_domain_and_difficulty() {
        let bank = bank(SelectionPolicy::FirstN);
        assert_eq!(bank.list(None, None).await.unwrap().len(), 9);
        assert_eq!(bank.list(Some("Frontend"), None).await.unwrap().len(), 1);
        assert!(bank
            .list(Some("backend"), Some(Difficulty::Easy))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let bank = bank(SelectionPolicy::FirstN);
        let q = question("devops", Difficulty::Hard, "k8s");
        bank.insert(q.clone()).await.unwrap();
        assert!(matches!(
            bank.insert(q).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_deactivated_question_leaves_selection() {
        let bank = bank(SelectionPolicy::FirstN);
        let first = bank.find("backend", Difficulty::Medium, 1).await.unwrap()[0].clone();

        let updated = bank
            .update(
                first.id,
                QuestionUpdate {
                    is_active: Some(false),
                    ..QuestionUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);

        let found = bank.find("backend", Difficulty::Medium, 10).await.unwrap();
        assert_eq!(found.len(), 7);
        assert!(found.iter().all(|q| q.id != first.id));
        // Still listed for operators.
        assert_eq!(bank.list(Some("backend"), None).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_question_unchanged() {
        let bank = bank(SelectionPolicy::FirstN);
        let first = bank.list(None, None).await.unwrap()[0].clone();
        let err = bank
            .update(
                first.id,
                QuestionUpdate {
                    prompt: Some("new prompt".to_string()),
                    difficulty: Some("impossible".to_string()),
                    ..QuestionUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(bank.list(None, None).await.unwrap()[0], first);
    }

    #[tokio::test]
    async fn test_update_and_remove_unknown_id_is_not_found() {
        let bank = bank(SelectionPolicy::FirstN);
        assert!(matches!(
            bank.update(Uuid::new_v4(), QuestionUpdate::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            bank.remove(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_deletes_question() {
        let bank = bank(SelectionPolicy::FirstN);
        let target = bank.list(Some("frontend"), None).await.unwrap()[0].clone();
        let removed = bank.remove(target.id).await.unwrap();
        assert_eq!(removed, target);
        assert!(bank.list(Some("frontend"), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_json_file_normalizes_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"domain": "Backend", "difficulty": "HARD", "prompt": "What is CAP?",
                 "model_answer": "Consistency availability partition tolerance",
                 "keywords": ["consistency"]}}]"#
        )
        .unwrap();

        let bank = InMemoryQuestionBank::from_json_file(file.path(), SelectionPolicy::FirstN)
            .unwrap();
        let found = bank.find("backend", Difficulty::Hard, 5).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keywords, vec!["consistency".to_string()]);
    }

    #[test]
    fn test_from_json_file_reports_bad_difficulty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"domain": "x", "difficulty": "impossible", "prompt": "p", "model_answer": "m"}}]"#
        )
        .unwrap();
        let err = InMemoryQuestionBank::from_json_file(file.path(), SelectionPolicy::FirstN)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Question #0"));
    }
}
