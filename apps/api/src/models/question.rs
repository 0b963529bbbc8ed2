use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::Validation(format!(
                "difficulty must be one of easy, medium, hard (got '{other}')"
            ))),
        }
    }
}

/// Lowercases and trims a domain name at the API/catalog boundary.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_active() -> bool {
    true
}

/// A catalog question. Sessions hold their own clones, so edits to the
/// catalog never reach an interview already in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: Uuid,
    pub domain: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub model_answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Catalog input shape: seed files and `POST /api/v1/questions`.
/// `id` is generated when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub domain: String,
    pub difficulty: String,
    pub prompt: String,
    pub model_answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewQuestion {
    /// Validates and normalizes into a catalog `Question`.
    pub fn into_question(self) -> Result<Question, AppError> {
        let domain = normalize_domain(&self.domain);
        if domain.is_empty() {
            return Err(AppError::Validation("domain cannot be empty".to_string()));
        }
        if self.prompt.trim().is_empty() {
            return Err(AppError::Validation("prompt cannot be empty".to_string()));
        }
        if self.model_answer.trim().is_empty() {
            return Err(AppError::Validation(
                "model_answer cannot be empty".to_string(),
            ));
        }

        Ok(Question {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            domain,
            difficulty: self.difficulty.parse()?,
            prompt: self.prompt.trim().to_string(),
            model_answer: self.model_answer.trim().to_string(),
            keywords: self.keywords,
            category: self
                .category
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_category),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Partial edit for `PUT /api/v1/questions/:id`. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionUpdate {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model_answer: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl QuestionUpdate {
    /// Returns `question` with the edit applied, normalized and validated the
    /// same way as `NewQuestion`. `question` itself is not touched.
    pub fn apply(self, question: &Question) -> Result<Question, AppError> {
        let mut updated = question.clone();

        if let Some(domain) = self.domain {
            updated.domain = normalize_domain(&domain);
            if updated.domain.is_empty() {
                return Err(AppError::Validation("domain cannot be empty".to_string()));
            }
        }
        if let Some(difficulty) = self.difficulty {
            updated.difficulty = difficulty.parse()?;
        }
        if let Some(prompt) = self.prompt {
            updated.prompt = prompt.trim().to_string();
            if updated.prompt.is_empty() {
                return Err(AppError::Validation("prompt cannot be empty".to_string()));
            }
        }
        if let Some(model_answer) = self.model_answer {
            updated.model_answer = model_answer.trim().to_string();
            if updated.model_answer.is_empty() {
                return Err(AppError::Validation(
                    "model_answer cannot be empty".to_string(),
                ));
            }
        }
        if let Some(keywords) = self.keywords {
            updated.keywords = keywords;
        }
        if let Some(category) = self.category {
            updated.category = Some(category.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_category);
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }

        Ok(updated)
    }
}
