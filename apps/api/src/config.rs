use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_EVALUATOR_TIMEOUT_SECS: u64 = 5;
/// Sub-score scale when no evaluator is configured; scores are already 0–100.
const DEFAULT_EVALUATOR_SCORE_SCALE: u32 = 100;
/// Sub-score scale of the bundled evaluator service, assumed when
/// `EVALUATOR_URL` is set without `EVALUATOR_SCORE_SCALE`.
const REMOTE_EVALUATOR_SCORE_SCALE: u32 = 25;
const DEFAULT_QUESTIONS_PER_INTERVIEW: usize = 5;
const DEFAULT_ABANDONED_RETENTION_MINS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to the defaults above.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the remote answer evaluator. `None` scores locally only.
    pub evaluator_url: Option<String>,
    pub evaluator_timeout: Duration,
    /// Maximum of the evaluator's sub-score scale (the bundled service uses 25).
    pub evaluator_score_scale: u32,
    pub questions_per_interview: usize,
    /// JSON file of catalog questions. `None` loads the built-in seed set.
    pub question_bank_path: Option<String>,
    /// Seeds random question sampling. `None` takes the first N in catalog order.
    pub question_selection_seed: Option<u64>,
    /// Allow `finish` before every question has been answered.
    pub allow_early_finish: bool,
    /// How long an abandoned session stays readable before eviction.
    pub abandoned_retention: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            evaluator_url: None,
            evaluator_timeout: Duration::from_secs(DEFAULT_EVALUATOR_TIMEOUT_SECS),
            evaluator_score_scale: DEFAULT_EVALUATOR_SCORE_SCALE,
            questions_per_interview: DEFAULT_QUESTIONS_PER_INTERVIEW,
            question_bank_path: None,
            question_selection_seed: None,
            allow_early_finish: false,
            abandoned_retention: Duration::from_secs(DEFAULT_ABANDONED_RETENTION_MINS * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let evaluator_url =
            non_empty("EVALUATOR_URL").map(|url| url.trim().trim_end_matches('/').to_string());

        let default_scale = if evaluator_url.is_some() {
            REMOTE_EVALUATOR_SCORE_SCALE
        } else {
            defaults.evaluator_score_scale
        };
        let evaluator_score_scale: u32 =
            parse_or(&non_empty, "EVALUATOR_SCORE_SCALE", default_scale)?;
        if evaluator_score_scale == 0 {
            anyhow::bail!("EVALUATOR_SCORE_SCALE must be greater than zero");
        }

        let evaluator_timeout_secs: u64 = parse_or(
            &non_empty,
            "EVALUATOR_TIMEOUT_SECS",
            DEFAULT_EVALUATOR_TIMEOUT_SECS,
        )?;
        if evaluator_timeout_secs == 0 {
            anyhow::bail!("EVALUATOR_TIMEOUT_SECS must be greater than zero");
        }

        let questions_per_interview: usize = parse_or(
            &non_empty,
            "QUESTIONS_PER_INTERVIEW",
            defaults.questions_per_interview,
        )?;
        if questions_per_interview == 0 {
            anyhow::bail!("QUESTIONS_PER_INTERVIEW must be greater than zero");
        }

        Ok(Config {
            port: parse_or(&non_empty, "PORT", defaults.port)?,
            rust_log: non_empty("RUST_LOG").unwrap_or(defaults.rust_log),
            evaluator_url,
            evaluator_timeout: Duration::from_secs(evaluator_timeout_secs),
            evaluator_score_scale,
            questions_per_interview,
            question_bank_path: non_empty("QUESTION_BANK_PATH"),
            question_selection_seed: non_empty("QUESTION_SELECTION_SEED")
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .context("QUESTION_SELECTION_SEED must be an unsigned integer")
                })
                .transpose()?,
            allow_early_finish: parse_or(&non_empty, "ALLOW_EARLY_FINISH", false)?,
            abandoned_retention: Duration::from_secs(
                parse_or(
                    &non_empty,
                    "ABANDONED_RETENTION_MINS",
                    DEFAULT_ABANDONED_RETENTION_MINS,
                )?
                .saturating_mul(60),
            ),
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
