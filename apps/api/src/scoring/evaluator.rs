//! Remote answer evaluator client and the single sanitize step every
//! evaluator response passes through before it becomes `AnswerScores`.
//!
//! The remote service is untrusted: fields may be missing, mistyped, out of
//! range or on a 0–25 sub-scale. `sanitize` is the only place that knows this.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::interview::{AnswerScores, ScoreSource, Sentiment};
use crate::models::question::Difficulty;

const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Evaluator error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Evaluator response was not JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Evaluator did not answer within {0:?}")]
    Timeout(Duration),
}

/// Request body for `POST {endpoint}/evaluate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest<'a> {
    pub user_answer: &'a str,
    pub model_answer: &'a str,
    pub difficulty: Difficulty,
}

/// Evaluator response exactly as received. Every field is optional and
/// loosely typed; see `sanitize`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvaluation {
    #[serde(default)]
    pub technical: Option<Value>,
    #[serde(default)]
    pub communication: Option<Value>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub overall: Option<Value>,
    #[serde(default)]
    pub ai_score: Option<Value>,
    #[serde(default)]
    pub sentiment: Option<Value>,
    #[serde(default)]
    pub feedback: Option<Value>,
}

/// A remote scorer. Implement this to plug in another evaluation backend
/// without touching the scoring engine or handlers.
#[async_trait]
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &str;

    async fn evaluate(
        &self,
        request: &EvaluationRequest<'_>,
    ) -> Result<RawEvaluation, EvaluatorError>;
}

/// HTTP evaluator speaking the `{userAnswer, modelAnswer}` → scores contract.
#[derive(Clone)]
pub struct HttpEvaluator {
    client: Client,
    base_url: String,
}

impl HttpEvaluator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EvaluatorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(base_url = %self.base_url))]
    async fn evaluate(
        &self,
        request: &EvaluationRequest<'_>,
    ) -> Result<RawEvaluation, EvaluatorError> {
        let response = self
            .client
            .post(format!("{}/evaluate", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EvaluatorError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let raw: RawEvaluation = serde_json::from_str(&body)?;
        debug!("Evaluator responded with status {status}");
        Ok(raw)
    }
}

/// Normalizes an untrusted evaluator response onto the 0–100 scale.
///
/// - sub-scores (technical, communication, confidence) are rescaled from
///   `sub_score_scale` to 0–100 and clamped; missing or non-numeric → 0
/// - overall comes from `overall`, else `aiScore` when `overall` is missing or
///   non-numeric; already on 0–100; clamped
/// - sentiment: positive / neutral / negative (`needs_improvement` counts as
///   negative); anything else → neutral
pub fn sanitize(raw: RawEvaluation, sub_score_scale: u32) -> AnswerScores {
    let scale = f64::from(sub_score_scale.max(1));
    let rescale = |v: &Option<Value>| clamp_score(number(v.as_ref()) / scale * MAX_SCORE);
    let overall = parse_number(raw.overall.as_ref())
        .or_else(|| parse_number(raw.ai_score.as_ref()))
        .unwrap_or(0.0);

    AnswerScores {
        technical: rescale(&raw.technical),
        communication: rescale(&raw.communication),
        confidence: rescale(&raw.confidence),
        overall: clamp_score(overall),
        sentiment: parse_sentiment(raw.sentiment.as_ref()),
        feedback: raw
            .feedback
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        source: ScoreSource::Evaluator,
    }
}

/// Reads a finite JSON number, or a string holding one.
fn parse_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Like `parse_number`, with anything unreadable as 0.
fn number(value: Option<&Value>) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

fn clamp_score(n: f64) -> u32 {
    n.round().clamp(0.0, MAX_SCORE) as u32
}

fn parse_sentiment(value: Option<&Value>) -> Sentiment {
    match value.and_then(Value::as_str).map(|s| s.trim().to_lowercase()) {
        Some(s) if s == "positive" => Sentiment::Positive,
        Some(s) if s == "negative" || s == "needs_improvement" => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn raw(value: serde_json::Value) -> RawEvaluation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sanitize_full_response_on_percent_scale() {
        let scores = sanitize(
            raw(json!({
                "technical": 80, "communication": 70, "confidence": 60,
                "overall": 75, "sentiment": "positive", "feedback": "Good."
            })),
            100,
        );
        assert_eq!(scores.technical, 80);
        assert_eq!(scores.communication, 70);
        assert_eq!(scores.confidence, 60);
        assert_eq!(scores.overall, 75);
        assert_eq!(scores.sentiment, Sentiment::Positive);
        assert_eq!(scores.feedback.as_deref(), Some("Good."));
        assert_eq!(scores.source, ScoreSource::Evaluator);
    }

    #[test]
    fn test_sanitize_missing_fields_default_to_zero_and_neutral() {
        let scores = sanitize(raw(json!({})), 100);
        assert_eq!(scores.technical, 0);
        assert_eq!(scores.communication, 0);
        assert_eq!(scores.confidence, 0);
        assert_eq!(scores.overall, 0);
        assert_eq!(scores.sentiment, Sentiment::Neutral);
        assert_eq!(scores.feedback, None);
    }

    #[test]
    fn test_sanitize_rescales_quarter_scale_sub_scores() {
        let scores = sanitize(
            raw(json!({"technical": 20, "communication": 25, "confidence": 5, "aiScore": 50})),
            25,
        );
        assert_eq!(scores.technical, 80);
        assert_eq!(scores.communication, 100);
        assert_eq!(scores.confidence, 20);
        assert_eq!(scores.overall, 50);
    }

    #[test]
    fn test_sanitize_prefers_overall_over_ai_score() {
        let scores = sanitize(raw(json!({"overall": 10, "aiScore": 90})), 100);
        assert_eq!(scores.overall, 10);
    }

    #[test]
    fn test_sanitize_falls_back_to_ai_score_when_overall_is_not_numeric() {
        let scores = sanitize(raw(json!({"overall": "lots", "aiScore": 72})), 100);
        assert_eq!(scores.overall, 72);
        let scores = sanitize(raw(json!({"overall": null, "aiScore": "64"})), 100);
        assert_eq!(scores.overall, 64);
    }

    #[test]
    fn test_sanitize_clamps_and_ignores_garbage() {
        let scores = sanitize(
            raw(json!({
                "technical": 250, "communication": -4, "confidence": "55",
                "overall": "lots", "sentiment": 3
            })),
            100,
        );
        assert_eq!(scores.technical, 100);
        assert_eq!(scores.communication, 0);
        assert_eq!(scores.confidence, 55);
        assert_eq!(scores.overall, 0);
        assert_eq!(scores.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_sanitize_maps_needs_improvement_to_negative() {
        let scores = sanitize(raw(json!({"sentiment": "needs_improvement"})), 100);
        assert_eq!(scores.sentiment, Sentiment::Negative);
        let scores = sanitize(raw(json!({"sentiment": "ecstatic"})), 100);
        assert_eq!(scores.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_http_evaluator_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .and(body_json(json!({
                "userAnswer": "mine",
                "modelAnswer": "theirs",
                "difficulty": "hard"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "aiScore": 64, "technical": 12, "communication": 20,
                "confidence": 15, "sentiment": "neutral"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let evaluator = HttpEvaluator::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let raw = evaluator
            .evaluate(&EvaluationRequest {
                user_answer: "mine",
                model_answer: "theirs",
                difficulty: Difficulty::Hard,
            })
            .await
            .unwrap();

        let scores = sanitize(raw, 25);
        assert_eq!(scores.technical, 48);
        assert_eq!(scores.overall, 64);
    }

    #[tokio::test]
    async fn test_http_evaluator_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let evaluator = HttpEvaluator::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = evaluator
            .evaluate(&EvaluationRequest {
                user_answer: "a",
                model_answer: "b",
                difficulty: Difficulty::Easy,
            })
            .await
            .unwrap_err();

        match err {
            EvaluatorError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_evaluator_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let evaluator = HttpEvaluator::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = evaluator
            .evaluate(&EvaluationRequest {
                user_answer: "a",
                model_answer: "b",
                difficulty: Difficulty::Easy,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluatorError::Parse(_)));
    }
}
