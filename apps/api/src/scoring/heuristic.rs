//! Local keyword-overlap heuristic. Pure, deterministic, no I/O.
//!
//! Algorithm:
//! 1. Lowercase both texts and split on whitespace into sets of unique words
//! 2. technical = round(min(|model ∩ user| / |model| × 100, 100)), 0 for an empty model answer
//! 3. confidence = 20 per distinct confidence marker found in the answer, capped at 100
//! 4. communication = answer length in characters, capped at 100
//! 5. overall = technical; sentiment = positive when confidence > 40, else neutral

use std::collections::HashSet;

use crate::models::interview::{AnswerScores, ScoreSource, Sentiment};

const CONFIDENCE_MARKERS: [&str; 4] = ["confident", "clearly", "definitely", "sure"];
const POINTS_PER_MARKER: u32 = 20;
const MAX_SCORE: u32 = 100;
const POSITIVE_CONFIDENCE_THRESHOLD: u32 = 40;
const STRONG_ANSWER_THRESHOLD: u32 = 70;

pub fn score_answer(user_answer: &str, model_answer: &str) -> AnswerScores {
    let user_lower = user_answer.to_lowercase();
    let model_lower = model_answer.to_lowercase();

    let technical = relevance(&user_lower, &model_lower);
    let confidence = confidence(&user_lower);
    let communication = (user_answer.chars().count() as u32).min(MAX_SCORE);

    let sentiment = if confidence > POSITIVE_CONFIDENCE_THRESHOLD {
        Sentiment::Positive
    } else {
        // No negative case: the heuristic cannot tell a weak answer from a neutral one.
        Sentiment::Neutral
    };

    let feedback = if technical > STRONG_ANSWER_THRESHOLD {
        "Strong answer with good clarity"
    } else {
        "Answer needs more detail and structure"
    };

    AnswerScores {
        technical,
        communication,
        confidence,
        overall: technical,
        sentiment,
        feedback: Some(feedback.to_string()),
        source: ScoreSource::Heuristic,
    }
}

/// Share of the model answer's unique words that appear in the user answer, 0–100.
fn relevance(user_lower: &str, model_lower: &str) -> u32 {
    let model_words: HashSet<&str> = model_lower.split_whitespace().collect();
    if model_words.is_empty() {
        return 0;
    }
    let user_words: HashSet<&str> = user_lower.split_whitespace().collect();

    let match_count = model_words
        .iter()
        .filter(|w| user_words.contains(*w))
        .count();

    let pct = (match_count as f64 / model_words.len() as f64) * 100.0;
    pct.min(MAX_SCORE as f64).round() as u32
}

fn confidence(user_lower: &str) -> u32 {
    let found = CONFIDENCE_MARKERS
        .iter()
        .filter(|marker| user_lower.contains(*marker))
        .count() as u32;
    (found * POINTS_PER_MARKER).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "A closure captures variables from its enclosing scope";

    #[test]
    fn test_verbatim_answer_is_fully_relevant() {
        let scores = score_answer(MODEL, MODEL);
        assert_eq!(scores.technical, 100);
        assert_eq!(scores.overall, 100);
        assert_eq!(scores.source, ScoreSource::Heuristic);
    }

    #[test]
    fn test_dont_know_answer_has_no_relevance() {
        let scores = score_answer("I don't know", MODEL);
        assert_eq!(scores.technical, 0);
        assert_eq!(
            scores.feedback.as_deref(),
            Some("Answer needs more detail and structure")
        );
    }

    #[test]
    fn test_relevance_is_case_insensitive_and_rounded() {
        // 3 of 8 unique model words → 37.5 → 38
        let scores = score_answer("CLOSURE captures SCOPE", MODEL);
        assert_eq!(scores.technical, 38);
    }

    #[test]
    fn test_duplicate_words_count_once() {
        let scores = score_answer("closure closure closure", "closure closure");
        assert_eq!(scores.technical, 100);
    }

    #[test]
    fn test_empty_model_answer_scores_zero_relevance() {
        let scores = score_answer("anything at all", "   ");
        assert_eq!(scores.technical, 0);
    }

    #[test]
    fn test_confidence_markers_add_twenty_each() {
        let scores = score_answer("I am sure and confident", MODEL);
        assert_eq!(scores.confidence, 40);
        // 40 is not above the threshold
        assert_eq!(scores.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_many_markers_make_sentiment_positive() {
        let scores = score_answer("I am definitely sure and clearly confident", MODEL);
        assert_eq!(scores.confidence, 80);
        assert_eq!(scores.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_repeated_marker_counts_once() {
        let scores = score_answer("sure sure sure sure sure sure", MODEL);
        assert_eq!(scores.confidence, 20);
    }

    #[test]
    fn test_communication_is_capped_length() {
        assert_eq!(score_answer("short", MODEL).communication, 5);
        let long = "word ".repeat(100);
        assert_eq!(score_answer(&long, MODEL).communication, 100);
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        let a = score_answer("closures definitely capture scope", MODEL);
        let b = score_answer("closures definitely capture scope", MODEL);
        assert_eq!(a, b);
    }
}
