//! Reduces a session's answer records into a `ScoreSummary` and derives
//! strengths, weaknesses and recommendations from fixed thresholds.

use crate::models::interview::{AnswerRecord, Insights, ScoreSummary};

/// Sub-skill values at or above this count as a strength.
pub const STRENGTH_THRESHOLD: u32 = 70;

/// (strength, weakness, recommendation) per sub-skill.
struct SkillInsight {
    strength: &'static str,
    weakness: &'static str,
    recommendation: &'static str,
}

const TECHNICAL: SkillInsight = SkillInsight {
    strength: "Strong technical knowledge",
    weakness: "Technical knowledge needs improvement",
    recommendation: "Review core technical concepts",
};

const COMMUNICATION: SkillInsight = SkillInsight {
    strength: "Excellent communication skills",
    weakness: "Communication clarity can be improved",
    recommendation: "Practice articulating answers clearly",
};

const CONFIDENCE: SkillInsight = SkillInsight {
    strength: "Confident responses",
    weakness: "Work on confidence and clarity",
    recommendation: "Practice mock interviews to build confidence",
};

const PROBLEM_SOLVING: SkillInsight = SkillInsight {
    strength: "Structured problem solving",
    weakness: "Problem-solving approach needs more structure",
    recommendation: "Work through problems step by step and explain each step",
};

/// Rounded mean of `values`; 0 when empty.
pub(crate) fn rounded_mean<I>(values: I) -> u32
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_u32), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0
    } else {
        (sum / f64::from(count)).round() as u32
    }
}

/// Aggregates answer records into a skill summary.
///
/// - technical, communication, confidence: rounded mean of the field
/// - problem_solving: rounded mean of each record's (technical + communication) / 2;
///   a proxy, not an independent signal
/// - overall: rounded mean of the four rounded sub-skill values, not of the
///   per-answer overall scores
///
/// An empty slice yields an all-zero summary.
pub fn summarize(records: &[AnswerRecord]) -> ScoreSummary {
    if records.is_empty() {
        return ScoreSummary::default();
    }

    let technical = rounded_mean(records.iter().map(|r| f64::from(r.scores.technical)));
    let communication = rounded_mean(records.iter().map(|r| f64::from(r.scores.communication)));
    let confidence = rounded_mean(records.iter().map(|r| f64::from(r.scores.confidence)));
    let problem_solving = rounded_mean(
        records
            .iter()
            .map(|r| f64::from(r.scores.technical + r.scores.communication) / 2.0),
    );
    let overall = rounded_mean(
        [technical, communication, confidence, problem_solving]
            .into_iter()
            .map(f64::from),
    );

    ScoreSummary {
        technical,
        communication,
        confidence,
        problem_solving,
        overall,
    }
}

pub fn derive_insights(summary: &ScoreSummary) -> Insights {
    let mut insights = Insights::default();

    for (value, skill) in [
        (summary.technical, &TECHNICAL),
        (summary.communication, &COMMUNICATION),
        (summary.confidence, &CONFIDENCE),
        (summary.problem_solving, &PROBLEM_SOLVING),
    ] {
        if value >= STRENGTH_THRESHOLD {
            insights.strengths.push(skill.strength.to_string());
        } else {
            insights.weaknesses.push(skill.weakness.to_string());
            insights
                .recommendations
                .push(skill.recommendation.to_string());
        }
    }

    insights
}
