//! Cross-interview analytics over a user's completed sessions, plus
//! platform-wide figures over every user's. Sessions without a final score
//! are ignored.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::interview::{InterviewSession, ScoreSummary, SessionStatus};
use crate::models::question::Difficulty;
use crate::reporting::summary::rounded_mean;

/// How many recent interviews the insights view looks at.
pub const INSIGHT_WINDOW: usize = 10;

/// How many interviews the recent view returns.
pub const RECENT_LIMIT: usize = 5;

/// Platform-wide skill averages below this are reported as failed skills.
pub const FAILED_SKILL_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overview {
    pub total_interviews: usize,
    pub average_score: u32,
    pub skills: ScoreSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressionPoint {
    pub interview_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub domain: String,
    pub difficulty: Difficulty,
    pub score: ScoreSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsightReport {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub skill_averages: ScoreSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainPerformance {
    pub domain: String,
    pub skills: ScoreSummary,
    pub interview_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DifficultyPerformance {
    pub difficulty: Difficulty,
    pub average_score: u32,
    pub interview_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentInterview {
    pub interview_id: Uuid,
    pub domain: String,
    pub difficulty: Difficulty,
    pub final_score: ScoreSummary,
    pub completed_at: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainStat {
    pub domain: String,
    pub interview_count: usize,
    pub average_score: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedSkill {
    pub skill: &'static str,
    pub average_score: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlatformStats {
    /// Distinct users with at least one completed interview.
    pub total_users: usize,
    pub total_interviews: usize,
    /// Active catalog questions.
    pub total_questions: usize,
    pub average_score: u32,
    pub domain_stats: Vec<DomainStat>,
    pub skill_averages: ScoreSummary,
    pub failed_skills: Vec<FailedSkill>,
}

/// Completed sessions with their final score, oldest first.
fn completed(sessions: &[InterviewSession]) -> Vec<(&InterviewSession, ScoreSummary)> {
    let mut done: Vec<_> = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .filter_map(|s| s.final_score.map(|score| (s, score)))
        .collect();
    done.sort_by_key(|(s, _)| s.completed_at.unwrap_or(s.started_at));
    done
}

/// Field-wise rounded mean of several summaries.
fn mean_summary<'a, I>(scores: I) -> ScoreSummary
where
    I: IntoIterator<Item = &'a ScoreSummary> + Clone,
{
    let field = |f: fn(&ScoreSummary) -> u32| {
        rounded_mean(scores.clone().into_iter().map(|s| f64::from(f(s))))
    };
    ScoreSummary {
        technical: field(|s| s.technical),
        communication: field(|s| s.communication),
        confidence: field(|s| s.confidence),
        problem_solving: field(|s| s.problem_solving),
        overall: field(|s| s.overall),
    }
}

pub fn overview(sessions: &[InterviewSession]) -> Overview {
    let done = completed(sessions);
    let scores: Vec<ScoreSummary> = done.iter().map(|(_, score)| *score).collect();
    let skills = mean_summary(&scores);
    Overview {
        total_interviews: scores.len(),
        average_score: skills.overall,
        skills,
    }
}

pub fn progression(sessions: &[InterviewSession]) -> Vec<ProgressionPoint> {
    completed(sessions)
        .into_iter()
        .map(|(s, score)| ProgressionPoint {
            interview_id: s.id,
            completed_at: s.completed_at.unwrap_or(s.started_at),
            domain: s.domain.clone(),
            difficulty: s.difficulty,
            score,
        })
        .collect()
}

/// Skill averages and de-duplicated insights over the most recent
/// `INSIGHT_WINDOW` completed interviews, newest first.
pub fn insights(sessions: &[InterviewSession]) -> InsightReport {
    let recent: Vec<_> = completed(sessions)
        .into_iter()
        .rev()
        .take(INSIGHT_WINDOW)
        .collect();

    let scores: Vec<ScoreSummary> = recent.iter().map(|(_, score)| *score).collect();

    let mut report = InsightReport {
        strengths: Vec::new(),
        weaknesses: Vec::new(),
        recommendations: Vec::new(),
        skill_averages: mean_summary(&scores),
    };

    for (session, _) in &recent {
        let Some(insights) = &session.insights else {
            continue;
        };
        push_unique(&mut report.strengths, &insights.strengths);
        push_unique(&mut report.weaknesses, &insights.weaknesses);
        push_unique(&mut report.recommendations, &insights.recommendations);
    }

    report
}

fn push_unique(into: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

/// Per-domain means, ordered by domain name.
pub fn domain_performance(sessions: &[InterviewSession]) -> Vec<DomainPerformance> {
    let mut by_domain: BTreeMap<&str, Vec<ScoreSummary>> = BTreeMap::new();
    for (s, score) in completed(sessions) {
        by_domain.entry(s.domain.as_str()).or_default().push(score);
    }

    by_domain
        .into_iter()
        .map(|(domain, scores)| DomainPerformance {
            domain: domain.to_string(),
            skills: mean_summary(&scores),
            interview_count: scores.len(),
        })
        .collect()
}

/// Per-difficulty mean overall score, easy → hard.
pub fn difficulty_performance(sessions: &[InterviewSession]) -> Vec<DifficultyPerformance> {
    let mut by_difficulty: BTreeMap<Difficulty, Vec<u32>> = BTreeMap::new();
    for (s, score) in completed(sessions) {
        by_difficulty
            .entry(s.difficulty)
            .or_default()
            .push(score.overall);
    }

    by_difficulty
        .into_iter()
        .map(|(difficulty, overall)| DifficultyPerformance {
            difficulty,
            average_score: rounded_mean(overall.iter().map(|v| f64::from(*v))),
            interview_count: overall.len(),
        })
        .collect()
}

/// The `RECENT_LIMIT` most recently completed interviews, newest first.
pub fn recent(sessions: &[InterviewSession]) -> Vec<RecentInterview> {
    completed(sessions)
        .into_iter()
        .rev()
        .take(RECENT_LIMIT)
        .map(|(s, score)| RecentInterview {
            interview_id: s.id,
            domain: s.domain.clone(),
            difficulty: s.difficulty,
            final_score: score,
            completed_at: s.completed_at.unwrap_or(s.started_at),
            duration_minutes: s.duration_minutes,
        })
        .collect()
}

/// Platform-wide figures over every user's completed sessions.
///
/// Failed skills are the sub-skills whose platform average is below
/// `FAILED_SKILL_THRESHOLD`; none are reported before any interview completes.
pub fn platform_stats(sessions: &[InterviewSession], active_questions: usize) -> PlatformStats {
    let done = completed(sessions);
    let users: BTreeSet<&str> = done.iter().map(|(s, _)| s.user_id.as_str()).collect();
    let scores: Vec<ScoreSummary> = done.iter().map(|(_, score)| *score).collect();
    let skill_averages = mean_summary(&scores);

    let mut by_domain: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for (s, score) in &done {
        by_domain.entry(s.domain.as_str()).or_default().push(score.overall);
    }
    let domain_stats = by_domain
        .into_iter()
        .map(|(domain, overall)| DomainStat {
            domain: domain.to_string(),
            interview_count: overall.len(),
            average_score: rounded_mean(overall.iter().map(|v| f64::from(*v))),
        })
        .collect();

    let failed_skills = if scores.is_empty() {
        Vec::new()
    } else {
        [
            ("Technical Knowledge", skill_averages.technical),
            ("Communication", skill_averages.communication),
            ("Confidence", skill_averages.confidence),
            ("Problem Solving", skill_averages.problem_solving),
        ]
        .into_iter()
        .filter(|(_, average)| *average < FAILED_SKILL_THRESHOLD)
        .map(|(skill, average_score)| FailedSkill {
            skill,
            average_score,
        })
        .collect()
    };

    PlatformStats {
        total_users: users.len(),
        total_interviews: scores.len(),
        total_questions: active_questions,
        average_score: skill_averages.overall,
        domain_stats,
        skill_averages,
        failed_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::Insights;
    use chrono::Duration;

    fn session(
        domain: &str,
        difficulty: Difficulty,
        status: SessionStatus,
        score: Option<ScoreSummary>,
        minutes_ago: i64,
    ) -> InterviewSession {
        let completed_at = Utc::now() - Duration::minutes(minutes_ago);
        InterviewSession {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            domain: domain.to_string(),
            difficulty,
            questions: vec![],
            current_index: 0,
            status,
            answers: vec![],
            final_score: score,
            insights: score.map(|s| crate::reporting::summary::derive_insights(&s)),
            started_at: completed_at - Duration::minutes(15),
            completed_at: score.map(|_| completed_at),
            duration_minutes: score.map(|_| 15),
        }
    }

    fn summary(all: u32) -> ScoreSummary {
        ScoreSummary {
            technical: all,
            communication: all,
            confidence: all,
            problem_solving: all,
            overall: all,
        }
    }

    fn history() -> Vec<InterviewSession> {
        vec![
            session("backend", Difficulty::Hard, SessionStatus::Completed, Some(summary(80)), 30),
            session("frontend", Difficulty::Easy, SessionStatus::Completed, Some(summary(41)), 60),
            session("backend", Difficulty::Easy, SessionStatus::Completed, Some(summary(60)), 10),
            session("backend", Difficulty::Hard, SessionStatus::Ongoing, None, 5),
            session("backend", Difficulty::Hard, SessionStatus::Abandoned, None, 5),
        ]
    }

    #[test]
    fn test_empty_history_is_zeroed() {
        let o = overview(&[]);
        assert_eq!(o.total_interviews, 0);
        assert_eq!(o.average_score, 0);
        assert_eq!(o.skills, ScoreSummary::default());
        assert!(progression(&[]).is_empty());
        let i = insights(&[]);
        assert!(i.strengths.is_empty() && i.weaknesses.is_empty());
        assert_eq!(i.skill_averages, ScoreSummary::default());
        assert!(domain_performance(&[]).is_empty());
        assert!(difficulty_performance(&[]).is_empty());
    }

    #[test]
    fn test_overview_counts_only_completed() {
        let o = overview(&history());
        assert_eq!(o.total_interviews, 3);
        // (80 + 41 + 60) / 3 = 60.33
        assert_eq!(o.average_score, 60);
        assert_eq!(o.skills.technical, 60);
    }

    #[test]
    fn test_progression_is_oldest_first() {
        let points = progression(&history());
        let overall: Vec<u32> = points.iter().map(|p| p.score.overall).collect();
        assert_eq!(overall, vec![41, 80, 60]);
    }

    #[test]
    fn test_insights_deduplicate_entries() {
        let report = insights(&history());
        // Only the 80 interview produces strengths; all four once.
        assert_eq!(report.strengths.len(), 4);
        assert_eq!(report.weaknesses.len(), 4);
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn test_insights_window_keeps_most_recent() {
        let mut sessions: Vec<_> = (0..12)
            .map(|i| {
                session(
                    "backend",
                    Difficulty::Medium,
                    SessionStatus::Completed,
                    Some(summary(if i < 10 { 50 } else { 100 })),
                    // i = 0 is newest
                    i as i64,
                )
            })
            .collect();
        sessions.reverse();
        let report = insights(&sessions);
        assert_eq!(report.skill_averages.overall, 50);
    }

    #[test]
    fn test_domain_performance_groups_by_domain() {
        let perf = domain_performance(&history());
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].domain, "backend");
        assert_eq!(perf[0].interview_count, 2);
        assert_eq!(perf[0].skills.overall, 70);
        assert_eq!(perf[1].domain, "frontend");
        assert_eq!(perf[1].skills.overall, 41);
    }

    #[test]
    fn test_difficulty_performance_orders_easy_to_hard() {
        let perf = difficulty_performance(&history());
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].difficulty, Difficulty::Easy);
        // (41 + 60) / 2 = 50.5 → 51
        assert_eq!(perf[0].average_score, 51);
        assert_eq!(perf[0].interview_count, 2);
        assert_eq!(perf[1].difficulty, Difficulty::Hard);
        assert_eq!(perf[1].average_score, 80);
    }

    #[test]
    fn test_completed_without_insights_is_tolerated() {
        let mut s = session(
            "backend",
            Difficulty::Easy,
            SessionStatus::Completed,
            Some(summary(90)),
            1,
        );
        s.insights = None::<Insights>;
        let report = insights(&[s]);
        assert!(report.strengths.is_empty());
        assert_eq!(report.skill_averages.overall, 90);
    }

    #[test]
    fn test_recent_keeps_five_newest() {
        let sessions: Vec<_> = (0..7)
            .map(|i| {
                session(
                    "backend",
                    Difficulty::Easy,
                    SessionStatus::Completed,
                    Some(summary(10 * i)),
                    i as i64,
                )
            })
            .collect();
        let overall: Vec<u32> = recent(&sessions)
            .iter()
            .map(|r| r.final_score.overall)
            .collect();
        assert_eq!(overall, vec![0, 10, 20, 30, 40]);
        assert!(recent(&[]).is_empty());
    }

    #[test]
    fn test_platform_stats_span_users() {
        let mut sessions = history();
        let mut other = session(
            "frontend",
            Difficulty::Medium,
            SessionStatus::Completed,
            Some(ScoreSummary {
                technical: 20,
                communication: 30,
                confidence: 10,
                problem_solving: 25,
                overall: 21,
            }),
            3,
        );
        other.user_id = "user-2".to_string();
        sessions.push(other);

        let stats = platform_stats(&sessions, 13);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_interviews, 4);
        assert_eq!(stats.total_questions, 13);
        // (80 + 41 + 60 + 21) / 4 = 50.5
        assert_eq!(stats.average_score, 51);

        assert_eq!(stats.domain_stats.len(), 2);
        assert_eq!(stats.domain_stats[0].domain, "backend");
        assert_eq!(stats.domain_stats[0].average_score, 70);
        assert_eq!(stats.domain_stats[1].domain, "frontend");
        assert_eq!(stats.domain_stats[1].interview_count, 2);
        assert_eq!(stats.domain_stats[1].average_score, 31);

        // technical 50.25, communication 52.75, confidence 47.75, problem solving 51.5
        let failed: Vec<&str> = stats.failed_skills.iter().map(|f| f.skill).collect();
        assert_eq!(failed, vec!["Confidence"]);
        assert_eq!(stats.failed_skills[0].average_score, 48);
    }

    #[test]
    fn test_platform_stats_without_interviews_reports_no_failures() {
        let stats = platform_stats(&[], 4);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.average_score, 0);
        assert!(stats.domain_stats.is_empty());
        assert!(stats.failed_skills.is_empty());
    }
}
