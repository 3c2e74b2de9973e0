//! Rank presenter: turns one job's rankings into ordered, display-ready records.
//!
//! Order is made explicit here instead of trusting transport order:
//! final ↓, skill ↓, experience ↓, matched-skill count ↓, resume id ↑
//! (records without an id last). This is the same chain the scoring server
//! uses, so well-ordered input comes out unchanged. Badges are positional on
//! the final order and ignore any server rank.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::models::{render_skills, MatchedSkills, RankingResult};

pub const NO_OVERLAP_TEXT: &str = "No skill overlap detected";
pub const PENDING_MATCH_TEXT: &str = "Match analysis pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Gold,
    Silver,
    Bronze,
    Other,
}

impl BadgeTier {
    /// 0-based position → tier.
    pub fn for_position(index: usize) -> Self {
        match index {
            0 => BadgeTier::Gold,
            1 => BadgeTier::Silver,
            2 => BadgeTier::Bronze,
            _ => BadgeTier::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BadgeTier::Gold => "gold",
            BadgeTier::Silver => "silver",
            BadgeTier::Bronze => "bronze",
            BadgeTier::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePrecision {
    /// Summary contexts: whole percentage points.
    Whole,
    /// Detailed breakdown: one decimal place.
    Tenth,
}

/// Formats a score for display. Never fails; unusable values show as 0.
/// Halves round away from zero.
pub fn format_score(score: f64, precision: ScorePrecision) -> String {
    let score = if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    };
    match precision {
        ScorePrecision::Whole => format!("{:.0}", score.round()),
        ScorePrecision::Tenth => format!("{:.1}", (score * 10.0).round() / 10.0),
    }
}

/// Scores as shown on the ranking card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub skills: String,
    pub experience: String,
    pub education: String,
    /// Includes the `%` sign.
    pub relevancy: String,
}

/// Scores as shown in the expanded detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
    pub final_score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// 1-based position shown on the badge.
    pub position: usize,
    pub badge: BadgeTier,
    pub resume_id: Option<i64>,
    pub display_name: String,
    pub matched_skills: String,
    pub missing_skills: String,
    /// Whatever rank the server sent; informational only.
    pub server_rank: Option<u32>,
    pub summary: ScoreSummary,
    pub breakdown: ScoreBreakdown,
}

/// Total order used for display. Stable sorts with this comparator are deterministic.
pub fn rank_order(a: &RankingResult, b: &RankingResult) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| b.skill_score.total_cmp(&a.skill_score))
        .then_with(|| b.experience_score.total_cmp(&a.experience_score))
        .then_with(|| b.matched_skills.count().cmp(&a.matched_skills.count()))
        .then_with(|| match (a.resume_id, b.resume_id) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

pub fn present_rankings(rankings: &[RankingResult]) -> Vec<RankedCandidate> {
    let mut order: Vec<usize> = (0..rankings.len()).collect();
    order.sort_by(|&i, &j| rank_order(&rankings[i], &rankings[j]));

    if order.iter().enumerate().any(|(pos, &idx)| pos != idx) {
        warn!(
            "Ranking list arrived out of order ({} records); reordered by score",
            rankings.len()
        );
    }

    order
        .into_iter()
        .enumerate()
        .map(|(index, idx)| present_one(index, &rankings[idx]))
        .collect()
}

fn present_one(index: usize, ranking: &RankingResult) -> RankedCandidate {
    RankedCandidate {
        position: index + 1,
        badge: BadgeTier::for_position(index),
        resume_id: ranking.resume_id,
        display_name: display_name(ranking),
        matched_skills: matched_skills_text(&ranking.matched_skills),
        missing_skills: render_skills(&ranking.missing_skills),
        server_rank: ranking.rank,
        summary: ScoreSummary {
            skills: format_score(ranking.skill_score, ScorePrecision::Whole),
            experience: format_score(ranking.experience_score, ScorePrecision::Whole),
            education: format_score(ranking.education_score, ScorePrecision::Whole),
            relevancy: format!(
                "{}%",
                format_score(ranking.final_score, ScorePrecision::Whole)
            ),
        },
        breakdown: ScoreBreakdown {
            skills: format_score(ranking.skill_score, ScorePrecision::Tenth),
            experience: format_score(ranking.experience_score, ScorePrecision::Tenth),
            education: format_score(ranking.education_score, ScorePrecision::Tenth),
            projects: format_score(ranking.project_score, ScorePrecision::Tenth),
            final_score: format_score(ranking.final_score, ScorePrecision::Tenth),
        },
    }
}

pub fn matched_skills_text(skills: &MatchedSkills) -> String {
    match skills {
        MatchedSkills::Pending => PENDING_MATCH_TEXT.to_string(),
        MatchedSkills::NoOverlap => NO_OVERLAP_TEXT.to_string(),
        MatchedSkills::Matched(list) => render_skills(list),
    }
}

fn display_name(ranking: &RankingResult) -> String {
    let non_blank = |s: &Option<String>| {
        s.as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    };
    non_blank(&ranking.candidate_name)
        .or_else(|| non_blank(&ranking.file_name))
        .unwrap_or_else(|| match ranking.resume_id {
            Some(id) => format!("Candidate #{id}"),
            None => "Unknown candidate".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ranking(value: serde_json::Value) -> RankingResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_badges_are_positional() {
        let tiers: Vec<BadgeTier> = (0..6).map(BadgeTier::for_position).collect();
        assert_eq!(
            tiers,
            vec![
                BadgeTier::Gold,
                BadgeTier::Silver,
                BadgeTier::Bronze,
                BadgeTier::Other,
                BadgeTier::Other,
                BadgeTier::Other
            ]
        );
        assert_eq!(BadgeTier::Bronze.as_str(), "bronze");
    }

    #[test]
    fn test_server_rank_does_not_drive_badge() {
        let list = vec![
            ranking(json!({"resumeId": 1, "finalScore": 90, "rank": 3})),
            ranking(json!({"resumeId": 2, "finalScore": 80, "rank": 1})),
        ];
        let presented = present_rankings(&list);
        assert_eq!(presented[0].badge, BadgeTier::Gold);
        assert_eq!(presented[0].server_rank, Some(3));
        assert_eq!(presented[1].badge, BadgeTier::Silver);
        assert_eq!(presented[1].position, 2);
    }

    #[test]
    fn test_sorted_input_keeps_order() {
        let list = vec![
            ranking(json!({"resumeId": 5, "finalScore": 95})),
            ranking(json!({"resumeId": 3, "finalScore": 70})),
            ranking(json!({"resumeId": 9, "finalScore": 40})),
            ranking(json!({"resumeId": 1, "finalScore": 10})),
        ];
        let ids: Vec<_> = present_rankings(&list)
            .iter()
            .map(|r| r.resume_id.unwrap())
            .collect();
        assert_eq!(ids, vec![5, 3, 9, 1]);
    }

    #[test]
    fn test_tie_break_chain() {
        let list = vec![
            ranking(json!({"resumeId": 7, "finalScore": 80, "skillScore": 60})),
            ranking(json!({"resumeId": 4, "finalScore": 80, "skillScore": 70})),
            ranking(json!({"resumeId": 6, "finalScore": 80, "skillScore": 70, "experienceScore": 90})),
            ranking(json!({"resumeId": 8, "finalScore": 80, "skillScore": 60, "matchedSkills": ["a", "b"]})),
            ranking(json!({"finalScore": 80, "skillScore": 60})),
            ranking(json!({"resumeId": 2, "finalScore": 80, "skillScore": 60})),
            ranking(json!({"resumeId": 1, "finalScore": 99})),
        ];
        let order: Vec<_> = present_rankings(&list)
            .iter()
            .map(|r| r.resume_id)
            .collect();
        assert_eq!(
            order,
            vec![Some(1), Some(6), Some(4), Some(8), Some(2), Some(7), None]
        );
    }

    #[test]
    fn test_same_input_same_output() {
        let list = vec![
            ranking(json!({"resumeId": 2, "finalScore": 50})),
            ranking(json!({"resumeId": 1, "finalScore": 50})),
            ranking(json!({"resumeId": 3, "finalScore": 75})),
        ];
        assert_eq!(present_rankings(&list), present_rankings(&list));
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(format_score(76.7, ScorePrecision::Whole), "77");
        assert_eq!(format_score(62.5, ScorePrecision::Whole), "63");
        assert_eq!(format_score(76.66, ScorePrecision::Tenth), "76.7");
        assert_eq!(format_score(0.0, ScorePrecision::Tenth), "0.0");
        assert_eq!(format_score(f64::NAN, ScorePrecision::Whole), "0");
        assert_eq!(format_score(-3.0, ScorePrecision::Whole), "0");
    }

    #[test]
    fn test_card_fields() {
        let presented = present_rankings(&[ranking(json!({
            "resumeId": 12,
            "fileName": "ada.pdf",
            "skillScore": 80.44,
            "experienceScore": "100",
            "educationScore": null,
            "projectScore": 33.35,
            "finalScore": 78.25,
            "matchedSkills": ["java", "sql"],
            "missingSkills": ["kafka", "k8s"]
        }))]);
        let card = &presented[0];

        assert_eq!(card.display_name, "ada.pdf");
        assert_eq!(card.matched_skills, "java, sql");
        assert_eq!(card.missing_skills, "kafka, k8s");
        assert_eq!(card.summary.skills, "80");
        assert_eq!(card.summary.experience, "100");
        assert_eq!(card.summary.education, "0");
        assert_eq!(card.summary.relevancy, "78%");
        assert_eq!(card.breakdown.skills, "80.4");
        assert_eq!(card.breakdown.final_score, "78.3");
    }

    #[test]
    fn test_matched_skill_markers() {
        assert_eq!(matched_skills_text(&MatchedSkills::NoOverlap), NO_OVERLAP_TEXT);
        assert_eq!(matched_skills_text(&MatchedSkills::Pending), PENDING_MATCH_TEXT);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let named = ranking(json!({"resumeId": 1, "candidateName": "Grace", "fileName": "g.pdf"}));
        let anonymous = ranking(json!({"resumeId": 2, "candidateName": " "}));
        let nothing = ranking(json!({}));
        let presented = present_rankings(&[named, anonymous, nothing]);
        assert_eq!(presented[0].display_name, "Grace");
        assert_eq!(presented[1].display_name, "Candidate #2");
        assert_eq!(presented[2].display_name, "Unknown candidate");
    }

    #[test]
    fn test_empty_list() {
        assert!(present_rankings(&[]).is_empty());
    }
}
