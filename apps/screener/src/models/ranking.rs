use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;
use crate::models::resume::ResumeId;
use crate::models::skills::parse_skills;

/// Whether the scorer has reported skill overlap for a candidate.
///
/// Absent/null and empty are different answers: the first means the match was
/// not computed yet, the second that nothing overlapped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "skills", rename_all = "snake_case")]
pub enum MatchedSkills {
    #[default]
    Pending,
    NoOverlap,
    Matched(Vec<String>),
}

impl MatchedSkills {
    pub fn from_list(skills: Vec<String>) -> Self {
        if skills.is_empty() {
            MatchedSkills::NoOverlap
        } else {
            MatchedSkills::Matched(skills)
        }
    }

    pub fn count(&self) -> usize {
        match self {
            MatchedSkills::Matched(skills) => skills.len(),
            _ => 0,
        }
    }
}

impl<'de> Deserialize<'de> for MatchedSkills {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => MatchedSkills::from_list(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            Value::String(text) => MatchedSkills::from_list(parse_skills(&text)),
            _ => MatchedSkills::Pending,
        })
    }
}

/// One candidate's scores against one job, as returned by `/ranking/{jobId}`.
/// Every score is non-negative; bad values have already been coerced to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    #[serde(default, deserialize_with = "optional_id")]
    pub resume_id: Option<ResumeId>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub skill_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub experience_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub education_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub project_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub final_score: f64,
    #[serde(default)]
    pub matched_skills: MatchedSkills,
    #[serde(default, deserialize_with = "optional_string_list")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub rank: Option<u32>,
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<ResumeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn optional_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(text) => parse_skills(&text),
        _ => Vec::new(),
    })
}
