use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Job, JobId, Resume, ResumeId};

pub const UNKNOWN_DATE_TEXT: &str = "Recently";
pub const PARSING_PENDING_TEXT: &str = "Parsing...";

/// Short month + day (`Mar 5`), or `Recently` when the server sent nothing usable.
pub fn format_date(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format("%b %-d").to_string(),
        None => UNKNOWN_DATE_TEXT.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub skill_tags: Vec<String>,
    pub posted: String,
    pub experience: String,
}

impl From<&Job> for JobCard {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            skill_tags: job.required_skill_list(),
            posted: format_date(job.created_at),
            experience: format!("{}+ Years", job.min_experience_years.unwrap_or(0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeCard {
    pub id: ResumeId,
    pub name: String,
    pub file_name: String,
    /// `["Parsing..."]` until the server has extracted skills.
    pub skill_tags: Vec<String>,
    pub parsing_pending: bool,
    pub size: String,
}

impl From<&Resume> for ResumeCard {
    fn from(resume: &Resume) -> Self {
        let (skill_tags, parsing_pending) = match resume.skill_list() {
            Some(skills) => (skills, false),
            None => (vec![PARSING_PENDING_TEXT.to_string()], true),
        };
        Self {
            id: resume.id,
            name: resume.display_name().to_string(),
            file_name: resume.file_name.clone(),
            skill_tags,
            parsing_pending,
            size: format!("{}KB", (resume.file_size as f64 / 1024.0).round()),
        }
    }
}

/// Entry in the rankings section's job selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOption {
    pub id: JobId,
    pub label: String,
}

impl From<&Job> for JobOption {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            label: job.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date() {
        let dt = crate::models::lenient::parse_timestamp("2024-11-23T08:30:00");
        assert_eq!(format_date(dt), "Nov 23");
        assert_eq!(format_date(None), "Recently");
    }

    #[test]
    fn test_job_card() {
        let job: Job = serde_json::from_value(json!({
            "id": 1,
            "title": "Eng",
            "description": "Build",
            "requiredSkills": "Rust , Tokio,",
            "minExperienceYears": 4,
            "createdAt": "2024-01-09T12:00:00"
        }))
        .unwrap();
        let card = JobCard::from(&job);
        assert_eq!(card.skill_tags, vec!["Rust", "Tokio"]);
        assert_eq!(card.posted, "Jan 9");
        assert_eq!(card.experience, "4+ Years");
    }

    #[test]
    fn test_resume_card_pending_and_parsed() {
        let pending: Resume = serde_json::from_value(json!({
            "id": 1, "fileName": "cv.pdf", "fileSize": 20480
        }))
        .unwrap();
        let card = ResumeCard::from(&pending);
        assert!(card.parsing_pending);
        assert_eq!(card.skill_tags, vec![PARSING_PENDING_TEXT]);
        assert_eq!(card.size, "20KB");
        assert_eq!(card.name, "cv.pdf");

        let parsed: Resume = serde_json::from_value(json!({
            "id": 2, "candidateName": "Lin", "fileName": "lin.pdf",
            "fileSize": 1500, "parsedSkills": "sql, excel"
        }))
        .unwrap();
        let card = ResumeCard::from(&parsed);
        assert!(!card.parsing_pending);
        assert_eq!(card.skill_tags, vec!["sql", "excel"]);
        assert_eq!(card.size, "1KB");
        assert_eq!(card.name, "Lin");
    }
}
