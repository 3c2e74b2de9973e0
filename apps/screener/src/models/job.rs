use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::models::lenient;
use crate::models::skills::parse_skills;

pub type JobId = i64;

const MAX_TITLE_LEN: usize = 255;
const MAX_SHORT_FIELD_LEN: usize = 50;

/// A job opening as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: String,
    #[serde(default)]
    pub preferred_skills: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub min_experience_years: Option<u32>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Job {
    pub fn required_skill_list(&self) -> Vec<String> {
        parse_skills(&self.required_skills)
    }

    pub fn preferred_skill_list(&self) -> Vec<String> {
        self.preferred_skills
            .as_deref()
            .map(parse_skills)
            .unwrap_or_default()
    }
}

/// Fields submitted when creating a job opening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub required_skills: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_skills: Option<String>,
    pub min_experience_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
}

impl NewJob {
    /// Checks the constraints the server enforces, so a doomed request is never sent.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("title: Job title is required".to_string());
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            problems.push(format!(
                "title: Job title must not exceed {MAX_TITLE_LEN} characters"
            ));
        }
        if self.description.trim().is_empty() {
            problems.push("description: Job description is required".to_string());
        }
        if self.required_skills.trim().is_empty() {
            problems.push("requiredSkills: Required skills are mandatory".to_string());
        }
        if exceeds(&self.education_level, MAX_SHORT_FIELD_LEN) {
            problems.push(format!(
                "educationLevel: Education level must not exceed {MAX_SHORT_FIELD_LEN} characters"
            ));
        }
        if exceeds(&self.job_type, MAX_SHORT_FIELD_LEN) {
            problems.push(format!(
                "jobType: Job type must not exceed {MAX_SHORT_FIELD_LEN} characters"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ClientError::InvalidInput(problems.join(", ")))
        }
    }

    /// Blank optional fields are sent as absent, not as empty strings.
    pub fn normalized(mut self) -> Self {
        self.preferred_skills = non_blank(self.preferred_skills);
        self.education_level = non_blank(self.education_level);
        self.job_type = non_blank(self.job_type);
        self
    }
}

fn exceeds(field: &Option<String>, max: usize) -> bool {
    field.as_deref().map(|s| s.chars().count() > max).unwrap_or(false)
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_job() -> NewJob {
        NewJob {
            title: "Backend Engineer".to_string(),
            description: "Own the ranking service".to_string(),
            required_skills: "Java, Spring Boot, SQL".to_string(),
            min_experience_years: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_job_decodes_server_shape() {
        let job: Job = serde_json::from_value(json!({
            "id": 7,
            "title": "Eng",
            "description": "Build things",
            "requiredSkills": "Rust, Tokio",
            "preferredSkills": null,
            "minExperienceYears": 2,
            "educationLevel": "BACHELOR",
            "jobType": null,
            "createdAt": "2024-03-05T10:15:30.52",
            "updatedAt": "garbage"
        }))
        .unwrap();

        assert_eq!(job.id, 7);
        assert_eq!(job.min_experience_years, Some(2));
        assert_eq!(job.required_skill_list(), vec!["Rust", "Tokio"]);
        assert!(job.preferred_skill_list().is_empty());
        assert!(job.created_at.is_some());
        assert!(job.updated_at.is_none());
    }

    #[test]
    fn test_new_job_validation_passes() {
        assert!(valid_job().validate().is_ok());
    }

    #[test]
    fn test_new_job_validation_collects_problems() {
        let job = NewJob {
            title: "  ".to_string(),
            required_skills: String::new(),
            job_type: Some("x".repeat(51)),
            ..valid_job()
        };
        let err = job.validate().unwrap_err();
        let msg = err.user_message();
        assert!(msg.contains("title"));
        assert!(msg.contains("requiredSkills"));
        assert!(msg.contains("jobType"));
        assert!(!msg.contains("description"));
    }

    #[test]
    fn test_new_job_serializes_camel_case_without_blanks() {
        let job = NewJob {
            education_level: Some("  ".to_string()),
            preferred_skills: Some("Docker".to_string()),
            ..valid_job()
        }
        .normalized();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["requiredSkills"], "Java, Spring Boot, SQL");
        assert_eq!(value["minExperienceYears"], 3);
        assert_eq!(value["preferredSkills"], "Docker");
        assert!(value.get("educationLevel").is_none());
        assert!(value.get("jobType").is_none());
    }
}
