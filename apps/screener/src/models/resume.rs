use std::path::Path;

use bytes::Bytes;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api_client::MultipartUpload;
use crate::errors::ClientError;
use crate::models::lenient;
use crate::models::skills::parse_skills;

pub type ResumeId = i64;

/// An uploaded resume. `parsed_skills` stays `None` until the server-side
/// parser has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: ResumeId,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub parsed_skills: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub education_field: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub uploaded_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub parsed_at: Option<NaiveDateTime>,
}

impl Resume {
    /// Candidate name when given at upload, otherwise the file name.
    pub fn display_name(&self) -> &str {
        self.candidate_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.file_name)
    }

    /// `None` while parsing is still pending.
    pub fn skill_list(&self) -> Option<Vec<String>> {
        self.parsed_skills.as_deref().map(parse_skills)
    }
}

/// A resume file ready to be sent to `/resumes/upload`.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
    pub candidate_name: Option<String>,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            candidate_name: None,
        }
    }

    pub fn with_candidate_name(mut self, name: Option<String>) -> Self {
        self.candidate_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Reads a resume from disk. Empty files are rejected before any request.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidInput(format!("'{}' has no file name", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(ClientError::InvalidInput(format!(
                "'{file_name}' is empty"
            )));
        }
        Ok(Self::new(file_name, bytes))
    }

    pub fn into_multipart(self) -> MultipartUpload {
        let mime_type = mime_for(&self.file_name).map(str::to_string);
        let text_fields = self
            .candidate_name
            .map(|name| vec![("candidateName".to_string(), name)])
            .unwrap_or_default();

        MultipartUpload {
            file_name: self.file_name,
            mime_type,
            bytes: self.bytes,
            text_fields,
        }
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "doc" => Some("application/msword"),
        _ => None,
    }
}
