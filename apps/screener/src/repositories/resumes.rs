use std::sync::Arc;

use tracing::info;

use crate::api_client::{decode_list, expect_payload, ApiRequest, Transport};
use crate::errors::ClientError;
use crate::models::{Resume, ResumeId, ResumeUpload};

#[derive(Clone)]
pub struct ResumeRepository {
    transport: Arc<dyn Transport>,
}

impl ResumeRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET /resumes
    pub async fn list_resumes(&self) -> Result<Vec<Resume>, ClientError> {
        let raw = self.transport.send(ApiRequest::get("/resumes")).await?;
        decode_list(&raw)
    }

    /// GET /resumes/{id}
    pub async fn get_resume(&self, id: ResumeId) -> Result<Resume, ClientError> {
        let raw = self
            .transport
            .send(ApiRequest::get(format!("/resumes/{id}")))
            .await?;
        expect_payload(&raw)
    }

    /// POST /resumes/upload as multipart. No JSON content type is attached;
    /// the transport derives it from the form.
    pub async fn upload_resume(&self, upload: ResumeUpload) -> Result<Resume, ClientError> {
        let file_name = upload.file_name.clone();
        let raw = self
            .transport
            .send(ApiRequest::post_multipart(
                "/resumes/upload",
                upload.into_multipart(),
            ))
            .await?;
        let resume: Resume = expect_payload(&raw)?;

        info!("Uploaded resume {} as id {}", file_name, resume.id);
        Ok(resume)
    }

    /// POST /resumes/{id}/parse: asks the server to (re)run extraction.
    pub async fn parse_resume(&self, id: ResumeId) -> Result<Resume, ClientError> {
        let raw = self
            .transport
            .send(ApiRequest::post_empty(format!("/resumes/{id}/parse")))
            .await?;
        expect_payload(&raw)
    }
}
