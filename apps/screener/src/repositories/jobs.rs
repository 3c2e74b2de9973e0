use std::sync::Arc;

use tracing::info;

use crate::api_client::{decode_list, expect_payload, ApiRequest, Transport};
use crate::errors::ClientError;
use crate::models::{Job, JobId, NewJob};

#[derive(Clone)]
pub struct JobRepository {
    transport: Arc<dyn Transport>,
}

impl JobRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET /jobs. Listing order is the server's.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let raw = self.transport.send(ApiRequest::get("/jobs")).await?;
        decode_list(&raw)
    }

    /// GET /jobs/{id}
    pub async fn get_job(&self, id: JobId) -> Result<Job, ClientError> {
        let raw = self.transport.send(ApiRequest::get(format!("/jobs/{id}"))).await?;
        expect_payload(&raw)
    }

    /// POST /jobs. Validated locally first, so an invalid job never reaches the wire.
    pub async fn create_job(&self, fields: NewJob) -> Result<Job, ClientError> {
        let fields = fields.normalized();
        fields.validate()?;

        let body = serde_json::to_value(&fields)
            .map_err(|e| ClientError::InvalidInput(format!("could not encode job: {e}")))?;
        let raw = self
            .transport
            .send(ApiRequest::post_json("/jobs", body))
            .await?;
        let job: Job = expect_payload(&raw)?;

        info!("Created job {} ({})", job.id, job.title);
        Ok(job)
    }
}
