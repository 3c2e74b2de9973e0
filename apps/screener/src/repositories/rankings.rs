use std::sync::Arc;

use crate::api_client::{decode_list, ApiRequest, Transport};
use crate::errors::ClientError;
use crate::models::{JobId, RankingResult};

#[derive(Clone)]
pub struct RankingRepository {
    transport: Arc<dyn Transport>,
}

impl RankingRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET /ranking/{jobId}. Scores are computed server-side.
    pub async fn list_rankings(&self, job_id: JobId) -> Result<Vec<RankingResult>, ClientError> {
        let raw = self
            .transport
            .send(ApiRequest::get(format!("/ranking/{job_id}")))
            .await?;
        decode_list(&raw)
    }
}
