//! Entity repositories: thin accessors over the REST surface.
//!
//! Each call is a fresh request: no retries, no caching. Errors from the
//! transport and the envelope decoder propagate unchanged.

pub mod jobs;
pub mod rankings;
pub mod resumes;

use std::sync::Arc;

pub use jobs::JobRepository;
pub use rankings::RankingRepository;
pub use resumes::ResumeRepository;

use crate::api_client::Transport;

/// The three repositories over one shared transport.
#[derive(Clone)]
pub struct ScreenerApi {
    pub jobs: JobRepository,
    pub resumes: ResumeRepository,
    pub rankings: RankingRepository,
}

impl ScreenerApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            jobs: JobRepository::new(transport.clone()),
            resumes: ResumeRepository::new(transport.clone()),
            rankings: RankingRepository::new(transport),
        }
    }
}
