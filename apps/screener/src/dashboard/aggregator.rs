//! Dashboard aggregator: builds one `DashboardSummary` from current server state.
//!
//! Flow: (jobs ‖ resumes) → per-job ranking fan-out → fold → summary.
//!
//! Only the job/resume pair is fatal. Every per-job ranking fetch yields its
//! own `Result`; the fold skips failures, so the dashboard always renders a
//! best-effort summary. A job whose rankings failed looks exactly like a job
//! with no rankings in the summary; `fetch_job_rankings` keeps the difference
//! for callers that need it.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ClientError;
use crate::models::{Job, JobId, RankingResult, Resume};
use crate::ranking::{format_score, ScorePrecision};
use crate::repositories::{RankingRepository, ScreenerApi};
use crate::view::cards::format_date;

/// Jobs and resumes each contribute at most this many activity items.
pub const RECENT_ACTIVITY_PER_KIND: usize = 3;

/// How the per-job ranking requests are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    /// One request at a time, in listing order.
    #[default]
    Sequential,
    /// All requests in flight together; results still reported in listing order.
    Concurrent,
}

impl std::str::FromStr for FanOut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(FanOut::Sequential),
            "concurrent" | "parallel" => Ok(FanOut::Concurrent),
            other => Err(format!(
                "unknown fan-out mode '{other}' (expected 'sequential' or 'concurrent')"
            )),
        }
    }
}

/// Outcome of one job's ranking fetch. Failure is data here, not control flow.
#[derive(Debug)]
pub struct JobRankings {
    pub job_id: JobId,
    pub result: Result<Vec<RankingResult>, ClientError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Job,
    Resume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
}

/// Derived, never persisted. Recomputed from scratch on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_jobs: usize,
    pub total_resumes: usize,
    pub average_final_score: f64,
    pub peak_ranking_count: usize,
    pub recent_activity: Vec<ActivityItem>,
}

impl DashboardSummary {
    /// The average as shown on the dashboard tile: whole percentage points,
    /// rounded like every other displayed score.
    pub fn average_display(&self) -> String {
        format_score(self.average_final_score, ScorePrecision::Whole)
    }
}

/// Fetches everything and reduces it into a summary.
///
/// Fails only when the job list or the resume list cannot be fetched.
pub async fn build_dashboard_summary(
    api: &ScreenerApi,
    fan_out: FanOut,
) -> Result<DashboardSummary, ClientError> {
    // Jobs and resumes together; either failure aborts.
    let (jobs, resumes) = tokio::try_join!(api.jobs.list_jobs(), api.resumes.list_resumes())?;
    info!(
        "Dashboard: {} jobs, {} resumes",
        jobs.len(),
        resumes.len()
    );

    // Per-job rankings, each with its own outcome.
    let outcomes = fetch_job_rankings(&api.rankings, &jobs, fan_out).await;

    Ok(summarize(&jobs, &resumes, &outcomes))
}

/// Issues one ranking request per job and reports each outcome in listing order.
pub async fn fetch_job_rankings(
    rankings: &RankingRepository,
    jobs: &[Job],
    fan_out: FanOut,
) -> Vec<JobRankings> {
    match fan_out {
        FanOut::Sequential => {
            let mut outcomes = Vec::with_capacity(jobs.len());
            for job in jobs {
                outcomes.push(JobRankings {
                    job_id: job.id,
                    result: rankings.list_rankings(job.id).await,
                });
            }
            outcomes
        }
        FanOut::Concurrent => {
            join_all(jobs.iter().map(|job| async move {
                JobRankings {
                    job_id: job.id,
                    result: rankings.list_rankings(job.id).await,
                }
            }))
            .await
        }
    }
}

/// Pure fold over already-fetched collections. Failed ranking fetches are
/// logged and contribute nothing.
pub fn summarize(jobs: &[Job], resumes: &[Resume], outcomes: &[JobRankings]) -> DashboardSummary {
    let mut total_score = 0.0_f64;
    let mut count = 0_usize;
    let mut peak_ranking_count = 0_usize;

    for outcome in outcomes {
        match &outcome.result {
            Ok(rankings) => {
                for ranking in rankings {
                    total_score += ranking.final_score;
                    count += 1;
                }
                peak_ranking_count = peak_ranking_count.max(rankings.len());
            }
            Err(e) => {
                warn!(
                    "Rankings for job {} unavailable ({}), counting as none: {}",
                    outcome.job_id,
                    e.kind(),
                    e
                );
            }
        }
    }

    let average_final_score = if count > 0 {
        total_score / count as f64
    } else {
        0.0
    };
    debug!(
        "Folded {} rankings: average={:.2}, peak={}",
        count, average_final_score, peak_ranking_count
    );

    DashboardSummary {
        total_jobs: jobs.len(),
        total_resumes: resumes.len(),
        average_final_score,
        peak_ranking_count,
        recent_activity: recent_activity(jobs, resumes),
    }
}

/// First few jobs, then first few resumes, in listing order (the server
/// already lists newest first).
pub fn recent_activity(jobs: &[Job], resumes: &[Resume]) -> Vec<ActivityItem> {
    let job_items = jobs.iter().take(RECENT_ACTIVITY_PER_KIND).map(|job| ActivityItem {
        kind: ActivityKind::Job,
        title: job.title.clone(),
        description: format!("New opening created • {}", format_date(job.created_at)),
    });
    let resume_items = resumes
        .iter()
        .take(RECENT_ACTIVITY_PER_KIND)
        .map(|resume| ActivityItem {
            kind: ActivityKind::Resume,
            title: resume.display_name().to_string(),
            description: format!(
                "Resume parsed and indexed • {}",
                format_date(resume.uploaded_at)
            ),
        });

    job_items.chain(resume_items).collect()
}
