//! View refresh controller: re-entrant refresh orchestration per UI section.
//!
//! Every slot carries a refresh generation. `begin` bumps it; a finished load
//! is applied only if its generation is still the latest ("last requested
//! wins"). Overlapping refreshes are never de-duplicated or cancelled; stale
//! results are simply dropped. The state lock is never held across `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::dashboard::{build_dashboard_summary, DashboardSummary, FanOut};
use crate::errors::ClientError;
use crate::models::{Job, JobId, NewJob, Resume, ResumeId, ResumeUpload};
use crate::ranking::{present_rankings, RankedCandidate};
use crate::repositories::ScreenerApi;
use crate::view::cards::{JobCard, JobOption, ResumeCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Jobs,
    Resumes,
    Rankings,
}

impl Section {
    /// The slot a plain section refresh renders into. The rankings section
    /// refresh only reloads the job selector; the list itself is `show_rankings`.
    pub fn slot(self) -> ViewSlot {
        match self {
            Section::Dashboard => ViewSlot::Dashboard,
            Section::Jobs => ViewSlot::Jobs,
            Section::Resumes => ViewSlot::Resumes,
            Section::Rankings => ViewSlot::JobSelector,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSlot {
    Dashboard,
    Jobs,
    Resumes,
    JobSelector,
    RankingList,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "candidates", rename_all = "snake_case")]
pub enum RankingsView {
    NoJobSelected,
    NoMatches,
    Ranked(Vec<RankedCandidate>),
}

/// What a section currently shows. Empty card lists are the empty states.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum RenderedView {
    Dashboard(DashboardSummary),
    Jobs(Vec<JobCard>),
    Resumes(Vec<ResumeCard>),
    JobSelector(Vec<JobOption>),
    Rankings(RankingsView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user (the toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The result became the rendered view.
    Applied,
    /// A newer refresh was requested meanwhile; this result was dropped.
    Discarded,
    /// The load failed; the previous view is untouched.
    Failed,
}

#[derive(Debug, Default)]
struct SlotState {
    latest_generation: u64,
    status: LoadState,
    view: Option<RenderedView>,
}

pub struct RefreshController {
    api: ScreenerApi,
    fan_out: FanOut,
    slots: Mutex<HashMap<ViewSlot, SlotState>>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl RefreshController {
    pub fn new(api: ScreenerApi, fan_out: FanOut) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            api,
            fan_out,
            slots: Mutex::new(HashMap::new()),
            notifications: tx,
        };
        (controller, rx)
    }

    pub async fn refresh(&self, section: Section) -> RefreshOutcome {
        let slot = section.slot();
        let generation = self.begin(slot);
        let result = self.load(section).await;
        self.settle(slot, generation, result)
    }

    /// Loads and presents one job's ranking list; `None` renders the
    /// "no job selected" state without a request.
    pub async fn show_rankings(&self, job_id: Option<JobId>) -> RefreshOutcome {
        let generation = self.begin(ViewSlot::RankingList);
        let result = match job_id {
            None => Ok(RenderedView::Rankings(RankingsView::NoJobSelected)),
            Some(id) => self.api.rankings.list_rankings(id).await.map(|rankings| {
                if rankings.is_empty() {
                    RenderedView::Rankings(RankingsView::NoMatches)
                } else {
                    RenderedView::Rankings(RankingsView::Ranked(present_rankings(&rankings)))
                }
            }),
        };
        self.settle(ViewSlot::RankingList, generation, result)
    }

    pub async fn create_job(&self, fields: NewJob) -> Result<Job, ClientError> {
        let job = self.mutation(self.api.jobs.create_job(fields)).await?;
        self.notify(NotificationLevel::Success, "Role created successfully");
        self.refresh(Section::Jobs).await;
        Ok(job)
    }

    pub async fn upload_resume(&self, upload: ResumeUpload) -> Result<Resume, ClientError> {
        let resume = self.mutation(self.api.resumes.upload_resume(upload)).await?;
        self.notify(NotificationLevel::Success, "Profile indexed successfully");
        self.refresh(Section::Resumes).await;
        Ok(resume)
    }

    pub async fn parse_resume(&self, id: ResumeId) -> Result<Resume, ClientError> {
        let resume = self.mutation(self.api.resumes.parse_resume(id)).await?;
        self.notify(NotificationLevel::Success, "Profile parsed successfully");
        self.refresh(Section::Resumes).await;
        Ok(resume)
    }

    pub fn view(&self, slot: ViewSlot) -> Option<RenderedView> {
        self.lock().get(&slot).and_then(|s| s.view.clone())
    }

    pub fn status(&self, slot: ViewSlot) -> LoadState {
        self.lock().get(&slot).map(|s| s.status).unwrap_or_default()
    }

    pub fn generation(&self, slot: ViewSlot) -> u64 {
        self.lock().get(&slot).map(|s| s.latest_generation).unwrap_or(0)
    }

    async fn load(&self, section: Section) -> Result<RenderedView, ClientError> {
        match section {
            Section::Dashboard => build_dashboard_summary(&self.api, self.fan_out)
                .await
                .map(RenderedView::Dashboard),
            Section::Jobs => {
                let jobs = self.api.jobs.list_jobs().await?;
                Ok(RenderedView::Jobs(jobs.iter().map(JobCard::from).collect()))
            }
            Section::Resumes => {
                let resumes = self.api.resumes.list_resumes().await?;
                Ok(RenderedView::Resumes(
                    resumes.iter().map(ResumeCard::from).collect(),
                ))
            }
            Section::Rankings => {
                let jobs = self.api.jobs.list_jobs().await?;
                Ok(RenderedView::JobSelector(
                    jobs.iter().map(JobOption::from).collect(),
                ))
            }
        }
    }

    fn begin(&self, slot: ViewSlot) -> u64 {
        let mut slots = self.lock();
        let state = slots.entry(slot).or_default();
        state.latest_generation += 1;
        state.status = LoadState::Loading;
        debug!("{:?} refresh #{} started", slot, state.latest_generation);
        state.latest_generation
    }

    fn settle(
        &self,
        slot: ViewSlot,
        generation: u64,
        result: Result<RenderedView, ClientError>,
    ) -> RefreshOutcome {
        let mut slots = self.lock();
        let state = slots.entry(slot).or_default();

        if generation != state.latest_generation {
            debug!(
                "{:?} refresh #{} superseded by #{}, dropping result",
                slot, generation, state.latest_generation
            );
            return RefreshOutcome::Discarded;
        }
        state.status = LoadState::Idle;

        match result {
            Ok(view) => {
                state.view = Some(view);
                info!("{:?} refresh #{} applied", slot, generation);
                RefreshOutcome::Applied
            }
            Err(e) => {
                drop(slots);
                error!("{:?} refresh #{} failed: {}", slot, generation, e);
                self.notify(NotificationLevel::Error, e.user_message());
                RefreshOutcome::Failed
            }
        }
    }

    /// Runs a user-triggered mutation, surfacing failures as a notification.
    async fn mutation<T, F>(&self, operation: F) -> Result<T, ClientError>
    where
        F: std::future::Future<Output = Result<T, ClientError>>,
    {
        operation.await.map_err(|e| {
            error!("Mutation failed: {e}");
            self.notify(NotificationLevel::Error, e.user_message());
            e
        })
    }

    fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            level,
            message: message.into(),
        };
        if self.notifications.send(notification).is_err() {
            debug!("Notification dropped: no listener");
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ViewSlot, SlotState>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
