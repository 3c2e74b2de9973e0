//! Dashboard aggregation: job/resume fetch, per-job ranking fan-out, summary fold.

pub mod aggregator;

pub use aggregator::{
    build_dashboard_summary, fetch_job_rankings, summarize, ActivityItem, ActivityKind,
    DashboardSummary, FanOut, JobRankings,
};
