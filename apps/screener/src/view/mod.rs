//! Display-ready view models and the controller that keeps them current.

pub mod cards;
pub mod refresh;

pub use cards::{format_date, JobCard, JobOption, ResumeCard};
pub use refresh::{
    LoadState, Notification, NotificationLevel, RankingsView, RefreshController, RefreshOutcome,
    RenderedView, Section, ViewSlot,
};
