pub mod presenter;

pub use presenter::{
    format_score, matched_skills_text, present_rankings, rank_order, BadgeTier, RankedCandidate,
    ScorePrecision,
};
