pub mod job;
pub mod lenient;
pub mod ranking;
pub mod resume;
pub mod skills;

pub use job::{Job, JobId, NewJob};
pub use ranking::{MatchedSkills, RankingResult};
pub use resume::{Resume, ResumeId, ResumeUpload};
pub use skills::{parse_skills, render_skills};
