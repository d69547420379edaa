pub mod storage;
pub mod types;

pub use storage::{load_applicant, save_scorecard};
pub use types::{AchievementCount, Applicant, EmploymentPeriod, ExamResult};
