pub mod config;
pub mod education;
pub mod error;
pub mod experience;
pub mod quantity;
pub mod scorecard;
pub mod validation;

/// Identifier of a score field within its section of the scheme.
pub type FieldId = u32;

pub use config::*;
pub use education::{calculate_education_score, EducationDetail, EducationEntry, EducationResult};
pub use error::ValidationError;
pub use experience::{
    calculate_total_experience, calculate_total_experience_default, parse_date,
    ExperienceInterval, ExperienceOptions, ExperienceResult, IntervalCap, IntervalDetail,
    YearLength,
};
pub use quantity::{
    calculate_quantity_based_score, quantity_from_f64, QuantityDetail, QuantityEntry,
    QuantityResult,
};
pub use scorecard::{build_scorecard, rank_scorecards, Period, Scorecard};
pub use validation::validate_scheme;
