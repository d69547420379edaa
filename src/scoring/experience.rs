use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ensure_non_negative, ValidationError};

/// Date formats accepted for experience intervals, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Number of days that make up one decimal year of experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearLength {
    /// Calendar year of 365 days
    #[default]
    Days365,
    /// Julian year of 365.25 days
    Julian,
}

impl YearLength {
    pub fn days(self) -> f64 {
        match self {
            YearLength::Days365 => 365.0,
            YearLength::Julian => 365.25,
        }
    }
}

/// Where interval caps are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalCap {
    /// Intervals are summed uncapped; only the total is clamped to the parent weightage
    #[default]
    Aggregate,
    /// Each interval is clamped to its own cap before summing
    PerInterval,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExperienceOptions {
    #[serde(default)]
    pub year_length: YearLength,
    #[serde(default)]
    pub interval_cap: IntervalCap,
}

/// One employment period with its per-year weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceInterval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weight_per_year: f64,
    pub cap_value: f64,
}

impl ExperienceInterval {
    /// Build an interval from user-entered date strings.
    ///
    /// `index` is the interval's position in the caller's list and is only
    /// used to label errors.
    pub fn parse(
        index: usize,
        start: &str,
        end: &str,
        weight_per_year: f64,
        cap_value: f64,
    ) -> Result<Self, ValidationError> {
        let parse = |label: &str, s: &str| {
            parse_date(s).map_err(|e| ValidationError::InvalidInterval {
                index,
                reason: format!("{} date '{}' is not a valid date ({})", label, s.trim(), e),
            })
        };

        Ok(Self {
            start_date: parse("start", start)?,
            end_date: parse("end", end)?,
            weight_per_year,
            cap_value,
        })
    }

    /// Whole calendar days between start and end.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Parse a calendar date in ISO (`2024-06-11`) or day-first
/// (`11-06-2024`, `11/06/2024`) form.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    DATE_FORMATS[1..]
        .iter()
        .fold(NaiveDate::parse_from_str(s, DATE_FORMATS[0]), |parsed, format| {
            parsed.or_else(|e| NaiveDate::parse_from_str(s, format).map_err(|_| e))
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalDetail {
    pub interval_index: usize,
    pub days: i64,
    pub decimal_years: f64,
    pub weighted_value: f64,
    /// Value that entered the total; differs from `weighted_value` only
    /// under [`IntervalCap::PerInterval`]
    pub counted_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceResult {
    pub intervals: Vec<IntervalDetail>,
    pub total_days: i64,
    pub total_decimal_years: f64,
    pub total_actual_value: f64,
    pub final_score: f64,
}

/// Total weighted experience, clamped to `parent_weightage`.
///
/// Each interval contributes `days / year_length * weight_per_year`.
/// Overlapping intervals are not detected and are counted independently.
pub fn calculate_total_experience(
    intervals: &[ExperienceInterval],
    parent_weightage: f64,
    options: &ExperienceOptions,
) -> Result<ExperienceResult, ValidationError> {
    let parent_weightage = ensure_non_negative("experience.weightage", parent_weightage)?;
    let year_days = options.year_length.days();

    let mut details = Vec::with_capacity(intervals.len());
    let mut total_days = 0i64;
    let mut total_decimal_years = 0.0;
    let mut total_actual_value = 0.0;

    for (index, interval) in intervals.iter().enumerate() {
        if interval.start_date > interval.end_date {
            return Err(ValidationError::InvalidInterval {
                index,
                reason: format!(
                    "start date {} is after end date {}",
                    interval.start_date, interval.end_date
                ),
            });
        }
        let weight = ensure_non_negative(
            &format!("experience[{}].weight_per_year", index),
            interval.weight_per_year,
        )?;
        let cap = ensure_non_negative(&format!("experience[{}].cap", index), interval.cap_value)?;

        let days = interval.days();
        let decimal_years = days as f64 / year_days;
        let weighted_value = decimal_years * weight;
        let counted_value = match options.interval_cap {
            IntervalCap::Aggregate => weighted_value,
            IntervalCap::PerInterval => weighted_value.min(cap),
        };

        debug!(
            index,
            start = %interval.start_date,
            end = %interval.end_date,
            days,
            decimal_years,
            weighted_value,
            counted_value,
            "experience interval"
        );

        total_days += days;
        total_decimal_years += decimal_years;
        total_actual_value += counted_value;
        details.push(IntervalDetail {
            interval_index: index,
            days,
            decimal_years,
            weighted_value,
            counted_value,
        });
    }

    let final_score = total_actual_value.min(parent_weightage);
    debug!(total_days, total_decimal_years, total_actual_value, final_score, "experience total");

    Ok(ExperienceResult {
        intervals: details,
        total_days,
        total_decimal_years,
        total_actual_value,
        final_score,
    })
}

/// [`calculate_total_experience`] with 365-day years and an aggregate cap.
pub fn calculate_total_experience_default(
    intervals: &[ExperienceInterval],
    parent_weightage: f64,
) -> Result<ExperienceResult, ValidationError> {
    calculate_total_experience(intervals, parent_weightage, &ExperienceOptions::default())
}
