use serde::Serialize;
use tracing::debug;

use super::error::{ensure_finite, ensure_non_negative, ValidationError};
use super::FieldId;

/// One examination result mapped onto an education score field.
///
/// `obtained_value` is already a percentage (0 to 100). `max_value` is the
/// marks the field is worth at 100%. A `weight` of zero marks the field as
/// not applicable, which is how one of two mutually exclusive fields
/// (Ph.D. vs. NET) is switched off.
#[derive(Debug, Clone, PartialEq)]
pub struct EducationEntry {
    pub field_id: FieldId,
    pub weight: f64,
    pub obtained_value: f64,
    pub max_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationDetail {
    pub field_id: FieldId,
    /// `obtained_value / 100`
    pub percentage: f64,
    pub weighted_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationResult {
    pub fields: Vec<EducationDetail>,
    pub total_actual_value: f64,
    pub final_score: f64,
}

impl EducationEntry {
    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let path = |name: &str| format!("education[{}].{}", index, name);

        ensure_non_negative(&path("weight"), self.weight)?;

        let obtained = ensure_non_negative(&path("obtained_value"), self.obtained_value)?;
        if obtained > 100.0 {
            return Err(ValidationError::OutOfRange {
                field: path("obtained_value"),
                value: obtained,
                reason: "percentage cannot exceed 100".to_string(),
            });
        }

        let max = ensure_finite(&path("max_value"), self.max_value)?;
        if max <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: path("max_value"),
                value: max,
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Marks this entry adds to the education total.
    pub fn contribution(&self) -> f64 {
        if self.weight == 0.0 {
            0.0
        } else {
            self.obtained_value / 100.0 * self.max_value
        }
    }
}

/// Percentage-weighted education score, clamped to `overall_ceiling`.
///
/// Details keep input order.
pub fn calculate_education_score(
    entries: &[EducationEntry],
    overall_ceiling: f64,
) -> Result<EducationResult, ValidationError> {
    let overall_ceiling = ensure_non_negative("education.ceiling", overall_ceiling)?;
    for (index, entry) in entries.iter().enumerate() {
        entry.validate(index)?;
    }

    let mut total_actual_value = 0.0;
    let fields: Vec<EducationDetail> = entries
        .iter()
        .map(|entry| {
            let percentage = entry.obtained_value / 100.0;
            let weighted_value = entry.contribution();
            debug!(
                field_id = entry.field_id,
                weight = entry.weight,
                percentage,
                weighted_value,
                "education field"
            );
            total_actual_value += weighted_value;
            EducationDetail {
                field_id: entry.field_id,
                percentage,
                weighted_value,
            }
        })
        .collect();

    let final_score = total_actual_value.min(overall_ceiling);
    debug!(total_actual_value, final_score, "education total");

    Ok(EducationResult {
        fields,
        total_actual_value,
        final_score,
    })
}
