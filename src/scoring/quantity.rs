use serde::Serialize;
use tracing::debug;

use super::error::{ensure_non_negative, ValidationError};
use super::FieldId;

/// Count of achievements (papers, patents, awards) for one score field.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityEntry {
    pub field_id: FieldId,
    pub quantity: u32,
    /// Marks per unit
    pub unit_weight: f64,
    /// Most marks this field can add
    pub unit_cap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityDetail {
    pub field_id: FieldId,
    pub raw_value: f64,
    pub capped_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityResult {
    pub fields: Vec<QuantityDetail>,
    pub total_actual_value: f64,
    pub final_score: f64,
}

/// Convert a user-entered count into a quantity.
pub fn quantity_from_f64(field_id: FieldId, value: f64) -> Result<u32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            field: format!("field {} quantity", field_id),
            value,
        });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeQuantity { field_id, value });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalQuantity { field_id, value });
    }
    if value > u32::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field: format!("field {} quantity", field_id),
            value,
            reason: "too large".to_string(),
        });
    }
    Ok(value as u32)
}

/// Capped cumulative score over counted achievements, clamped to `parent_marks`.
pub fn calculate_quantity_based_score(
    entries: &[QuantityEntry],
    parent_marks: f64,
) -> Result<QuantityResult, ValidationError> {
    let parent_marks = ensure_non_negative("quantity.parent_marks", parent_marks)?;
    for (index, entry) in entries.iter().enumerate() {
        ensure_non_negative(&format!("quantity[{}].unit_weight", index), entry.unit_weight)?;
        ensure_non_negative(&format!("quantity[{}].unit_cap", index), entry.unit_cap)?;
    }

    let mut total_actual_value = 0.0;
    let fields: Vec<QuantityDetail> = entries
        .iter()
        .map(|entry| {
            let raw_value = entry.quantity as f64 * entry.unit_weight;
            let capped_value = raw_value.min(entry.unit_cap);
            debug!(
                field_id = entry.field_id,
                quantity = entry.quantity,
                raw_value,
                capped_value,
                "quantity field"
            );
            total_actual_value += capped_value;
            QuantityDetail {
                field_id: entry.field_id,
                raw_value,
                capped_value,
            }
        })
        .collect();

    let final_score = total_actual_value.min(parent_marks);
    debug!(total_actual_value, final_score, "quantity total");

    Ok(QuantityResult {
        fields,
        total_actual_value,
        final_score,
    })
}
