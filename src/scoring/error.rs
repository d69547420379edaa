use thiserror::Error;

use super::FieldId;

/// Rejection of a scorer call. Any of these aborts the whole calculation;
/// scorers never return partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid experience interval #{index}: {reason}")]
    InvalidInterval { index: usize, reason: String },

    #[error("field {field_id}: quantity {value} is negative")]
    NegativeQuantity { field_id: FieldId, value: f64 },

    #[error("field {field_id}: quantity {value} is not a whole number")]
    FractionalQuantity { field_id: FieldId, value: f64 },

    #[error("{field}: expected a finite number, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("{field}: {value} is out of range ({reason})")]
    OutOfRange {
        field: String,
        value: f64,
        reason: String,
    },

    #[error("unknown score field {field_id} in {section}")]
    UnknownField { section: String, field_id: FieldId },

    #[error("score field {field_id} given more than once in {section}")]
    DuplicateField { section: String, field_id: FieldId },
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Reject non-finite and negative values.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            reason: "must be non-negative".to_string(),
        });
    }
    Ok(value)
}
