use std::collections::HashSet;

use super::config::ScoringScheme;
use super::FieldId;

/// Validate a scoring scheme at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scheme(scheme: &ScoringScheme) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Ceilings
    check_non_negative(&mut errors, "scoring.experience.weightage", scheme.experience.weightage);
    check_non_negative(&mut errors, "scoring.education.ceiling", scheme.education.ceiling);
    check_non_negative(&mut errors, "scoring.quantity.parent_marks", scheme.quantity.parent_marks);

    // Experience bands
    let mut seen = HashSet::new();
    for (i, band) in scheme.experience.bands.iter().enumerate() {
        let path = format!("scoring.experience.bands[{}]", i);
        check_unique(&mut errors, &path, &mut seen, band.id);
        check_non_negative(&mut errors, &format!("{}.weight_per_year", path), band.weight_per_year);
        check_non_negative(&mut errors, &format!("{}.cap", path), band.cap);
    }

    // Education fields
    let mut seen = HashSet::new();
    for (i, field) in scheme.education.fields.iter().enumerate() {
        let path = format!("scoring.education.fields[{}]", i);
        check_unique(&mut errors, &path, &mut seen, field.id);
        check_non_negative(&mut errors, &format!("{}.weight", path), field.weight);
        if !(field.max_marks.is_finite() && field.max_marks > 0.0) {
            errors.push(format!(
                "{}.max_marks: must be greater than zero, got {}",
                path, field.max_marks
            ));
        }
    }

    // Exclusive groups must name at least two known, distinct fields
    let mut grouped = HashSet::new();
    for (i, group) in scheme.education.exclusive.iter().enumerate() {
        let path = format!("scoring.education.exclusive[{}]", i);
        let distinct: HashSet<_> = group.iter().collect();
        if distinct.len() < 2 {
            errors.push(format!("{}: needs at least two distinct field ids", path));
        }
        for id in group {
            if scheme.education.field(*id).is_none() {
                errors.push(format!("{}: unknown education field {}", path, id));
            }
        }
        for id in distinct {
            if !grouped.insert(*id) {
                errors.push(format!("{}: field {} already belongs to another group", path, id));
            }
        }
    }

    // Quantity fields
    let mut seen = HashSet::new();
    for (i, field) in scheme.quantity.fields.iter().enumerate() {
        let path = format!("scoring.quantity.fields[{}]", i);
        check_unique(&mut errors, &path, &mut seen, field.id);
        check_non_negative(&mut errors, &format!("{}.unit_weight", path), field.unit_weight);
        check_non_negative(&mut errors, &format!("{}.unit_cap", path), field.unit_cap);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_non_negative(errors: &mut Vec<String>, path: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{}: must be a non-negative number, got {}", path, value));
    }
}

fn check_unique(errors: &mut Vec<String>, path: &str, seen: &mut HashSet<FieldId>, id: FieldId) {
    if !seen.insert(id) {
        errors.push(format!("{}.id: duplicate id {}", path, id));
    }
}
