use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::config::ScoringScheme;
use super::education::{calculate_education_score, EducationEntry, EducationResult};
use super::error::ValidationError;
use super::experience::{calculate_total_experience, ExperienceInterval, ExperienceResult};
use super::quantity::{
    calculate_quantity_based_score, quantity_from_f64, QuantityEntry, QuantityResult,
};
use super::FieldId;
use crate::applicant::Applicant;

/// Employment period as scored, parallel to `experience.intervals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub band: FieldId,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// All three scores for one applicant plus their sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub name: String,
    pub periods: Vec<Period>,
    pub experience: ExperienceResult,
    pub education: EducationResult,
    pub quantity: QuantityResult,
    pub total: f64,
}

/// Score one applicant against a scheme.
pub fn build_scorecard(
    scheme: &ScoringScheme,
    applicant: &Applicant,
) -> Result<Scorecard, ValidationError> {
    let (periods, intervals) = experience_intervals(scheme, applicant)?;
    let experience = calculate_total_experience(
        &intervals,
        scheme.experience.weightage,
        &scheme.experience.options(),
    )?;

    let entries = education_entries(scheme, applicant)?;
    let education = calculate_education_score(&entries, scheme.education.ceiling)?;

    let entries = quantity_entries(scheme, applicant)?;
    let quantity = calculate_quantity_based_score(&entries, scheme.quantity.parent_marks)?;

    let total = experience.final_score + education.final_score + quantity.final_score;
    info!(
        applicant = %applicant.name,
        experience = experience.final_score,
        education = education.final_score,
        quantity = quantity.final_score,
        total,
        "scorecard built"
    );

    Ok(Scorecard {
        name: applicant.name.clone(),
        periods,
        experience,
        education,
        quantity,
        total,
    })
}

/// Order scorecards for admission: highest total first, ties by name.
pub fn rank_scorecards(mut cards: Vec<Scorecard>) -> Vec<Scorecard> {
    cards.sort_by(|a, b| {
        let total_cmp = b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal);
        if total_cmp != Ordering::Equal {
            return total_cmp;
        }
        a.name.cmp(&b.name)
    });
    cards
}

fn experience_intervals(
    scheme: &ScoringScheme,
    applicant: &Applicant,
) -> Result<(Vec<Period>, Vec<ExperienceInterval>), ValidationError> {
    let mut periods = Vec::with_capacity(applicant.experience.len());
    let mut intervals = Vec::with_capacity(applicant.experience.len());

    for (index, period) in applicant.experience.iter().enumerate() {
        let band = scheme
            .experience
            .band(period.band)
            .ok_or_else(|| ValidationError::UnknownField {
                section: "experience".to_string(),
                field_id: period.band,
            })?;
        let interval = ExperienceInterval::parse(
            index,
            &period.from,
            &period.to,
            band.weight_per_year,
            band.cap,
        )?;
        periods.push(Period {
            band: band.id,
            from: interval.start_date,
            to: interval.end_date,
        });
        intervals.push(interval);
    }
    Ok((periods, intervals))
}

/// One entry per scheme field, in scheme order. Fields the applicant left
/// out, and all but the best field of each exclusive group, get weight zero.
fn education_entries(
    scheme: &ScoringScheme,
    applicant: &Applicant,
) -> Result<Vec<EducationEntry>, ValidationError> {
    let mut obtained: HashMap<FieldId, f64> = HashMap::new();
    for result in &applicant.education {
        if scheme.education.field(result.field).is_none() {
            return Err(ValidationError::UnknownField {
                section: "education".to_string(),
                field_id: result.field,
            });
        }
        if obtained.insert(result.field, result.percentage).is_some() {
            return Err(ValidationError::DuplicateField {
                section: "education".to_string(),
                field_id: result.field,
            });
        }
    }

    let mut entries: Vec<EducationEntry> = scheme
        .education
        .fields
        .iter()
        .map(|field| match obtained.get(&field.id) {
            Some(&percentage) => EducationEntry {
                field_id: field.id,
                weight: field.weight,
                obtained_value: percentage,
                max_value: field.max_marks,
            },
            None => EducationEntry {
                field_id: field.id,
                weight: 0.0,
                obtained_value: 0.0,
                max_value: field.max_marks,
            },
        })
        .collect();

    for group in &scheme.education.exclusive {
        let members: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| group.contains(&e.field_id))
            .map(|(i, _)| i)
            .collect();

        // Earlier field wins ties
        let mut best: Option<usize> = None;
        for &i in &members {
            match best {
                Some(b) if entries[i].contribution() <= entries[b].contribution() => {}
                _ => best = Some(i),
            }
        }

        for &i in &members {
            if Some(i) != best && entries[i].weight != 0.0 {
                debug!(
                    field_id = entries[i].field_id,
                    "excluded by a better scoring alternative"
                );
                entries[i].weight = 0.0;
            }
        }
    }

    Ok(entries)
}

fn quantity_entries(
    scheme: &ScoringScheme,
    applicant: &Applicant,
) -> Result<Vec<QuantityEntry>, ValidationError> {
    let mut counts: HashMap<FieldId, u32> = HashMap::new();
    for achievement in &applicant.achievements {
        if scheme.quantity.field(achievement.field).is_none() {
            return Err(ValidationError::UnknownField {
                section: "achievements".to_string(),
                field_id: achievement.field,
            });
        }
        let count = quantity_from_f64(achievement.field, achievement.count)?;
        if counts.insert(achievement.field, count).is_some() {
            return Err(ValidationError::DuplicateField {
                section: "achievements".to_string(),
                field_id: achievement.field,
            });
        }
    }

    Ok(scheme
        .quantity
        .fields
        .iter()
        .map(|field| QuantityEntry {
            field_id: field.id,
            quantity: counts.get(&field.id).copied().unwrap_or(0),
            unit_weight: field.unit_weight,
            unit_cap: field.unit_cap,
        })
        .collect())
}
