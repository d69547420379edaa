use serde::{Deserialize, Serialize};

use super::experience::{ExperienceOptions, IntervalCap, YearLength};
use super::FieldId;

/// Scoring scheme: which score fields exist and how many marks each is worth.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   experience:
///     weightage: 4
///     year_length: days365
///     bands:
///       - { id: 1, name: "Teaching experience", weight_per_year: 1, cap: 3 }
///   education:
///     ceiling: 60
///     fields:
///       - { id: 3079, name: "Ph.D.", weight: 1.5, max_marks: 15 }
///       - { id: 3080, name: "NET / SLET", weight: 1.5, max_marks: 15 }
///     exclusive:
///       - [3079, 3080]
///   quantity:
///     parent_marks: 8
///     fields:
///       - { id: 3088, name: "Research publications", unit_weight: 2, unit_cap: 6 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringScheme {
    #[serde(default)]
    pub experience: ExperienceScheme,

    #[serde(default)]
    pub education: EducationScheme,

    #[serde(default)]
    pub quantity: QuantityScheme,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExperienceScheme {
    /// Most marks experience can add in total
    pub weightage: f64,

    #[serde(default)]
    pub year_length: YearLength,

    #[serde(default)]
    pub interval_cap: IntervalCap,

    #[serde(default)]
    pub bands: Vec<ExperienceBand>,
}

impl ExperienceScheme {
    pub fn options(&self) -> ExperienceOptions {
        ExperienceOptions {
            year_length: self.year_length,
            interval_cap: self.interval_cap,
        }
    }

    pub fn band(&self, id: FieldId) -> Option<&ExperienceBand> {
        self.bands.iter().find(|b| b.id == id)
    }
}

impl Default for ExperienceScheme {
    fn default() -> Self {
        Self {
            weightage: 4.0,
            year_length: YearLength::Days365,
            interval_cap: IntervalCap::Aggregate,
            bands: vec![
                ExperienceBand {
                    id: 1,
                    name: "Teaching experience".to_string(),
                    weight_per_year: 1.0,
                    cap: 3.0,
                },
                ExperienceBand {
                    id: 2,
                    name: "Research / industry experience".to_string(),
                    weight_per_year: 1.0,
                    cap: 4.0,
                },
            ],
        }
    }
}

/// Kind of employment with its marks per year of service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExperienceBand {
    pub id: FieldId,
    pub name: String,
    pub weight_per_year: f64,
    pub cap: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EducationScheme {
    /// Most marks education can add in total
    pub ceiling: f64,

    #[serde(default)]
    pub fields: Vec<EducationField>,

    /// Groups of field ids of which only the best scoring one counts
    #[serde(default)]
    pub exclusive: Vec<Vec<FieldId>>,
}

impl EducationScheme {
    pub fn field(&self, id: FieldId) -> Option<&EducationField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl Default for EducationScheme {
    fn default() -> Self {
        let field = |id, name: &str, weight, max_marks| EducationField {
            id,
            name: name.to_string(),
            weight,
            max_marks,
        };
        Self {
            ceiling: 60.0,
            fields: vec![
                field(2, "Class X", 0.5, 5.0),
                field(3, "Class XII", 1.5, 15.0),
                field(4, "Graduation", 1.5, 15.0),
                field(6, "Post-graduation", 1.5, 15.0),
                field(3079, "Ph.D.", 1.5, 15.0),
                field(3080, "NET / SLET", 1.5, 15.0),
            ],
            exclusive: vec![vec![3079, 3080]],
        }
    }
}

/// Examination level scored by percentage.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EducationField {
    pub id: FieldId,
    pub name: String,
    pub weight: f64,
    /// Marks awarded at 100%
    pub max_marks: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuantityScheme {
    /// Most marks achievements can add in total
    pub parent_marks: f64,

    #[serde(default)]
    pub fields: Vec<QuantityField>,
}

impl QuantityScheme {
    pub fn field(&self, id: FieldId) -> Option<&QuantityField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl Default for QuantityScheme {
    fn default() -> Self {
        Self {
            parent_marks: 8.0,
            fields: vec![
                QuantityField {
                    id: 3088,
                    name: "Research publications".to_string(),
                    unit_weight: 2.0,
                    unit_cap: 6.0,
                },
                QuantityField {
                    id: 3092,
                    name: "Awards and patents".to_string(),
                    unit_weight: 2.0,
                    unit_cap: 2.0,
                },
            ],
        }
    }
}

/// Countable achievement with marks per unit.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuantityField {
    pub id: FieldId,
    pub name: String,
    pub unit_weight: f64,
    pub unit_cap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let scheme = ScoringScheme::default();

        assert_eq!(scheme.experience.weightage, 4.0);
        assert_eq!(scheme.experience.bands.len(), 2);
        assert_eq!(scheme.education.ceiling, 60.0);
        assert_eq!(scheme.education.exclusive, vec![vec![3079, 3080]]);
        assert_eq!(scheme.quantity.parent_marks, 8.0);
        assert_eq!(scheme.quantity.field(3092).unwrap().unit_cap, 2.0);
    }

    #[test]
    fn test_scheme_serde_roundtrip() {
        let scheme = ScoringScheme::default();
        let yaml = serde_saphyr::to_string(&scheme).unwrap();
        let parsed: ScoringScheme = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(scheme, parsed);
    }

    #[test]
    fn test_partial_scheme_parse() {
        let yaml = r#"
education:
  ceiling: 40
  fields:
    - { id: 4, name: "Graduation", weight: 1, max_marks: 20 }
"#;
        let scheme: ScoringScheme = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(scheme.education.ceiling, 40.0);
        assert_eq!(scheme.education.fields.len(), 1);
        assert!(scheme.education.exclusive.is_empty());
        // Sections left out fall back to the defaults
        assert_eq!(scheme.experience, ExperienceScheme::default());
        assert_eq!(scheme.quantity, QuantityScheme::default());
    }

    #[test]
    fn test_experience_options_from_scheme() {
        let yaml = r#"
experience:
  weightage: 5
  year_length: julian
  interval_cap: per_interval
"#;
        let scheme: ScoringScheme = serde_saphyr::from_str(yaml).unwrap();
        let options = scheme.experience.options();
        assert_eq!(options.year_length, YearLength::Julian);
        assert_eq!(options.interval_cap, IntervalCap::PerInterval);
        assert!(scheme.experience.bands.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = "education:\n  ceiling: 60\n  bonus: 5\n";
        assert!(serde_saphyr::from_str::<ScoringScheme>(yaml).is_err());
    }

    #[test]
    fn test_unknown_year_length_rejected() {
        let yaml = "experience:\n  weightage: 4\n  year_length: lunar\n";
        assert!(serde_saphyr::from_str::<ScoringScheme>(yaml).is_err());
    }

    #[test]
    fn test_field_lookup() {
        let scheme = ScoringScheme::default();
        assert_eq!(scheme.education.field(3079).unwrap().name, "Ph.D.");
        assert!(scheme.education.field(9999).is_none());
        assert_eq!(scheme.experience.band(2).unwrap().cap, 4.0);
    }
}
