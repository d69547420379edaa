use serde::{Deserialize, Serialize};

use crate::scoring::FieldId;

/// Raw values entered for one applicant, keyed by score field id.
///
/// Example YAML:
/// ```yaml
/// name: "A. Candidate"
/// experience:
///   - { band: 1, from: 2018-06-01, to: 2024-06-11 }
/// education:
///   - { field: 4, percentage: 86.1 }
/// achievements:
///   - { field: 3088, count: 1 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Applicant {
    pub name: String,

    #[serde(default)]
    pub experience: Vec<EmploymentPeriod>,

    #[serde(default)]
    pub education: Vec<ExamResult>,

    #[serde(default)]
    pub achievements: Vec<AchievementCount>,
}

/// Dates are kept as entered and parsed when the scorecard is built, so a
/// malformed date surfaces as an invalid interval rather than a parse error.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EmploymentPeriod {
    pub band: FieldId,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExamResult {
    pub field: FieldId,
    pub percentage: f64,
}

/// `count` is read as a number so fractional or negative entries can be
/// reported instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AchievementCount {
    pub field: FieldId,
    pub count: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_applicant_parse() {
        let yaml = r#"
name: "A. Candidate"
experience:
  - band: 1
    from: "2018-06-01"
    to: "2024-06-11"
education:
  - { field: 2, percentage: 97 }
  - { field: 3, percentage: 84.5 }
achievements:
  - { field: 3088, count: 1 }
"#;
        let applicant: Applicant = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(applicant.name, "A. Candidate");
        assert_eq!(applicant.experience[0].from, "2018-06-01");
        assert_eq!(applicant.education[0].percentage, 97.0);
        assert_eq!(applicant.education[1].percentage, 84.5);
        assert_eq!(applicant.achievements[0].count, 1.0);
    }

    #[test]
    fn test_name_only_applicant() {
        let applicant: Applicant = serde_saphyr::from_str("name: Solo\n").unwrap();
        assert!(applicant.experience.is_empty());
        assert!(applicant.education.is_empty());
        assert!(applicant.achievements.is_empty());
    }

    #[test]
    fn test_json_applicant_parse() {
        let json = r#"{"name":"J","achievements":[{"field":3092,"count":2}]}"#;
        let applicant: Applicant = serde_json::from_str(json).unwrap();
        assert_eq!(applicant.achievements[0].field, 3092);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_saphyr::from_str::<Applicant>("name: X\nscore: 99\n").is_err());
    }
}
