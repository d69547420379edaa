use admit_score::applicant::{load_applicant, save_scorecard};
use admit_score::config::{load_config, write_default_config};
use admit_score::scoring::{
    build_scorecard, calculate_education_score, calculate_quantity_based_score,
    calculate_total_experience_default, rank_scorecards, validate_scheme, EducationEntry,
    ExperienceInterval, QuantityEntry, ScoringScheme, ValidationError,
};
use std::fs;
use tempfile::TempDir;

const STRONG: &str = r#"
name: "R. Strong"
experience:
  - { band: 1, from: "2018-06-01", to: "2024-06-11" }
  - { band: 2, from: "12-06-2024", to: "22/07/2025" }
education:
  - { field: 2, percentage: 97 }
  - { field: 3, percentage: 84.5 }
  - { field: 4, percentage: 86.1 }
  - { field: 6, percentage: 77 }
  - { field: 3079, percentage: 70 }
  - { field: 3080, percentage: 65 }
achievements:
  - { field: 3088, count: 4 }
  - { field: 3092, count: 1 }
"#;

const FRESH: &str = r#"
name: "F. Graduate"
education:
  - { field: 2, percentage: 91 }
  - { field: 3, percentage: 88 }
  - { field: 4, percentage: 79 }
"#;

#[test]
fn test_end_to_end_scheme_applicants_and_ranking() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    write_default_config(&config_path, false).unwrap();

    let config = load_config(Some(config_path)).unwrap();
    let scheme = config.effective_scheme();
    assert!(validate_scheme(&scheme).is_ok());

    let strong_path = temp_dir.path().join("strong.yaml");
    let fresh_path = temp_dir.path().join("fresh.yml");
    fs::write(&strong_path, STRONG).unwrap();
    fs::write(&fresh_path, FRESH).unwrap();

    let strong = build_scorecard(&scheme, &load_applicant(&strong_path).unwrap()).unwrap();
    let fresh = build_scorecard(&scheme, &load_applicant(&fresh_path).unwrap()).unwrap();

    // Experience exceeds its weightage
    assert_eq!(strong.experience.final_score, 4.0);
    assert_eq!(strong.experience.total_days, 2607);

    // Ph.D. (70% of 15 = 10.5) beats NET (65% of 15), so NET is dropped
    let education_total = 4.85 + 12.675 + 12.915 + 11.55 + 10.5;
    assert!((strong.education.total_actual_value - education_total).abs() < 1e-9);
    assert_eq!(strong.education.fields[5].weighted_value, 0.0);

    // Publications: 4 x 2 = 8 capped at 6; awards: 1 x 2 = 2
    assert_eq!(strong.quantity.fields[0].capped_value, 6.0);
    assert_eq!(strong.quantity.total_actual_value, 8.0);
    assert_eq!(strong.quantity.final_score, 8.0);

    assert_eq!(fresh.experience.final_score, 0.0);
    assert_eq!(fresh.quantity.final_score, 0.0);

    let ranked = rank_scorecards(vec![fresh, strong]);
    assert_eq!(ranked[0].name, "R. Strong");
    assert_eq!(ranked[1].name, "F. Graduate");

    let out_path = temp_dir.path().join("cards").join("strong.json");
    save_scorecard(&out_path, &ranked[0]).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(saved["name"], "R. Strong");
    assert_eq!(saved["experience"]["final_score"], 4.0);
}

#[test]
fn test_negative_count_rejects_whole_scorecard() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.yaml");
    fs::write(
        &path,
        "name: Bad\nachievements:\n  - { field: 3088, count: -1 }\n",
    )
    .unwrap();

    let applicant = load_applicant(&path).unwrap();
    let err = build_scorecard(&ScoringScheme::default(), &applicant).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NegativeQuantity { field_id: 3088, .. }
    ));
}

#[test]
fn test_scorers_directly() {
    let intervals = vec![
        ExperienceInterval::parse(0, "2018-06-01", "2024-06-11", 1.0, 3.0).unwrap(),
        ExperienceInterval::parse(1, "2024-06-12", "2025-07-22", 1.0, 4.0).unwrap(),
    ];
    let experience = calculate_total_experience_default(&intervals, 4.0).unwrap();
    assert_eq!(experience.final_score, 4.0);

    let education = calculate_education_score(
        &[
            EducationEntry { field_id: 2, weight: 0.5, obtained_value: 97.0, max_value: 5.0 },
            EducationEntry { field_id: 3080, weight: 0.0, obtained_value: 0.0, max_value: 15.0 },
        ],
        60.0,
    )
    .unwrap();
    assert!((education.final_score - 4.85).abs() < 1e-9);

    let quantity = calculate_quantity_based_score(
        &[
            QuantityEntry { field_id: 3088, quantity: 1, unit_weight: 2.0, unit_cap: 6.0 },
            QuantityEntry { field_id: 3092, quantity: 2, unit_weight: 2.0, unit_cap: 2.0 },
        ],
        8.0,
    )
    .unwrap();
    assert_eq!(quantity.final_score, 4.0);

    let backwards = ExperienceInterval::parse(0, "2024-06-11", "2018-06-01", 1.0, 3.0).unwrap();
    assert!(matches!(
        calculate_total_experience_default(&[backwards], 4.0),
        Err(ValidationError::InvalidInterval { index: 0, .. })
    ));
}
