use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Width};

use crate::scoring::{Scorecard, ScoringScheme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable breakdown
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Tab-separated values for scripting
    Tsv,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format marks with up to two decimals, dropping trailing zeros
/// ("4", "41.99", "12.5").
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.2}", score);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Section header: final marks over the ceiling, then the uncapped total
fn section_line(label: &str, actual: f64, final_score: f64, ceiling: f64, use_colors: bool) -> String {
    let capped = if final_score < actual { " (capped)" } else { "" };
    let head = format!("{:<11}", label);
    let score = format!("{} / {}", format_score(final_score), format_score(ceiling));
    if use_colors {
        format!(
            "{}{}{}  raw {}",
            head.bold(),
            score.green(),
            capped.yellow(),
            format_score(actual)
        )
    } else {
        format!("{}{}{}  raw {}", head, score, capped, format_score(actual))
    }
}

/// Multi-line breakdown of one scorecard, naming fields from the scheme
pub fn format_scorecard(card: &Scorecard, scheme: &ScoringScheme, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if use_colors {
        lines.push(card.name.bold().to_string());
    } else {
        lines.push(card.name.clone());
    }

    // Experience
    lines.push(section_line(
        "Experience",
        card.experience.total_actual_value,
        card.experience.final_score,
        scheme.experience.weightage,
        use_colors,
    ));
    for (detail, period) in card.experience.intervals.iter().zip(&card.periods) {
        let band = scheme
            .experience
            .band(period.band)
            .map(|b| b.name.as_str())
            .unwrap_or("?");
        lines.push(format!(
            "  {}..{}  {:<32} {:>5} days  {:>5} yrs  {:>6}",
            period.from,
            period.to,
            band,
            detail.days,
            format!("{:.2}", detail.decimal_years),
            format_score(detail.counted_value)
        ));
    }
    lines.push(format!(
        "  total {} days ({:.2} years)",
        card.experience.total_days, card.experience.total_decimal_years
    ));

    // Education
    lines.push(section_line(
        "Education",
        card.education.total_actual_value,
        card.education.final_score,
        scheme.education.ceiling,
        use_colors,
    ));
    for detail in &card.education.fields {
        let name = scheme
            .education
            .field(detail.field_id)
            .map(|f| f.name.as_str())
            .unwrap_or("?");
        lines.push(format!(
            "  {:<32} {:>7}%  {:>6}",
            name,
            format_score(detail.percentage * 100.0),
            format_score(detail.weighted_value)
        ));
    }

    // Achievements
    lines.push(section_line(
        "Quantity",
        card.quantity.total_actual_value,
        card.quantity.final_score,
        scheme.quantity.parent_marks,
        use_colors,
    ));
    for detail in &card.quantity.fields {
        let name = scheme
            .quantity
            .field(detail.field_id)
            .map(|f| f.name.as_str())
            .unwrap_or("?");
        let capped = if detail.capped_value < detail.raw_value {
            format!(" (of {})", format_score(detail.raw_value))
        } else {
            String::new()
        };
        lines.push(format!(
            "  {:<32} {:>6}{}",
            name,
            format_score(detail.capped_value),
            capped
        ));
    }

    let total = format!("Total      {}", format_score(card.total));
    if use_colors {
        lines.push(total.bold().to_string());
    } else {
        lines.push(total);
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked scorecards: Rank, Total, Experience, Education, Quantity, Name
pub fn format_ranking(cards: &[Scorecard], use_colors: bool) -> String {
    if cards.is_empty() {
        return "No applicants to rank.".to_string();
    }

    // Rank: 4, four score columns: 8 each, separators: 2 between name and scores
    let fixed_width = 4 + 8 * 4 + 2;
    let term_width = get_terminal_width();

    cards
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            let rank = format!("{:>3}.", idx + 1);
            let total = format!("{:>8}", format_score(card.total));
            let parts = format!(
                "{:>8}{:>8}{:>8}",
                format_score(card.experience.final_score),
                format_score(card.education.final_score),
                format_score(card.quantity.final_score)
            );

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&card.name, width - fixed_width)
                }
                Some(_) => truncate_name(&card.name, 20),
                None => card.name.clone(),
            };

            if use_colors {
                format!("{}{}{}  {}", rank.dimmed(), total.bold(), parts, name)
            } else {
                format!("{}{}{}  {}", rank, total, parts, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scorecards as tab-separated values for scripting
/// Columns: total, experience, education, quantity, name (no headers, no colors)
pub fn format_tsv(cards: &[Scorecard]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                format_score(card.total),
                format_score(card.experience.final_score),
                format_score(card.education.final_score),
                format_score(card.quantity.final_score),
                card.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(card: &Scorecard) -> Result<String> {
    serde_json::to_string_pretty(card).context("Failed to serialize scorecard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::Applicant;
    use crate::scoring::build_scorecard;

    fn sample_card(name: &str) -> Scorecard {
        let yaml = r#"
name: "placeholder"
experience:
  - { band: 1, from: "2018-06-01", to: "2024-06-11" }
  - { band: 2, from: "2024-06-12", to: "2025-07-22" }
education:
  - { field: 2, percentage: 97 }
  - { field: 3, percentage: 84.5 }
  - { field: 4, percentage: 86.1 }
  - { field: 6, percentage: 77 }
achievements:
  - { field: 3088, count: 1 }
  - { field: 3092, count: 2 }
"#;
        let mut applicant: Applicant = serde_saphyr::from_str(yaml).unwrap();
        applicant.name = name.to_string();
        build_scorecard(&ScoringScheme::default(), &applicant).unwrap()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(4.0), "4");
        assert_eq!(format_score(41.99), "41.99");
        assert_eq!(format_score(12.5), "12.5");
        assert_eq!(format_score(1.239), "1.24");
        assert_eq!(format_score(-0.001), "0");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(0.001), "0");
        assert_eq!(format_score(100.0), "100");
    }

    #[test]
    fn test_format_scorecard_plain() {
        let card = sample_card("A. Candidate");
        let out = format_scorecard(&card, &ScoringScheme::default(), false);

        assert!(out.starts_with("A. Candidate\n"));
        assert!(out.contains("Experience 4 / 4 (capped)"));
        assert!(out.contains("2018-06-01..2024-06-11"));
        assert!(out.contains("2202 days"));
        assert!(out.contains("Education  41.99 / 60"));
        assert!(out.contains("Class XII"));
        assert!(out.contains("Quantity   4 / 8"));
        assert!(out.contains("2 (of 4)"));
        assert!(out.ends_with("Total      49.99"));
    }

    #[test]
    fn test_format_ranking_plain() {
        let cards = vec![sample_card("First"), sample_card("Second")];
        let out = format_ranking(&cards, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("49.99"));
        assert!(lines[0].ends_with("First"));
        assert!(lines[1].starts_with("  2."));
    }

    #[test]
    fn test_format_ranking_empty() {
        assert_eq!(format_ranking(&[], false), "No applicants to rank.");
    }

    #[test]
    fn test_format_tsv() {
        let cards = vec![sample_card("A. Candidate")];
        assert_eq!(format_tsv(&cards), "49.99\t4\t41.99\t4\tA. Candidate");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_card("J")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["experience"]["total_days"], 2607);
        assert_eq!(value["periods"][0]["from"], "2018-06-01");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("A very long applicant name", 10), "A very ...");
        assert_eq!(truncate_name("Hello", 3), "Hel");
    }

    #[test]
    fn test_output_format_serde() {
        let format: OutputFormat = serde_saphyr::from_str("tsv").unwrap();
        assert_eq!(format, OutputFormat::Tsv);
    }
}
