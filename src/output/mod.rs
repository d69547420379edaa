pub mod formatter;

pub use formatter::{
    format_json, format_ranking, format_score, format_scorecard, format_tsv, should_use_colors,
    OutputFormat,
};
