use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::scoring::ScoringScheme;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring scheme; the built-in scheme is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringScheme>,

    /// Default output format for `score`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn effective_scheme(&self) -> ScoringScheme {
        self.scoring.clone().unwrap_or_default()
    }
}
