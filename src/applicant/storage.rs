use super::types::Applicant;
use crate::scoring::Scorecard;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::path::Path;

/// Load an applicant record.
///
/// Files ending in `.json` are read as JSON; anything else is read as YAML.
pub fn load_applicant(path: &Path) -> Result<Applicant> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read applicant file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let applicant: Applicant = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse applicant: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse applicant: invalid YAML in {}", path.display()))?
    };

    Ok(applicant)
}

/// Save a scorecard as pretty JSON, atomically
///
/// Uses atomic-write-file so a reader never sees a half-written scorecard.
pub fn save_scorecard(path: &Path, card: &Scorecard) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, card).context("Failed to serialize scorecard")?;

    file.commit().context("Failed to save scorecard")?;

    Ok(())
}
