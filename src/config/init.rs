use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Config;
use crate::scoring::ScoringScheme;

const HEADER: &str = "\
# admit-score configuration
#
# scoring.experience: marks per year of service in each band, capped at `weightage`
# scoring.education:  percentage x max_marks per exam, capped at `ceiling`;
#                     only the best field of each `exclusive` group counts
# scoring.quantity:   count x unit_weight per achievement (capped at unit_cap),
#                     total capped at `parent_marks`
";

/// Write a config file holding the built-in scheme.
///
/// Refuses to replace an existing file unless `force` is set. Returns the
/// path written.
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    let config = Config {
        scoring: Some(ScoringScheme::default()),
        format: None,
    };
    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes()).context("Failed to write config")?;
    file.write_all(yaml.as_bytes()).context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(path.to_path_buf())
}
