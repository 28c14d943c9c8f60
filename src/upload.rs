//! CLI upload command.
//!
//! Reads the source file, checks it against the configured include globs,
//! and hands the bytes to the store with the chosen date, type, and
//! optional custom name.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::config::Config;
use crate::models::DocType;
use crate::store::Vault;

pub fn run_upload(
    config: &Config,
    path: &Path,
    doc_type: DocType,
    date: NaiveDate,
    custom_name: Option<&str>,
) -> Result<()> {
    if !path.is_file() {
        bail!("no file selected: {} is not a readable file", path.display());
    }

    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let include_set = build_globset(&config.upload.include_globs)?;
    if !include_set.is_match(&original_name) {
        bail!(
            "unsupported file type: '{}' does not match any of {:?}",
            original_name,
            config.upload.include_globs
        );
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let vault = Vault::open(&config.vault.dir)?;
    let (filename, _event) = vault.upload(&bytes, date, doc_type, custom_name, &original_name)?;

    println!("Uploaded as {}", filename);
    Ok(())
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_globs_match_original_names() {
        let cfg = Config::minimal();
        let set = build_globset(&cfg.upload.include_globs).unwrap();
        assert!(set.is_match("scan.pdf"));
        assert!(set.is_match("photo.jpeg"));
        assert!(!set.is_match("notes.txt"));
    }

    #[test]
    fn test_missing_file_is_no_file_selected() {
        let cfg = Config::minimal();
        let err = run_upload(
            &cfg,
            Path::new("/nonexistent/scan.pdf"),
            DocType::Other,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no file selected"));
    }
}
