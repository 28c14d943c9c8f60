//! CLI rename, delete, and download commands.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::store::Vault;

pub fn run_rename(config: &Config, old: &str, new: &str) -> Result<()> {
    let vault = Vault::open(&config.vault.dir)?;
    let (name, _event) = vault.rename(old, new)?;
    println!("Renamed to {}", name);
    Ok(())
}

pub fn run_delete(config: &Config, name: &str) -> Result<()> {
    let vault = Vault::open(&config.vault.dir)?;
    vault.delete(name)?;
    println!("Deleted {}", name);
    Ok(())
}

/// Copy a document's bytes out of the vault. Writes to `out` when given,
/// otherwise to a file of the same name in the current directory.
pub fn run_download(config: &Config, name: &str, out: Option<&Path>) -> Result<()> {
    let vault = Vault::open(&config.vault.dir)?;
    let bytes = vault.read(name)?;

    let target = out.map(Path::to_path_buf).unwrap_or_else(|| name.into());
    std::fs::write(&target, &bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("Downloaded {} ({} bytes)", target.display(), bytes.len());
    Ok(())
}
