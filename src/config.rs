use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    #[serde(default = "default_vault_dir")]
    pub dir: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            dir: default_vault_dir(),
        }
    }
}

fn default_vault_dir() -> PathBuf {
    PathBuf::from("uploaded_docs")
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Glob patterns the original upload filename must match.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec![
        "*.pdf".to_string(),
        "*.png".to_string(),
        "*.jpg".to_string(),
        "*.jpeg".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7878".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareConfig {
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
    #[serde(default = "default_share_username")]
    pub username: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
            username: default_share_username(),
        }
    }
}

fn default_share_base_url() -> String {
    "https://medicano.fake".to_string()
}

fn default_share_username() -> String {
    "guest".to_string()
}

impl Config {
    /// In-code defaults used when no config file is present. Every command
    /// works against `./uploaded_docs` with this configuration.
    pub fn minimal() -> Self {
        Self {
            vault: VaultConfig::default(),
            upload: UploadConfig::default(),
            server: ServerConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate vault
    if config.vault.dir.as_os_str().is_empty() {
        anyhow::bail!("vault.dir must not be empty");
    }

    // Validate upload
    if config.upload.include_globs.is_empty() {
        anyhow::bail!("upload.include_globs must list at least one pattern");
    }
    for pattern in &config.upload.include_globs {
        globset::Glob::new(pattern)
            .with_context(|| format!("Invalid upload glob pattern: '{}'", pattern))?;
    }

    // Validate server
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Validate share
    if config.share.base_url.trim().is_empty() {
        anyhow::bail!("share.base_url must not be empty");
    }

    Ok(config)
}

/// Load the config file at `path`, falling back to [`Config::minimal`] when
/// the file does not exist. A file that exists but fails to parse or
/// validate is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_defaults() {
        let cfg = Config::minimal();
        assert_eq!(cfg.vault.dir, PathBuf::from("uploaded_docs"));
        assert_eq!(cfg.share.username, "guest");
        assert!(cfg.upload.include_globs.contains(&"*.pdf".to_string()));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.vault.dir, PathBuf::from("uploaded_docs"));
        assert_eq!(cfg.server.bind, "127.0.0.1:7878");
    }

    #[test]
    fn test_partial_override() {
        let file = write_config(
            r#"
[vault]
dir = "/tmp/docs"

[share]
username = "dr_jones"
"#,
        );
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.vault.dir, PathBuf::from("/tmp/docs"));
        assert_eq!(cfg.share.username, "dr_jones");
        assert_eq!(cfg.share.base_url, "https://medicano.fake");
    }

    #[test]
    fn test_empty_include_globs_rejected() {
        let file = write_config("[upload]\ninclude_globs = []\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("include_globs"));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let file = write_config("[upload]\ninclude_globs = [\"*.{pdf\"]\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = load_or_default(Path::new("/nonexistent/vault.toml")).unwrap();
        assert_eq!(cfg.vault.dir, PathBuf::from("uploaded_docs"));
    }
}
