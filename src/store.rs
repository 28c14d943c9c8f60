//! Vault Store — the on-disk document directory.
//!
//! One flat directory, one file per document, the filename as the only
//! metadata. All operations are synchronous and stateless: nothing is
//! cached between calls, so a listing taken after a mutation always
//! reflects the directory as it is on disk. Mutating operations return a
//! [`VaultEvent`] so presentation layers know to re-list.
//!
//! Not safe for concurrent writers to the same filename; the vault assumes
//! a single interactive user.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::models::{DocType, VaultEvent};

pub struct Vault {
    dir: PathBuf,
}

impl Vault {
    /// Open the vault at `dir`, creating the directory if absent.
    pub fn open(dir: &Path) -> Result<Vault> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create vault directory: {}", dir.display()))?;
        Ok(Vault {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `bytes` under the composed name `{date}_{type}_{label}`, where
    /// the label is the sanitized custom name, or the sanitized original
    /// upload name when no custom name is given.
    ///
    /// No collision check: an upload that composes to an existing name
    /// silently overwrites it. Returns the final filename.
    pub fn upload(
        &self,
        bytes: &[u8],
        date: NaiveDate,
        doc_type: DocType,
        custom_name: Option<&str>,
        original_name: &str,
    ) -> Result<(String, VaultEvent)> {
        let label = match custom_name.map(str::trim) {
            Some(custom) if !custom.is_empty() => sanitize(custom),
            _ => sanitize(original_name),
        };
        if label.is_empty() {
            bail!("upload name must not be empty");
        }

        let filename = format!(
            "{}_{}_{}",
            date.format("%Y-%m-%d"),
            doc_type.tag(),
            label
        );
        let path = self.entry_path(&filename)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        let event = VaultEvent::Uploaded {
            name: filename.clone(),
        };
        Ok((filename, event))
    }

    /// Rename `old` to the sanitized `new` name.
    ///
    /// Renaming to the same sanitized name is a no-op success. If another
    /// file already holds the target name the rename is aborted and the
    /// original is left untouched.
    pub fn rename(&self, old: &str, new: &str) -> Result<(String, VaultEvent)> {
        // Stored names never carry surrounding whitespace (sanitize trims
        // on the way in), so a padded `old` refers to the same document.
        let old = old.trim();
        let old_path = self.entry_path(old)?;
        if !old_path.is_file() {
            bail!("document not found: {}", old);
        }

        let new_name = sanitize(new);
        if new_name.is_empty() {
            bail!("new name must not be empty");
        }
        let new_path = self.entry_path(&new_name)?;

        if new_name == old {
            // Same file; nothing to do, and nothing to lose.
            return Ok((
                new_name.clone(),
                VaultEvent::Renamed {
                    from: old.to_string(),
                    to: new_name,
                },
            ));
        }

        if new_path.exists() {
            bail!("a file with this name already exists: {}", new_name);
        }

        std::fs::rename(&old_path, &new_path)
            .with_context(|| format!("Failed to rename {} to {}", old, new_name))?;

        let event = VaultEvent::Renamed {
            from: old.to_string(),
            to: new_name.clone(),
        };
        Ok((new_name, event))
    }

    /// Delete the named document. Any underlying failure (missing file,
    /// permissions, I/O) collapses into one generic error.
    pub fn delete(&self, name: &str) -> Result<VaultEvent> {
        let path = self.entry_path(name)?;
        if std::fs::remove_file(&path).is_err() {
            bail!("could not delete file: {}", name);
        }
        Ok(VaultEvent::Deleted {
            name: name.to_string(),
        })
    }

    /// Current directory listing, files only. No ordering guarantee —
    /// display sorting is the caller's responsibility.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    /// Fetch a document's bytes for download.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(name)?;
        if !path.is_file() {
            bail!("document not found: {}", name);
        }
        std::fs::read(&path).with_context(|| format!("Failed to read {}", name))
    }

    /// Resolve a document name to its path inside the vault directory,
    /// rejecting anything that is not a single plain path component.
    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            bail!("invalid document name: empty");
        }
        let candidate = Path::new(name);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => bail!("invalid document name: {}", name),
        }
        Ok(self.dir.join(name))
    }
}

/// Filename sanitization used for every user-chosen name: trim surrounding
/// whitespace, replace inner spaces with underscores.
pub fn sanitize(name: &str) -> String {
    name.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault() -> (TempDir, Vault) {
        let tmp = TempDir::new().unwrap();
        let vault = Vault::open(&tmp.path().join("docs")).unwrap();
        (tmp, vault)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("deep").join("vault");
        let v = Vault::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(v.list().unwrap().is_empty());
    }

    #[test]
    fn test_upload_custom_name() {
        let (_tmp, v) = vault();
        let (name, event) = v
            .upload(
                b"results",
                date(2024, 1, 1),
                DocType::LabReport,
                Some("blood test"),
                "scan.pdf",
            )
            .unwrap();
        assert_eq!(name, "2024-01-01_Lab_Report_blood_test");
        assert_eq!(
            event,
            VaultEvent::Uploaded {
                name: "2024-01-01_Lab_Report_blood_test".to_string()
            }
        );
        assert_eq!(v.read(&name).unwrap(), b"results");
    }

    #[test]
    fn test_upload_falls_back_to_original_name() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(
                b"x",
                date(2024, 3, 5),
                DocType::Prescription,
                None,
                "my scan.pdf",
            )
            .unwrap();
        assert_eq!(name, "2024-03-05_Prescription_my_scan.pdf");
    }

    #[test]
    fn test_upload_blank_custom_falls_back() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(b"x", date(2024, 3, 5), DocType::Other, Some("   "), "a.png")
            .unwrap();
        assert_eq!(name, "2024-03-05_Other_a.png");
    }

    #[test]
    fn test_upload_overwrites_same_composed_name() {
        let (_tmp, v) = vault();
        let args = (date(2024, 1, 1), DocType::Other, Some("dup"));
        v.upload(b"first", args.0, args.1, args.2, "a").unwrap();
        let (name, _) = v.upload(b"second", args.0, args.1, args.2, "a").unwrap();
        assert_eq!(v.read(&name).unwrap(), b"second");
        assert_eq!(v.list().unwrap().len(), 1);
    }

    #[test]
    fn test_rename_sanitizes_and_moves() {
        let (_tmp, v) = vault();
        let (old, _) = v
            .upload(b"x", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let (new, event) = v.rename(&old, "fresh name").unwrap();
        assert_eq!(new, "fresh_name");
        assert_eq!(
            event,
            VaultEvent::Renamed {
                from: old.clone(),
                to: "fresh_name".to_string()
            }
        );
        let names = v.list().unwrap();
        assert_eq!(names, vec!["fresh_name".to_string()]);
    }

    #[test]
    fn test_rename_to_self_is_lossless() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(b"contents", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let (kept, _) = v.rename(&name, &name).unwrap();
        assert_eq!(kept, name);
        assert_eq!(v.read(&name).unwrap(), b"contents");
    }

    #[test]
    fn test_rename_with_padded_old_is_lossless_noop() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(b"contents", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let padded = format!("  {}  ", name);
        let (kept, _) = v.rename(&padded, &name).unwrap();
        assert_eq!(kept, name);
        assert_eq!(v.read(&name).unwrap(), b"contents");
        assert_eq!(v.list().unwrap(), vec![name]);
    }

    #[test]
    fn test_rename_with_padded_old_moves_document() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(b"x", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let padded = format!(" {} ", name);
        let (new, _) = v.rename(&padded, "fresh").unwrap();
        assert_eq!(new, "fresh");
        assert_eq!(v.list().unwrap(), vec!["fresh".to_string()]);
    }

    #[test]
    fn test_rename_collision_leaves_both_intact() {
        let (_tmp, v) = vault();
        let (a, _) = v
            .upload(b"aaa", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let (b, _) = v
            .upload(b"bbb", date(2024, 1, 2), DocType::Other, Some("b"), "b")
            .unwrap();
        let err = v.rename(&a, &b).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(v.read(&a).unwrap(), b"aaa");
        assert_eq!(v.read(&b).unwrap(), b"bbb");
    }

    #[test]
    fn test_rename_missing_source() {
        let (_tmp, v) = vault();
        let err = v.rename("ghost", "anything").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_delete_then_delete_again() {
        let (_tmp, v) = vault();
        let (name, _) = v
            .upload(b"x", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        let event = v.delete(&name).unwrap();
        assert_eq!(event, VaultEvent::Deleted { name: name.clone() });
        assert!(v.list().unwrap().is_empty());

        let err = v.delete(&name).unwrap_err();
        assert!(err.to_string().contains("could not delete"));
    }

    #[test]
    fn test_list_idempotent() {
        let (_tmp, v) = vault();
        v.upload(b"x", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        v.upload(b"y", date(2024, 1, 2), DocType::Other, Some("b"), "b")
            .unwrap();
        let mut first = v.list().unwrap();
        let mut second = v.list().unwrap();
        first.sort();
        second.sort();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_list_skips_subdirectories() {
        let (_tmp, v) = vault();
        std::fs::create_dir(v.dir().join("nested")).unwrap();
        v.upload(b"x", date(2024, 1, 1), DocType::Other, Some("a"), "a")
            .unwrap();
        assert_eq!(v.list().unwrap().len(), 1);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let (_tmp, v) = vault();
        assert!(v.read("../outside").is_err());
        assert!(v.delete("..").is_err());
        assert!(v.rename("a/b", "c").is_err());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  blood test  "), "blood_test");
        assert_eq!(sanitize("already_clean"), "already_clean");
        assert_eq!(sanitize("   "), "");
    }
}
