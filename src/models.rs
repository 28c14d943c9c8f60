//! Core data types for the vault.
//!
//! A stored document has no record of its own — everything the system knows
//! about it is encoded in its filename, `{date}_{type}_{label}`. These types
//! give that string a typed surface: [`DocType`] for the four document
//! categories, [`DocumentName`] as a parsed (best-effort) view of a vault
//! filename, and [`VaultEvent`] as the refresh signal emitted by every
//! mutating store operation.

use chrono::NaiveDate;
use serde::Serialize;

/// Document category, embedded in the filename as its second segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocType {
    Prescription,
    LabReport,
    DischargeSummary,
    Other,
}

impl DocType {
    pub fn all() -> [DocType; 4] {
        [
            DocType::Prescription,
            DocType::LabReport,
            DocType::DischargeSummary,
            DocType::Other,
        ]
    }

    /// Display form, with spaces.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Prescription => "Prescription",
            DocType::LabReport => "Lab Report",
            DocType::DischargeSummary => "Discharge Summary",
            DocType::Other => "Other",
        }
    }

    /// Filename form, spaces replaced by underscores.
    pub fn tag(&self) -> &'static str {
        match self {
            DocType::Prescription => "Prescription",
            DocType::LabReport => "Lab_Report",
            DocType::DischargeSummary => "Discharge_Summary",
            DocType::Other => "Other",
        }
    }

    /// Parse either the display form (`"Lab Report"`) or the filename form
    /// (`"Lab_Report"`), case-insensitively.
    pub fn parse(s: &str) -> Option<DocType> {
        let normalized = s.trim().replace(' ', "_").to_lowercase();
        DocType::all()
            .into_iter()
            .find(|t| t.tag().to_lowercase() == normalized)
    }
}

/// Type criterion for the filter engine: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(DocType),
}

impl TypeFilter {
    /// Parse a CLI/HTTP filter value. `"All"` (or empty) means no filter.
    pub fn parse(s: &str) -> Option<TypeFilter> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Some(TypeFilter::All);
        }
        DocType::parse(trimmed).map(TypeFilter::Only)
    }
}

/// Best-effort parsed view of a vault filename.
///
/// Splitting is positional: the first `_`-delimited segment is tried as a
/// date, the following segment(s) as a type tag. A filename that does not
/// follow the `{date}_{type}_{label}` shape (e.g. after a free-form rename)
/// degrades to `None` fields with the whole name as the label — parsing
/// never fails.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentName {
    /// The full filename, the document's identity.
    pub name: String,
    pub date: Option<NaiveDate>,
    pub doc_type: Option<DocType>,
    /// Remainder of the filename after the date and type segments.
    pub label: String,
}

impl DocumentName {
    pub fn parse(name: &str) -> DocumentName {
        let mut date = None;
        let mut doc_type = None;
        let mut rest = name;

        if let Some(prefix) = name.get(..10) {
            if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                date = Some(d);
                rest = name[10..].strip_prefix('_').unwrap_or(&name[10..]);
            }
        }

        for t in DocType::all() {
            if let Some(stripped) = rest.strip_prefix(t.tag()) {
                // Require a segment boundary so "Other_..." does not also
                // match a label that merely starts with those letters.
                if stripped.is_empty() || stripped.starts_with('_') {
                    doc_type = Some(t);
                    rest = stripped.strip_prefix('_').unwrap_or(stripped);
                    break;
                }
            }
        }

        DocumentName {
            name: name.to_string(),
            date,
            doc_type,
            label: rest.to_string(),
        }
    }
}

/// Refresh signal emitted by every mutating store operation.
///
/// The store caches nothing; a caller that displays a listing re-lists the
/// directory after observing one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaultEvent {
    Uploaded { name: String },
    Renamed { from: String, to: String },
    Deleted { name: String },
}
