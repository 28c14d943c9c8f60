//! Query/Filter engine over vault filenames.
//!
//! Three independent criteria, AND-combined, all pure substring predicates
//! on the filename: a type tag, a date, and a case-insensitive search
//! string. Matching is deliberately not anchored to filename segments — a
//! label that happens to contain another type's tag or a date-like string
//! will match. That mirrors the filename-as-database model: the filter
//! engine knows nothing the filename doesn't say.

use chrono::NaiveDate;

use crate::models::TypeFilter;

#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub type_filter: TypeFilter,
    pub date: Option<NaiveDate>,
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            type_filter: TypeFilter::All,
            date: None,
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, name: &str) -> bool {
        if let TypeFilter::Only(doc_type) = self.type_filter {
            if !name.contains(doc_type.tag()) {
                return false;
            }
        }

        if let Some(date) = self.date {
            if !name.contains(&date.format("%Y-%m-%d").to_string()) {
                return false;
            }
        }

        if !self.search.is_empty()
            && !name.to_lowercase().contains(&self.search.to_lowercase())
        {
            return false;
        }

        true
    }

    /// Narrow `names` to the matching subset. Output order follows input
    /// order; callers sort for display via [`sorted`].
    pub fn apply(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.matches(name))
            .cloned()
            .collect()
    }
}

/// Lexicographic display order for a listing.
pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}
