//! CLI listing command: list, filter, sort, print.

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Config;
use crate::filter::{sorted, FilterCriteria};
use crate::models::{DocumentName, TypeFilter};
use crate::store::Vault;

/// List vault documents matching the given criteria and print them in
/// lexicographic order. An empty result is informational, not an error.
pub fn run_list(
    config: &Config,
    type_filter: TypeFilter,
    date: Option<NaiveDate>,
    search: &str,
) -> Result<()> {
    let docs = list_documents(config, type_filter, date, search)?;

    if docs.is_empty() {
        println!("No matching documents found.");
        return Ok(());
    }

    println!("{:<12} {:<18} {:<32} NAME", "DATE", "TYPE", "LABEL");
    for doc in &docs {
        let date = doc
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let doc_type = doc.doc_type.map(|t| t.label()).unwrap_or("-");
        println!("{:<12} {:<18} {:<32} {}", date, doc_type, doc.label, doc.name);
    }
    println!();
    println!("{} document(s)", docs.len());
    Ok(())
}

/// Core listing function returning parsed documents in display order.
/// Used by both the CLI command and the HTTP handler; re-reads the
/// directory on every call.
pub fn list_documents(
    config: &Config,
    type_filter: TypeFilter,
    date: Option<NaiveDate>,
    search: &str,
) -> Result<Vec<DocumentName>> {
    let vault = Vault::open(&config.vault.dir)?;
    let criteria = FilterCriteria {
        type_filter,
        date,
        search: search.to_string(),
    };

    let names = sorted(criteria.apply(&vault.list()?));
    Ok(names.iter().map(|n| DocumentName::parse(n)).collect())
}
