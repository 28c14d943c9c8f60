//! # docvault CLI (`vault`)
//!
//! The `vault` binary is the primary interface for docvault. It provides
//! commands for uploading, listing, renaming, deleting, and downloading
//! documents, rendering the share link, and starting the JSON HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! vault --config ./config/vault.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vault upload <file>` | Store a file under a `{date}_{type}_{label}` name |
//! | `vault list` | List documents, optionally filtered by type/date/search |
//! | `vault rename <old> <new>` | Rename a document (collisions rejected) |
//! | `vault delete <name>` | Delete a document |
//! | `vault download <name>` | Copy a document's bytes out of the vault |
//! | `vault share` | Print the share link |
//! | `vault serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Upload a lab report dated today with a custom label
//! vault upload results.pdf --doc-type "Lab Report" --name "blood test"
//!
//! # List all prescriptions mentioning "allergy"
//! vault list --doc-type Prescription --search allergy
//!
//! # Only documents from a specific date
//! vault list --date 2024-01-01
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docvault::models::{DocType, TypeFilter};
use docvault::{config, listing, manage, server, share, upload};

/// docvault CLI — a local-first document vault.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used (vault
/// directory `./uploaded_docs`).
#[derive(Parser)]
#[command(
    name = "vault",
    about = "docvault — a local-first document vault: upload, filter, search, rename, and share files on disk",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Falls back to built-in defaults
    /// when the file does not exist.
    #[arg(long, global = true, default_value = "./config/vault.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Upload a file into the vault.
    ///
    /// The stored name is composed as `{date}_{type}_{label}` where the
    /// label is the sanitized custom name (or the sanitized original
    /// filename when no custom name is given). An upload that composes to
    /// an existing name overwrites it.
    Upload {
        /// Path to the file to upload.
        file: PathBuf,

        /// Document type: Prescription, "Lab Report", "Discharge Summary", or Other.
        #[arg(long, value_parser = parse_doc_type, default_value = "Other")]
        doc_type: DocType,

        /// Document date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Optional custom file name (spaces become underscores).
        #[arg(long)]
        name: Option<String>,
    },

    /// List documents, optionally filtered.
    ///
    /// Type, date, and search criteria are AND-combined. All matching is
    /// substring matching on the filename; search is case-insensitive.
    /// Results print in lexicographic order.
    List {
        /// Filter by document type, or `All`.
        #[arg(long, value_parser = parse_type_filter, default_value = "All")]
        doc_type: TypeFilter,

        /// Only documents whose name contains this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Case-insensitive substring search on the filename.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Rename a document.
    ///
    /// The new name is sanitized (spaces become underscores). If another
    /// document already holds the target name the rename is aborted and
    /// the original is left untouched.
    Rename {
        /// Current document name.
        old: String,
        /// New document name.
        new: String,
    },

    /// Delete a document from the vault.
    Delete {
        /// Document name to delete.
        name: String,
    },

    /// Copy a document's bytes out of the vault.
    Download {
        /// Document name to download.
        name: String,

        /// Output path. Defaults to the document name in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the share link.
    ///
    /// The link is a fixed-template placeholder with no server-side
    /// counterpart.
    Share,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// vault operations as a JSON API.
    Serve,
}

fn parse_doc_type(s: &str) -> Result<DocType, String> {
    DocType::parse(s).ok_or_else(|| {
        format!(
            "unknown document type: '{}'. Use Prescription, Lab Report, Discharge Summary, or Other.",
            s
        )
    })
}

fn parse_type_filter(s: &str) -> Result<TypeFilter, String> {
    TypeFilter::parse(s).ok_or_else(|| {
        format!(
            "unknown type filter: '{}'. Use All, Prescription, Lab Report, Discharge Summary, or Other.",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Upload {
            file,
            doc_type,
            date,
            name,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            upload::run_upload(&cfg, &file, doc_type, date, name.as_deref())?;
        }
        Commands::List {
            doc_type,
            date,
            search,
        } => {
            listing::run_list(&cfg, doc_type, date, &search)?;
        }
        Commands::Rename { old, new } => {
            manage::run_rename(&cfg, &old, &new)?;
        }
        Commands::Delete { name } => {
            manage::run_delete(&cfg, &name)?;
        }
        Commands::Download { name, out } => {
            manage::run_download(&cfg, &name, out.as_deref())?;
        }
        Commands::Share => {
            share::run_share(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
