//! # docvault
//!
//! A local-first document vault for a single user.
//!
//! docvault stores documents as plain files in one flat directory on local
//! disk. The filename is the only metadata carrier: every stored name has
//! the shape `{date}_{type}_{label}`, and listing, filtering, and searching
//! operate on that string alone. There is no database and no sidecar
//! metadata — what you see in the directory is the whole system state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌────────────────┐
//! │  Vault Store │──▶│ Filter Engine │──▶│ sorted listing │
//! │  (flat dir)  │   │ type/date/q   │   └────────────────┘
//! └──────┬───────┘
//!        │
//!   ┌────┴─────┐
//!   ▼          ▼
//! ┌──────┐  ┌──────┐
//! │ CLI  │  │ HTTP │
//! │vault │  │ JSON │
//! └──────┘  └──────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! vault upload scan.pdf --doc-type "Lab Report" --name "blood test"
//! vault list --doc-type "Lab Report" --search blood
//! vault rename 2024-01-01_Lab_Report_blood_test renamed_report
//! vault delete 2024-01-01_Lab_Report_renamed_report
//! vault serve                   # start the JSON HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Document types and parsed filename views |
//! | [`store`] | Vault Store — upload, rename, delete, list, read |
//! | [`filter`] | Query/Filter engine over filenames |
//! | [`share`] | Share-link rendering |
//! | [`listing`] | CLI listing command |
//! | [`upload`] | CLI upload command |
//! | [`manage`] | CLI rename/delete/download commands |
//! | [`server`] | JSON HTTP server |

pub mod config;
pub mod filter;
pub mod listing;
pub mod manage;
pub mod models;
pub mod server;
pub mod share;
pub mod store;
pub mod upload;
