//! Share-link rendering.
//!
//! The link is a fixed-template string with no server-side counterpart — a
//! cosmetic placeholder, not a functioning authenticated URL.

use crate::config::Config;

/// Render the share link for the configured identity. The username falls
/// back to `guest` when unset.
pub fn share_link(config: &Config) -> String {
    let username = if config.share.username.trim().is_empty() {
        "guest"
    } else {
        config.share.username.trim()
    };
    format!(
        "{}/documents/view/{}/secure123",
        config.share.base_url.trim_end_matches('/'),
        username
    )
}

pub fn run_share(config: &Config) -> anyhow::Result<()> {
    println!("Copy the link below to share:");
    println!("{}", share_link(config));
    Ok(())
}
