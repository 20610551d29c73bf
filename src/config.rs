//! Configuration types for airtable-backup

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for a backup run
///
/// All fields default to the real service endpoints and the behavior of a
/// full backup; tests override the URL fields to point at a mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Web front-end base URL, the surface that serves the login form and
    /// per-base documentation pages (default: "https://airtable.com")
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,

    /// Record API base URL (default: "https://api.airtable.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Root directory for backup output (default: "backups")
    #[serde(default = "default_backup_root")]
    pub backup_root: PathBuf,

    /// Fixed delay between successive record page fetches (default: 500 ms)
    ///
    /// The record API allows only a handful of requests per minute; the
    /// delay keeps sequential paging under that limit with a margin.
    #[serde(default = "default_page_delay")]
    pub page_delay: Duration,

    /// Maximum concurrent attachment downloads (default: 10)
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// Fetch each base's documentation page and resolve its API key during
    /// discovery (default: true)
    ///
    /// A base cannot be backed up without its key; disabling this yields a
    /// names-and-tables-only catalog for callers that stop at discovery.
    #[serde(default = "default_true")]
    pub fetch_api_info: bool,

    /// Download file attachments referenced by record fields (default: true)
    #[serde(default = "default_true")]
    pub download_attachments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_base_url: default_web_base_url(),
            api_base_url: default_api_base_url(),
            backup_root: default_backup_root(),
            page_delay: default_page_delay(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
            fetch_api_info: true,
            download_attachments: true,
        }
    }
}

fn default_web_base_url() -> String {
    "https://airtable.com".to_string()
}

fn default_api_base_url() -> String {
    "https://api.airtable.com".to_string()
}

fn default_backup_root() -> PathBuf {
    PathBuf::from("backups")
}

fn default_page_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_max_concurrent_downloads() -> usize {
    10
}

fn default_true() -> bool {
    true
}
