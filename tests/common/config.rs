//! Test configuration helpers

use airtable_backup::Config;
use std::path::Path;
use std::time::Duration;

/// Config pointing every endpoint at the mock server, with a short page
/// delay so paging tests stay fast.
pub fn test_config(server_uri: &str, backup_root: &Path) -> Config {
    Config {
        web_base_url: server_uri.to_string(),
        api_base_url: server_uri.to_string(),
        backup_root: backup_root.to_path_buf(),
        page_delay: Duration::from_millis(25),
        ..Config::default()
    }
}
