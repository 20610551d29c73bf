//! Filesystem assertions over the produced backup tree

use std::path::{Path, PathBuf};

/// The timestamped run directories under `<root>/<base_id>/`, sorted.
pub fn run_dirs(root: &Path, base_id: &str) -> Vec<PathBuf> {
    let base_dir = root.join(base_id);
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(&base_dir)
        .unwrap_or_else(|e| panic!("no backup directory at {}: {e}", base_dir.display()))
        .map(|entry| entry.expect("readable directory entry").path())
        .collect();
    dirs.sort();
    dirs
}

/// The single timestamped run directory under `<root>/<base_id>/`.
pub fn run_dir(root: &Path, base_id: &str) -> PathBuf {
    let dirs = run_dirs(root, base_id);
    assert_eq!(
        dirs.len(),
        1,
        "expected exactly one run directory for {base_id}, found {dirs:?}"
    );
    dirs.into_iter().next().expect("one run directory")
}

/// Parse `<dir>/<tableId>.json` back into its record sequence.
pub fn read_records(dir: &Path, table_id: &str) -> Vec<serde_json::Value> {
    let path = dir.join(format!("{table_id}.json"));
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("no table file at {}: {e}", path.display()));
    serde_json::from_str(&json).expect("table file parses as a record array")
}

/// Names of the files inside `<dir>/attachments/`, sorted.
pub fn attachment_names(dir: &Path) -> Vec<String> {
    let attachments_dir = dir.join("attachments");
    let mut names: Vec<String> = std::fs::read_dir(&attachments_dir)
        .unwrap_or_else(|e| panic!("no attachments directory at {}: {e}", attachments_dir.display()))
        .map(|entry| {
            entry
                .expect("readable directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
