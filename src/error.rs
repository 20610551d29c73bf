//! Error types for airtable-backup
//!
//! One variant per failure class. Authentication and discovery errors are
//! fatal to the run; record-fetch and download errors are caught at the
//! table/attachment boundary, logged, and absorbed so sibling work proceeds.

use thiserror::Error;

/// Result type alias for airtable-backup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for airtable-backup
#[derive(Debug, Error)]
pub enum Error {
    /// Login did not yield the post-login redirect marker
    ///
    /// The login endpoint answers 200 for both outcomes; the marker in the
    /// response body is the only success signal.
    #[error("authentication failed: login response does not contain the post-login redirect marker")]
    Authentication,

    /// An expected pattern was not found in a fetched page
    ///
    /// Raised when the CSRF token, the embedded `initData` blob, or a
    /// base's API key cannot be located. During key resolution this usually
    /// means the session expired or the page shape changed.
    #[error("could not find {what} in the fetched page")]
    Parse {
        /// What was being looked for (e.g., "CSRF token")
        what: &'static str,
    },

    /// A table ID referenced by the visible-table ordering has no entry in
    /// the table name map
    #[error("table {table_id} is listed in the visible-table order but missing from the table map")]
    UnknownTable {
        /// The unresolvable table ID
        table_id: String,
    },

    /// A service endpoint answered with a non-success status
    #[error("API error: status {status}: {body}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Response body text, as far as it could be read
        body: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An extraction pattern failed to compile
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
