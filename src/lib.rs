//! # airtable-backup
//!
//! Backs up every Airtable base reachable from a web login: all records of
//! every visible table, the base's API documentation page, and any file
//! attachments referenced by record fields, into a timestamped directory
//! tree on local disk.
//!
//! The pipeline is deliberately linear: web-session login → base/table
//! discovery from the login flow's embedded `initData` → per-base API key
//! recovery from the documentation page → rate-limited paged record
//! retrieval → attachment extraction and bounded-concurrency download →
//! on-disk layout. The web session (not the public API token surface) is
//! what grants access to everything the account can see.
//!
//! ## Quick Start
//!
//! ```no_run
//! use airtable_backup::{Config, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     run(&config, "me@example.com", "hunter2").await?;
//!     Ok(())
//! }
//! ```
//!
//! Discovery is usable on its own when only the catalog is wanted:
//!
//! ```no_run
//! use airtable_backup::{Config, discover_all};
//!
//! # async fn example() -> Result<(), airtable_backup::Error> {
//! let config = Config { fetch_api_info: false, ..Config::default() };
//! let (_session, bases) = discover_all(&config, "me@example.com", "hunter2").await?;
//! for (base_id, base) in &bases {
//!     println!("{base_id}: {} ({} tables)", base.name, base.tables.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Per-base API key recovery
pub mod api_docs;
/// Attachment extraction from record fields
pub mod attachments;
/// On-disk backup layout and run orchestration
pub mod backup;
/// Configuration types
pub mod config;
/// Base and table discovery
pub mod discover;
/// Error types
pub mod error;
/// Paged record retrieval
pub mod records;
/// Web-session authentication
pub mod session;

// Re-export commonly used types
pub use attachments::{Attachment, extract_attachments};
pub use backup::{backup_base, discover_all, download_attachments, run};
pub use config::Config;
pub use discover::{ApiInfo, Base, TableRef, discover_bases};
pub use error::{Error, Result};
pub use session::Session;
