//! On-disk backup layout and run orchestration
//!
//! Directory layout, one fresh tree per base per run:
//!
//! ```text
//! <root>/<baseId>/<ISO 8601 timestamp>/
//!     <tableId>.json      one pretty-printed file per table
//!     apiDocs.html        the raw documentation page
//!     attachments/        one file per attachment, <id><original extension>
//! ```
//!
//! Failure policy: per-table and per-attachment failures are logged and
//! absorbed so sibling work proceeds; directory creation and apiDocs
//! writes are fatal for their base. Every table future and attachment
//! download is joined before a base is reported complete, so a finished
//! [`run`] means all writes have landed.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::api_docs;
use crate::attachments::{self, Attachment};
use crate::config::Config;
use crate::discover::{self, ApiInfo, Base, TableRef};
use crate::error::{Error, Result};
use crate::records;
use crate::session::Session;

/// Create a directory and any missing parents; an existing directory is a
/// no-op, never an error.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

/// Serialize records verbatim to `<dir>/<tableId>.json`, pretty-printed.
pub async fn write_table(dir: &Path, table_id: &str, records: &[Value]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;
    tokio::fs::write(dir.join(format!("{table_id}.json")), json).await?;
    Ok(())
}

/// Write the raw API documentation HTML to `<dir>/apiDocs.html`.
pub async fn write_api_docs(dir: &Path, html: &str) -> Result<()> {
    tokio::fs::write(dir.join("apiDocs.html"), html).await?;
    Ok(())
}

/// Download attachments into `<dir>/attachments/` with bounded concurrency.
///
/// Individual download failures are logged and skipped; the remaining
/// downloads proceed. Returns the number of files written. ID collisions
/// silently overwrite the earlier file of the same derived name.
pub async fn download_attachments(
    config: &Config,
    client: &reqwest::Client,
    dir: &Path,
    attachments: &[Attachment],
) -> Result<usize> {
    if attachments.is_empty() {
        return Ok(0);
    }

    let attachments_dir = dir.join("attachments");
    ensure_dir(&attachments_dir).await?;

    let outcomes: Vec<bool> = stream::iter(attachments)
        .map(|attachment| {
            let client = client.clone();
            let path = attachments_dir.join(attachment.disk_name());
            async move {
                match download_one(&client, &attachment.url, &path).await {
                    Ok(()) => true,
                    Err(error) => {
                        tracing::error!(
                            id = %attachment.id,
                            url = %attachment.url,
                            %error,
                            "Attachment download failed, skipping"
                        );
                        false
                    }
                }
            }
        })
        .buffer_unordered(config.max_concurrent_downloads.max(1))
        .collect()
        .await;

    Ok(outcomes.into_iter().filter(|written| *written).count())
}

/// Fetch one attachment URL as bytes and write it to `path`.
async fn download_one(client: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Api {
            status: response.status().as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    let bytes = response.bytes().await?;
    tokio::fs::write(path, &bytes).await?;
    Ok(())
}

/// Everything a single table backup needs about its surroundings
struct BaseBackupContext<'a> {
    config: &'a Config,
    api_client: &'a reqwest::Client,
    dir: &'a Path,
    base_id: &'a str,
    base_name: &'a str,
    api_key: &'a str,
}

/// Back up one table: fetch all records, write the JSON file, then pull
/// attachments when enabled. Failures are logged here and never cross this
/// boundary to sibling tables.
async fn backup_table(ctx: &BaseBackupContext<'_>, table: &TableRef) {
    let records = match records::fetch_records(
        ctx.config,
        ctx.api_client,
        ctx.api_key,
        ctx.base_id,
        &table.id,
    )
    .await
    {
        Ok(records) => records,
        Err(error) => {
            tracing::error!(
                base = %ctx.base_name,
                table = %table.name,
                %error,
                "Record fetch failed, skipping table"
            );
            return;
        }
    };

    if let Err(error) = write_table(ctx.dir, &table.id, &records).await {
        tracing::error!(
            base = %ctx.base_name,
            table = %table.name,
            %error,
            "Could not write table file"
        );
        return;
    }
    tracing::info!(
        base = %ctx.base_name,
        table = %table.name,
        records = records.len(),
        "Table backed up"
    );

    if !ctx.config.download_attachments {
        return;
    }
    let attachments = attachments::extract_attachments(&records);
    if attachments.is_empty() {
        return;
    }
    match download_attachments(ctx.config, ctx.api_client, ctx.dir, &attachments).await {
        Ok(written) => tracing::info!(
            base = %ctx.base_name,
            table = %table.name,
            files = written,
            total = attachments.len(),
            "Attachments downloaded"
        ),
        Err(error) => tracing::error!(
            base = %ctx.base_name,
            table = %table.name,
            %error,
            "Could not prepare the attachments directory"
        ),
    }
}

/// Back up one base into a fresh timestamped directory.
///
/// Writes the documentation HTML, then runs every table concurrently and
/// joins them all before returning — a completed call means every table
/// file and attachment write for this base has finished. Returns the
/// created directory.
pub async fn backup_base(
    config: &Config,
    api_client: &reqwest::Client,
    base_id: &str,
    base: &Base,
    api_info: &ApiInfo,
) -> Result<PathBuf> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let dir = config.backup_root.join(base_id).join(&timestamp);
    ensure_dir(&dir).await?;
    write_api_docs(&dir, &api_info.docs_html).await?;

    let ctx = BaseBackupContext {
        config,
        api_client,
        dir: &dir,
        base_id,
        base_name: &base.name,
        api_key: &api_info.api_key,
    };
    futures::future::join_all(base.tables.iter().map(|table| backup_table(&ctx, table))).await;

    tracing::info!(
        base = %base.name,
        tables = base.tables.len(),
        dir = %dir.display(),
        "Base backup complete"
    );
    Ok(dir)
}

/// Log in and build the full base catalog.
///
/// With `fetch_api_info` enabled (the default), each base's documentation
/// page is fetched and its API key resolved; a base whose key cannot be
/// resolved keeps `api_info: None`, is logged, and does not disturb its
/// siblings. With it disabled, the catalog carries names and table lists
/// only.
pub async fn discover_all(
    config: &Config,
    email: &str,
    password: &str,
) -> Result<(Session, Vec<(String, Base)>)> {
    let session = Session::login(config, email, password).await?;
    let mut bases = discover::discover_bases(session.init_data())?;

    if config.fetch_api_info {
        for (base_id, base) in &mut bases {
            match api_docs::resolve_api_key(&session, base_id).await {
                Ok(api_info) => base.api_info = Some(api_info),
                Err(error) => tracing::error!(
                    base = %base.name,
                    base_id = %base_id,
                    %error,
                    "API key resolution failed, skipping base"
                ),
            }
        }
    }

    Ok((session, bases))
}

/// Run a full backup: log in, discover every base, resolve keys, and back
/// up each base in turn.
///
/// Bases without a resolved key are skipped; table-level and
/// attachment-level failures are logged and absorbed and do not affect the
/// result. The future completes only after every table and attachment
/// write has finished.
pub async fn run(config: &Config, email: &str, password: &str) -> Result<()> {
    let (_session, bases) = discover_all(config, email, password).await?;
    tracing::info!(bases = bases.len(), "Bases discovered");

    let api_client = reqwest::Client::new();
    for (base_id, base) in &bases {
        let Some(api_info) = &base.api_info else {
            tracing::warn!(
                base = %base.name,
                base_id = %base_id,
                "No API key resolved for base, skipping"
            );
            continue;
        };
        backup_base(config, &api_client, base_id, base, api_info).await?;
    }

    Ok(())
}
