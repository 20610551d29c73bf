//! Paged record retrieval through the record API
//!
//! Uses the per-base API key as a bearer token. Pages are fetched strictly
//! sequentially, following the `offset` cursor until the service stops
//! returning one, with a fixed delay before each follow-up page to stay
//! under the service's rate limit. Records pass through as raw JSON values;
//! their field shape is owned entirely by the service.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// One page of the record listing endpoint
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Value>,
    /// Cursor for the next page; absent on the last page
    offset: Option<String>,
}

/// Fetch every record of a table, in service order.
///
/// Any page failure — transport error or non-success status — aborts the
/// whole table fetch; there is no partial result and no retry.
pub async fn fetch_records(
    config: &Config,
    client: &reqwest::Client,
    api_key: &str,
    base_id: &str,
    table_id: &str,
) -> Result<Vec<Value>> {
    let url = format!(
        "{}/v0/{base_id}/{table_id}",
        config.api_base_url.trim_end_matches('/')
    );

    let mut records = Vec::new();
    let mut offset: Option<String> = None;

    loop {
        if offset.is_some() {
            tokio::time::sleep(config.page_delay).await;
        }

        let mut request = client.get(&url).bearer_auth(api_key);
        if let Some(cursor) = &offset {
            request = request.query(&[("offset", cursor)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let page: RecordPage = response.json().await?;
        let fetched = page.records.len();
        records.extend(page.records);
        tracing::trace!(base_id, table_id, fetched, total = records.len(), "Record page fetched");

        match page.offset {
            Some(cursor) => offset = Some(cursor),
            None => break,
        }
    }

    Ok(records)
}
