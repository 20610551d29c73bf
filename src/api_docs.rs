//! Per-base API key recovery
//!
//! Each base's API documentation page embeds the account's API key for that
//! base in a `data-api-key` attribute. The page is only served to an
//! authenticated session; the raw HTML is kept alongside the key so the
//! backup preserves the documentation as it looked at export time.

use crate::discover::ApiInfo;
use crate::error::{Error, Result};
use crate::session::{Session, capture};

/// `data-api-key` attribute on the documentation page
const API_KEY_PATTERN: &str = r#"data-api-key="([^"]+)""#;

/// Fetch a base's API documentation page and pull out the embedded key.
///
/// # Errors
///
/// [`Error::Parse`] if the page carries no `data-api-key` attribute —
/// typically an expired session or a changed page shape.
pub async fn resolve_api_key(session: &Session, base_id: &str) -> Result<ApiInfo> {
    let docs_html = session.get_page(&format!("{base_id}/api/docs")).await?;
    let api_key =
        capture(API_KEY_PATTERN, &docs_html)?.ok_or(Error::Parse { what: "data-api-key attribute" })?;

    tracing::debug!(base_id, "API key resolved");

    Ok(ApiInfo { docs_html, api_key })
}
