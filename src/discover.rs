//! Base and table discovery from the login `initData` blob
//!
//! Pure transformation: no network calls. The blob's `rawApplications`
//! entries become [`Base`] values whose table lists are restricted to, and
//! ordered by, each application's `visibleTableOrder`, with display names
//! resolved from `rawTables`.

use serde_json::Value;

use crate::error::{Error, Result};

/// One table within a base: ID plus display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    /// Service-assigned table ID, scoped to the owning base
    pub id: String,
    /// Display name
    pub name: String,
}

/// API documentation artifacts resolved for a base
#[derive(Clone, Debug)]
pub struct ApiInfo {
    /// Raw HTML of the base's API documentation page
    pub docs_html: String,
    /// Per-base API key scraped from the documentation page
    pub api_key: String,
}

/// A discovered base
#[derive(Clone, Debug)]
pub struct Base {
    /// Display name
    pub name: String,
    /// Tables in the service's visible order
    pub tables: Vec<TableRef>,
    /// Documentation HTML and API key, present once key resolution has run
    /// for this base
    pub api_info: Option<ApiInfo>,
}

impl Base {
    /// Display name for a table ID taken from this base's table list.
    ///
    /// Always `Some` for IDs obtained from [`Base::tables`].
    pub fn table_name(&self, table_id: &str) -> Option<&str> {
        self.tables
            .iter()
            .find(|table| table.id == table_id)
            .map(|table| table.name.as_str())
    }
}

/// Build the base catalog out of `initData`.
///
/// A `visibleTableOrder` entry with no `rawTables` counterpart is a hard
/// error, never a silent drop: it means the blob's shape changed and any
/// backup built from it would be missing tables.
pub fn discover_bases(init_data: &Value) -> Result<Vec<(String, Base)>> {
    let raw_applications = init_data
        .get("rawApplications")
        .and_then(Value::as_object)
        .ok_or(Error::Parse { what: "rawApplications" })?;
    let raw_tables = init_data
        .get("rawTables")
        .and_then(Value::as_object)
        .ok_or(Error::Parse { what: "rawTables" })?;

    let mut bases = Vec::with_capacity(raw_applications.len());
    for (base_id, application) in raw_applications {
        let name = application
            .get("name")
            .and_then(Value::as_str)
            .ok_or(Error::Parse { what: "application name" })?
            .to_string();

        let visible_order = application
            .get("visibleTableOrder")
            .and_then(Value::as_array)
            .ok_or(Error::Parse { what: "visibleTableOrder" })?;

        let mut tables = Vec::with_capacity(visible_order.len());
        for entry in visible_order {
            let table_id = entry
                .as_str()
                .ok_or(Error::Parse { what: "table ID in visibleTableOrder" })?;
            let table_name = raw_tables
                .get(table_id)
                .and_then(|table| table.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| Error::UnknownTable {
                    table_id: table_id.to_string(),
                })?;
            tables.push(TableRef {
                id: table_id.to_string(),
                name: table_name.to_string(),
            });
        }

        bases.push((
            base_id.clone(),
            Base {
                name,
                tables,
                api_info: None,
            },
        ));
    }

    Ok(bases)
}
