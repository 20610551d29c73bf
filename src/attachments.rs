//! Attachment extraction from record fields
//!
//! Record fields have no schema on this side; a field is treated as an
//! attachment field purely by shape — a non-empty array whose first element
//! carries both `filename` and `url`. Everything else (scalars, empty
//! arrays, arrays of other objects) contributes nothing.

use std::path::Path;

use serde_json::Value;

/// A downloadable file referenced by a record field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Service-assigned attachment ID; synthesized from the filename stem
    /// when the service omits one
    pub id: String,
    /// Original filename, used only to derive the on-disk extension
    pub filename: String,
    /// Source URL
    pub url: String,
}

impl Attachment {
    /// On-disk filename: the attachment ID plus the original extension.
    #[must_use]
    pub fn disk_name(&self) -> String {
        match Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", self.id, ext),
            None => self.id.clone(),
        }
    }
}

/// Scan records for attachment fields and flatten them into one list.
///
/// Output order is record order, then the record's own field order, then
/// within-field order — deterministic for a fixed input.
#[must_use]
pub fn extract_attachments(records: &[Value]) -> Vec<Attachment> {
    let mut attachments = Vec::new();

    for record in records {
        let Some(fields) = record.get("fields").and_then(Value::as_object) else {
            continue;
        };
        for value in fields.values() {
            let Some(items) = value.as_array() else {
                continue;
            };
            let looks_like_attachments = items.first().is_some_and(|first| {
                first.get("filename").and_then(Value::as_str).is_some()
                    && first.get("url").and_then(Value::as_str).is_some()
            });
            if !looks_like_attachments {
                continue;
            }
            for item in items {
                let (Some(filename), Some(url)) = (
                    item.get("filename").and_then(Value::as_str),
                    item.get("url").and_then(Value::as_str),
                ) else {
                    continue;
                };
                let id = item
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| filename_stem(filename));
                attachments.push(Attachment {
                    id,
                    filename: filename.to_string(),
                    url: url.to_string(),
                });
            }
        }
    }

    attachments
}

/// Filename without its extension, for synthesizing missing attachment IDs.
fn filename_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename)
        .to_string()
}
