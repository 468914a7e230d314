//! Per-file metadata extraction
//!
//! Turns the text of one OpenAPI document into a [`SpecMetadata`] record.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::IndexError;

/// Order assigned to files without a numeric prefix
pub const DEFAULT_ORDER: u32 = 999;

/// Version assigned when `info.version` is missing
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Leading `<digits>-` ordering prefix
static ORDER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)-").expect("order prefix pattern is valid"));

/// Sidebar entry for one specification file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub order: u32,
}

impl SpecMetadata {
    /// Parse `content` as YAML and pull the `info` block out of it
    ///
    /// `file` is only used for error reporting; `id` becomes the record key
    /// and the title fallback.
    pub fn from_document(file: &str, id: &str, content: &str) -> Result<Self, IndexError> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| IndexError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        let info = document
            .get("info")
            .filter(|info| info.is_mapping())
            .ok_or_else(|| IndexError::Parse {
                file: file.to_string(),
                message: "document has no `info` object".to_string(),
            })?;

        Ok(Self {
            id: id.to_string(),
            title: info_field(info, "title").unwrap_or_else(|| id.to_string()),
            description: info_field(info, "description").unwrap_or_default(),
            version: info_field(info, "version").unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            order: order_from_filename(id),
        })
    }

    /// Index ordering: `order`, then `title` by code point, then `id`
    pub fn index_cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Read `info.<key>` as text; empty strings and non-scalars count as absent
fn info_field(info: &Value, key: &str) -> Option<String> {
    let text = match info.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

/// Sort position encoded in a file name such as `10-users`
///
/// Names without a prefix, or with one too large to represent, sort last.
pub fn order_from_filename(name: &str) -> u32 {
    ORDER_PREFIX
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_ORDER)
}
