/// Storage serialization utilities for chrome.storage.sync
///
/// Each URL is its own key; the value is the URL's tag set as a JSON array of
/// strings. Older records hold the same array encoded as a JSON string.

use crate::tags::TagSet;
use serde::Deserialize;
use serde_json::Value;

/// A value found under a URL key
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTags {
    Tags(TagSet),
    Encoded(String),
}

/// Decode the stored value for one URL. `null` means nothing was saved yet.
pub fn decode_stored_tags(value: Value) -> Result<Option<TagSet>, String> {
    if value.is_null() {
        return Ok(None);
    }

    let stored: StoredTags = serde_json::from_value(value)
        .map_err(|e| format!("Unrecognized stored tags: {}", e))?;

    match stored {
        StoredTags::Tags(tags) => Ok(Some(tags)),
        StoredTags::Encoded(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| format!("Failed to parse encoded tags: {}", e)),
    }
}

/// The value written under a URL key
pub fn encode_tags(tags: &TagSet) -> Result<Value, String> {
    serde_json::to_value(tags).map_err(|e| format!("Failed to serialize tags: {}", e))
}
