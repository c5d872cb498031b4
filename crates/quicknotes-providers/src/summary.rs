//! Normalized summary result.
//!
//! A provider reply is either a JSON object (returned as-is plus `_metadata`)
//! or anything else (wrapped as `{"raw": ..., "_metadata": {..., "note"}}`).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Note attached when the reply could not be parsed as JSON.
pub const NOT_JSON_NOTE: &str = "Response was not valid JSON";
/// Note attached when the reply parsed as JSON but not as an object.
pub const NOT_OBJECT_NOTE: &str = "Response was not a JSON object";

/// Key under which metadata is attached to every result.
pub const METADATA_KEY: &str = "_metadata";

/// Which provider answered, with which model.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SummaryMetadata {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The normalized result of one summary call.
#[derive(Clone, Debug, PartialEq)]
pub enum SummaryResult {
    /// The reply was a JSON object (expected keys: `summary`, `key_points`,
    /// `quiz_questions`, not enforced).
    Structured {
        payload: Map<String, Value>,
        metadata: SummaryMetadata,
    },
    /// The reply was not a JSON object; the untouched text is kept.
    Raw { text: String, metadata: SummaryMetadata },
}

impl SummaryResult {
    /// Normalize a provider reply.
    pub fn from_reply(reply: String, provider: &str, model: &str) -> Self {
        let metadata = |note: Option<&str>| SummaryMetadata {
            provider: provider.to_string(),
            model: model.to_string(),
            note: note.map(String::from),
        };

        match serde_json::from_str::<Value>(&reply) {
            Ok(Value::Object(payload)) => SummaryResult::Structured {
                payload,
                metadata: metadata(None),
            },
            Ok(_) => SummaryResult::Raw {
                text: reply,
                metadata: metadata(Some(NOT_OBJECT_NOTE)),
            },
            Err(_) => SummaryResult::Raw {
                text: reply,
                metadata: metadata(Some(NOT_JSON_NOTE)),
            },
        }
    }

    pub fn metadata(&self) -> &SummaryMetadata {
        match self {
            SummaryResult::Structured { metadata, .. } | SummaryResult::Raw { metadata, .. } => {
                metadata
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, SummaryResult::Structured { .. })
    }

    /// Render as the JSON object returned to callers.
    pub fn to_json(&self) -> Value {
        // Serializing a map of `Value`s into a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for SummaryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SummaryResult::Structured { payload, metadata } => {
                // A `_metadata` key in the reply is replaced by ours.
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in payload.iter().filter(|(k, _)| k.as_str() != METADATA_KEY) {
                    map.serialize_entry(key, value)?;
                }
                map.serialize_entry(METADATA_KEY, metadata)?;
                map.end()
            }
            SummaryResult::Raw { text, metadata } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("raw", text)?;
                map.serialize_entry(METADATA_KEY, metadata)?;
                map.end()
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
