//! JSON encoding and decoding policy

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::HttpError;

/// Media type every JSON entity is sent and matched with
pub const APPLICATION_JSON: &str = "application/json";

static SHARED_CODEC: Lazy<JsonCodec> = Lazy::new(JsonCodec::default);

/// JSON codec used for request bodies and response decoding
///
/// Unknown fields in a payload are always ignored unless the target type opts
/// into `#[serde(deny_unknown_fields)]` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    omit_null_fields: bool,
    omit_null_map_values: bool,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self {
            omit_null_fields: true,
            omit_null_map_values: true,
        }
    }
}

impl JsonCodec {
    /// The process-wide default codec
    pub fn shared() -> Self {
        *SHARED_CODEC
    }

    /// Drop `null` object members when serializing
    pub fn omit_null_fields(mut self, omit: bool) -> Self {
        self.omit_null_fields = omit;
        self
    }

    /// Drop `null` object members from a payload before decoding it
    pub fn omit_null_map_values(mut self, omit: bool) -> Self {
        self.omit_null_map_values = omit;
        self
    }

    /// Serialize `value` to a JSON string
    pub fn encode<T>(&self, value: &T) -> Result<String, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let mut tree =
            serde_json::to_value(value).map_err(|e| HttpError::Serialization(e.to_string()))?;
        if self.omit_null_fields {
            strip_nulls(&mut tree);
        }
        serde_json::to_string(&tree).map_err(|e| HttpError::Serialization(e.to_string()))
    }

    /// Decode a JSON payload into `T`
    pub fn decode<T>(&self, bytes: &[u8]) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let mut tree: Value = serde_json::from_slice(bytes)?;
        if self.omit_null_map_values {
            strip_nulls(&mut tree);
        }
        Ok(serde_json::from_value(tree)?)
    }
}

/// Remove `null` members from every object in the tree. Array elements stay.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// True when `content_type` names the JSON media type, ignoring parameters
pub(crate) fn is_json(content_type: &str) -> bool {
    essence(content_type).eq_ignore_ascii_case(APPLICATION_JSON)
}

/// The `type/subtype` part of a content type value
pub(crate) fn essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
}
