//! JSON variant of the configuration patcher.

use serde_json::{Map, Value};

use crate::error::PatchError;

/// Rewrites a JSON configuration document so `server.url` and
/// `server.cleartext` point at the development server.
///
/// A missing `server` field is created; a `server` field holding anything
/// other than an object is replaced with a fresh object rather than merged.
/// Every other field of the document and of `server` is left untouched, in
/// its original order. The document is re-serialized with two-space
/// indentation.
///
/// # Errors
///
/// Returns [`PatchError::MalformedJson`] when the content does not parse or
/// the top-level value is not an object.
pub(crate) fn inject_server(content: &str, url: &str, filename: &str) -> Result<String, PatchError> {
    let mut document: Value = serde_json::from_str(content)
        .map_err(|e| PatchError::malformed_json(filename, e.to_string()))?;
    let root = document
        .as_object_mut()
        .ok_or_else(|| PatchError::malformed_json(filename, "top-level value is not an object"))?;

    let server = root
        .entry("server")
        .or_insert_with(|| Value::Object(Map::new()));
    if !server.is_object() {
        *server = Value::Object(Map::new());
    }
    if let Some(block) = server.as_object_mut() {
        block.insert("url".to_owned(), Value::String(url.to_owned()));
        block.insert("cleartext".to_owned(), Value::Bool(true));
    }

    serde_json::to_string_pretty(&document)
        .map_err(|e| PatchError::malformed_json(filename, e.to_string()))
}
