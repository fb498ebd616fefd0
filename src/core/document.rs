//! Canonical serialization shared by every model

use serde_json::Value;

/// A model that renders to its canonical nested key-value form.
///
/// Maps are insertion ordered, so the key order produced by `to_dict` is the
/// order written out by `to_json_pretty`.
pub trait Document {
    /// Convert to the nested key-value representation
    fn to_dict(&self) -> Value;

    /// Render as pretty-printed JSON
    fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_dict())
    }
}
