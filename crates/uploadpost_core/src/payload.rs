//! Payload values and the ordered payload container.

use crate::PayloadKind;
use derive_getters::Getters;
use serde_json::{Map, Value as JsonValue, json};

/// A binary file supplied by the host runtime.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct Attachment {
    /// Raw file contents
    bytes: Vec<u8>,
    /// File name sent in the multipart part
    filename: String,
    /// MIME type, when the host knows it
    content_type: Option<String>,
}

impl Attachment {
    /// Create a new attachment.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            content_type,
        }
    }

    /// Summary used when rendering a request without its bytes.
    pub fn describe(&self) -> JsonValue {
        json!({
            "filename": self.filename,
            "contentType": self.content_type,
            "size": self.bytes.len(),
        })
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// One element of a "file or URL" media field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    /// Remote media the API downloads itself
    Url(String),
    /// Uploaded file contents
    File(Attachment),
}

/// A value in a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    /// Plain string
    Text(String),
    /// Boolean flag, rendered per container
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// List of strings, sent under an array-style key
    List(Vec<String>),
    /// Single binary file
    File(Attachment),
    /// List of media items mixing URLs and files
    Media(Vec<MediaItem>),
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value)
    }
}

impl From<Vec<String>> for PayloadValue {
    fn from(value: Vec<String>) -> Self {
        PayloadValue::List(value)
    }
}

impl From<Attachment> for PayloadValue {
    fn from(value: Attachment) -> Self {
        PayloadValue::File(value)
    }
}

impl From<Vec<MediaItem>> for PayloadValue {
    fn from(value: Vec<MediaItem>) -> Self {
        PayloadValue::Media(value)
    }
}

impl PayloadValue {
    /// Render the value as JSON, summarising binary content.
    pub fn to_json(&self) -> JsonValue {
        match self {
            PayloadValue::Text(s) => JsonValue::String(s.clone()),
            PayloadValue::Bool(b) => JsonValue::Bool(*b),
            PayloadValue::Integer(n) => JsonValue::from(*n),
            PayloadValue::List(items) => JsonValue::from(items.clone()),
            PayloadValue::File(file) => file.describe(),
            PayloadValue::Media(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| match item {
                        MediaItem::Url(url) => JsonValue::String(url.clone()),
                        MediaItem::File(file) => file.describe(),
                    })
                    .collect(),
            ),
        }
    }

    /// Render a scalar as the string form used in query strings and forms.
    ///
    /// Returns `None` for lists and binary content.
    pub fn as_form_text(&self) -> Option<String> {
        match self {
            PayloadValue::Text(s) => Some(s.clone()),
            PayloadValue::Bool(b) => Some(b.to_string()),
            PayloadValue::Integer(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Frozen, ordered mapping of payload keys to values.
///
/// Keys keep the position of their first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    entries: Vec<(String, PayloadValue)>,
}

impl Payload {
    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a text value by key.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(PayloadValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// True when the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        JsonValue::Object(map)
    }

    /// Render scalar entries as query-string pairs; lists are comma-joined.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| match v {
                PayloadValue::List(items) => Some((k.clone(), items.join(","))),
                other => other.as_form_text().map(|text| (k.clone(), text)),
            })
            .collect()
    }
}

/// Immutable accumulator for payload entries.
///
/// Each call consumes the builder and returns a new one, so field-resolution
/// steps can be folded over without sharing mutable state. A later entry with
/// an existing key replaces the earlier value in place.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    entries: Vec<(String, PayloadValue)>,
}

impl PayloadBuilder {
    /// Start an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Add an entry only when a value is present.
    pub fn with_opt<V: Into<PayloadValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Add every entry of a step's output, in order.
    pub fn extend<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PayloadValue)>,
    {
        entries
            .into_iter()
            .fold(self, |builder, (key, value)| builder.with(key, value))
    }

    /// True when the key has been set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Entries accumulated so far.
    pub fn into_entries(self) -> Vec<(String, PayloadValue)> {
        self.entries
    }

    /// Freeze the payload for the given container.
    ///
    /// Multipart forms carry booleans as the literal strings `"true"` and
    /// `"false"`; JSON bodies and query strings keep them native.
    pub fn freeze(self, kind: PayloadKind) -> Payload {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, value)| match (kind, value) {
                (PayloadKind::MultipartForm, PayloadValue::Bool(b)) => {
                    (key, PayloadValue::Text(b.to_string()))
                }
                (_, value) => (key, value),
            })
            .collect();
        Payload { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_entries_replace_in_place() {
        let payload = PayloadBuilder::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3")
            .freeze(PayloadKind::JsonBody);
        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(payload.text("a"), Some("3"));
    }

    #[test]
    fn booleans_become_strings_only_for_multipart() {
        let form = PayloadBuilder::new()
            .with("flag", true)
            .freeze(PayloadKind::MultipartForm);
        assert_eq!(form.get("flag"), Some(&PayloadValue::Text("true".to_string())));

        let body = PayloadBuilder::new()
            .with("flag", false)
            .freeze(PayloadKind::JsonBody);
        assert_eq!(body.get("flag"), Some(&PayloadValue::Bool(false)));
        assert_eq!(body.to_json(), json!({ "flag": false }));
    }

    #[test]
    fn with_opt_skips_none() {
        let payload = PayloadBuilder::new()
            .with_opt("missing", None::<String>)
            .with_opt("present", Some(5i64))
            .freeze(PayloadKind::QueryString);
        assert!(!payload.contains_key("missing"));
        assert_eq!(payload.to_query_pairs(), vec![("present".to_string(), "5".to_string())]);
    }

    #[test]
    fn attachments_are_summarised_in_json() {
        let file = Attachment::new(vec![1, 2, 3], "clip.mp4", Some("video/mp4".to_string()));
        let payload = PayloadBuilder::new()
            .with("video", PayloadValue::File(file))
            .freeze(PayloadKind::MultipartForm);
        assert_eq!(
            payload.to_json(),
            json!({ "video": { "filename": "clip.mp4", "contentType": "video/mp4", "size": 3 } })
        );
    }
}
