//! User-supplied field values for one input record.

use crate::Platform;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uploadpost_error::{ValidationError, ValidationErrorKind};

/// Bag of parameter values keyed by the host's parameter names.
///
/// Absence is an expected case: every accessor returns `None` (or an empty
/// list) for missing, null, or empty values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, JsonValue>);

impl Fields {
    /// Create an empty field bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and the CLI.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Set a value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw JSON value for a parameter.
    pub fn raw(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Non-empty string value, trimmed. Numbers are rendered as text.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.raw(name)? {
            JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Required non-empty string value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::MissingField`] when the value is absent or empty.
    #[track_caller]
    pub fn require_text(&self, name: &str) -> Result<String, ValidationError> {
        self.text(name)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingField(name.to_string())))
    }

    /// Boolean value; accepts JSON booleans and the strings `true`/`false`.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.raw(name)? {
            JsonValue::Bool(b) => Some(*b),
            JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whole-number value; accepts JSON numbers and numeric strings.
    ///
    /// Fractional numbers are truncated toward zero.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.raw(name)? {
            JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whole-number value that must parse when present.
    ///
    /// Absent, null, and blank values yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::InvalidField`] naming the value when it
    /// is set but not a whole number.
    #[track_caller]
    pub fn try_integer(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        let value = match self.raw(name) {
            None => return Ok(None),
            Some(JsonValue::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        match self.integer(name) {
            Some(n) => Ok(Some(n)),
            None => Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: name.to_string(),
                value,
                reason: "expected a whole number".to_string(),
            })),
        }
    }

    /// List value from a JSON array of strings or a comma-separated string.
    ///
    /// Elements are trimmed and empty elements dropped.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        let items: Vec<String> = match self.raw(name) {
            Some(JsonValue::String(s)) => s.split(',').map(str::to_string).collect(),
            Some(JsonValue::Array(values)) => values
                .iter()
                .filter_map(|v| match v {
                    JsonValue::String(s) => Some(s.clone()),
                    JsonValue::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Platform multi-select value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::UnknownPlatform`] for identifiers
    /// outside the supported set.
    pub fn platforms(&self, name: &str) -> Result<Vec<Platform>, ValidationError> {
        let mut platforms = Vec::new();
        for item in self.string_list(name) {
            let platform = Platform::parse(&item)?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
        Ok(platforms)
    }
}

impl From<Map<String, JsonValue>> for Fields {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}
