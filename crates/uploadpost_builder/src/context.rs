//! Shared inputs for field-resolution steps.

use crate::{BinaryResolver, rules_for};
use derive_getters::Getters;
use uploadpost_core::{Fields, Operation, PayloadValue, Platform};
use uploadpost_error::ValidationError;

/// Entries produced by one resolution step, in order.
pub type Entries = Vec<(String, PayloadValue)>;

/// A field-resolution step: reads the context, returns payload entries.
pub type Step = fn(&StepContext<'_>) -> Result<Entries, ValidationError>;

/// Read-only view of everything a resolution step may consult.
#[derive(Getters)]
pub struct StepContext<'a> {
    /// Operation being built
    operation: Operation,
    /// Platform selection after allow-list filtering
    platforms: Vec<Platform>,
    /// User-supplied field values
    fields: &'a Fields,
    /// Host binary resolver
    #[getter(skip)]
    binaries: &'a dyn BinaryResolver,
}

impl<'a> StepContext<'a> {
    /// Create a context for one build.
    pub fn new(
        operation: Operation,
        platforms: Vec<Platform>,
        fields: &'a Fields,
        binaries: &'a dyn BinaryResolver,
    ) -> Self {
        Self {
            operation,
            platforms,
            fields,
            binaries,
        }
    }

    /// Host binary resolver.
    pub fn binaries(&self) -> &'a dyn BinaryResolver {
        self.binaries
    }

    /// True when the platform survived filtering.
    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// True when the generic description goes out under the shared key,
    /// which requires at least one selected platform that reads it.
    pub fn generic_description_sent(&self) -> bool {
        self.fields.text("description").is_some()
            && self
                .platforms
                .iter()
                .any(|platform| rules_for(*platform).consumes_description())
    }

    /// Shorthand for a non-empty text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.text(name)
    }

    /// Shorthand for a boolean field.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.fields.flag(name)
    }

    /// Shorthand for an integer field that must parse when present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the value when it is not a whole number.
    pub fn try_integer(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        self.fields.try_integer(name)
    }
}
