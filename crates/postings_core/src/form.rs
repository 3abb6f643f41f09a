use crate::{DocumentField, DocumentRecord};

/// Message shown whenever any required field is blank.
pub const VALIDATION_MESSAGE: &str = "All fields are mandatory. Please fill in all the fields.";

/// At least one required field was empty after trimming.
///
/// Carries the offending fields for logging, but displays as a single
/// user-facing sentence rather than a per-field list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError {
    pub blank: Vec<DocumentField>,
}

/// Every required field must be non-empty after trimming.
pub fn validate_record(record: &DocumentRecord) -> Result<(), ValidationError> {
    let blank = record.blank_fields();
    if blank.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { blank })
    }
}

/// The document-entry form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    record: DocumentRecord,
    dirty: bool,
    submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &DocumentRecord {
        &self.record
    }

    pub fn value(&self, field: DocumentField) -> &str {
        self.record.get(field)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Shallow-merge setter: replaces one field. Returns `false` and leaves the
    /// form untouched while a submission is in flight.
    pub fn set_field(&mut self, field: DocumentField, value: impl Into<String>) -> bool {
        if self.submitting {
            return false;
        }
        self.record.set(field, value);
        self.dirty = true;
        true
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.record)
    }

    pub(crate) fn lock(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.submitting = false;
    }

    /// Every field back to the empty string, flags cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
