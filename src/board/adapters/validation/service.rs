//! Default document validator.

use super::rules;
use crate::board::{
    domain::{BoardState, FieldError},
    ports::{DocumentValidator, ValidationOutcome},
};
use serde_json::Value;

/// Rule-based validator for imported board documents.
///
/// Runs every rule first, then decodes the document; a decoding failure
/// that slipped past the rules is reported against the document root.
///
/// # Examples
///
/// ```
/// use micro_kanban::board::adapters::SchemaDocumentValidator;
/// use micro_kanban::board::ports::DocumentValidator;
/// use serde_json::json;
///
/// let validator = SchemaDocumentValidator::new();
/// let document = json!({ "tasks": [], "auditLog": [], "extendedMode": { "enabled": false } });
/// assert!(validator.validate(&document).is_ok());
///
/// let errors = validator
///     .validate(&json!({ "tasks": [], "auditLog": [] }))
///     .unwrap_err();
/// assert_eq!(errors[0].path, "extendedMode");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaDocumentValidator;

impl SchemaDocumentValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentValidator for SchemaDocumentValidator {
    fn validate(&self, document: &Value) -> ValidationOutcome {
        let errors = rules::validate_board(document);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value::<BoardState>(document.clone())
            .map_err(|err| vec![FieldError::new("$", err.to_string())])
    }
}
