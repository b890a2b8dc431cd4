//! Validator port for externally supplied board documents.

use crate::board::domain::{BoardState, FieldError};
use serde_json::Value;

/// Result of validating a document: the decoded board, or every offending
/// field.
pub type ValidationOutcome = Result<BoardState, Vec<FieldError>>;

/// Structural validation of an imported document.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Collect all field errors before returning (not fail-fast)
/// - Never return an empty error list
/// - Be stateless and thread-safe
pub trait DocumentValidator: Send + Sync {
    /// Validates a parsed JSON document and decodes it into a board.
    ///
    /// # Errors
    ///
    /// Returns the list of field errors when the document does not describe
    /// a valid board.
    fn validate(&self, document: &Value) -> ValidationOutcome;
}
