//! Structural validation of imported board documents.

pub mod rules;
pub mod service;

pub use service::SchemaDocumentValidator;
