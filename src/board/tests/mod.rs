//! Unit tests for the board module.
//!
//! Tests are organised by component, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod import_tests;
mod support;
