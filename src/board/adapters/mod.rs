//! Adapter implementations of the board ports.

pub mod file;
pub mod memory;
pub mod validation;

pub use file::FileBoardStore;
pub use memory::InMemoryBoardStore;
pub use validation::SchemaDocumentValidator;
