//! Micro Kanban: the core of a single-user, three-column task board.
//!
//! The crate owns the board's data and rules. Rendering and input handling
//! belong to the host, which drives a [`board::services::BoardController`]
//! and reads back immutable snapshots.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, audit entries and the board snapshot, with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and document
//!   validation
//! - **Adapters**: In-memory and file-backed stores and the default
//!   document validator
//!
//! # Modules
//!
//! - [`board`]: Task repository, audit trail, reordering, query filtering
//!   and import merging

pub mod board;
