//! Free-text query filtering for board tasks.
//!
//! A query is a whitespace-separated list of tokens:
//!
//! - `tag:<value>`: task carries the tag (case-insensitive, repeatable)
//! - `p:<low|medium|high>`: priority (last occurrence wins)
//! - `due:overdue` / `due:week`: due-date bucket (last occurrence wins)
//! - `est:<op><minutes>` with `op` one of `<`, `<=`, `>`, `>=`, `=`
//! - anything else is joined with single spaces into a substring that must
//!   appear in the title or description (case-insensitive)
//!
//! All present filter classes must match. The empty query matches every
//! task.

mod filter;
mod parser;

pub use filter::filter_tasks;
pub use parser::{BoardQuery, Comparison, DueFilter, EstimateFilter};
