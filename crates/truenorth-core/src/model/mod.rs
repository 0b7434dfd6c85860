//! Record shapes consumed and produced by the engine
//!
//! The surrounding UI/storage layer owns persistence; the engine receives
//! immutable snapshots of these records and returns new derived values. The
//! only mutation helpers here (`Task::upsert_alignment`,
//! `Task::replace_alignments`) exist so the caller can apply engine output
//! to its own copies.

pub mod alignment;
pub mod goal;
pub mod milestone;
pub mod task;

pub use alignment::{Alignment, AlignmentTarget};
pub use goal::{Goal, GoalBuilder};
pub use milestone::Milestone;
pub use task::{category_stats, CategoryStats, Task};
