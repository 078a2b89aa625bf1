//! Domain module - core entities and constants for planning applications.

pub mod constants;
pub mod record;

pub use record::PlanningApplicationRecord;
