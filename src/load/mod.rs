//! Teaching-load classification and aggregation.
//!
//! This module turns raw scraped section rows into the per-instructor
//! summary table: course-level classification, instructor name splitting,
//! (level x supervision) bucketing, and note collection, against the fixed
//! output column schema.

pub mod aggregate;
pub mod classify;
pub mod names;
pub mod notes;
pub mod schema;
pub mod types;
