// Golftrack - Core Library
// Workbook ingestion, (round, hole) join, and derived per-hole stats.

pub mod course;
pub mod error;
pub mod round;
pub mod schema;
pub mod sheet;
pub mod source;
pub mod stats;
pub mod tracker;
pub mod tracking;

// Re-export commonly used types
pub use course::{CourseCatalog, CourseIdentity, HoleDescription};
pub use error::{Result, TrackerError};
pub use round::{RoundCatalog, RoundIdentity, ScorecardRow};
pub use schema::ScorecardColumns;
pub use sheet::{Cell, Sheet};
pub use source::{CsvWorkbook, MemoryWorkbook, SheetSource};
pub use stats::{
    derive_row, derive_table, fairway_hits, gir, non_tee_fairway_attempts, outcome,
    shots_to_green, DerivedStats, Outcome,
};
pub use tracker::{GolfTracker, TrackerOptions, TrackingRecord};
pub use tracking::{build_tracking_table, TrackingRow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
