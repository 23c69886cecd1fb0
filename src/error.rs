// Error taxonomy for the tracking pipeline
// Loaders fail fast: a malformed row would corrupt the (round, hole) key
// space downstream, so no row-skipping or partial tables are produced.

use thiserror::Error;

/// Errors raised while loading workbooks and building the tracking table.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A referenced per-entity sheet (course description, round scorecard)
    /// could not be resolved by the workbook source.
    #[error("Sheet not found: {name}")]
    MissingSheet { name: String },

    /// A field failed type coercion, an indicator token was unrecognized,
    /// a required column was absent, or a key constraint was violated.
    #[error("Schema error in sheet '{sheet}': {detail}")]
    Schema { sheet: String, detail: String },

    /// A scorecard row references a round id absent from the round registry.
    /// The join cannot be resolved, so the build aborts.
    #[error("Integrity error: {detail}")]
    Integrity { detail: String },

    /// The workbook collaborator failed to read or parse a sheet payload.
    #[error("Source error reading sheet '{name}': {cause}")]
    Source {
        name: String,
        #[source]
        cause: csv::Error,
    },
}

impl TrackerError {
    pub fn missing_sheet(name: impl Into<String>) -> Self {
        TrackerError::MissingSheet { name: name.into() }
    }

    pub fn schema(sheet: impl Into<String>, detail: impl Into<String>) -> Self {
        TrackerError::Schema {
            sheet: sheet.into(),
            detail: detail.into(),
        }
    }

    pub fn integrity(detail: impl Into<String>) -> Self {
        TrackerError::Integrity {
            detail: detail.into(),
        }
    }

    pub fn source(name: impl Into<String>, cause: csv::Error) -> Self {
        TrackerError::Source {
            name: name.into(),
            cause,
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_display() {
        let err = TrackerError::missing_sheet("R1");
        assert_eq!(err.to_string(), "Sheet not found: R1");
    }

    #[test]
    fn test_schema_display() {
        let err = TrackerError::schema("Rounds", "unparseable date 'tomorrow'");
        assert_eq!(
            err.to_string(),
            "Schema error in sheet 'Rounds': unparseable date 'tomorrow'"
        );
    }

    #[test]
    fn test_integrity_display() {
        let err = TrackerError::integrity("round 'R9' not in registry");
        assert_eq!(err.to_string(), "Integrity error: round 'R9' not in registry");
    }
}
