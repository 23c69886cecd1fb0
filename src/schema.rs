// Column-name configuration
// The scorecard workbooks went through two naming generations. Instead of a
// loader class per generation, the loader takes an explicit mapping from
// canonical fields to the column names actually present in the sheet.

/// Registry and course-description sheets have a single stable naming.
pub mod fixed {
    /// Name of the course registry sheet.
    pub const COURSES_SHEET: &str = "Courses";
    pub const COURSE_CODE: &str = "Course Code";
    pub const COURSE_NAME: &str = "Course Name";

    /// Name of the round registry sheet.
    pub const ROUNDS_SHEET: &str = "Rounds";
    pub const ROUND_CODE: &str = "Round Code";
    pub const ROUND_DATE: &str = "Date";

    // Per-course hole description columns
    pub const HOLE: &str = "Hole";
    pub const YARDAGE: &str = "Yardage";
    pub const PAR: &str = "Par";
    pub const HANDICAP: &str = "Handicap";
}

/// Maps the canonical scorecard fields to the column names used in a given
/// workbook generation. Passed into the round loader at construction so the
/// mapping is explicit configuration, not hidden class state.
#[derive(Debug, Clone)]
pub struct ScorecardColumns {
    pub hole: String,
    pub score: String,
    pub tee_fairway_hit: String,
    pub non_tee_fairway_hits: String,
    pub chips: String,
    pub putts: String,
}

impl ScorecardColumns {
    /// Current short-name generation.
    pub fn canonical() -> Self {
        ScorecardColumns {
            hole: "Hole".to_string(),
            score: "Score".to_string(),
            tee_fairway_hit: "TFH".to_string(),
            non_tee_fairway_hits: "NTFH".to_string(),
            chips: "Chips".to_string(),
            putts: "Putts".to_string(),
        }
    }

    /// Older workbooks spelled the fairway columns out.
    pub fn legacy() -> Self {
        ScorecardColumns {
            hole: "Hole".to_string(),
            score: "Score".to_string(),
            tee_fairway_hit: "Tee Fairway".to_string(),
            non_tee_fairway_hits: "Fairway Hits".to_string(),
            chips: "Chips".to_string(),
            putts: "Putts".to_string(),
        }
    }
}

impl Default for ScorecardColumns {
    fn default() -> Self {
        Self::canonical()
    }
}
