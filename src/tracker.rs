// Tracker Facade
// Orchestrates the full pipeline: course load, round load, join, and
// (optionally) derivation. The facade owns the joined table; the loaders
// have no lifecycle beyond their load call.

use serde::Serialize;
use tracing::info;

use crate::course::CourseCatalog;
use crate::error::Result;
use crate::round::RoundCatalog;
use crate::schema::ScorecardColumns;
use crate::source::SheetSource;
use crate::stats::{derive_table, DerivedStats};
use crate::tracking::{build_tracking_table, TrackingRow};

/// Load-time options. `derive` is all derived columns or none; there is no
/// partial-application mode.
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub derive: bool,
    pub columns: ScorecardColumns,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        TrackerOptions {
            derive: true,
            columns: ScorecardColumns::canonical(),
        }
    }
}

/// One output record: the joined row plus its derived columns when
/// derivation was requested.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingRecord<'a> {
    #[serde(flatten)]
    pub row: &'a TrackingRow,

    #[serde(flatten)]
    pub derived: Option<&'a DerivedStats>,
}

/// The loaded, joined, optionally derived tracking data for one pair of
/// workbooks. Everything is read eagerly at load time and held immutably.
#[derive(Debug)]
pub struct GolfTracker {
    courses: CourseCatalog,
    rounds: RoundCatalog,
    table: Vec<TrackingRow>,
    derived: Option<Vec<DerivedStats>>,
}

impl GolfTracker {
    /// Load both workbooks and build the tracking table. Course and round
    /// loading run independently; the join then keys every scorecard row by
    /// (round, hole).
    pub fn load(
        courses_source: &dyn SheetSource,
        rounds_source: &dyn SheetSource,
        options: &TrackerOptions,
    ) -> Result<Self> {
        let courses = CourseCatalog::load(courses_source)?;
        let rounds = RoundCatalog::load(rounds_source, &options.columns)?;
        let table = build_tracking_table(rounds.rounds(), rounds.scorecards(), &courses)?;
        let derived = options.derive.then(|| derive_table(&table));

        info!(
            rows = table.len(),
            derived = derived.is_some(),
            "tracker loaded"
        );
        Ok(GolfTracker {
            courses,
            rounds,
            table,
            derived,
        })
    }

    /// The joined table, sorted by (round, hole).
    pub fn rows(&self) -> &[TrackingRow] {
        &self.table
    }

    /// Derived columns aligned with `rows()`, present iff derivation was
    /// requested at load time.
    pub fn derived(&self) -> Option<&[DerivedStats]> {
        self.derived.as_deref()
    }

    /// Joined rows paired with their derived columns (None when derivation
    /// was not requested).
    pub fn records(&self) -> Vec<TrackingRecord<'_>> {
        self.table
            .iter()
            .enumerate()
            .map(|(i, row)| TrackingRecord {
                row,
                derived: self.derived.as_ref().map(|d| &d[i]),
            })
            .collect()
    }

    /// The rows of one round, in hole order.
    pub fn round_rows<'a>(&'a self, round_id: &str) -> impl Iterator<Item = &'a TrackingRow> + 'a {
        let round_id = round_id.to_string();
        self.table.iter().filter(move |r| r.round_id == round_id)
    }

    pub fn courses(&self) -> &CourseCatalog {
        &self.courses
    }

    pub fn rounds(&self) -> &RoundCatalog {
        &self.rounds
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::sheet::{Cell, Sheet};
    use crate::source::MemoryWorkbook;
    use crate::stats::Outcome;

    fn courses_workbook() -> MemoryWorkbook {
        let mut registry = Sheet::new(
            "Courses",
            vec!["Course Code".to_string(), "Course Name".to_string()],
        );
        registry.push_row(vec![
            Cell::from_text("C1"),
            Cell::from_text("Pebble Creek"),
        ]);

        let mut c1 = Sheet::new(
            "C1",
            vec![
                "Hole".to_string(),
                "Yardage".to_string(),
                "Par".to_string(),
                "Handicap".to_string(),
            ],
        );
        c1.push_row(vec![
            Cell::Int(1),
            Cell::Int(300),
            Cell::Int(4),
            Cell::Int(7),
        ]);
        c1.push_row(vec![
            Cell::Int(2),
            Cell::Int(150),
            Cell::Int(3),
            Cell::Int(15),
        ]);

        MemoryWorkbook::new().with_sheet(registry).with_sheet(c1)
    }

    fn rounds_workbook() -> MemoryWorkbook {
        let mut registry = Sheet::new(
            "Rounds",
            vec![
                "Round Code".to_string(),
                "Course Code".to_string(),
                "Date".to_string(),
            ],
        );
        registry.push_row(vec![
            Cell::from_text("R1"),
            Cell::from_text("C1"),
            Cell::from_text("2024-05-01"),
        ]);

        let mut r1 = Sheet::new(
            "R1",
            vec![
                "Hole".to_string(),
                "Score".to_string(),
                "TFH".to_string(),
                "NTFH".to_string(),
                "Chips".to_string(),
                "Putts".to_string(),
            ],
        );
        // Hole-in-one on the par 4.
        r1.push_row(vec![
            Cell::Int(1),
            Cell::Int(1),
            Cell::from_text("Yes"),
            Cell::Int(0),
            Cell::Int(0),
            Cell::Int(1),
        ]);
        r1.push_row(vec![
            Cell::Int(2),
            Cell::Int(5),
            Cell::from_text("No"),
            Cell::Empty,
            Cell::Int(1),
            Cell::Int(2),
        ]);

        MemoryWorkbook::new().with_sheet(registry).with_sheet(r1)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let tracker = GolfTracker::load(
            &courses_workbook(),
            &rounds_workbook(),
            &TrackerOptions::default(),
        )
        .unwrap();

        let rows = tracker.rows();
        let derived = tracker.derived().unwrap();
        assert_eq!(rows.len(), 2);

        // (R1, 1): ace on a par 4, on the green in zero non-putting strokes.
        assert_eq!(rows[0].par, Some(4));
        assert_eq!(derived[0].outcome, Outcome::Ace);
        assert_eq!(derived[0].gir, Some(true));
        assert_eq!(derived[0].shots_to_green, 0);

        // (R1, 2): double bogey on the par 3.
        assert_eq!(rows[1].par, Some(3));
        assert_eq!(derived[1].outcome, Outcome::DoubleBogey);
        assert_eq!(derived[1].gir, Some(false));
        assert_eq!(derived[1].shots_to_green, 3);
        assert_eq!(derived[1].non_tee_fairway_attempts, Some(1));
    }

    #[test]
    fn test_derive_flag_off_means_no_derived_columns() {
        let options = TrackerOptions {
            derive: false,
            ..Default::default()
        };
        let tracker =
            GolfTracker::load(&courses_workbook(), &rounds_workbook(), &options).unwrap();
        assert!(tracker.derived().is_none());
        assert!(tracker.records().iter().all(|r| r.derived.is_none()));
        assert_eq!(tracker.rows().len(), 2);
    }

    #[test]
    fn test_records_pair_rows_with_derived() {
        let tracker = GolfTracker::load(
            &courses_workbook(),
            &rounds_workbook(),
            &TrackerOptions::default(),
        )
        .unwrap();
        let records = tracker.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row.hole_number, 1);
        assert_eq!(records[0].derived.unwrap().outcome, Outcome::Ace);
    }

    #[test]
    fn test_round_rows_filter() {
        let tracker = GolfTracker::load(
            &courses_workbook(),
            &rounds_workbook(),
            &TrackerOptions::default(),
        )
        .unwrap();
        assert_eq!(tracker.round_rows("R1").count(), 2);
        assert_eq!(tracker.round_rows("R2").count(), 0);
    }

    #[test]
    fn test_missing_scorecard_sheet_aborts_load() {
        let mut registry = Sheet::new(
            "Rounds",
            vec![
                "Round Code".to_string(),
                "Course Code".to_string(),
                "Date".to_string(),
            ],
        );
        registry.push_row(vec![
            Cell::from_text("R1"),
            Cell::from_text("C1"),
            Cell::from_text("2024-05-01"),
        ]);
        let rounds_only_registry = MemoryWorkbook::new().with_sheet(registry);

        let err = GolfTracker::load(
            &courses_workbook(),
            &rounds_only_registry,
            &TrackerOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TrackerError::MissingSheet { ref name } if name == "R1"));
    }

    #[test]
    fn test_tracker_is_debug_printable() {
        let tracker = GolfTracker::load(
            &courses_workbook(),
            &rounds_workbook(),
            &TrackerOptions::default(),
        )
        .unwrap();
        let dump = format!("{:?}", tracker);
        assert!(dump.contains("GolfTracker"));
        assert!(dump.contains("Pebble Creek"));
    }

    #[test]
    fn test_csv_workbooks_end_to_end() {
        use crate::source::CsvWorkbook;
        use std::fs;

        let courses_dir = tempfile::tempdir().unwrap();
        fs::write(
            courses_dir.path().join("Courses.csv"),
            "Course Code,Course Name\nC1,Pebble Creek\n",
        )
        .unwrap();
        fs::write(
            courses_dir.path().join("C1.csv"),
            "Hole,Yardage,Par,Handicap\n1,300,4,7\n2,150,3,15\n",
        )
        .unwrap();

        let rounds_dir = tempfile::tempdir().unwrap();
        fs::write(
            rounds_dir.path().join("Rounds.csv"),
            "Round Code,Course Code,Date\nR1,C1,2024-05-01\n",
        )
        .unwrap();
        fs::write(
            rounds_dir.path().join("R1.csv"),
            "Hole,Score,TFH,NTFH,Chips,Putts\n1,1,Yes,0,0,1\n2,5,No,,1,2\n",
        )
        .unwrap();

        let tracker = GolfTracker::load(
            &CsvWorkbook::new(courses_dir.path()),
            &CsvWorkbook::new(rounds_dir.path()),
            &TrackerOptions::default(),
        )
        .unwrap();

        let derived = tracker.derived().unwrap();
        assert_eq!(derived[0].outcome, Outcome::Ace);
        assert_eq!(derived[1].outcome, Outcome::DoubleBogey);
        assert_eq!(tracker.rows()[1].non_tee_fairway_hits, None);
    }

    #[test]
    fn test_json_record_shape() {
        let tracker = GolfTracker::load(
            &courses_workbook(),
            &rounds_workbook(),
            &TrackerOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_value(tracker.records()).unwrap();
        let first = &json[0];
        assert_eq!(first["Round Code"], "R1");
        assert_eq!(first["Hole"], 1);
        assert_eq!(first["Outcome"], "Ace");
        assert_eq!(first["Course Name"], "Pebble Creek");
    }
}
