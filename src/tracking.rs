// Tracking Table Builder
// Left-outer joins scorecard rows onto hole descriptions. The scorecard side
// is never dropped: a hole with no course template keeps null descriptive
// fields, which is a recognized partial-data state rather than an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::course::CourseCatalog;
use crate::error::{Result, TrackerError};
use crate::round::{RoundIdentity, ScorecardRow};

/// One joined row, keyed by (round, hole). Descriptive fields are null when
/// the round's course or the specific hole has no description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRow {
    #[serde(rename = "Round Code")]
    pub round_id: String,

    #[serde(rename = "Course Code")]
    pub course_id: String,

    #[serde(rename = "Hole")]
    pub hole_number: i64,

    #[serde(rename = "Score")]
    pub score: i64,

    #[serde(rename = "TFH")]
    pub tee_fairway_hit: Option<bool>,

    #[serde(rename = "NTFH")]
    pub non_tee_fairway_hits: Option<i64>,

    #[serde(rename = "Chips")]
    pub chips: Option<i64>,

    #[serde(rename = "Putts")]
    pub putts: i64,

    #[serde(rename = "Yardage")]
    pub yardage: Option<i64>,

    #[serde(rename = "Par")]
    pub par: Option<i64>,

    #[serde(rename = "Handicap")]
    pub handicap: Option<i64>,

    #[serde(rename = "Course Name")]
    pub course_name: Option<String>,
}

/// Join scorecard rows (left) with hole descriptions (right) on
/// (course, hole), resolving each row's course through the round registry.
///
/// A scorecard row whose round id is not in the registry is an
/// `IntegrityError`: per-hole identity is required for the join, so the
/// build aborts rather than guessing. The result is sorted by
/// (round, hole); key uniqueness holds transitively from input uniqueness.
pub fn build_tracking_table(
    rounds: &[RoundIdentity],
    scorecards: &[ScorecardRow],
    courses: &CourseCatalog,
) -> Result<Vec<TrackingRow>> {
    let registry: HashMap<&str, &RoundIdentity> = rounds
        .iter()
        .map(|r| (r.round_id.as_str(), r))
        .collect();

    let mut table = Vec::with_capacity(scorecards.len());
    for card in scorecards {
        let round = registry.get(card.round_id.as_str()).ok_or_else(|| {
            TrackerError::integrity(format!(
                "scorecard row ({}, hole {}) references a round absent from the registry",
                card.round_id, card.hole_number
            ))
        })?;

        let description = courses.hole(&round.course_id, card.hole_number);
        let course_name = courses
            .course(&round.course_id)
            .map(|c| c.course_name.clone());

        table.push(TrackingRow {
            round_id: card.round_id.clone(),
            course_id: round.course_id.clone(),
            hole_number: card.hole_number,
            score: card.score,
            tee_fairway_hit: card.tee_fairway_hit,
            non_tee_fairway_hits: card.non_tee_fairway_hits,
            chips: card.chips,
            putts: card.putts,
            yardage: description.map(|d| d.yardage),
            par: description.map(|d| d.par),
            handicap: description.map(|d| d.handicap),
            course_name,
        });
    }

    table.sort_by(|a, b| {
        (a.round_id.as_str(), a.hole_number).cmp(&(b.round_id.as_str(), b.hole_number))
    });

    info!(rows = table.len(), "tracking table built");
    Ok(table)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixed;
    use crate::sheet::{Cell, Sheet};
    use crate::source::MemoryWorkbook;
    use chrono::NaiveDate;

    fn catalog(holes: &[(&str, i64, i64, i64, i64)]) -> CourseCatalog {
        let mut registry = Sheet::new(
            fixed::COURSES_SHEET,
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
        for (course, hole, yardage, par, handicap) in holes {
            assert_eq!(*course, "C1");
            c1.push_row(vec![
                Cell::Int(*hole),
                Cell::Int(*yardage),
                Cell::Int(*par),
                Cell::Int(*handicap),
            ]);
        }
        let workbook = MemoryWorkbook::new().with_sheet(registry).with_sheet(c1);
        CourseCatalog::load(&workbook).unwrap()
    }

    fn round(round_id: &str, course_id: &str) -> RoundIdentity {
        RoundIdentity {
            round_id: round_id.to_string(),
            course_id: course_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn card(round_id: &str, hole: i64, score: i64, putts: i64) -> ScorecardRow {
        ScorecardRow {
            round_id: round_id.to_string(),
            course_id: "C1".to_string(),
            hole_number: hole,
            score,
            tee_fairway_hit: Some(true),
            non_tee_fairway_hits: Some(1),
            chips: Some(0),
            putts,
        }
    }

    #[test]
    fn test_join_attaches_descriptions() {
        let courses = catalog(&[("C1", 1, 300, 4, 7), ("C1", 2, 150, 3, 15)]);
        let rounds = vec![round("R1", "C1")];
        let cards = vec![card("R1", 1, 4, 2), card("R1", 2, 3, 1)];

        let table = build_tracking_table(&rounds, &cards, &courses).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].par, Some(4));
        assert_eq!(table[0].yardage, Some(300));
        assert_eq!(table[0].handicap, Some(7));
        assert_eq!(table[0].course_name.as_deref(), Some("Pebble Creek"));
        assert_eq!(table[1].par, Some(3));
    }

    #[test]
    fn test_unmatched_hole_keeps_nulls_and_is_not_dropped() {
        let courses = catalog(&[("C1", 1, 300, 4, 7)]);
        let rounds = vec![round("R1", "C1")];
        let cards = vec![card("R1", 1, 4, 2), card("R1", 19, 6, 2)];

        let table = build_tracking_table(&rounds, &cards, &courses).unwrap();
        assert_eq!(table.len(), 2);
        let stray = &table[1];
        assert_eq!(stray.hole_number, 19);
        assert_eq!(stray.yardage, None);
        assert_eq!(stray.par, None);
        assert_eq!(stray.handicap, None);
        // Course name still resolves; only the hole is undescribed.
        assert_eq!(stray.course_name.as_deref(), Some("Pebble Creek"));
    }

    #[test]
    fn test_unknown_course_keeps_all_descriptive_nulls() {
        let courses = catalog(&[("C1", 1, 300, 4, 7)]);
        let rounds = vec![round("R2", "C9")];
        let cards = vec![card("R2", 1, 4, 2)];

        let table = build_tracking_table(&rounds, &cards, &courses).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].par, None);
        assert_eq!(table[0].course_name, None);
    }

    #[test]
    fn test_unregistered_round_is_integrity_error() {
        let courses = catalog(&[("C1", 1, 300, 4, 7)]);
        let rounds = vec![round("R1", "C1")];
        let cards = vec![card("R9", 1, 4, 2)];

        let err = build_tracking_table(&rounds, &cards, &courses).unwrap_err();
        assert!(matches!(err, TrackerError::Integrity { .. }));
    }

    #[test]
    fn test_result_sorted_by_round_then_hole() {
        let courses = catalog(&[("C1", 1, 300, 4, 7)]);
        let rounds = vec![round("R1", "C1"), round("R2", "C1")];
        let cards = vec![
            card("R2", 2, 4, 2),
            card("R1", 9, 5, 2),
            card("R2", 1, 4, 2),
            card("R1", 3, 4, 2),
        ];

        let table = build_tracking_table(&rounds, &cards, &courses).unwrap();
        let keys: Vec<_> = table
            .iter()
            .map(|r| (r.round_id.as_str(), r.hole_number))
            .collect();
        assert_eq!(keys, vec![("R1", 3), ("R1", 9), ("R2", 1), ("R2", 2)]);
    }

    #[test]
    fn test_course_resolution_goes_through_registry() {
        // The registry's course wins even if the raw row carries another id.
        let courses = catalog(&[("C1", 1, 300, 4, 7)]);
        let rounds = vec![round("R1", "C1")];
        let mut stray = card("R1", 1, 4, 2);
        stray.course_id = "C9".to_string();

        let table = build_tracking_table(&rounds, &[stray], &courses).unwrap();
        assert_eq!(table[0].course_id, "C1");
        assert_eq!(table[0].par, Some(4));
    }
}
