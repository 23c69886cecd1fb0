// Derived Stats Engine
// Pure functions over the joined table. Derivation never fails: scorecards
// legitimately contain inconsistent manual entries, so out-of-domain inputs
// come back as Unknown/null instead of errors.

use serde::{Deserialize, Serialize};

use crate::tracking::TrackingRow;

// ============================================================================
// OUTCOME
// ============================================================================

/// Scoring term for one hole, relative to par.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ace,
    Condor,
    Eagle,
    Birdie,
    Par,
    Bogey,
    #[serde(rename = "Double Bogey")]
    DoubleBogey,
    #[serde(rename = "Triple Bogey")]
    TripleBogey,
    #[serde(rename = "+4 or worse")]
    BlowUp,
    Unknown,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Ace => "Ace",
            Outcome::Condor => "Condor",
            Outcome::Eagle => "Eagle",
            Outcome::Birdie => "Birdie",
            Outcome::Par => "Par",
            Outcome::Bogey => "Bogey",
            Outcome::DoubleBogey => "Double Bogey",
            Outcome::TripleBogey => "Triple Bogey",
            Outcome::BlowUp => "+4 or worse",
            Outcome::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a hole by score relative to par, first match wins.
///
/// A score of 1 is always an Ace, checked before the par-relative rules: a
/// hole-in-one on a par 3 reports Ace, not Eagle. Scores better than a
/// Condor that are not a hole-in-one fall through to Unknown, as does a
/// null par (possible after a join miss).
pub fn outcome(score: i64, par: Option<i64>) -> Outcome {
    if score == 1 {
        return Outcome::Ace;
    }
    let Some(par) = par else {
        return Outcome::Unknown;
    };
    match score - par {
        -3 => Outcome::Condor,
        -2 => Outcome::Eagle,
        -1 => Outcome::Birdie,
        0 => Outcome::Par,
        1 => Outcome::Bogey,
        2 => Outcome::DoubleBogey,
        3 => Outcome::TripleBogey,
        d if d >= 4 => Outcome::BlowUp,
        _ => Outcome::Unknown,
    }
}

// ============================================================================
// NUMERIC COLUMNS
// ============================================================================

/// Greens in regulation: the ball reached the green in par − 2 or fewer
/// non-putting strokes. Null par yields null.
pub fn gir(score: i64, putts: i64, par: Option<i64>) -> Option<bool> {
    par.map(|p| score - putts <= p - 2)
}

/// Strokes taken excluding putts. May be zero or negative when the recorded
/// putts exceed the score; surfaced as-is, not validated.
pub fn shots_to_green(score: i64, putts: i64) -> i64 {
    score - putts
}

/// Approach-shot attempts excluding the tee shot and putts. Null chips
/// propagates to null; defaulting to zero would fabricate an attempt count.
pub fn non_tee_fairway_attempts(score: i64, putts: i64, chips: Option<i64>) -> Option<i64> {
    chips.map(|c| score - putts - c - 1)
}

/// Total fairways found on the hole: tee hit (counted as 1) plus non-tee
/// hits. Null if either input is null.
pub fn fairway_hits(tee_fairway_hit: Option<bool>, non_tee_hits: Option<i64>) -> Option<i64> {
    match (tee_fairway_hit, non_tee_hits) {
        (Some(tee), Some(rest)) => Some(i64::from(tee) + rest),
        _ => None,
    }
}

// ============================================================================
// DERIVED VIEW
// ============================================================================

/// The derived columns for one tracking row. Recomputed on demand, never
/// persisted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    #[serde(rename = "Outcome")]
    pub outcome: Outcome,

    #[serde(rename = "GIR")]
    pub gir: Option<bool>,

    #[serde(rename = "STG")]
    pub shots_to_green: i64,

    #[serde(rename = "NTFA")]
    pub non_tee_fairway_attempts: Option<i64>,

    #[serde(rename = "FH")]
    pub fairway_hits: Option<i64>,
}

/// Compute all derived columns for one joined row.
pub fn derive_row(row: &TrackingRow) -> DerivedStats {
    DerivedStats {
        outcome: outcome(row.score, row.par),
        gir: gir(row.score, row.putts, row.par),
        shots_to_green: shots_to_green(row.score, row.putts),
        non_tee_fairway_attempts: non_tee_fairway_attempts(row.score, row.putts, row.chips),
        fairway_hits: fairway_hits(row.tee_fairway_hit, row.non_tee_fairway_hits),
    }
}

/// Compute the derived columns for a whole table, positionally aligned with
/// the input rows.
pub fn derive_table(rows: &[TrackingRow]) -> Vec<DerivedStats> {
    rows.iter().map(derive_row).collect()
}

// ============================================================================
// TESTS
// ============================================================================
