// Round Catalog Loader
// Reads the "Rounds" registry sheet plus one raw scorecard sheet per listed
// round. Raw columns are mapped through a ScorecardColumns config; the
// tee-fairway indicator is normalized from Yes/No tokens; optional numeric
// fields stay null when blank.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::schema::{fixed, ScorecardColumns};
use crate::sheet::RowRef;
use crate::source::SheetSource;

// ============================================================================
// RECORD TYPES
// ============================================================================

/// One row of the round registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundIdentity {
    #[serde(rename = "Round Code")]
    pub round_id: String,

    #[serde(rename = "Course Code")]
    pub course_id: String,

    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

/// One hole of a raw scorecard. Round and course ids are attached from the
/// registry during load. `non_tee_fairway_hits` and `chips` stay null when
/// the cell is blank; downstream formulas propagate the null instead of
/// fabricating a zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardRow {
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
}

// ============================================================================
// CATALOG
// ============================================================================

/// All round identities and scorecard rows from one workbook. Immutable
/// after load.
#[derive(Debug)]
pub struct RoundCatalog {
    rounds: Vec<RoundIdentity>,
    scorecards: Vec<ScorecardRow>,
    round_index: HashMap<String, usize>,
}

impl RoundCatalog {
    /// Load the registry and every referenced scorecard sheet.
    ///
    /// Fatal conditions: blank round/course ids, unparseable dates,
    /// duplicate round ids, an unresolvable scorecard sheet, non-numeric
    /// required fields, an unrecognized tee-fairway token, and duplicate
    /// (round, hole) keys.
    pub fn load(source: &dyn SheetSource, columns: &ScorecardColumns) -> Result<Self> {
        let registry = source.sheet(fixed::ROUNDS_SHEET)?;

        let mut rounds = Vec::new();
        let mut round_index = HashMap::new();
        for row in registry.rows() {
            let round_id = row.require_text(fixed::ROUND_CODE)?;
            let course_id = row.require_text(fixed::COURSE_CODE)?;
            let date = row.require_date(fixed::ROUND_DATE)?;
            if round_index.contains_key(&round_id) {
                return Err(TrackerError::schema(
                    fixed::ROUNDS_SHEET,
                    format!("duplicate round code '{}'", round_id),
                ));
            }
            round_index.insert(round_id.clone(), rounds.len());
            rounds.push(RoundIdentity {
                round_id,
                course_id,
                date,
            });
        }

        let mut scorecards = Vec::new();
        let mut seen = HashSet::new();
        for round in &rounds {
            let sheet = source.sheet(&round.round_id)?;
            debug!(round = %round.round_id, rows = sheet.len(), "loaded scorecard sheet");
            for row in sheet.rows() {
                let card = read_scorecard_row(&row, round, columns)?;
                if !seen.insert((card.round_id.clone(), card.hole_number)) {
                    return Err(TrackerError::schema(
                        &round.round_id,
                        format!("duplicate hole number {}", card.hole_number),
                    ));
                }
                scorecards.push(card);
            }
        }

        info!(
            rounds = rounds.len(),
            holes = scorecards.len(),
            "round catalog loaded"
        );
        Ok(RoundCatalog {
            rounds,
            scorecards,
            round_index,
        })
    }

    pub fn rounds(&self) -> &[RoundIdentity] {
        &self.rounds
    }

    pub fn scorecards(&self) -> &[ScorecardRow] {
        &self.scorecards
    }

    pub fn round(&self, round_id: &str) -> Option<&RoundIdentity> {
        self.round_index.get(round_id).map(|&i| &self.rounds[i])
    }
}

fn read_scorecard_row(
    row: &RowRef<'_>,
    round: &RoundIdentity,
    columns: &ScorecardColumns,
) -> Result<ScorecardRow> {
    Ok(ScorecardRow {
        round_id: round.round_id.clone(),
        course_id: round.course_id.clone(),
        hole_number: row.require_int(&columns.hole)?,
        score: row.require_int(&columns.score)?,
        tee_fairway_hit: parse_indicator(row, &columns.tee_fairway_hit)?,
        non_tee_fairway_hits: row.optional_int(&columns.non_tee_fairway_hits)?,
        chips: row.optional_int(&columns.chips)?,
        putts: row.require_int(&columns.putts)?,
    })
}

/// Normalize the tee-fairway indicator. The workbook records it as a Yes/No
/// token; a blank cell stays null, anything else is fatal.
fn parse_indicator(row: &RowRef<'_>, column: &str) -> Result<Option<bool>> {
    let cell = row.cell(column)?;
    if cell.is_empty() {
        return Ok(None);
    }
    match cell.to_text().as_deref() {
        Some("Yes") => Ok(Some(true)),
        Some("No") => Ok(Some(false)),
        other => Err(TrackerError::schema(
            row.sheet_name(),
            format!(
                "row {}: column '{}' has unrecognized indicator '{}'",
                row.row_number(),
                column,
                other.unwrap_or_default()
            ),
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
