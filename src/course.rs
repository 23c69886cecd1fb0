// Course Catalog Loader
// Reads the "Courses" registry sheet plus one hole-description sheet per
// listed course, producing an immutable catalog keyed by (course, hole).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::schema::fixed;
use crate::source::SheetSource;

// ============================================================================
// RECORD TYPES
// ============================================================================

/// One row of the course registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseIdentity {
    #[serde(rename = "Course Code")]
    pub course_id: String,

    #[serde(rename = "Course Name")]
    pub course_name: String,
}

/// One hole of a course template. The owning course id is attached during
/// load; the raw per-course sheet does not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleDescription {
    #[serde(rename = "Course Code")]
    pub course_id: String,

    #[serde(rename = "Hole")]
    pub hole_number: i64,

    #[serde(rename = "Yardage")]
    pub yardage: i64,

    #[serde(rename = "Par")]
    pub par: i64,

    #[serde(rename = "Handicap")]
    pub handicap: i64,
}

// ============================================================================
// CATALOG
// ============================================================================

/// All course identities and hole descriptions from one workbook, with keyed
/// lookup. Immutable after load; reloading the same workbook yields the same
/// catalog.
#[derive(Debug)]
pub struct CourseCatalog {
    courses: Vec<CourseIdentity>,
    holes: Vec<HoleDescription>,
    course_index: HashMap<String, usize>,
    hole_index: HashMap<String, HashMap<i64, usize>>,
}

impl CourseCatalog {
    /// Load the registry and every referenced hole-description sheet.
    ///
    /// Fatal conditions: a registry row with a blank code or name, a listed
    /// course whose description sheet cannot be resolved (`MissingSheet`),
    /// non-numeric hole fields, and duplicate course or (course, hole) keys.
    pub fn load(source: &dyn SheetSource) -> Result<Self> {
        let registry = source.sheet(fixed::COURSES_SHEET)?;

        let mut courses = Vec::new();
        let mut course_index = HashMap::new();
        for row in registry.rows() {
            let course_id = row.require_text(fixed::COURSE_CODE)?;
            let course_name = row.require_text(fixed::COURSE_NAME)?;
            if course_index.contains_key(&course_id) {
                return Err(TrackerError::schema(
                    fixed::COURSES_SHEET,
                    format!("duplicate course code '{}'", course_id),
                ));
            }
            course_index.insert(course_id.clone(), courses.len());
            courses.push(CourseIdentity {
                course_id,
                course_name,
            });
        }

        let mut holes = Vec::new();
        let mut hole_index = HashMap::new();
        for course in &courses {
            let sheet = source.sheet(&course.course_id)?;
            debug!(course = %course.course_id, rows = sheet.len(), "loaded course sheet");
            for row in sheet.rows() {
                let hole = HoleDescription {
                    course_id: course.course_id.clone(),
                    hole_number: row.require_int(fixed::HOLE)?,
                    yardage: row.require_int(fixed::YARDAGE)?,
                    par: row.require_int(fixed::PAR)?,
                    handicap: row.require_int(fixed::HANDICAP)?,
                };
                let course_holes: &mut HashMap<i64, usize> =
                    hole_index.entry(hole.course_id.clone()).or_default();
                if course_holes.contains_key(&hole.hole_number) {
                    return Err(TrackerError::schema(
                        &course.course_id,
                        format!("duplicate hole number {}", hole.hole_number),
                    ));
                }
                course_holes.insert(hole.hole_number, holes.len());
                holes.push(hole);
            }
        }

        info!(
            courses = courses.len(),
            holes = holes.len(),
            "course catalog loaded"
        );
        Ok(CourseCatalog {
            courses,
            holes,
            course_index,
            hole_index,
        })
    }

    pub fn courses(&self) -> &[CourseIdentity] {
        &self.courses
    }

    pub fn holes(&self) -> &[HoleDescription] {
        &self.holes
    }

    pub fn course(&self, course_id: &str) -> Option<&CourseIdentity> {
        self.course_index.get(course_id).map(|&i| &self.courses[i])
    }

    pub fn hole(&self, course_id: &str, hole_number: i64) -> Option<&HoleDescription> {
        self.hole_index
            .get(course_id)
            .and_then(|m| m.get(&hole_number))
            .map(|&i| &self.holes[i])
    }
}

// ============================================================================
// TESTS
// ============================================================================
