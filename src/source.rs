// Workbook collaborator boundary
// The pipeline only needs "give me the sheet named X as rows of cells".
// How that resolves (files, fixtures) is the source's business; the loaders
// stay agnostic.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::sheet::{Cell, Sheet};

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// Resolves a sheet name to a tabular payload.
///
/// Implementations must distinguish "the sheet does not exist"
/// (`MissingSheet`) from "the sheet exists but could not be read"
/// (`Source`), because the loaders treat the former as a registry
/// referencing an absent entity.
pub trait SheetSource {
    fn sheet(&self, name: &str) -> Result<Sheet>;
}

// ============================================================================
// CSV WORKBOOK
// ============================================================================

/// A "workbook" laid out as a directory of CSV files, one `<sheet>.csv` per
/// sheet, headers in the first row. All values arrive as text cells; typing
/// happens in the loaders.
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        CsvWorkbook {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }
}

impl SheetSource for CsvWorkbook {
    fn sheet(&self, name: &str) -> Result<Sheet> {
        let path = self.sheet_path(name);
        debug!(sheet = name, path = %path.display(), "reading csv sheet");

        // Open directly; a not-found error is the "sheet does not exist"
        // signal, everything else is a read failure.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| {
                let not_found = matches!(
                    e.kind(),
                    csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
                );
                if not_found {
                    TrackerError::missing_sheet(name)
                } else {
                    TrackerError::source(name, e)
                }
            })?;

        let columns = reader
            .headers()
            .map_err(|e| TrackerError::source(name, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut sheet = Sheet::new(name, columns);
        for record in reader.records() {
            let record = record.map_err(|e| TrackerError::source(name, e))?;
            sheet.push_row(record.iter().map(Cell::from_text).collect());
        }
        Ok(sheet)
    }
}

// ============================================================================
// MEMORY WORKBOOK
// ============================================================================

/// In-memory source for tests and embedding.
#[derive(Default)]
pub struct MemoryWorkbook {
    sheets: HashMap<String, Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    /// Builder-style insert for fixture setup.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert(sheet);
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet(&self, name: &str) -> Result<Sheet> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| TrackerError::missing_sheet(name))
    }
}

// ============================================================================
// TESTS
// ============================================================================
