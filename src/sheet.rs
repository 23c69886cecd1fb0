// Tabular payload model
// A Sheet is what the workbook collaborator hands the loaders: a header row
// of column names plus loosely-typed data rows. Type coercion lives here so
// every loader reports the same SchemaError shape.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, TrackerError};

// ============================================================================
// CELL
// ============================================================================

/// A single loosely-typed cell value as delivered by the workbook source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Build a cell from raw text, trimming whitespace. Blank text maps to
    /// `Empty` so optional columns surface as null rather than "".
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Coerce to an integer. Accepts integral floats and numeric text
    /// ("4", "4.0") since spreadsheet exports are sloppy about types.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Cell::Text(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    return Some(i);
                }
                match s.parse::<f64>() {
                    Ok(f) if f.fract() == 0.0 => Some(f as i64),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Coerce to text. Numeric and boolean cells render their natural form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            Cell::Empty => None,
        }
    }

    /// Coerce to a calendar date. Tries ISO (`2024-05-01`), US slash form
    /// (`05/01/2024`), and an ISO datetime with the time part dropped.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let s = match self {
            Cell::Text(s) => s.as_str(),
            _ => return None,
        };
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(d);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
            return Some(d);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
        None
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// One named table of rows, addressed by column name.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Sheet {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row, padding short rows with `Empty` so positional
    /// access never goes out of bounds.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        while cells.len() < self.columns.len() {
            cells.push(Cell::Empty);
        }
        self.rows.push(cells);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Iterate data rows with sheet context attached, for error reporting.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().enumerate().map(move |(index, cells)| RowRef {
            sheet: self,
            cells,
            index,
        })
    }
}

/// A borrowed view of one data row. Accessors coerce by column name and
/// report failures as `SchemaError` carrying the sheet name and row number.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    sheet: &'a Sheet,
    cells: &'a [Cell],
    index: usize,
}

impl<'a> RowRef<'a> {
    /// 1-based data row number (header excluded), for error messages.
    pub fn row_number(&self) -> usize {
        self.index + 1
    }

    pub fn sheet_name(&self) -> &'a str {
        self.sheet.name()
    }

    pub fn cell(&self, column: &str) -> Result<&'a Cell> {
        let idx = self.sheet.column_index(column).ok_or_else(|| {
            TrackerError::schema(
                self.sheet.name(),
                format!("missing column '{}'", column),
            )
        })?;
        Ok(self.cells.get(idx).unwrap_or(&Cell::Empty))
    }

    /// Required non-empty text field.
    pub fn require_text(&self, column: &str) -> Result<String> {
        self.cell(column)?.to_text().ok_or_else(|| self.coercion_error(column, "text"))
    }

    /// Required integer field. Empty or non-numeric is fatal.
    pub fn require_int(&self, column: &str) -> Result<i64> {
        self.cell(column)?.to_int().ok_or_else(|| self.coercion_error(column, "integer"))
    }

    /// Optional integer field. Empty is null; a present non-numeric value is
    /// still fatal (never silently zeroed).
    pub fn optional_int(&self, column: &str) -> Result<Option<i64>> {
        let cell = self.cell(column)?;
        if cell.is_empty() {
            return Ok(None);
        }
        cell.to_int()
            .map(Some)
            .ok_or_else(|| self.coercion_error(column, "integer"))
    }

    /// Required calendar date field.
    pub fn require_date(&self, column: &str) -> Result<NaiveDate> {
        self.cell(column)?.to_date().ok_or_else(|| self.coercion_error(column, "date"))
    }

    fn coercion_error(&self, column: &str, expected: &str) -> TrackerError {
        TrackerError::schema(
            self.sheet.name(),
            format!(
                "row {}: column '{}' is not a valid {}",
                self.row_number(),
                column,
                expected
            ),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
