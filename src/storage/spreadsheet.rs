//! Spreadsheet persistence for salary records.
//!
//! Records are appended to the `Sheet1` sheet of an `.xlsx` workbook. Every
//! sheet of an existing workbook is read back with `calamine` and rewritten
//! with `rust_xlsxwriter`, followed by the new row. Values that cannot be
//! carried over (formulas, error cells, ISO date strings) make the append
//! fail instead of being dropped. The new workbook is written to a sibling
//! temporary file, synced, and renamed over the original, so a failed save
//! never loses earlier rows.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

use crate::error::{SalaryError, SalaryResult};
use crate::models::SalaryRecord;

/// Default spreadsheet file name, relative to the working directory.
pub const DEFAULT_SPREADSHEET_PATH: &str = "salary_data.xlsx";

/// Name of the sheet records are written to.
pub const SHEET_NAME: &str = "Sheet1";

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Date, time, or duration stored as an Excel serial number.
    DateTime {
        /// Days since the Excel epoch, with the time as the fraction.
        serial: f64,
        /// True for a duration rather than a point in time.
        duration: bool,
    },
}

impl Cell {
    /// Converts a cell read by `calamine`. Returns `None` for values that
    /// cannot be written back unchanged.
    fn from_data(data: &Data) -> Option<Self> {
        match data {
            Data::Empty => Some(Cell::Empty),
            Data::String(s) => Some(Cell::Text(s.clone())),
            Data::Float(f) => Some(Cell::Number(*f)),
            Data::Int(i) => Some(Cell::Number(*i as f64)),
            Data::Bool(b) => Some(Cell::Bool(*b)),
            Data::DateTime(dt) => Some(Cell::DateTime {
                serial: dt.as_f64(),
                duration: dt.is_duration(),
            }),
            _ => None,
        }
    }
}

fn decimal_cell(value: Decimal) -> Cell {
    match value.to_f64() {
        Some(f) => Cell::Number(f),
        None => Cell::Text(value.to_string()),
    }
}

/// Returns the spreadsheet row for a record, in [`SalaryRecord::COLUMNS`] order.
pub fn record_cells(record: &SalaryRecord) -> Vec<Cell> {
    vec![
        Cell::Text(record.name.clone()),
        Cell::Text(record.position.label().to_string()),
        Cell::Text(record.marital_status.label().to_string()),
        Cell::Number(f64::from(record.num_children)),
        decimal_cell(record.base_salary),
        decimal_cell(record.total_allowance),
        decimal_cell(record.tax),
        Cell::Number(record.total_salary as f64),
    ]
}

/// One worksheet's name and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Worksheet name.
    pub name: String,
    /// Rows from the top-left corner, leading empty rows and columns kept.
    pub rows: Vec<Vec<Cell>>,
}

/// Index of the sheet records go to: `Sheet1`, else the first sheet.
fn records_sheet(sheets: &[Sheet]) -> Option<usize> {
    sheets
        .iter()
        .position(|s| s.name == SHEET_NAME)
        .or_else(|| (!sheets.is_empty()).then_some(0))
}

/// Where an appended record landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// True if the records sheet was empty and a header row was written.
    pub created: bool,
    /// One-based index of the new row among the data rows (header excluded).
    pub data_row: usize,
}

/// Appends salary records to a spreadsheet file.
///
/// # Example
///
/// ```no_run
/// use salary_calculator::calculation::calculate_total;
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position, SalaryRecord};
/// use salary_calculator::storage::SpreadsheetSink;
///
/// let rates = RateTable::default();
/// let breakdown = calculate_total(&rates, Position::Staff, MaritalStatus::Single, 0)?;
/// let record = SalaryRecord::new("Ani", &breakdown);
///
/// let sink = SpreadsheetSink::new("salary_data.xlsx");
/// let outcome = sink.append(&record)?;
/// println!("Saved as data row {}", outcome.data_row);
/// # Ok::<(), salary_calculator::error::SalaryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpreadsheetSink {
    path: PathBuf,
}

impl SpreadsheetSink {
    /// Creates a sink writing to `path`. Nothing is touched until the
    /// first append.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the spreadsheet path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every sheet of the workbook, in workbook order.
    ///
    /// Returns an empty list if the file does not exist. Fails with
    /// `Persistence` if any sheet holds a formula or a value that [`Cell`]
    /// cannot represent.
    pub fn read_sheets(&self) -> SalaryResult<Vec<Sheet>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| self.error(e))?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let formulas = workbook
                .worksheet_formula(&name)
                .map_err(|e| self.error(e))?;
            if let Some((r, c, _)) = formulas.used_cells().find(|(_, _, f)| !f.is_empty()) {
                let (row_offset, col_offset) = formulas.start().unwrap_or((0, 0));
                return Err(self.error(format!(
                    "sheet '{}' has a formula at row {}, column {} that cannot be preserved",
                    name,
                    row_offset as usize + r + 1,
                    col_offset as usize + c + 1
                )));
            }

            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| self.error(e))?;
            let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
            let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset as usize];
            for (r, row) in range.rows().enumerate() {
                let mut cells = vec![Cell::Empty; col_offset as usize];
                for (c, data) in row.iter().enumerate() {
                    let cell = Cell::from_data(data).ok_or_else(|| {
                        self.error(format!(
                            "sheet '{}' has a value at row {}, column {} that cannot be preserved: {}",
                            name,
                            row_offset as usize + r + 1,
                            col_offset as usize + c + 1,
                            data
                        ))
                    })?;
                    cells.push(cell);
                }
                rows.push(cells);
            }

            sheets.push(Sheet { name, rows });
        }

        Ok(sheets)
    }

    /// Reads every row of the records sheet, header included.
    ///
    /// Returns an empty list if the file does not exist.
    pub fn read_rows(&self) -> SalaryResult<Vec<Vec<Cell>>> {
        let mut sheets = self.read_sheets()?;
        Ok(match records_sheet(&sheets) {
            Some(index) => sheets.swap_remove(index).rows,
            None => Vec::new(),
        })
    }

    /// Returns the number of rows below the header.
    pub fn data_row_count(&self) -> SalaryResult<usize> {
        Ok(self.read_rows()?.len().saturating_sub(1))
    }

    /// Appends a record as a new row.
    ///
    /// A missing file is created with a header row first. An existing file
    /// keeps all of its sheets and rows, and the record goes after the last
    /// row of the records sheet. The file on disk is replaced only once the
    /// new workbook has been fully written and synced.
    pub fn append(&self, record: &SalaryRecord) -> SalaryResult<AppendOutcome> {
        let mut sheets = self.read_sheets()?;
        let index = match records_sheet(&sheets) {
            Some(index) => index,
            None => {
                sheets.push(Sheet {
                    name: SHEET_NAME.to_string(),
                    rows: Vec::new(),
                });
                sheets.len() - 1
            }
        };

        let rows = &mut sheets[index].rows;
        let created = rows.is_empty();
        if created {
            rows.push(
                SalaryRecord::COLUMNS
                    .iter()
                    .map(|c| Cell::Text(c.to_string()))
                    .collect(),
            );
        }
        rows.push(record_cells(record));
        let data_row = rows.len() - 1;

        let buffer = self.render(&sheets, index)?;
        self.replace_file(&buffer)?;

        let outcome = AppendOutcome { created, data_row };
        info!(
            path = %self.path.display(),
            sheets = sheets.len(),
            created = outcome.created,
            data_row = outcome.data_row,
            "Salary record saved"
        );
        Ok(outcome)
    }

    fn render(&self, sheets: &[Sheet], records_index: usize) -> SalaryResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = CellFormats::new();

        for (i, sheet) in sheets.iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(|e| self.error(e))?;

            for (r, row) in sheet.rows.iter().enumerate() {
                let r = u32::try_from(r).map_err(|_| self.error("too many rows"))?;
                let is_header = i == records_index && r == 0;
                for (c, cell) in row.iter().enumerate() {
                    let c = u16::try_from(c).map_err(|_| self.error("too many columns"))?;
                    write_cell(worksheet, r, c, cell, is_header, &formats)
                        .map_err(|e| self.error(e))?;
                }
            }
        }

        workbook.save_to_buffer().map_err(|e| self.error(e))
    }

    fn replace_file(&self, contents: &[u8]) -> SalaryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }

        let tmp_path = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.error(e));
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "Spreadsheet replaced");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SPREADSHEET_PATH.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn error(&self, cause: impl ToString) -> SalaryError {
        SalaryError::Persistence {
            path: self.path.display().to_string(),
            message: cause.to_string(),
        }
    }
}

impl Default for SpreadsheetSink {
    fn default() -> Self {
        Self::new(DEFAULT_SPREADSHEET_PATH)
    }
}

struct CellFormats {
    header: Format,
    date: Format,
    datetime: Format,
    duration: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
            duration: Format::new().set_num_format(DURATION_FORMAT),
        }
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    r: u32,
    c: u16,
    cell: &Cell,
    is_header: bool,
    formats: &CellFormats,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Empty => return Ok(()),
        Cell::Text(s) if is_header => {
            worksheet.write_string_with_format(r, c, s, &formats.header)?;
        }
        Cell::Text(s) => {
            worksheet.write_string(r, c, s)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(r, c, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(r, c, *b)?;
        }
        Cell::DateTime { serial, duration } => {
            let format = if *duration {
                &formats.duration
            } else if serial.fract() == 0.0 {
                &formats.date
            } else {
                &formats.datetime
            };
            worksheet.write_number_with_format(r, c, *serial, format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_total;
    use crate::config::RateTable;
    use crate::models::{MaritalStatus, Position};

    fn create_record(name: &str, position: Position, status: MaritalStatus, n: u32) -> SalaryRecord {
        let breakdown = calculate_total(&RateTable::default(), position, status, n).unwrap();
        SalaryRecord::new(name, &breakdown)
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_read_rows_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SpreadsheetSink::new(dir.path().join("missing.xlsx"));

        assert!(sink.read_rows().unwrap().is_empty());
        assert_eq!(sink.data_row_count().unwrap(), 0);
    }

    #[test]
    fn test_first_append_creates_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SpreadsheetSink::new(dir.path().join("salary_data.xlsx"));
        let record = create_record("Ani", Position::Staff, MaritalStatus::Single, 0);

        let outcome = sink.append(&record).unwrap();
        assert_eq!(outcome, AppendOutcome { created: true, data_row: 1 });

        let rows = sink.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        let header: Vec<Cell> = SalaryRecord::COLUMNS.iter().map(|c| text(c)).collect();
        assert_eq!(rows[0], header);
        assert_eq!(
            rows[1],
            vec![
                text("Ani"),
                text("Staff"),
                text("Single"),
                Cell::Number(0.0),
                Cell::Number(1_000_000.0),
                Cell::Number(0.0),
                Cell::Number(50_000.0),
                Cell::Number(950_000.0),
            ]
        );
    }

    #[test]
    fn test_appends_preserve_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SpreadsheetSink::new(dir.path().join("salary_data.xlsx"));

        sink.append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();
        let second = sink
            .append(&create_record("Budi", Position::Director, MaritalStatus::Married, 5))
            .unwrap();
        let third = sink
            .append(&create_record("Citra", Position::Finance, MaritalStatus::Married, 1))
            .unwrap();

        assert!(!second.created);
        assert_eq!(second.data_row, 2);
        assert_eq!(third.data_row, 3);

        let rows = sink.read_rows().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][0], text("Ani"));
        assert_eq!(rows[2][0], text("Budi"));
        assert_eq!(rows[2][7], Cell::Number(2_800_000.0));
        assert_eq!(rows[3][0], text("Citra"));
        assert_eq!(sink.data_row_count().unwrap(), 3);
    }

    #[test]
    fn test_foreign_rows_are_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_data.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).unwrap();
        sheet.write_string(0, 0, "Legacy").unwrap();
        sheet.write_string(1, 0, "old row").unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        workbook.save(&path).unwrap();

        let sink = SpreadsheetSink::new(&path);
        let outcome = sink
            .append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.data_row, 2);
        let rows = sink.read_rows().unwrap();
        assert_eq!(rows[0][0], text("Legacy"));
        assert_eq!(rows[1][0], text("old row"));
        assert_eq!(rows[1][1], Cell::Bool(true));
        assert_eq!(rows[2][0], text("Ani"));
    }

    #[test]
    fn test_corrupt_file_fails_loudly_and_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_data.xlsx");
        fs::write(&path, b"not a spreadsheet").unwrap();

        let sink = SpreadsheetSink::new(&path);
        let result = sink.append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0));

        match result {
            Err(SalaryError::Persistence { path: p, .. }) => assert!(p.ends_with("salary_data.xlsx")),
            other => panic!("Expected Persistence error, got {:?}", other),
        }
        assert_eq!(fs::read(&path).unwrap(), b"not a spreadsheet");
    }

    #[test]
    fn test_append_keeps_every_sheet_and_date_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_data.xlsx");

        let mut workbook = Workbook::new();
        let date = Format::new().set_num_format(DATE_FORMAT);
        let notes = workbook.add_worksheet();
        notes.set_name("Notes").unwrap();
        notes.write_string(0, 0, "Reviewed").unwrap();
        notes.write_number_with_format(0, 1, 45_292.0, &date).unwrap();
        let records = workbook.add_worksheet();
        records.set_name(SHEET_NAME).unwrap();
        records.write_string(0, 0, "Hired").unwrap();
        records.write_number_with_format(1, 0, 44_927.0, &date).unwrap();
        workbook.save(&path).unwrap();

        let sink = SpreadsheetSink::new(&path);
        let outcome = sink
            .append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.data_row, 2);

        let sheets = sink.read_sheets().unwrap();
        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", SHEET_NAME]);
        assert_eq!(
            sheets[0].rows,
            vec![vec![
                text("Reviewed"),
                Cell::DateTime { serial: 45_292.0, duration: false },
            ]]
        );
        assert_eq!(sheets[1].rows[0][0], text("Hired"));
        assert_eq!(
            sheets[1].rows[1][0],
            Cell::DateTime { serial: 44_927.0, duration: false }
        );
        assert_eq!(sheets[1].rows[2][0], text("Ani"));
    }

    #[test]
    fn test_first_sheet_receives_records_without_sheet1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_data.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Payroll").unwrap();
        workbook.add_worksheet().set_name("Archive").unwrap();
        workbook.save(&path).unwrap();

        let sink = SpreadsheetSink::new(&path);
        let outcome = sink
            .append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();

        assert!(outcome.created);
        let sheets = sink.read_sheets().unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Payroll");
        assert_eq!(sheets[0].rows.len(), 2);
        assert_eq!(sheets[1].name, "Archive");
    }

    #[test]
    fn test_formula_cells_are_refused_and_file_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_data.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Totals").unwrap();
        sheet.write_number(0, 0, 1.0).unwrap();
        sheet.write_formula(2, 3, "=A1*2").unwrap();
        workbook.save(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let sink = SpreadsheetSink::new(&path);
        let result = sink.append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0));

        match result {
            Err(SalaryError::Persistence { message, .. }) => {
                assert!(message.contains("Totals"));
                assert!(message.contains("formula"));
            }
            other => panic!("Expected Persistence error, got {:?}", other),
        }
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_append_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SpreadsheetSink::new(dir.path().join("reports").join("salary.xlsx"));

        sink.append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();
        assert_eq!(sink.data_row_count().unwrap(), 1);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SpreadsheetSink::new(dir.path().join("salary_data.xlsx"));
        sink.append(&create_record("Ani", Position::Staff, MaritalStatus::Single, 0))
            .unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["salary_data.xlsx".to_string()]);
    }

    #[test]
    fn test_default_sink_uses_fixed_file_name() {
        assert_eq!(SpreadsheetSink::default().path(), Path::new("salary_data.xlsx"));
    }
}
