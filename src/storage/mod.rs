//! Persistence of salary records.

mod spreadsheet;

pub use spreadsheet::{
    AppendOutcome, Cell, DEFAULT_SPREADSHEET_PATH, SHEET_NAME, Sheet, SpreadsheetSink, record_cells,
};
