//! Application state for the salary form.
//!
//! This module defines the state shared by every calculation request: the
//! rate table and the spreadsheet sink.

use crate::config::RateTable;
use crate::storage::SpreadsheetSink;

/// Resources used by every calculation request.
#[derive(Debug, Clone)]
pub struct AppState {
    rates: RateTable,
    sink: SpreadsheetSink,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(rates: RateTable, sink: SpreadsheetSink) -> Self {
        Self { rates, sink }
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the spreadsheet sink.
    pub fn sink(&self) -> &SpreadsheetSink {
        &self.sink
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RateTable::default(), SpreadsheetSink::default())
    }
}
