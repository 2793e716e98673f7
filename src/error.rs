//! Error types for the salary calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while validating form input,
//! calculating a salary, or persisting a record.

use thiserror::Error;

/// The main error type for the salary calculator.
///
/// Every operation in the crate returns this error type. None of the
/// variants is fatal to the interaction loop: each one is turned into a
/// user-facing notification and the form keeps waiting for input.
///
/// # Example
///
/// ```
/// use salary_calculator::error::SalaryError;
///
/// let error = SalaryError::InvalidNumericInput {
///     value: "two".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Number of children must be a non-negative integer, got 'two'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum SalaryError {
    /// The child-count field could not be parsed as a non-negative integer.
    #[error("Number of children must be a non-negative integer, got '{value}'")]
    InvalidNumericInput {
        /// The raw text that failed to parse.
        value: String,
    },

    /// A choice field did not match any known option.
    #[error("Invalid {field}: '{value}'")]
    InvalidChoice {
        /// The form field holding the bad value (e.g. "position").
        field: String,
        /// The raw text that was entered.
        value: String,
    },

    /// The position has no base salary in the rate table.
    #[error("Position not found in rate table: {position}")]
    InvalidPosition {
        /// The position that was looked up.
        position: String,
    },

    /// The marital status has no tax rate in the rate table.
    #[error("Marital status not found in tax table: {status}")]
    InvalidStatus {
        /// The marital status that was looked up.
        status: String,
    },

    /// Rate configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rate configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate in the configuration is out of range.
    #[error("Invalid rate '{name}': {message}")]
    InvalidRate {
        /// The name of the offending rate.
        name: String,
        /// Why the rate was rejected.
        message: String,
    },

    /// An intermediate amount does not fit the numeric range.
    #[error("Amount out of range while computing {step}: {message}")]
    AmountOutOfRange {
        /// The calculation step that overflowed (e.g. "tax").
        step: String,
        /// The operands involved.
        message: String,
    },

    /// The spreadsheet could not be read or written.
    #[error("Failed to save spreadsheet '{path}': {message}")]
    Persistence {
        /// The spreadsheet path.
        path: String,
        /// A description of the underlying failure.
        message: String,
    },

    /// The console form could not be read from or written to.
    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),
}

impl SalaryError {
    /// Returns true if the error was caused by what the user typed, as
    /// opposed to the environment (files, console).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SalaryError::InvalidNumericInput { .. }
                | SalaryError::InvalidChoice { .. }
                | SalaryError::InvalidPosition { .. }
                | SalaryError::InvalidStatus { .. }
        )
    }
}

/// A type alias for Results that return SalaryError.
pub type SalaryResult<T> = Result<T, SalaryError>;
