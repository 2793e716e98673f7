//! Monthly salary calculator.
//!
//! This crate computes an employee's monthly salary from their position,
//! marital status, and number of children (base pay plus family and child
//! allowances minus a flat tax), and appends each result to a spreadsheet.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod storage;
pub mod telemetry;
