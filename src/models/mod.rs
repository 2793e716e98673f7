//! Core data models for the salary calculator.
//!
//! This module contains all the domain models used throughout the crate.

mod calculation_result;
mod employee;
mod salary_record;

pub use calculation_result::{AuditStep, SalaryBreakdown};
pub use employee::{MaritalStatus, Position};
pub use salary_record::SalaryRecord;
