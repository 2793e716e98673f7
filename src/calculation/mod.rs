//! Calculation logic for the salary calculator.
//!
//! This module contains the pure calculation functions: allowance for
//! married employees, flat tax by marital status, and the combined total.
//! Every function takes the rate table explicitly and carries no state
//! between calls.

mod allowance;
mod tax;
mod total;

pub use allowance::{AllowanceResult, calculate_allowance};
pub use tax::{TaxResult, calculate_tax};
pub use total::calculate_total;

use rust_decimal::Decimal;

use crate::error::{SalaryError, SalaryResult};

fn out_of_range(step: &str, lhs: Decimal, op: char, rhs: Decimal) -> SalaryError {
    SalaryError::AmountOutOfRange {
        step: step.to_string(),
        message: format!("{} {} {} overflows", lhs.normalize(), op, rhs.normalize()),
    }
}

/// `lhs × rhs`, or `AmountOutOfRange` on overflow.
fn mul(step: &str, lhs: Decimal, rhs: Decimal) -> SalaryResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(step, lhs, '×', rhs))
}

fn add(step: &str, lhs: Decimal, rhs: Decimal) -> SalaryResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| out_of_range(step, lhs, '+', rhs))
}

fn sub(step: &str, lhs: Decimal, rhs: Decimal) -> SalaryResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| out_of_range(step, lhs, '-', rhs))
}
