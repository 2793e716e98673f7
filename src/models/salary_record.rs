//! The persisted salary record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MaritalStatus, Position, SalaryBreakdown};

/// One row of the salary spreadsheet.
///
/// Built once per calculation request from a [`SalaryBreakdown`] and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Employee name as typed into the form.
    #[serde(rename = "Name")]
    pub name: String,
    /// Job position.
    #[serde(rename = "Position")]
    pub position: Position,
    /// Marital status.
    #[serde(rename = "Marital Status")]
    pub marital_status: MaritalStatus,
    /// Number of children as entered.
    #[serde(rename = "Number of Children")]
    pub num_children: u32,
    /// Base salary for the position.
    #[serde(rename = "Basic Salary")]
    pub base_salary: Decimal,
    /// Family plus child allowance.
    #[serde(rename = "Total Allowance")]
    pub total_allowance: Decimal,
    /// Tax deducted.
    #[serde(rename = "Tax")]
    pub tax: Decimal,
    /// Total salary, truncated to whole currency units.
    #[serde(rename = "Total Salary")]
    pub total_salary: i64,
}

impl SalaryRecord {
    /// Spreadsheet header, in column order.
    pub const COLUMNS: [&'static str; 8] = [
        "Name",
        "Position",
        "Marital Status",
        "Number of Children",
        "Basic Salary",
        "Total Allowance",
        "Tax",
        "Total Salary",
    ];

    /// Builds a record from a finished calculation.
    pub fn new(name: impl Into<String>, breakdown: &SalaryBreakdown) -> Self {
        Self {
            name: name.into(),
            position: breakdown.position,
            marital_status: breakdown.marital_status,
            num_children: breakdown.num_children,
            base_salary: breakdown.base_salary,
            total_allowance: breakdown.total_allowance,
            tax: breakdown.tax,
            total_salary: breakdown.truncated_total,
        }
    }

    /// Returns true if the total equals base + allowance - tax, truncated.
    pub fn is_consistent(&self) -> bool {
        let exact = self.base_salary + self.total_allowance - self.tax;
        Decimal::from(self.total_salary) == exact.trunc()
    }
}
