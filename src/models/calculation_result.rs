//! Calculation result models for the salary calculator.
//!
//! This module contains the [`SalaryBreakdown`] type and the [`AuditStep`]
//! entries that record every decision taken while computing a salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MaritalStatus, Position};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The full result of a salary calculation.
///
/// Allowance and tax are computed once and carried here, so that the
/// displayed total and the persisted record always agree.
///
/// # Example
///
/// ```
/// use salary_calculator::calculation::calculate_total;
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position};
///
/// let rates = RateTable::default();
/// let breakdown = calculate_total(&rates, Position::Staff, MaritalStatus::Single, 0).unwrap();
/// assert_eq!(breakdown.truncated_total, 950_000);
/// assert_eq!(breakdown.audit_trace.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// The employee's position.
    pub position: Position,
    /// The employee's marital status.
    pub marital_status: MaritalStatus,
    /// The number of children as entered (before capping).
    pub num_children: u32,
    /// Base salary for the position.
    pub base_salary: Decimal,
    /// Family allowance component (zero unless married).
    pub family_allowance: Decimal,
    /// Child allowance component (zero unless married).
    pub child_allowance: Decimal,
    /// Sum of family and child allowances.
    pub total_allowance: Decimal,
    /// Tax deducted.
    pub tax: Decimal,
    /// Exact total: base + allowance - tax.
    pub total: Decimal,
    /// The total with its fractional part discarded.
    pub truncated_total: i64,
    /// Ordered audit steps for the calculation.
    pub audit_trace: Vec<AuditStep>,
}
