//! Total salary calculation.
//!
//! Combines the base salary lookup, allowance, and tax into a single
//! [`SalaryBreakdown`] with a complete audit trace.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::RateTable;
use crate::error::{SalaryError, SalaryResult};
use crate::models::{AuditStep, MaritalStatus, Position, SalaryBreakdown};

use super::allowance::calculate_allowance;
use super::tax::calculate_tax;
use super::{add, sub};

/// Calculates the total salary: base + allowance - tax.
///
/// The allowance and tax are each computed exactly once. The exact total
/// is kept alongside `truncated_total`, which discards the fractional
/// part without rounding.
///
/// # Errors
///
/// Returns `InvalidPosition` or `InvalidStatus` if the rate table has no
/// entry for the given position or status, and `AmountOutOfRange` if an
/// amount overflows or the total does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_total;
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position};
///
/// let rates = RateTable::default();
/// let breakdown =
///     calculate_total(&rates, Position::Director, MaritalStatus::Married, 5).unwrap();
/// assert_eq!(breakdown.truncated_total, 2_800_000);
/// ```
pub fn calculate_total(
    rates: &RateTable,
    position: Position,
    status: MaritalStatus,
    num_children: u32,
) -> SalaryResult<SalaryBreakdown> {
    let mut audit_trace: Vec<AuditStep> = Vec::with_capacity(4);

    let base_salary = rates.base_salary(position)?;
    audit_trace.push(AuditStep {
        step_number: 1,
        rule_id: "base_salary_lookup".to_string(),
        rule_name: "Base Salary Lookup".to_string(),
        input: serde_json::json!({ "position": position }),
        output: serde_json::json!({ "base_salary": base_salary.normalize().to_string() }),
        reasoning: format!("Base salary for {}: {}", position, base_salary.normalize()),
    });

    let allowance = calculate_allowance(rates, position, status, num_children, 2)?;
    audit_trace.push(allowance.audit_step);

    let tax = calculate_tax(rates, position, status, 3)?;
    audit_trace.push(tax.audit_step);

    let gross = add("total_salary", base_salary, allowance.amount)?;
    let total = sub("total_salary", gross, tax.amount)?;
    let truncated_total = truncate(total)?;
    audit_trace.push(AuditStep {
        step_number: 4,
        rule_id: "total_salary".to_string(),
        rule_name: "Total Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "total_allowance": allowance.amount.normalize().to_string(),
            "tax": tax.amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "truncated_total": truncated_total
        }),
        reasoning: format!(
            "{} + {} - {} = {} (truncated to {})",
            base_salary.normalize(),
            allowance.amount.normalize(),
            tax.amount.normalize(),
            total.normalize(),
            truncated_total
        ),
    });

    debug!(
        position = %position,
        marital_status = %status,
        num_children,
        total = %total,
        "Salary calculated"
    );

    Ok(SalaryBreakdown {
        position,
        marital_status: status,
        num_children,
        base_salary,
        family_allowance: allowance.family_allowance,
        child_allowance: allowance.child_allowance,
        total_allowance: allowance.amount,
        tax: tax.amount,
        total,
        truncated_total,
        audit_trace,
    })
}

/// Discards the fractional part of a total.
fn truncate(total: Decimal) -> SalaryResult<i64> {
    total
        .trunc()
        .to_i64()
        .ok_or_else(|| SalaryError::AmountOutOfRange {
            step: "total_salary".to_string(),
            message: format!("{} does not fit in a whole currency amount", total.normalize()),
        })
}
