//! Family and child allowance calculation.
//!
//! Married employees receive a family allowance plus a per-child
//! allowance for up to a capped number of children. Single employees
//! receive nothing.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::SalaryResult;
use crate::models::{AuditStep, MaritalStatus, Position};

use super::{add, mul};

/// The result of an allowance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct AllowanceResult {
    /// Family allowance component.
    pub family_allowance: Decimal,
    /// Child allowance component.
    pub child_allowance: Decimal,
    /// Number of children that attracted the child allowance.
    pub children_counted: u32,
    /// Total allowance (family + child).
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the allowance for an employee.
///
/// The position is always checked against the rate table, even for single
/// employees who receive no allowance.
///
/// # Arguments
///
/// * `rates` - The rate table
/// * `position` - The employee's position
/// * `status` - The employee's marital status
/// * `num_children` - Number of children (any count above the table's cap is ignored)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidPosition` if the position has no base salary, or
/// `AmountOutOfRange` if the allowance overflows.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_allowance;
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position};
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::default();
/// let result = calculate_allowance(&rates, Position::Staff, MaritalStatus::Married, 1, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(300_000));
/// ```
pub fn calculate_allowance(
    rates: &RateTable,
    position: Position,
    status: MaritalStatus,
    num_children: u32,
    step_number: u32,
) -> SalaryResult<AllowanceResult> {
    let base = rates.base_salary(position)?;

    if !status.is_married() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "allowance".to_string(),
            rule_name: "Family and Child Allowance".to_string(),
            input: serde_json::json!({
                "position": position,
                "marital_status": status,
                "num_children": num_children
            }),
            output: serde_json::json!({
                "eligible": false,
                "amount": "0"
            }),
            reasoning: format!("{} employees receive no allowance", status),
        };

        return Ok(AllowanceResult {
            family_allowance: Decimal::ZERO,
            child_allowance: Decimal::ZERO,
            children_counted: 0,
            amount: Decimal::ZERO,
            audit_step,
        });
    }

    let children_counted = num_children.min(rates.max_children());
    let family_allowance = mul("allowance", rates.family_allowance_rate(), base)?;
    let child_allowance = mul(
        "allowance",
        mul("allowance", rates.child_allowance_rate(), base)?,
        Decimal::from(children_counted),
    )?;
    let amount = add("allowance", family_allowance, child_allowance)?;

    let reasoning = if children_counted < num_children {
        format!(
            "{} × {} + {} × {} × {} children (capped from {}) = {}",
            rates.family_allowance_rate().normalize(),
            base.normalize(),
            rates.child_allowance_rate().normalize(),
            base.normalize(),
            children_counted,
            num_children,
            amount.normalize()
        )
    } else {
        format!(
            "{} × {} + {} × {} × {} children = {}",
            rates.family_allowance_rate().normalize(),
            base.normalize(),
            rates.child_allowance_rate().normalize(),
            base.normalize(),
            children_counted,
            amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowance".to_string(),
        rule_name: "Family and Child Allowance".to_string(),
        input: serde_json::json!({
            "position": position,
            "marital_status": status,
            "num_children": num_children,
            "base_salary": base.normalize().to_string(),
            "family_allowance_rate": rates.family_allowance_rate().normalize().to_string(),
            "child_allowance_rate": rates.child_allowance_rate().normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": true,
            "children_counted": children_counted,
            "cap_applied": children_counted < num_children,
            "family_allowance": family_allowance.normalize().to_string(),
            "child_allowance": child_allowance.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(AllowanceResult {
        family_allowance,
        child_allowance,
        children_counted,
        amount,
        audit_step,
    })
}
