//! Flat tax calculation.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::SalaryResult;
use crate::models::{AuditStep, MaritalStatus, Position};

use super::mul;

/// The result of a tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// The tax rate applied.
    pub rate: Decimal,
    /// The tax amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates tax as the marital status rate applied to the base salary.
///
/// # Errors
///
/// Returns `InvalidPosition` if the position has no base salary, or
/// `InvalidStatus` if the status has no tax rate.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_tax;
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position};
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::default();
/// let result = calculate_tax(&rates, Position::Staff, MaritalStatus::Single, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(50_000));
/// ```
pub fn calculate_tax(
    rates: &RateTable,
    position: Position,
    status: MaritalStatus,
    step_number: u32,
) -> SalaryResult<TaxResult> {
    let base = rates.base_salary(position)?;
    let rate = rates.tax_rate(status)?;
    let amount = mul("tax", rate, base)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax".to_string(),
        rule_name: "Flat Tax".to_string(),
        input: serde_json::json!({
            "position": position,
            "marital_status": status,
            "base_salary": base.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} rate {} × {} = {}",
            status,
            rate.normalize(),
            base.normalize(),
            amount.normalize()
        ),
    };

    Ok(TaxResult {
        rate,
        amount,
        audit_step,
    })
}
