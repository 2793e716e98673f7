//! Configuration types for the rate table.
//!
//! These types represent the base salaries, tax rates, and allowance
//! rates used by every calculation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{SalaryError, SalaryResult};
use crate::models::{MaritalStatus, Position};

/// The most children counted towards the child allowance.
pub const MAX_CHILDREN_COUNTED: u32 = 3;

/// Rate table file as it appears on disk (e.g. `config/rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// Base salary per position.
    pub base_salaries: HashMap<Position, Decimal>,
    /// Tax rate per marital status, as a fraction.
    pub tax_rates: HashMap<MaritalStatus, Decimal>,
    /// Family allowance as a fraction of base salary.
    pub family_allowance_rate: Decimal,
    /// Child allowance per child as a fraction of base salary.
    pub child_allowance_rate: Decimal,
    /// Maximum number of children counted.
    #[serde(default = "default_max_children")]
    pub max_children: u32,
}

fn default_max_children() -> u32 {
    MAX_CHILDREN_COUNTED
}

/// Base salaries, tax rates, and allowance rates.
///
/// The [`Default`] table carries the built-in company rates. A table
/// loaded from a file may cover fewer positions or statuses; lookups for
/// the missing keys fail with [`SalaryError::InvalidPosition`] or
/// [`SalaryError::InvalidStatus`].
///
/// # Example
///
/// ```
/// use salary_calculator::config::RateTable;
/// use salary_calculator::models::{MaritalStatus, Position};
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::default();
/// assert_eq!(rates.base_salary(Position::Manager).unwrap(), Decimal::from(1_500_000));
/// assert_eq!(rates.tax_rate(MaritalStatus::Single).unwrap(), Decimal::new(5, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base_salaries: HashMap<Position, Decimal>,
    tax_rates: HashMap<MaritalStatus, Decimal>,
    family_allowance_rate: Decimal,
    child_allowance_rate: Decimal,
    max_children: u32,
}

impl RateTable {
    /// Creates a rate table, rejecting out-of-range values.
    ///
    /// Base salaries must be positive; tax and allowance rates must be
    /// fractions between 0 and 1 inclusive.
    pub fn new(
        base_salaries: HashMap<Position, Decimal>,
        tax_rates: HashMap<MaritalStatus, Decimal>,
        family_allowance_rate: Decimal,
        child_allowance_rate: Decimal,
        max_children: u32,
    ) -> SalaryResult<Self> {
        for (position, salary) in &base_salaries {
            if *salary <= Decimal::ZERO {
                return Err(SalaryError::InvalidRate {
                    name: format!("base_salaries.{}", position),
                    message: format!("must be positive, got {}", salary),
                });
            }
        }
        for (status, rate) in &tax_rates {
            check_fraction(&format!("tax_rates.{}", status), *rate)?;
        }
        check_fraction("family_allowance_rate", family_allowance_rate)?;
        check_fraction("child_allowance_rate", child_allowance_rate)?;

        Ok(Self {
            base_salaries,
            tax_rates,
            family_allowance_rate,
            child_allowance_rate,
            max_children,
        })
    }

    /// Returns the base salary for a position.
    pub fn base_salary(&self, position: Position) -> SalaryResult<Decimal> {
        self.base_salaries
            .get(&position)
            .copied()
            .ok_or_else(|| SalaryError::InvalidPosition {
                position: position.to_string(),
            })
    }

    /// Returns the tax rate for a marital status.
    pub fn tax_rate(&self, status: MaritalStatus) -> SalaryResult<Decimal> {
        self.tax_rates
            .get(&status)
            .copied()
            .ok_or_else(|| SalaryError::InvalidStatus {
                status: status.to_string(),
            })
    }

    /// Returns the family allowance rate.
    pub fn family_allowance_rate(&self) -> Decimal {
        self.family_allowance_rate
    }

    /// Returns the per-child allowance rate.
    pub fn child_allowance_rate(&self) -> Decimal {
        self.child_allowance_rate
    }

    /// Returns the maximum number of children counted.
    pub fn max_children(&self) -> u32 {
        self.max_children
    }

    /// Returns the positions this table has a salary for, in display order.
    pub fn positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|p| self.base_salaries.contains_key(p))
            .collect()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let base_salaries = HashMap::from([
            (Position::Staff, Decimal::from(1_000_000)),
            (Position::Secretary, Decimal::from(1_200_000)),
            (Position::Manager, Decimal::from(1_500_000)),
            (Position::Director, Decimal::from(2_000_000)),
            (Position::Finance, Decimal::from(1_300_000)),
            (Position::Purchasing, Decimal::from(1_100_000)),
            (Position::Engineering, Decimal::from(1_400_000)),
        ]);
        let tax_rates = HashMap::from([
            (MaritalStatus::Single, Decimal::new(5, 2)),
            (MaritalStatus::Married, Decimal::new(10, 2)),
        ]);

        Self {
            base_salaries,
            tax_rates,
            family_allowance_rate: Decimal::new(20, 2),
            child_allowance_rate: Decimal::new(10, 2),
            max_children: MAX_CHILDREN_COUNTED,
        }
    }
}

impl TryFrom<RateFile> for RateTable {
    type Error = SalaryError;

    fn try_from(file: RateFile) -> Result<Self, Self::Error> {
        RateTable::new(
            file.base_salaries,
            file.tax_rates,
            file.family_allowance_rate,
            file.child_allowance_rate,
            file.max_children,
        )
    }
}

fn check_fraction(name: &str, value: Decimal) -> SalaryResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(SalaryError::InvalidRate {
            name: name.to_string(),
            message: format!("must be between 0 and 1, got {}", value),
        });
    }
    Ok(())
}
