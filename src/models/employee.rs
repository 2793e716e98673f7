//! Employee attributes that drive the salary calculation.
//!
//! This module defines the [`Position`] and [`MaritalStatus`] enums. Both
//! parse from the text a user types into the form, so an unrecognised
//! choice is rejected before any calculation runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SalaryError;

/// A job position with a fixed base salary.
///
/// Positions parse case-insensitively from their English names. The
/// legacy labels used by older spreadsheets ("Staf", "Sekretaris",
/// "Manajer", "Direktur", "Keuangan") are accepted as aliases.
///
/// # Example
///
/// ```
/// use salary_calculator::models::Position;
///
/// let position: Position = "director".parse().unwrap();
/// assert_eq!(position, Position::Director);
/// assert_eq!(position.to_string(), "Director");
///
/// let legacy: Position = "Keuangan".parse().unwrap();
/// assert_eq!(legacy, Position::Finance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// General staff.
    #[serde(alias = "Staf")]
    Staff,
    /// Secretary.
    #[serde(alias = "Sekretaris")]
    Secretary,
    /// Manager.
    #[serde(alias = "Manajer")]
    Manager,
    /// Director.
    #[serde(alias = "Direktur")]
    Director,
    /// Finance department.
    #[serde(alias = "Keuangan")]
    Finance,
    /// Purchasing department.
    Purchasing,
    /// Engineering department.
    Engineering,
}

impl Position {
    /// Every position, in form display order.
    pub const ALL: [Position; 7] = [
        Position::Staff,
        Position::Secretary,
        Position::Manager,
        Position::Director,
        Position::Finance,
        Position::Purchasing,
        Position::Engineering,
    ];

    /// Returns the display label written to the spreadsheet.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Staff => "Staff",
            Position::Secretary => "Secretary",
            Position::Manager => "Manager",
            Position::Director => "Director",
            Position::Finance => "Finance",
            Position::Purchasing => "Purchasing",
            Position::Engineering => "Engineering",
        }
    }

    fn legacy_label(&self) -> Option<&'static str> {
        match self {
            Position::Staff => Some("Staf"),
            Position::Secretary => Some("Sekretaris"),
            Position::Manager => Some("Manajer"),
            Position::Director => Some("Direktur"),
            Position::Finance => Some("Keuangan"),
            Position::Purchasing | Position::Engineering => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = SalaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| {
                p.label().eq_ignore_ascii_case(needle)
                    || p.legacy_label()
                        .is_some_and(|l| l.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| SalaryError::InvalidChoice {
                field: "position".to_string(),
                value: s.to_string(),
            })
    }
}

/// Marital status, which decides allowance eligibility and the tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaritalStatus {
    /// Married; eligible for family and child allowances.
    Married,
    /// Single; no allowances.
    Single,
}

impl MaritalStatus {
    /// Every marital status, in form display order.
    pub const ALL: [MaritalStatus; 2] = [MaritalStatus::Married, MaritalStatus::Single];

    /// Returns the display label written to the spreadsheet.
    pub fn label(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
        }
    }

    /// Returns true if the employee is married.
    pub fn is_married(&self) -> bool {
        *self == MaritalStatus::Married
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaritalStatus {
    type Err = SalaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        MaritalStatus::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SalaryError::InvalidChoice {
                field: "marital status".to_string(),
                value: s.to_string(),
            })
    }
}
