//! Notifications shown to the user.
//!
//! A [`Notification`] is the console equivalent of a modal popup: a
//! title, a message, and optional details.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SalaryError;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A normal result.
    Info,
    /// Something the user needs to fix or know failed.
    Error,
}

/// A modal notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Presentation kind.
    pub kind: NotificationKind,
    /// Title line.
    pub title: String,
    /// Main message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Notification {
    /// Creates an informational notification.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error notification with details.
    pub fn error(
        title: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Reports the calculated total for an employee.
    pub fn total_salary(name: &str, total: i64) -> Self {
        Self::info(
            "Total Salary",
            format!("The total salary for {} is: {}", name, total),
        )
    }

    /// Reports that a record was saved.
    pub fn saved(path: &Path) -> Self {
        Self::info(
            "Success",
            format!("Data has been saved to {}", path.display()),
        )
    }

    /// Returns true if this is an error notification.
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl From<&SalaryError> for Notification {
    fn from(err: &SalaryError) -> Self {
        match err {
            SalaryError::InvalidNumericInput { .. } => Notification::error(
                "Invalid Input",
                "Please make sure all inputs are correct",
                err.to_string(),
            ),
            SalaryError::InvalidChoice { .. }
            | SalaryError::InvalidPosition { .. }
            | SalaryError::InvalidStatus { .. } => Notification::error(
                "Invalid Choice",
                "The position or marital status choice is not valid",
                err.to_string(),
            ),
            SalaryError::Persistence { .. } => Notification::error(
                "Save Failed",
                "The record was NOT saved",
                err.to_string(),
            ),
            SalaryError::ConfigNotFound { .. }
            | SalaryError::ConfigParseError { .. }
            | SalaryError::InvalidRate { .. }
            | SalaryError::AmountOutOfRange { .. }
            | SalaryError::Console(_) => {
                Notification::error("Error", "The calculation could not be completed", err.to_string())
            }
        }
    }
}
