//! Form input types.
//!
//! [`FormValues`] holds the four fields exactly as typed. Converting it
//! into a [`SalaryRequest`] validates the child count and both choice
//! fields.

use crate::error::SalaryError;
use crate::models::{MaritalStatus, Position};

/// Raw field values read from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Employee name, free text.
    pub name: String,
    /// Position, as typed.
    pub position: String,
    /// Marital status, as typed.
    pub marital_status: String,
    /// Number of children, as typed.
    pub num_children: String,
}

impl FormValues {
    /// Creates form values from four field strings.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        marital_status: impl Into<String>,
        num_children: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            marital_status: marital_status.into(),
            num_children: num_children.into(),
        }
    }
}

/// A validated calculation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryRequest {
    /// Employee name, trimmed.
    pub name: String,
    /// Job position.
    pub position: Position,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Number of children.
    pub num_children: u32,
}

impl TryFrom<FormValues> for SalaryRequest {
    type Error = SalaryError;

    /// Validates the child count first, then position, then status.
    fn try_from(values: FormValues) -> Result<Self, Self::Error> {
        let num_children = parse_num_children(&values.num_children)?;
        let position: Position = values.position.parse()?;
        let marital_status: MaritalStatus = values.marital_status.parse()?;

        Ok(Self {
            name: values.name.trim().to_string(),
            position,
            marital_status,
            num_children,
        })
    }
}

fn parse_num_children(raw: &str) -> Result<u32, SalaryError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| SalaryError::InvalidNumericInput {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values_convert() {
        let request =
            SalaryRequest::try_from(FormValues::new(" Ani ", "staff", "Single", " 2 ")).unwrap();

        assert_eq!(request.name, "Ani");
        assert_eq!(request.position, Position::Staff);
        assert_eq!(request.marital_status, MaritalStatus::Single);
        assert_eq!(request.num_children, 2);
    }

    #[test]
    fn test_non_numeric_children_is_rejected() {
        let result = SalaryRequest::try_from(FormValues::new("Ani", "Staff", "Single", "two"));
        match result {
            Err(SalaryError::InvalidNumericInput { value }) => assert_eq!(value, "two"),
            other => panic!("Expected InvalidNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_children_is_rejected() {
        let result = SalaryRequest::try_from(FormValues::new("Ani", "Staff", "Single", "-1"));
        assert!(matches!(result, Err(SalaryError::InvalidNumericInput { .. })));
    }

    #[test]
    fn test_fractional_children_is_rejected() {
        let result = SalaryRequest::try_from(FormValues::new("Ani", "Staff", "Single", "1.5"));
        assert!(matches!(result, Err(SalaryError::InvalidNumericInput { .. })));
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let result = SalaryRequest::try_from(FormValues::new("Ani", "Chef", "Single", "0"));
        match result {
            Err(SalaryError::InvalidChoice { field, value }) => {
                assert_eq!(field, "position");
                assert_eq!(value, "Chef");
            }
            other => panic!("Expected InvalidChoice, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = SalaryRequest::try_from(FormValues::new("Ani", "Staff", "Widowed", "0"));
        match result {
            Err(SalaryError::InvalidChoice { field, .. }) => assert_eq!(field, "marital status"),
            other => panic!("Expected InvalidChoice, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_is_allowed() {
        let request = SalaryRequest::try_from(FormValues::new("", "Staff", "Single", "0")).unwrap();
        assert_eq!(request.name, "");
    }
}
