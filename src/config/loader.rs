//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a rate
//! table from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{SalaryError, SalaryResult};

use super::types::{RateFile, RateTable};

/// Loads a rate table from disk.
///
/// # File Format
///
/// ```text
/// base_salaries:
///   Staff: 1000000
///   Director: 2000000
/// tax_rates:
///   Single: "0.05"
///   Married: "0.10"
/// family_allowance_rate: "0.20"
/// child_allowance_rate: "0.10"
/// max_children: 3        # optional, defaults to 3
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_calculator::config::ConfigLoader;
/// use salary_calculator::models::Position;
///
/// let loader = ConfigLoader::load("./config/rates.yaml")?;
/// let salary = loader.table().base_salary(Position::Staff)?;
/// println!("Staff salary: {}", salary);
/// # Ok::<(), salary_calculator::error::SalaryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: RateTable,
}

impl ConfigLoader {
    /// Loads the rate table from the specified YAML file.
    ///
    /// Returns an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown keys (`ConfigParseError`)
    /// - A rate is out of range (`InvalidRate`)
    pub fn load<P: AsRef<Path>>(path: P) -> SalaryResult<Self> {
        let path = path.as_ref();
        let rate_file = Self::load_yaml::<RateFile>(path)?;
        let table = RateTable::try_from(rate_file)?;

        debug!(
            path = %path.display(),
            positions = table.positions().len(),
            "Loaded rate table"
        );

        Ok(Self { table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> SalaryResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SalaryError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| SalaryError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rate table.
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Consumes the loader, returning the rate table.
    pub fn into_table(self) -> RateTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaritalStatus, Position};
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/rates.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_temp_yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_shipped_rates_match_defaults() {
        let loader = ConfigLoader::load(config_path());
        assert!(loader.is_ok(), "Failed to load config: {:?}", loader.err());

        assert_eq!(loader.unwrap().into_table(), RateTable::default());
    }

    #[test]
    fn test_load_partial_table() {
        let file = write_temp_yaml(
            r#"
base_salaries:
  Staff: 900000
  Engineering: 1500000
tax_rates:
  Single: "0.05"
family_allowance_rate: "0.25"
child_allowance_rate: "0.05"
"#,
        );

        let loader = ConfigLoader::load(file.path()).unwrap();
        let table = loader.table();

        assert_eq!(table.base_salary(Position::Staff).unwrap(), dec("900000"));
        assert_eq!(table.base_salary(Position::Engineering).unwrap(), dec("1500000"));
        assert!(table.base_salary(Position::Director).is_err());
        assert!(table.tax_rate(MaritalStatus::Married).is_err());
        assert_eq!(table.family_allowance_rate(), dec("0.25"));
        assert_eq!(table.max_children(), 3);
    }

    #[test]
    fn test_load_accepts_legacy_position_keys() {
        let file = write_temp_yaml(
            r#"
base_salaries:
  Staf: 1000000
  Direktur: 2000000
tax_rates:
  Single: "0.05"
  Married: "0.10"
family_allowance_rate: "0.20"
child_allowance_rate: "0.10"
max_children: 2
"#,
        );

        let table = ConfigLoader::load(file.path()).unwrap().into_table();
        assert_eq!(table.base_salary(Position::Director).unwrap(), dec("2000000"));
        assert_eq!(table.max_children(), 2);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/rates.yaml") {
            Err(SalaryError::ConfigNotFound { path }) => {
                assert!(path.contains("rates.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_unknown_position_returns_parse_error() {
        let file = write_temp_yaml(
            r#"
base_salaries:
  Janitor: 800000
tax_rates: {}
family_allowance_rate: "0.20"
child_allowance_rate: "0.10"
"#,
        );

        assert!(matches!(
            ConfigLoader::load(file.path()),
            Err(SalaryError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_load_out_of_range_rate_returns_invalid_rate() {
        let file = write_temp_yaml(
            r#"
base_salaries:
  Staff: 1000000
tax_rates:
  Single: "2"
family_allowance_rate: "0.20"
child_allowance_rate: "0.10"
"#,
        );

        match ConfigLoader::load(file.path()) {
            Err(SalaryError::InvalidRate { name, .. }) => assert_eq!(name, "tax_rates.Single"),
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }
}
