//! Request types for the Fortnightly Payroll Engine API.
//!
//! The bodies mirror the backend's JSON contract: percentage maps and
//! non-worked-day maps are keyed by worker CI, and a save always carries
//! the full map (full-replace semantics, never a partial patch).

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body for `PUT /periodos/:anio/:mes/:quincena/estimulos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveStimuliRequest {
    /// Variable percentage per worker CI.
    #[serde(rename = "porcentajes")]
    pub percentages: BTreeMap<String, Decimal>,
}

/// Body for `PUT /periodos/:anio/:mes/:quincena/salarios`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSalariesRequest {
    /// Non-worked day numbers per worker CI.
    #[serde(rename = "dias_no_trabajados")]
    pub non_worked_days: BTreeMap<String, BTreeSet<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_stimuli_request() {
        let json = r#"{
            "porcentajes": {
                "89012345678": "10",
                "90023456789": "2.5"
            }
        }"#;

        let request: SaveStimuliRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.percentages.len(), 2);
        assert_eq!(
            request.percentages["90023456789"],
            Decimal::from_str("2.5").unwrap()
        );
    }

    #[test]
    fn test_deserialize_salaries_request() {
        let json = r#"{
            "dias_no_trabajados": {
                "89012345678": [6, 13],
                "90023456789": []
            }
        }"#;

        let request: SaveSalariesRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.non_worked_days["89012345678"].len(), 2);
        assert!(request.non_worked_days["90023456789"].is_empty());
    }

    #[test]
    fn test_duplicate_days_collapse_in_set() {
        let json = r#"{"dias_no_trabajados": {"89012345678": [6, 6, 13]}}"#;
        let request: SaveSalariesRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.non_worked_days["89012345678"].len(), 2);
    }
}
