//! Core data models used throughout Mission Control.
//!
//! These types represent the launch records and planet rows that flow from
//! the ingestion connectors into the stores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A normalized launch record, keyed by `flight_number` in the launch store.
///
/// Serialized with camelCase names (`flightNumber`, `launchDate`, ...) so a
/// surrounding service can hand it out as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub flight_number: i64,
    pub mission: String,
    pub rocket: String,
    /// Customers of every second-stage payload, flattened in payload order.
    #[serde(default)]
    pub customers: Vec<String>,
    /// Unix timestamp (seconds).
    pub launch_date: i64,
    #[serde(default)]
    pub upcoming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Never set by ingestion; only by direct inserts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Launch {
    /// A launch that is no longer upcoming and did not succeed.
    pub fn is_aborted(&self) -> bool {
        !self.upcoming && self.success == Some(false)
    }
}

/// Raw tabular row from the planet dataset: column name → cell text.
pub type PlanetRow = HashMap<String, String>;

/// Columns kept from a habitable row, in output order.
pub const RETAINED_COLUMNS: [&str; 7] = [
    "kepler_name",
    "koi_count",
    "koi_prad",
    "koi_smass",
    "koi_srad",
    "koi_steff",
    "koi_period",
];

/// Projection of a habitable dataset row.
///
/// All values are carried as the original cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub kepler_name: String,
    pub koi_count: String,
    pub koi_prad: String,
    pub koi_smass: String,
    pub koi_srad: String,
    pub koi_steff: String,
    pub koi_period: String,
}

impl Planet {
    /// Project a row onto [`RETAINED_COLUMNS`].
    ///
    /// Returns `None` if any retained column is missing from the row.
    pub fn project(row: &PlanetRow) -> Option<Self> {
        let col = |name: &str| row.get(name).cloned();
        Some(Self {
            kepler_name: col("kepler_name")?,
            koi_count: col("koi_count")?,
            koi_prad: col("koi_prad")?,
            koi_smass: col("koi_smass")?,
            koi_srad: col("koi_srad")?,
            koi_steff: col("koi_steff")?,
            koi_period: col("koi_period")?,
        })
    }

    /// Column/value pairs in [`RETAINED_COLUMNS`] order.
    pub fn columns(&self) -> [(&'static str, &str); 7] {
        [
            ("kepler_name", self.kepler_name.as_str()),
            ("koi_count", self.koi_count.as_str()),
            ("koi_prad", self.koi_prad.as_str()),
            ("koi_smass", self.koi_smass.as_str()),
            ("koi_srad", self.koi_srad.as_str()),
            ("koi_steff", self.koi_steff.as_str()),
            ("koi_period", self.koi_period.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> PlanetRow {
        let mut row = PlanetRow::new();
        for (i, name) in RETAINED_COLUMNS.iter().enumerate() {
            row.insert(name.to_string(), format!("v{}", i));
        }
        row.insert("koi_disposition".to_string(), "CONFIRMED".to_string());
        row.insert("koi_tce_plnt_num".to_string(), "1".to_string());
        row
    }

    #[test]
    fn test_project_drops_extra_columns() {
        let planet = Planet::project(&full_row()).unwrap();
        let json = serde_json::to_value(&planet).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), RETAINED_COLUMNS.len());
        for k in keys {
            assert!(RETAINED_COLUMNS.contains(&k.as_str()), "unexpected column {}", k);
        }
        assert_eq!(planet.kepler_name, "v0");
        assert_eq!(planet.koi_period, "v6");
    }

    #[test]
    fn test_project_missing_column() {
        let mut row = full_row();
        row.remove("koi_steff");
        assert!(Planet::project(&row).is_none());
    }

    #[test]
    fn test_columns_order_matches_retained() {
        let planet = Planet::project(&full_row()).unwrap();
        let names: Vec<&str> = planet.columns().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, RETAINED_COLUMNS);
    }

    #[test]
    fn test_launch_serializes_camel_case() {
        let launch = Launch {
            flight_number: 7,
            mission: "CRS-1".to_string(),
            rocket: "Falcon 9".to_string(),
            customers: vec!["NASA".to_string()],
            launch_date: 1349656500,
            upcoming: false,
            success: Some(true),
            target: None,
        };
        let json = serde_json::to_value(&launch).unwrap();
        assert_eq!(json["flightNumber"], 7);
        assert_eq!(json["launchDate"], 1349656500);
        assert_eq!(json["success"], true);
        assert!(json.get("target").is_none());
    }
}
