//! Habitability filter for Kepler objects of interest.
//!
//! A row is considered habitable when its disposition is `CONFIRMED` and
//! three numeric columns fall strictly inside their ranges:
//!
//! | Column | Meaning | Default range (exclusive) |
//! |--------|---------|---------------------------|
//! | `koi_prad` | planetary radius (Earth radii) | 0.5 .. 1.5 |
//! | `koi_smass` | stellar mass (solar masses) | 0.78 .. 1.04 |
//! | `koi_srad` | stellar radius (solar radii) | 0.99 .. 1.01 |
//!
//! Cells that are missing or do not parse as a finite number never satisfy
//! a range, so such rows are excluded rather than reported as errors.

use serde::Deserialize;

use crate::models::PlanetRow;

/// Disposition value a row must carry to be considered.
pub const CONFIRMED: &str = "CONFIRMED";

/// An open interval `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExclusiveRange {
    pub min: f64,
    pub max: f64,
}

impl ExclusiveRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Numeric bounds applied by [`is_habitable`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HabitabilityCriteria {
    pub planet_radius: ExclusiveRange,
    pub stellar_mass: ExclusiveRange,
    pub stellar_radius: ExclusiveRange,
}

impl Default for HabitabilityCriteria {
    fn default() -> Self {
        Self {
            planet_radius: ExclusiveRange::new(0.5, 1.5),
            stellar_mass: ExclusiveRange::new(0.78, 1.04),
            stellar_radius: ExclusiveRange::new(0.99, 1.01),
        }
    }
}

impl HabitabilityCriteria {
    /// Returns the name of the first range that is empty or non-finite.
    pub fn invalid_range(&self) -> Option<&'static str> {
        [
            ("planet_radius", self.planet_radius),
            ("stellar_mass", self.stellar_mass),
            ("stellar_radius", self.stellar_radius),
        ]
        .into_iter()
        .find(|(_, range)| !range.is_valid())
        .map(|(name, _)| name)
    }
}

/// Parse a cell as a finite number. Missing, blank, and non-numeric cells
/// yield `None`.
fn numeric(row: &PlanetRow, column: &str) -> Option<f64> {
    row.get(column)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn in_range(row: &PlanetRow, column: &str, range: &ExclusiveRange) -> bool {
    numeric(row, column).is_some_and(|v| range.contains(v))
}

/// Decide whether a single dataset row describes a habitable candidate.
pub fn is_habitable(row: &PlanetRow, criteria: &HabitabilityCriteria) -> bool {
    row.get("koi_disposition").map(String::as_str) == Some(CONFIRMED)
        && in_range(row, "koi_prad", &criteria.planet_radius)
        && in_range(row, "koi_smass", &criteria.stellar_mass)
        && in_range(row, "koi_srad", &criteria.stellar_radius)
}

/// Keep the habitable rows, preserving input order.
pub fn filter_habitable<I>(rows: I, criteria: &HabitabilityCriteria) -> Vec<PlanetRow>
where
    I: IntoIterator<Item = PlanetRow>,
{
    rows.into_iter()
        .filter(|row| is_habitable(row, criteria))
        .collect()
}
