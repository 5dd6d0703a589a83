//! Kepler dataset connector.
//!
//! Reads the NASA Kepler objects-of-interest CSV export, keeps the rows that
//! pass the habitability filter, and projects them onto the retained columns.
//!
//! The export starts with a block of `#` comment lines describing the
//! columns; the first non-comment line is the header. All cells are kept as
//! text. Rows the tokenizer rejects are skipped, and rows missing a filtered
//! column simply fail the filter. Only a file that cannot be opened or read
//! fails the load.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use mission_control_core::habitability::{is_habitable, HabitabilityCriteria};
use mission_control_core::models::{Planet, PlanetRow, RETAINED_COLUMNS};
use serde::Serialize;

use crate::error::{IngestError, MalformedRecord};

/// Summary of one planet load.
#[derive(Debug, Clone, Serialize)]
pub struct PlanetLoadReport {
    /// Data rows seen (comments and header excluded).
    pub rows_read: usize,
    /// Rows that passed the filter and projection.
    pub habitable: usize,
    pub skipped: Vec<MalformedRecord>,
}

#[derive(Debug)]
pub struct PlanetLoad {
    pub planets: Vec<Planet>,
    pub report: PlanetLoadReport,
}

/// Load habitable planets from the dataset at `path`.
pub fn load_planets_data(
    path: &Path,
    criteria: &HabitabilityCriteria,
) -> Result<PlanetLoad, IngestError> {
    tracing::info!(path = %path.display(), "loading planet dataset");

    let file = File::open(path).map_err(|e| IngestError::data_unavailable(path, e))?;
    let load = load_planets_from_reader(file, criteria)
        .map_err(|e| IngestError::data_unavailable(path, e))?;

    tracing::info!("{} habitable planets found!", load.planets.len());
    Ok(load)
}

/// Load habitable planets from any CSV source.
///
/// Returns an I/O error only when the underlying reader fails or the header
/// line cannot be decoded.
pub fn load_planets_from_reader<R: Read>(
    reader: R,
    criteria: &HabitabilityCriteria,
) -> io::Result<PlanetLoad> {
    let mut rdr = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_to_io)?.clone();

    let mut rows_read = 0;
    let mut planets = Vec::new();
    let mut skipped = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(csv_to_io(e)),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable planet row");
                skipped.push(MalformedRecord {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let row = to_row(&headers, &record);
        if !is_habitable(&row, criteria) {
            continue;
        }
        match Planet::project(&row) {
            Some(planet) => planets.push(planet),
            None => {
                let reason = format!(
                    "habitable row missing column(s): {}",
                    missing_columns(&row).join(", ")
                );
                tracing::warn!(index, %reason, "skipping planet row");
                skipped.push(MalformedRecord { index, reason });
            }
        }
    }

    Ok(PlanetLoad {
        report: PlanetLoadReport {
            rows_read,
            habitable: planets.len(),
            skipped,
        },
        planets,
    })
}

/// Pair header names with cells. Short rows leave trailing columns absent;
/// surplus cells are ignored.
fn to_row(headers: &StringRecord, record: &StringRecord) -> PlanetRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| (h.to_string(), v.to_string()))
        .collect()
}

fn missing_columns(row: &PlanetRow) -> Vec<&'static str> {
    let present: HashSet<&str> = row.keys().map(String::as_str).collect();
    RETAINED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect()
}

fn csv_to_io(err: csv::Error) -> io::Error {
    if !err.is_io_error() {
        return io::Error::new(io::ErrorKind::InvalidData, err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "kepid,kepoi_name,kepler_name,koi_disposition,koi_count,koi_period,koi_prad,koi_smass,koi_srad,koi_steff";

    fn dataset(rows: &[&str]) -> String {
        let mut out = String::from(
            "# This file was produced by the NASA Exoplanet Archive\n\
             # COLUMN kepid:          KepID\n\
             #\n",
        );
        out.push_str(HEADER);
        out.push('\n');
        for r in rows {
            out.push_str(r);
            out.push('\n');
        }
        out
    }

    fn load(csv: &str) -> PlanetLoad {
        load_planets_from_reader(csv.as_bytes(), &HabitabilityCriteria::default()).unwrap()
    }

    #[test]
    fn test_one_of_two_rows_habitable() {
        let csv = dataset(&[
            "10593626,K00087.01,Kepler-22 b,CONFIRMED,1,289.86,1.0,0.9,1.0,5518",
            "10601284,K00088.01,Kepler-99 b,CONFIRMED,1,10.5,1.0,1.2,1.0,5800",
        ]);
        let load = load(&csv);
        assert_eq!(load.planets.len(), 1);
        let planet = &load.planets[0];
        assert_eq!(planet.kepler_name, "Kepler-22 b");
        assert_eq!(planet.koi_count, "1");
        assert_eq!(planet.koi_prad, "1.0");
        assert_eq!(planet.koi_smass, "0.9");
        assert_eq!(planet.koi_srad, "1.0");
        assert_eq!(planet.koi_steff, "5518");
        assert_eq!(planet.koi_period, "289.86");
        assert_eq!(load.report.rows_read, 2);
        assert_eq!(load.report.habitable, 1);
        assert!(load.report.skipped.is_empty());
    }

    #[test]
    fn test_source_order_preserved() {
        let csv = dataset(&[
            "1,K1,Kepler-1 b,CONFIRMED,2,10,1.1,0.95,1.005,5700",
            "2,K2,Kepler-2 b,CANDIDATE,1,10,1.1,0.95,1.005,5700",
            "3,K3,Kepler-3 b,CONFIRMED,1,10,0.6,0.80,0.995,5700",
            "4,K4,Kepler-4 b,CONFIRMED,1,10,1.4,1.00,1.000,5700",
        ]);
        let names: Vec<String> = load(&csv)
            .planets
            .into_iter()
            .map(|p| p.kepler_name)
            .collect();
        assert_eq!(names, vec!["Kepler-1 b", "Kepler-3 b", "Kepler-4 b"]);
    }

    #[test]
    fn test_comment_lines_between_rows_skipped() {
        let csv = dataset(&[
            "1,K1,Kepler-1 b,CONFIRMED,1,10,1.0,0.9,1.0,5700",
            "# trailing note",
            "2,K2,Kepler-2 b,CONFIRMED,1,10,1.0,0.9,1.0,5700",
        ]);
        let load = load(&csv);
        assert_eq!(load.report.rows_read, 2);
        assert_eq!(load.planets.len(), 2);
    }

    #[test]
    fn test_short_row_filtered_out_without_error() {
        let csv = dataset(&[
            "1,K1,Kepler-1 b,CONFIRMED,1,10,1.0",
            "2,K2,Kepler-2 b,CONFIRMED,1,10,1.0,0.9,1.0,5700",
        ]);
        let load = load(&csv);
        assert_eq!(load.planets.len(), 1);
        assert_eq!(load.planets[0].kepler_name, "Kepler-2 b");
        assert!(load.report.skipped.is_empty());
    }

    #[test]
    fn test_habitable_row_missing_projected_column_skipped() {
        let csv = "koi_disposition,koi_prad,koi_smass,koi_srad,kepler_name\n\
                   CONFIRMED,1.0,0.9,1.0,Kepler-7 b\n";
        let load = load(csv);
        assert!(load.planets.is_empty());
        assert_eq!(load.report.skipped.len(), 1);
        let reason = &load.report.skipped[0].reason;
        assert!(reason.contains("koi_count"));
        assert!(reason.contains("koi_period"));
        assert!(!reason.contains("kepler_name"));
    }

    #[test]
    fn test_cells_are_not_trimmed() {
        let csv = dataset(&[
            "1,K1, Kepler-1 b ,CONFIRMED,1,10,1.0,0.9,1.0,5700",
            "2,K2,Kepler-2 b, CONFIRMED ,1,10,1.0,0.9,1.0,5700",
        ]);
        let load = load(&csv);
        assert_eq!(load.report.rows_read, 2);
        assert_eq!(load.planets.len(), 1);
        assert_eq!(load.planets[0].kepler_name, " Kepler-1 b ");
    }

    #[test]
    fn test_blank_kepler_name_kept_as_is() {
        let csv = dataset(&["1,K1,,CONFIRMED,1,10,1.0,0.9,1.0,5700"]);
        let load = load(&csv);
        assert_eq!(load.planets.len(), 1);
        assert_eq!(load.planets[0].kepler_name, "");
    }

    #[test]
    fn test_invalid_utf8_row_skipped() {
        let mut bytes = dataset(&["1,K1,Kepler-1 b,CONFIRMED,1,10,1.0,0.9,1.0,5700"]).into_bytes();
        bytes.extend_from_slice(b"2,K2,Kepler-\xff b,CONFIRMED,1,10,1.0,0.9,1.0,5700\n");
        let load = load_planets_from_reader(&bytes[..], &HabitabilityCriteria::default()).unwrap();
        assert_eq!(load.planets.len(), 1);
        assert_eq!(load.report.skipped.len(), 1);
        assert_eq!(load.report.skipped[0].index, 1);
        assert_eq!(load.report.rows_read, 2);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = load_planets_data(
            Path::new("/nonexistent/kepler.csv"),
            &HabitabilityCriteria::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::DataUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/kepler.csv"));
    }

    #[test]
    fn test_repeat_load_is_identical() {
        let csv = dataset(&["1,K1,Kepler-1 b,CONFIRMED,1,10,1.0,0.9,1.0,5700"]);
        assert_eq!(load(&csv).planets, load(&csv).planets);
    }
}
