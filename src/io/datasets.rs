//! Dataset snapshot loading.
//!
//! Snapshots are the upstream API responses saved to disk: a JSON array of
//! municipality or company records. A file that cannot be read or parsed is
//! an operational error; malformed fields inside an otherwise valid record
//! degrade to defaults in the record types instead.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::core::{Company, Error, Municipality, Result};

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| Error::file_system("failed to open dataset", path, e))?;
    Ok(BufReader::new(file))
}

/// Load a municipality dataset snapshot.
pub fn load_municipalities(path: &Path) -> Result<Vec<Municipality>> {
    let reader = open(path)?;
    let records: Vec<Municipality> = serde_json::from_reader(reader)
        .map_err(|e| Error::dataset(path, e.to_string()))?;
    log::debug!(
        "Loaded {} municipalities from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Load a company dataset snapshot.
pub fn load_companies(path: &Path) -> Result<Vec<Company>> {
    let reader = open(path)?;
    let records: Vec<Company> =
        serde_json::from_reader(reader).map_err(|e| Error::dataset(path, e.to_string()))?;
    log::debug!("Loaded {} companies from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_municipalities() {
        let file = write_temp(indoc! {r#"
            [
              {
                "name": "Lund",
                "region": "Skåne",
                "historicalEmissionChangePercent": -3.1,
                "neededEmissionChangePercent": 12.0,
                "totalConsumptionEmission": 5.9,
                "electricVehiclePerChargePoints": 14.2,
                "climatePlanYear": 2021,
                "budgetRunsOut": "Håller budget",
                "hitNetZero": "2044-01-01"
              }
            ]
        "#});
        let records = load_municipalities(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lund");
    }

    #[test]
    fn test_load_companies() {
        let file = write_temp(indoc! {r#"
            [
              {
                "wikidataId": "Q52543",
                "name": "Volvo",
                "reportingPeriods": [
                  {
                    "endDate": "2024-12-31",
                    "emissions": { "calculatedTotalEmissions": 1200.5 }
                  }
                ]
              }
            ]
        "#});
        let records = load_companies(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latest_total_emissions(), Some(1200.5));
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let err = load_municipalities(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_invalid_json_is_dataset_error() {
        let file = write_temp("{ not json");
        let err = load_companies(file.path()).unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
    }
}
