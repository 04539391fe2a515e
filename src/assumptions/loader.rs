//! CSV-based assumption loader
//!
//! Loads assumption tables from CSV files in data/assumptions/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::premiums::PremiumTable;
use super::service::MraBand;
use crate::error::{Error, Result};
use crate::profile::CoverageTier;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

fn parse_field<T: std::str::FromStr>(table: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Parse {
        table: table.to_string(),
        message: format!("cannot parse '{}'", value),
    })
}

/// Load the coverage premium table from CSV
/// Columns: tier, annual_premium. Tiers missing from the file keep their default.
pub fn load_coverage_premiums(path: &Path) -> Result<PremiumTable> {
    let file = File::open(path.join("coverage_premiums.csv"))?;
    read_coverage_premiums(file)
}

pub fn read_coverage_premiums<R: Read>(reader: R) -> Result<PremiumTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = PremiumTable::default();

    for result in reader.records() {
        let record = result?;
        let tier = CoverageTier::from_label(&record[0]).ok_or_else(|| Error::Parse {
            table: "coverage_premiums".to_string(),
            message: format!("unknown coverage tier '{}'", &record[0]),
        })?;
        let premium: f64 = parse_field("coverage_premiums", &record[1])?;
        table = table.with_premium(tier, premium);
    }

    Ok(table)
}

/// Load the MRA schedule from CSV
/// Columns: birth_year_through (blank = open-ended), minimum_retirement_age
pub fn load_mra_schedule(path: &Path) -> Result<Vec<MraBand>> {
    let file = File::open(path.join("mra_schedule.csv"))?;
    read_mra_schedule(file)
}

pub fn read_mra_schedule<R: Read>(reader: R) -> Result<Vec<MraBand>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut bands = Vec::new();

    for result in reader.records() {
        let record = result?;
        let through = match record[0].trim() {
            "" => None,
            value => Some(parse_field::<i32>("mra_schedule", value)?),
        };
        let age: u32 = parse_field("mra_schedule", &record[1])?;
        bands.push(MraBand {
            birth_year_through: through,
            minimum_retirement_age: age,
        });
    }

    if bands.is_empty() {
        return Err(Error::Parse {
            table: "mra_schedule".to_string(),
            message: "no bands".to_string(),
        });
    }

    Ok(bands)
}

/// All assumption tables read from one directory
pub struct LoadedAssumptions {
    pub coverage_premiums: PremiumTable,
    pub mra_bands: Vec<MraBand>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(&Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            coverage_premiums: load_coverage_premiums(path)?,
            mra_bands: load_mra_schedule(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_assumptions() {
        let result = LoadedAssumptions::load_default();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let loaded = result.unwrap();
        assert_eq!(loaded.coverage_premiums, PremiumTable::default());
        assert_eq!(loaded.mra_bands.len(), 4);
        assert_eq!(loaded.mra_bands[3].birth_year_through, None);
    }

    #[test]
    fn test_partial_premium_table() {
        let csv = "tier,annual_premium\nfamily,13000\n";
        let table = read_coverage_premiums(csv.as_bytes()).unwrap();
        assert_eq!(table.family, 13_000.0);
        assert_eq!(table.individual, 4_200.0);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let csv = "tier,annual_premium\ncouple,9000\n";
        assert!(matches!(read_coverage_premiums(csv.as_bytes()), Err(Error::Parse { .. })));
    }
}
