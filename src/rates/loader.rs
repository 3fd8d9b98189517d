//! CSV-based rate table loader
//!
//! Loads rate tables from CSV files in data/rates/

use crate::error::{LoadError, RatingError};
use crate::rating::{CoverageTier, Deductible, DwellingType};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Default path to the rate table directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// Read every record of `dir/file`, paired with its 1-based record number
fn read_records<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<(usize, T)>, LoadError> {
    let path = dir.join(file);
    let mut reader = csv::Reader::from_path(&path).map_err(|e| LoadError::csv(&path, e))?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: T = result.map_err(|e| LoadError::csv(&path, e))?;
        records.push((i + 1, record));
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct VersionRow {
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "EffectiveDate")]
    effective_date: NaiveDate,
}

/// Load the table version label and effective date
pub fn load_version(path: &Path) -> Result<(String, NaiveDate), LoadError> {
    let file = "table_version.csv";
    let rows: Vec<(usize, VersionRow)> = read_records(path, file)?;
    match rows.as_slice() {
        [(_, row)] => Ok((row.version.clone(), row.effective_date)),
        _ => Err(LoadError::InvalidTables(format!(
            "{} must hold exactly one version record, found {}",
            file,
            rows.len()
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ConstantRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: f64,
}

/// Load the scalar rating constants
/// Returns (base_rate, value_rate_per_10k)
pub fn load_constants(path: &Path) -> Result<(f64, f64), LoadError> {
    let file = "rating_constants.csv";
    let mut base_rate = None;
    let mut value_rate = None;

    for (record, row) in read_records::<ConstantRow>(path, file)? {
        let slot = match row.name.as_str() {
            "base_rate" => &mut base_rate,
            "value_rate_per_10k" => &mut value_rate,
            other => {
                return Err(LoadError::record(
                    path.join(file),
                    record,
                    format!("unknown constant: {}", other),
                ))
            }
        };
        if slot.replace(row.value).is_some() {
            return Err(LoadError::record(
                path.join(file),
                record,
                format!("duplicate constant: {}", row.name),
            ));
        }
    }

    match (base_rate, value_rate) {
        (Some(base), Some(value)) => Ok((base, value)),
        _ => Err(LoadError::InvalidTables(format!(
            "{} must define base_rate and value_rate_per_10k",
            file
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Multiplier")]
    multiplier: f64,
}

/// Load location multipliers, including the DEFAULT row.
/// Codes are upper-cased to match how rating inputs carry them.
pub fn load_location_multipliers(path: &Path) -> Result<Vec<(String, f64)>, LoadError> {
    Ok(read_records::<LocationRow>(path, "location_multipliers.csv")?
        .into_iter()
        .map(|(_, row)| (row.location.trim().to_ascii_uppercase(), row.multiplier))
        .collect())
}

/// Load a two-column (key, multiplier) file whose key column parses into `K`
fn load_keyed<K>(path: &Path, file: &str) -> Result<Vec<(K, f64)>, LoadError>
where
    K: FromStr<Err = RatingError>,
{
    let file_path = path.join(file);
    let mut reader = csv::Reader::from_path(&file_path).map_err(|e| LoadError::csv(&file_path, e))?;

    let mut entries = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::csv(&file_path, e))?;
        let key: K = record
            .get(0)
            .unwrap_or_default()
            .parse()
            .map_err(|e| LoadError::record(&file_path, i + 1, e))?;
        let multiplier: f64 = record
            .get(1)
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|e| LoadError::record(&file_path, i + 1, format!("invalid multiplier: {}", e)))?;
        entries.push((key, multiplier));
    }
    Ok(entries)
}

pub fn load_dwelling_multipliers(path: &Path) -> Result<Vec<(DwellingType, f64)>, LoadError> {
    load_keyed(path, "dwelling_multipliers.csv")
}

pub fn load_coverage_multipliers(path: &Path) -> Result<Vec<(CoverageTier, f64)>, LoadError> {
    load_keyed(path, "coverage_multipliers.csv")
}

pub fn load_deductible_multipliers(path: &Path) -> Result<Vec<(Deductible, f64)>, LoadError> {
    load_keyed(path, "deductible_multipliers.csv")
}

#[derive(Debug, Deserialize)]
struct FeatureRow {
    #[serde(rename = "CoverageTier")]
    tier: String,
    #[serde(rename = "Feature")]
    feature: String,
    #[serde(rename = "Included")]
    included: bool,
}

/// Load the coverage feature matrix as (tier, label, included) in file order
pub fn load_coverage_features(path: &Path) -> Result<Vec<(CoverageTier, String, bool)>, LoadError> {
    let file = "coverage_features.csv";
    read_records::<FeatureRow>(path, file)?
        .into_iter()
        .map(|(record, row)| {
            let tier = row
                .tier
                .parse::<CoverageTier>()
                .map_err(|e| LoadError::record(path.join(file), record, e))?;
            Ok::<_, LoadError>((tier, row.feature, row.included))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SummaryRow {
    #[serde(rename = "CoverageTier")]
    tier: String,
    #[serde(rename = "Bullet")]
    bullet: String,
}

/// Load coverage summary bullets as (tier, bullet) in file order
pub fn load_coverage_summary(path: &Path) -> Result<Vec<(CoverageTier, String)>, LoadError> {
    let file = "coverage_summary.csv";
    read_records::<SummaryRow>(path, file)?
        .into_iter()
        .map(|(record, row)| {
            let tier = row
                .tier
                .parse::<CoverageTier>()
                .map_err(|e| LoadError::record(path.join(file), record, e))?;
            Ok::<_, LoadError>((tier, row.bullet))
        })
        .collect()
}

/// Raw rate tables as read from disk, before validation
pub struct LoadedRates {
    pub version: String,
    pub effective_date: NaiveDate,
    pub base_rate: f64,
    pub value_rate_per_10k: f64,
    pub locations: Vec<(String, f64)>,
    pub dwelling: Vec<(DwellingType, f64)>,
    pub coverage: Vec<(CoverageTier, f64)>,
    pub deductible: Vec<(Deductible, f64)>,
    pub coverage_features: Vec<(CoverageTier, String, bool)>,
    pub coverage_summary: Vec<(CoverageTier, String)>,
}

impl LoadedRates {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let (version, effective_date) = load_version(path)?;
        let (base_rate, value_rate_per_10k) = load_constants(path)?;

        Ok(Self {
            version,
            effective_date,
            base_rate,
            value_rate_per_10k,
            locations: load_location_multipliers(path)?,
            dwelling: load_dwelling_multipliers(path)?,
            coverage: load_coverage_multipliers(path)?,
            deductible: load_deductible_multipliers(path)?,
            coverage_features: load_coverage_features(path)?,
            coverage_summary: load_coverage_summary(path)?,
        })
    }
}
