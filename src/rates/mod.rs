//! Rate tables: base rates, factor multipliers, and coverage content

mod coverage;
mod multipliers;
pub mod loader;

pub use coverage::{
    check_feature_matrix, reference_features, reference_summary, tier_rows, CoverageFeature,
    TierRows,
};
pub use loader::{LoadedRates, DEFAULT_RATES_PATH};
pub use multipliers::{FactorTable, LocationFactor, LocationMultipliers, DEFAULT_LOCATION_KEY};

use crate::error::LoadError;
use crate::rating::{CoverageTier, Deductible, DwellingType};
use chrono::NaiveDate;
use log::info;
use once_cell::sync::Lazy;
use std::fmt::Display;
use std::path::Path;

/// Property value covered by one unit of `value_rate_per_unit`
pub const VALUE_UNIT: f64 = 10_000.0;

static REFERENCE_TABLES: Lazy<RateTables> = Lazy::new(RateTables::build_reference);

/// Container for every table the rating engine reads
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    /// Version label of this table set
    pub version: String,

    /// Date from which this table set applies
    pub effective_date: NaiveDate,

    /// Flat annual premium before value loading
    pub base_rate: f64,

    /// Annual premium per 10,000 of property value
    pub value_rate_per_unit: f64,

    pub location: LocationMultipliers,
    pub dwelling: FactorTable<DwellingType>,
    pub coverage: FactorTable<CoverageTier>,
    pub deductible: FactorTable<Deductible>,

    /// Feature inclusion rows per tier
    pub coverage_features: TierRows<CoverageFeature>,

    /// Summary bullets per tier
    pub coverage_summary: TierRows<String>,
}

impl RateTables {
    /// Process-wide reference tables, built on first use and never mutated
    pub fn reference() -> &'static RateTables {
        &REFERENCE_TABLES
    }

    /// Build an owned copy of the reference tables
    pub fn build_reference() -> Self {
        Self {
            version: "2026.1".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            base_rate: 180.0,
            value_rate_per_unit: 12.0,
            location: LocationMultipliers::reference(),
            dwelling: FactorTable::<DwellingType>::reference(),
            coverage: FactorTable::<CoverageTier>::reference(),
            deductible: FactorTable::<Deductible>::reference(),
            coverage_features: reference_features(),
            coverage_summary: reference_summary(),
        }
    }

    /// Load and validate tables from CSV files in the default location (data/rates/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load and validate tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let loaded = LoadedRates::load_from(path)?;
        let tables = Self::from_loaded(loaded)?;
        tables.validate()?;

        info!(
            "Loaded rate tables {} (effective {}) from {}",
            tables.version,
            tables.effective_date,
            path.display()
        );
        Ok(tables)
    }

    /// Assemble tables from raw loaded rows, rejecting duplicate keys
    pub fn from_loaded(loaded: LoadedRates) -> Result<Self, LoadError> {
        let mut location = None;
        for (code, multiplier) in &loaded.locations {
            if code == DEFAULT_LOCATION_KEY {
                if location.is_some() {
                    return Err(duplicate("location", code));
                }
                location = Some(LocationMultipliers::new(*multiplier));
            }
        }
        let mut location = location.ok_or_else(|| {
            LoadError::InvalidTables(format!(
                "location table has no {} entry",
                DEFAULT_LOCATION_KEY
            ))
        })?;
        for (code, multiplier) in loaded.locations {
            if code != DEFAULT_LOCATION_KEY && location.insert(code.clone(), multiplier).is_some() {
                return Err(duplicate("location", &code));
            }
        }

        let mut coverage_features = TierRows::new();
        for (tier, label, included) in loaded.coverage_features {
            coverage_features
                .entry(tier)
                .or_insert_with(Vec::new)
                .push(CoverageFeature::new(label, included));
        }

        let mut coverage_summary = TierRows::new();
        for (tier, bullet) in loaded.coverage_summary {
            coverage_summary
                .entry(tier)
                .or_insert_with(Vec::new)
                .push(bullet);
        }

        Ok(Self {
            version: loaded.version,
            effective_date: loaded.effective_date,
            base_rate: loaded.base_rate,
            value_rate_per_unit: loaded.value_rate_per_10k,
            location,
            dwelling: factor_table("dwelling", loaded.dwelling)?,
            coverage: factor_table("coverage", loaded.coverage)?,
            deductible: factor_table("deductible", loaded.deductible)?,
            coverage_features,
            coverage_summary,
        })
    }

    /// Check the table invariants the engine relies on
    pub fn validate(&self) -> Result<(), LoadError> {
        let invalid = |message: String| Err(LoadError::InvalidTables(message));

        if !self.base_rate.is_finite() || self.base_rate < 0.0 {
            return invalid(format!("base rate must be non-negative, got {}", self.base_rate));
        }
        if !self.value_rate_per_unit.is_finite() || self.value_rate_per_unit < 0.0 {
            return invalid(format!(
                "value rate must be non-negative, got {}",
                self.value_rate_per_unit
            ));
        }

        check_positive("location", DEFAULT_LOCATION_KEY, self.location.default_multiplier())?;
        for (code, multiplier) in self.location.entries() {
            check_positive("location", code, multiplier)?;
        }

        check_total("dwelling", &self.dwelling, &DwellingType::ALL)?;
        check_total("coverage", &self.coverage, &CoverageTier::ALL)?;
        check_total("deductible", &self.deductible, &Deductible::ALL)?;

        // Broader coverage costs more; a higher deductible costs less
        let coverage: Vec<f64> = self.coverage.iter().map(|(_, f)| f).collect();
        if coverage.windows(2).any(|w| w[0] >= w[1]) {
            return invalid(format!(
                "coverage multipliers must increase with tier, got {:?}",
                coverage
            ));
        }
        let deductible: Vec<f64> = self.deductible.iter().map(|(_, f)| f).collect();
        if deductible.windows(2).any(|w| w[0] <= w[1]) {
            return invalid(format!(
                "deductible multipliers must decrease as the deductible grows, got {:?}",
                deductible
            ));
        }

        check_feature_matrix(&self.coverage_features).map_err(LoadError::InvalidTables)?;

        for tier in CoverageTier::ALL {
            let bullets = tier_rows(&self.coverage_summary, tier)
                .map_err(|e| LoadError::InvalidTables(e.to_string()))?;
            if bullets.is_empty() {
                return invalid(format!("tier {} has no summary bullets", tier));
            }
        }

        Ok(())
    }
}

fn duplicate(table: &str, key: &str) -> LoadError {
    LoadError::InvalidTables(format!("duplicate {} entry for {}", table, key))
}

fn factor_table<K: Ord + Copy + Display>(
    table: &str,
    entries: Vec<(K, f64)>,
) -> Result<FactorTable<K>, LoadError> {
    let mut factors = FactorTable::new();
    for (key, multiplier) in entries {
        if factors.insert(key, multiplier).is_some() {
            return Err(duplicate(table, &key.to_string()));
        }
    }
    Ok(factors)
}

fn check_positive(table: &str, key: &str, multiplier: f64) -> Result<(), LoadError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(LoadError::InvalidTables(format!(
            "{} multiplier for {} must be positive, got {}",
            table, key, multiplier
        )))
    }
}

fn check_total<K: Ord + Copy + Display>(
    table: &str,
    factors: &FactorTable<K>,
    domain: &[K],
) -> Result<(), LoadError> {
    let missing = factors.missing(domain);
    if let Some(key) = missing.first() {
        return Err(LoadError::InvalidTables(format!(
            "{} table has no entry for {}",
            table, key
        )));
    }
    for (key, multiplier) in factors.iter() {
        check_positive(table, &key.to_string(), multiplier)?;
    }
    Ok(())
}
