//! Multiplier tables for the rating factors

use crate::error::RatingError;
use crate::rating::{CoverageTier, Deductible, DwellingType};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// Reserved key of the location fallback entry
pub const DEFAULT_LOCATION_KEY: &str = "DEFAULT";

/// Result of a location lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFactor {
    pub multiplier: f64,
    /// True when the code was absent and the DEFAULT entry was used
    pub fallback: bool,
}

/// Location multipliers. Partial: codes without an entry use the DEFAULT multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMultipliers {
    factors: HashMap<String, f64>,
    default: f64,
}

impl LocationMultipliers {
    /// Create an empty table with the given DEFAULT multiplier
    pub fn new(default: f64) -> Self {
        Self {
            factors: HashMap::new(),
            default,
        }
    }

    /// Reference state multipliers, highest catastrophe exposure first
    pub fn reference() -> Self {
        let mut table = Self::new(1.00);
        table.insert("LA", 1.45);
        table.insert("FL", 1.40);
        table.insert("TX", 1.35);
        table.insert("OK", 1.30);
        table.insert("MS", 1.25);
        table.insert("AL", 1.20);
        table.insert("CA", 1.15);
        table.insert("NY", 1.15);
        table
    }

    /// Insert or replace a multiplier. The reserved DEFAULT key replaces the fallback.
    pub fn insert(&mut self, code: impl Into<String>, multiplier: f64) -> Option<f64> {
        let code = code.into();
        if code == DEFAULT_LOCATION_KEY {
            return Some(std::mem::replace(&mut self.default, multiplier));
        }
        self.factors.insert(code, multiplier)
    }

    /// Look up a code, falling back to DEFAULT when absent
    pub fn lookup(&self, code: &str) -> LocationFactor {
        match self.factors.get(code) {
            Some(&multiplier) => LocationFactor {
                multiplier,
                fallback: false,
            },
            None => LocationFactor {
                multiplier: self.default,
                fallback: true,
            },
        }
    }

    pub fn get(&self, code: &str) -> f64 {
        self.lookup(code).multiplier
    }

    pub fn default_multiplier(&self) -> f64 {
        self.default
    }

    pub fn contains(&self, code: &str) -> bool {
        self.factors.contains_key(code)
    }

    /// Explicit entries (DEFAULT excluded), sorted by code
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.factors.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Multiplier table over a closed enumeration. Unknown keys are rejected, never defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable<K: Ord> {
    factors: BTreeMap<K, f64>,
}

impl<K: Ord + Copy + Display> FactorTable<K> {
    pub fn new() -> Self {
        Self {
            factors: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, multiplier: f64) -> Option<f64> {
        self.factors.insert(key, multiplier)
    }

    pub fn get(&self, key: K) -> Result<f64, RatingError> {
        self.factors
            .get(&key)
            .copied()
            .ok_or_else(|| RatingError::invalid(format!("no multiplier for {}", key)))
    }

    /// Keys of `domain` without an entry
    pub fn missing(&self, domain: &[K]) -> Vec<K> {
        domain
            .iter()
            .filter(|k| !self.factors.contains_key(*k))
            .copied()
            .collect()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.factors.iter().map(|(&k, &v)| (k, v))
    }
}

impl<K: Ord + Copy + Display> Default for FactorTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy + Display> FromIterator<(K, f64)> for FactorTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            factors: iter.into_iter().collect(),
        }
    }
}

impl FactorTable<DwellingType> {
    pub fn reference() -> Self {
        [
            (DwellingType::Apartment, 1.00),
            (DwellingType::Condo, 0.95),
            (DwellingType::House, 1.15),
            (DwellingType::Townhouse, 1.05),
        ]
        .into_iter()
        .collect()
    }
}

impl FactorTable<CoverageTier> {
    pub fn reference() -> Self {
        [
            (CoverageTier::Basic, 0.70),
            (CoverageTier::Standard, 1.00),
            (CoverageTier::Premium, 1.40),
        ]
        .into_iter()
        .collect()
    }
}

impl FactorTable<Deductible> {
    /// Higher deductible, lower premium
    pub fn reference() -> Self {
        [
            (Deductible::D250, 1.15),
            (Deductible::D500, 1.00),
            (Deductible::D1000, 0.90),
            (Deductible::D2500, 0.75),
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lookup() {
        let table = LocationMultipliers::reference();

        assert_eq!(table.get("LA"), 1.45);
        assert_eq!(table.get("CA"), 1.15);
        assert!(!table.lookup("NY").fallback);

        // Absent codes use DEFAULT
        let zz = table.lookup("ZZ");
        assert!(zz.fallback);
        assert_eq!(zz.multiplier, table.default_multiplier());
        assert_eq!(table.get("WY"), 1.00);
    }

    #[test]
    fn test_default_key_is_reserved() {
        let mut table = LocationMultipliers::new(1.0);
        assert_eq!(table.insert(DEFAULT_LOCATION_KEY, 1.10), Some(1.0));
        assert_eq!(table.default_multiplier(), 1.10);
        assert!(!table.contains(DEFAULT_LOCATION_KEY));
        assert!(table.entries().is_empty());
        assert!(table.lookup("DEFAULT").fallback);
    }

    #[test]
    fn test_factor_table_closed() {
        let mut table: FactorTable<DwellingType> = FactorTable::new();
        table.insert(DwellingType::Apartment, 1.0);

        assert_eq!(table.get(DwellingType::Apartment), Ok(1.0));
        assert!(matches!(
            table.get(DwellingType::House),
            Err(RatingError::InvalidInput(_))
        ));
        assert_eq!(
            table.missing(&DwellingType::ALL),
            vec![DwellingType::Condo, DwellingType::House, DwellingType::Townhouse]
        );
    }

    #[test]
    fn test_reference_tables_total() {
        assert!(FactorTable::<DwellingType>::reference().missing(&DwellingType::ALL).is_empty());
        assert!(FactorTable::<CoverageTier>::reference().missing(&CoverageTier::ALL).is_empty());
        assert!(FactorTable::<Deductible>::reference().missing(&Deductible::ALL).is_empty());
    }

    #[test]
    fn test_deductible_multipliers_decrease() {
        let table = FactorTable::<Deductible>::reference();
        let factors: Vec<f64> = table.iter().map(|(_, f)| f).collect();
        assert_eq!(factors, vec![1.15, 1.00, 0.90, 0.75]);
    }
}
