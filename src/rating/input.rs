//! Rating input record and its enumerated rating factors

use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound of the recommended property value band
pub const MIN_RECOMMENDED_VALUE: i64 = 5_000;

/// Upper bound of the recommended property value band
pub const MAX_RECOMMENDED_VALUE: i64 = 200_000;

/// Step used by collaborators when offering property values
pub const RECOMMENDED_VALUE_STEP: i64 = 1_000;

/// Jurisdiction codes offered to callers (50 states plus the federal district)
pub const JURISDICTIONS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Whether a code is one of the offered jurisdictions
pub fn is_known_jurisdiction(code: &str) -> bool {
    JURISDICTIONS.contains(&code)
}

/// Type of rented dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellingType {
    Apartment,
    Condo,
    House,
    Townhouse,
}

impl DwellingType {
    pub const ALL: [DwellingType; 4] = [
        DwellingType::Apartment,
        DwellingType::Condo,
        DwellingType::House,
        DwellingType::Townhouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DwellingType::Apartment => "apartment",
            DwellingType::Condo => "condo",
            DwellingType::House => "house",
            DwellingType::Townhouse => "townhouse",
        }
    }
}

impl FromStr for DwellingType {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DwellingType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::invalid(format!("unknown dwelling type: {}", s)))
    }
}

impl fmt::Display for DwellingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage tier, ordered by protection breadth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    Basic,
    Standard,
    Premium,
}

impl CoverageTier {
    /// All tiers from narrowest to broadest
    pub const ALL: [CoverageTier; 3] = [
        CoverageTier::Basic,
        CoverageTier::Standard,
        CoverageTier::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::Basic => "basic",
            CoverageTier::Standard => "standard",
            CoverageTier::Premium => "premium",
        }
    }

    /// Name used in reports ("Basic", "Standard", "Premium")
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverageTier::Basic => "Basic",
            CoverageTier::Standard => "Standard",
            CoverageTier::Premium => "Premium",
        }
    }
}

impl FromStr for CoverageTier {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverageTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::invalid(format!("unknown coverage tier: {}", s)))
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deductible amount; only the offered amounts are representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Deductible {
    D250,
    D500,
    D1000,
    D2500,
}

impl Deductible {
    /// All deductibles in ascending amount
    pub const ALL: [Deductible; 4] = [
        Deductible::D250,
        Deductible::D500,
        Deductible::D1000,
        Deductible::D2500,
    ];

    pub fn amount(&self) -> u32 {
        match self {
            Deductible::D250 => 250,
            Deductible::D500 => 500,
            Deductible::D1000 => 1000,
            Deductible::D2500 => 2500,
        }
    }
}

impl TryFrom<u32> for Deductible {
    type Error = RatingError;

    fn try_from(amount: u32) -> Result<Self, Self::Error> {
        Deductible::ALL
            .into_iter()
            .find(|d| d.amount() == amount)
            .ok_or_else(|| RatingError::invalid(format!("unsupported deductible: {}", amount)))
    }
}

impl From<Deductible> for u32 {
    fn from(deductible: Deductible) -> Self {
        deductible.amount()
    }
}

impl FromStr for Deductible {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: u32 = s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .map_err(|_| RatingError::invalid(format!("unsupported deductible: {}", s)))?;
        Deductible::try_from(amount)
    }
}

impl fmt::Display for Deductible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}

/// One set of rating factors to be priced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingInput {
    /// Personal property value in whole currency units
    pub property_value: i64,

    /// Jurisdiction code, e.g. "CA"
    pub location: String,

    pub dwelling_type: DwellingType,

    pub coverage_tier: CoverageTier,

    pub deductible: Deductible,
}

impl RatingInput {
    pub fn new(
        property_value: i64,
        location: impl Into<String>,
        dwelling_type: DwellingType,
        coverage_tier: CoverageTier,
        deductible: Deductible,
    ) -> Self {
        Self {
            property_value,
            location: location.into(),
            dwelling_type,
            coverage_tier,
            deductible,
        }
    }

    /// Reject inputs the engine cannot price. Property value must be positive.
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.property_value <= 0 {
            return Err(RatingError::invalid(format!(
                "property value must be positive, got {}",
                self.property_value
            )));
        }
        Ok(())
    }

    /// Same input priced under another coverage tier
    pub fn with_tier(&self, coverage_tier: CoverageTier) -> Self {
        Self {
            coverage_tier,
            ..self.clone()
        }
    }

    /// Whether the property value sits on the recommended band and step.
    /// Advisory only; the engine prices any positive value.
    pub fn in_recommended_range(&self) -> bool {
        (MIN_RECOMMENDED_VALUE..=MAX_RECOMMENDED_VALUE).contains(&self.property_value)
            && self.property_value % RECOMMENDED_VALUE_STEP == 0
    }
}

impl Default for RatingInput {
    fn default() -> Self {
        Self::new(
            25_000,
            "CA",
            DwellingType::Apartment,
            CoverageTier::Standard,
            Deductible::D500,
        )
    }
}
