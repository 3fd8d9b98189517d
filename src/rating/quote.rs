//! Quote output structures

use super::input::CoverageTier;
use crate::rates::CoverageFeature;
use serde::{Deserialize, Serialize};

/// Intermediate figures behind an annual cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBreakdown {
    /// Property value loading: (value / 10,000) * value rate
    pub value_component: f64,
    /// Base rate plus value loading
    pub subtotal: f64,
    pub location_multiplier: f64,
    /// Location code was absent from the table and DEFAULT applied
    pub location_fallback: bool,
    pub dwelling_multiplier: f64,
    pub coverage_multiplier: f64,
    pub deductible_multiplier: f64,
    /// Annual premium before rounding
    pub annual_raw: f64,
}

/// Priced result for one rating input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Annual premium in whole currency units
    pub annual_cost: u64,

    /// Monthly premium, rounded from the rounded annual premium
    pub monthly_cost: u64,

    /// Coverage details for the selected tier
    pub feature_matrix: Vec<CoverageFeature>,

    /// Summary bullets for the selected tier
    pub summary_bullets: Vec<String>,

    pub breakdown: RatingBreakdown,
}

impl Quote {
    /// Labels of the features included at this tier
    pub fn included_features(&self) -> impl Iterator<Item = &str> {
        self.feature_matrix
            .iter()
            .filter(|f| f.included)
            .map(|f| f.label.as_str())
    }
}

/// A quote for one tier of a coverage comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierQuote {
    pub tier: CoverageTier,
    pub quote: Quote,
}
