//! Coverage feature matrix and summary text per tier

use crate::error::RatingError;
use crate::rating::CoverageTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rows keyed by coverage tier
pub type TierRows<T> = BTreeMap<CoverageTier, Vec<T>>;

/// One line of the coverage details table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageFeature {
    pub label: String,
    pub included: bool,
}

impl CoverageFeature {
    pub fn new(label: impl Into<String>, included: bool) -> Self {
        Self {
            label: label.into(),
            included,
        }
    }
}

/// Feature labels in display order
const FEATURE_LABELS: [&str; 6] = [
    "Personal Property",
    "Liability Protection",
    "Additional Living Expenses",
    "Medical Payments",
    "Valuable Items Coverage",
    "Identity Theft Protection",
];

/// Reference feature matrix. Each tier includes a prefix of the feature list.
pub fn reference_features() -> TierRows<CoverageFeature> {
    CoverageTier::ALL
        .into_iter()
        .map(|tier| {
            let included_count = match tier {
                CoverageTier::Basic => 2,
                CoverageTier::Standard => 4,
                CoverageTier::Premium => FEATURE_LABELS.len(),
            };
            let rows = FEATURE_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| CoverageFeature::new(*label, i < included_count))
                .collect();
            (tier, rows)
        })
        .collect()
}

/// Reference summary bullets
pub fn reference_summary() -> TierRows<String> {
    let bullets = |items: [&str; 4]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let mut summary = TierRows::new();
    summary.insert(
        CoverageTier::Basic,
        bullets([
            "Personal property coverage",
            "Basic liability protection",
            "Fire and theft coverage",
            "Lowest premium",
        ]),
    );
    summary.insert(
        CoverageTier::Standard,
        bullets([
            "Enhanced property limits",
            "Full liability coverage",
            "Additional living expenses",
            "Water damage protection",
        ]),
    );
    summary.insert(
        CoverageTier::Premium,
        bullets([
            "Replacement cost coverage",
            "Extended liability limits",
            "Valuable items coverage",
            "Identity theft protection",
        ]),
    );
    summary
}

/// Rows for a tier; a tier without rows is a closed-table miss
pub fn tier_rows<T>(rows: &TierRows<T>, tier: CoverageTier) -> Result<&[T], RatingError> {
    rows.get(&tier)
        .map(Vec::as_slice)
        .ok_or_else(|| RatingError::invalid(format!("no coverage rows for tier {}", tier)))
}

/// Check the matrix invariants: every tier present, identical labels in identical order,
/// and inclusion nested from narrower to broader tiers.
pub fn check_feature_matrix(features: &TierRows<CoverageFeature>) -> Result<(), String> {
    let mut previous: Option<(CoverageTier, &[CoverageFeature])> = None;

    for tier in CoverageTier::ALL {
        let rows = tier_rows(features, tier).map_err(|e| e.to_string())?;
        if rows.is_empty() {
            return Err(format!("tier {} has no coverage features", tier));
        }

        if let Some((prev_tier, prev_rows)) = previous {
            let labels_match = rows.len() == prev_rows.len()
                && rows.iter().zip(prev_rows).all(|(a, b)| a.label == b.label);
            if !labels_match {
                return Err(format!(
                    "feature labels for {} differ from {}",
                    tier, prev_tier
                ));
            }

            if let Some(dropped) = rows
                .iter()
                .zip(prev_rows)
                .find(|(a, b)| b.included && !a.included)
            {
                return Err(format!(
                    "{} excludes '{}' which {} includes",
                    tier, dropped.0.label, prev_tier
                ));
            }
        }

        previous = Some((tier, rows));
    }

    Ok(())
}
