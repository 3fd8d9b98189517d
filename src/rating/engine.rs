//! Core rating engine: multiplicative premium model

use super::input::{CoverageTier, RatingInput};
use super::quote::{Quote, RatingBreakdown, TierQuote};
use crate::error::RatingError;
use crate::rates::{tier_rows, RateTables, VALUE_UNIT};
use log::debug;

/// Round a currency amount to the nearest whole unit, halves away from zero
pub fn round_currency(amount: f64) -> u64 {
    amount.round().max(0.0) as u64
}

/// Monthly premium derived from an already rounded annual premium
pub fn monthly_from_annual(annual_cost: u64) -> u64 {
    round_currency(annual_cost as f64 / 12.0)
}

/// Price one input against the given tables.
///
/// Unknown location codes use the DEFAULT location multiplier. Non-positive property values and
/// tables missing a dwelling, tier, or deductible entry are rejected.
pub fn compute_quote(input: &RatingInput, tables: &RateTables) -> Result<Quote, RatingError> {
    input.validate()?;

    let value_component = (input.property_value as f64 / VALUE_UNIT) * tables.value_rate_per_unit;
    let subtotal = tables.base_rate + value_component;

    let location = tables.location.lookup(&input.location);
    if location.fallback {
        debug!(
            "Location {:?} not rated, using DEFAULT multiplier {}",
            input.location, location.multiplier
        );
    }

    let dwelling = tables.dwelling.get(input.dwelling_type)?;
    let coverage = tables.coverage.get(input.coverage_tier)?;
    let deductible = tables.deductible.get(input.deductible)?;

    let annual_raw = subtotal * location.multiplier * dwelling * coverage * deductible;
    let annual_cost = round_currency(annual_raw);
    let monthly_cost = monthly_from_annual(annual_cost);

    let feature_matrix = tier_rows(&tables.coverage_features, input.coverage_tier)?.to_vec();
    let summary_bullets = tier_rows(&tables.coverage_summary, input.coverage_tier)?.to_vec();

    debug!(
        "Quoted {} {} {} ded {} value {}: annual {} monthly {}",
        input.location,
        input.dwelling_type,
        input.coverage_tier,
        input.deductible,
        input.property_value,
        annual_cost,
        monthly_cost
    );

    Ok(Quote {
        annual_cost,
        monthly_cost,
        feature_matrix,
        summary_bullets,
        breakdown: RatingBreakdown {
            value_component,
            subtotal,
            location_multiplier: location.multiplier,
            location_fallback: location.fallback,
            dwelling_multiplier: dwelling,
            coverage_multiplier: coverage,
            deductible_multiplier: deductible,
            annual_raw,
        },
    })
}

/// Price the same input under every coverage tier, narrowest first
pub fn compare_tiers(input: &RatingInput, tables: &RateTables) -> Result<Vec<TierQuote>, RatingError> {
    CoverageTier::ALL
        .into_iter()
        .map(|tier| {
            let quote = compute_quote(&input.with_tier(tier), tables)?;
            Ok::<_, RatingError>(TierQuote { tier, quote })
        })
        .collect()
}

/// Rating engine bound to one table snapshot
#[derive(Debug, Clone, Copy)]
pub struct RatingEngine<'a> {
    tables: &'a RateTables,
}

impl<'a> RatingEngine<'a> {
    /// Create an engine over the given tables
    pub fn new(tables: &'a RateTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a RateTables {
        self.tables
    }

    /// Price a single input
    pub fn quote(&self, input: &RatingInput) -> Result<Quote, RatingError> {
        compute_quote(input, self.tables)
    }

    /// Price the input under every tier
    pub fn compare_tiers(&self, input: &RatingInput) -> Result<Vec<TierQuote>, RatingError> {
        compare_tiers(input, self.tables)
    }
}

impl RatingEngine<'static> {
    /// Engine over the process-wide reference tables
    pub fn reference() -> Self {
        Self::new(RateTables::reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{Deductible, DwellingType};
    use approx::assert_relative_eq;

    fn input(location: &str) -> RatingInput {
        RatingInput::new(
            25_000,
            location,
            DwellingType::Apartment,
            CoverageTier::Standard,
            Deductible::D500,
        )
    }

    #[test]
    fn test_california_scenario() {
        let quote = RatingEngine::reference().quote(&input("CA")).unwrap();
        let b = &quote.breakdown;

        assert_relative_eq!(b.value_component, 30.0);
        assert_relative_eq!(b.subtotal, 210.0);
        assert_eq!(b.location_multiplier, 1.15);
        assert!(!b.location_fallback);

        // 210 * 1.15 is 241.49999999999997 in binary floating point
        assert_relative_eq!(b.annual_raw, 241.5, epsilon = 1e-9);
        assert_eq!(quote.annual_cost, 241);
        assert_eq!(quote.monthly_cost, 20);
    }

    #[test]
    fn test_louisiana_scenario() {
        let quote = RatingEngine::reference().quote(&input("LA")).unwrap();

        assert_eq!(quote.breakdown.annual_raw, 304.5);
        assert_eq!(quote.annual_cost, 305);
        assert_eq!(quote.monthly_cost, 25);
    }

    #[test]
    fn test_unknown_location_uses_default() {
        let tables = RateTables::reference();
        let quote = compute_quote(&input("ZZ"), tables).unwrap();

        assert!(quote.breakdown.location_fallback);
        assert_eq!(quote.breakdown.location_multiplier, tables.location.default_multiplier());
        assert_eq!(quote.annual_cost, 210);
        assert_eq!(quote.monthly_cost, 18);

        // Same as a rated location whose multiplier equals DEFAULT
        let mut explicit = tables.clone();
        explicit.location.insert("ZZ", tables.location.default_multiplier());
        let rated = compute_quote(&input("ZZ"), &explicit).unwrap();
        assert_eq!(rated.annual_cost, quote.annual_cost);
        assert_eq!(rated.monthly_cost, quote.monthly_cost);
        assert!(!rated.breakdown.location_fallback);
    }

    #[test]
    fn test_unrated_state_uses_default() {
        let quote = RatingEngine::reference().quote(&input("WY")).unwrap();
        assert!(quote.breakdown.location_fallback);
        assert_eq!(quote.annual_cost, 210);
    }

    #[test]
    fn test_deterministic() {
        let engine = RatingEngine::reference();
        let i = RatingInput::new(
            73_000,
            "FL",
            DwellingType::House,
            CoverageTier::Premium,
            Deductible::D250,
        );
        assert_eq!(engine.quote(&i).unwrap(), engine.quote(&i).unwrap());
    }

    #[test]
    fn test_monotone_in_property_value() {
        let engine = RatingEngine::reference();
        let mut previous = 0;
        for value in (1_000..=250_000).step_by(500) {
            let mut i = input("TX");
            i.property_value = value;
            let annual = engine.quote(&i).unwrap().annual_cost;
            assert!(annual >= previous, "annual cost fell at value {}", value);
            previous = annual;
        }
    }

    #[test]
    fn test_monotone_in_deductible() {
        let engine = RatingEngine::reference();
        for location in ["CA", "LA", "ZZ"] {
            for dwelling in DwellingType::ALL {
                let costs: Vec<u64> = Deductible::ALL
                    .into_iter()
                    .map(|d| {
                        let mut i = input(location);
                        i.dwelling_type = dwelling;
                        i.deductible = d;
                        engine.quote(&i).unwrap().annual_cost
                    })
                    .collect();
                assert!(costs.windows(2).all(|w| w[0] >= w[1]), "{:?}", costs);
            }
        }
    }

    #[test]
    fn test_monotone_in_tier() {
        let engine = RatingEngine::reference();
        for value in [5_000, 25_000, 80_000, 200_000] {
            let mut i = input("OK");
            i.property_value = value;
            let tiers = engine.compare_tiers(&i).unwrap();

            assert_eq!(tiers.len(), 3);
            assert_eq!(tiers[0].tier, CoverageTier::Basic);
            assert!(tiers[0].quote.annual_cost <= tiers[1].quote.annual_cost);
            assert!(tiers[1].quote.annual_cost <= tiers[2].quote.annual_cost);
        }
    }

    #[test]
    fn test_monthly_is_rounded_annual() {
        let engine = RatingEngine::reference();
        for value in (5_000..=200_000).step_by(7_000) {
            for deductible in Deductible::ALL {
                let mut i = input("NY");
                i.property_value = value;
                i.deductible = deductible;
                let quote = engine.quote(&i).unwrap();
                assert_eq!(
                    quote.monthly_cost,
                    (quote.annual_cost as f64 / 12.0).round() as u64
                );
            }
        }
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_currency(304.5), 305);
        assert_eq!(round_currency(304.49), 304);
        assert_eq!(monthly_from_annual(210), 18); // 17.5
        assert_eq!(monthly_from_annual(0), 0);
    }

    #[test]
    fn test_feature_matrix_follows_tier() {
        let engine = RatingEngine::reference();
        let tiers = engine.compare_tiers(&input("CA")).unwrap();

        let labels = |q: &Quote| -> Vec<String> {
            q.feature_matrix.iter().map(|f| f.label.clone()).collect()
        };
        assert_eq!(labels(&tiers[0].quote), labels(&tiers[1].quote));
        assert_eq!(labels(&tiers[1].quote), labels(&tiers[2].quote));

        for pair in tiers.windows(2) {
            let narrower: Vec<&str> = pair[0].quote.included_features().collect();
            let broader: Vec<&str> = pair[1].quote.included_features().collect();
            assert!(narrower.iter().all(|f| broader.contains(f)));
        }

        assert_eq!(tiers[0].quote.included_features().count(), 2);
        assert_eq!(tiers[2].quote.summary_bullets[3], "Identity theft protection");
    }

    #[test]
    fn test_non_positive_value_rejected() {
        let mut i = input("CA");
        i.property_value = 0;
        assert!(matches!(
            RatingEngine::reference().quote(&i),
            Err(RatingError::InvalidInput(_))
        ));

        i.property_value = -1;
        assert!(compute_quote(&i, RateTables::reference()).is_err());
    }

    #[test]
    fn test_missing_closed_entry_rejected() {
        let mut tables = RateTables::build_reference();
        tables.dwelling = [(DwellingType::Apartment, 1.0)].into_iter().collect();

        let mut i = input("CA");
        assert!(compute_quote(&i, &tables).is_ok());

        i.dwelling_type = DwellingType::Condo;
        assert!(matches!(
            compute_quote(&i, &tables),
            Err(RatingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_high_risk_house_premium() {
        // (180 + 15 * 12) * 1.40 * 1.15 * 1.40 * 1.15
        let i = RatingInput::new(
            150_000,
            "FL",
            DwellingType::House,
            CoverageTier::Premium,
            Deductible::D250,
        );
        let quote = RatingEngine::reference().quote(&i).unwrap();

        assert_relative_eq!(quote.breakdown.subtotal, 360.0);
        assert_relative_eq!(quote.breakdown.annual_raw, 360.0 * 1.40 * 1.15 * 1.40 * 1.15, epsilon = 1e-9);
        assert_eq!(quote.annual_cost, 933);
        assert_eq!(quote.monthly_cost, 78);
    }
}
