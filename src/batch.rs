//! Quote runner for batch pricing
//!
//! Holds one rate table snapshot and prices many inputs against it in parallel.
//! Each quote is independent, so inputs fan out across the rayon pool without locking.

use crate::error::{LoadError, RatingError};
use crate::rates::RateTables;
use crate::rating::{Quote, RatingEngine, RatingInput, TierQuote};
use rayon::prelude::*;

/// Pre-loaded runner for batch quoting
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_csv()?;
/// let quotes = runner.run_batch(&inputs);
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    tables: RateTables,
}

impl QuoteRunner {
    /// Create runner over the reference tables
    pub fn new() -> Self {
        Self {
            tables: RateTables::reference().clone(),
        }
    }

    /// Create runner by loading tables from the default CSV directory
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self {
            tables: RateTables::from_csv()?,
        })
    }

    /// Create runner from a specific rate table directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, LoadError> {
        Ok(Self {
            tables: RateTables::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built tables
    pub fn with_tables(tables: RateTables) -> Self {
        Self { tables }
    }

    pub fn engine(&self) -> RatingEngine<'_> {
        RatingEngine::new(&self.tables)
    }

    /// Price a single input
    pub fn run(&self, input: &RatingInput) -> Result<Quote, RatingError> {
        self.engine().quote(input)
    }

    /// Price many inputs; results keep input order
    pub fn run_batch(&self, inputs: &[RatingInput]) -> Vec<Result<Quote, RatingError>> {
        let engine = self.engine();
        inputs.par_iter().map(|input| engine.quote(input)).collect()
    }

    /// Tier comparison for many inputs; results keep input order
    pub fn run_comparisons(&self, inputs: &[RatingInput]) -> Vec<Result<Vec<TierQuote>, RatingError>> {
        let engine = self.engine();
        inputs.par_iter().map(|input| engine.compare_tiers(input)).collect()
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{CoverageTier, Deductible, DwellingType};

    fn inputs() -> Vec<RatingInput> {
        let mut inputs = Vec::new();
        for location in ["CA", "LA", "ZZ", "TX"] {
            for deductible in Deductible::ALL {
                inputs.push(RatingInput::new(
                    40_000,
                    location,
                    DwellingType::Townhouse,
                    CoverageTier::Standard,
                    deductible,
                ));
            }
        }
        inputs
    }

    #[test]
    fn test_batch_matches_sequential() {
        let runner = QuoteRunner::new();
        let inputs = inputs();

        let batch = runner.run_batch(&inputs);
        assert_eq!(batch.len(), inputs.len());

        for (input, result) in inputs.iter().zip(&batch) {
            assert_eq!(result.as_ref().unwrap(), &runner.run(input).unwrap());
        }
    }

    #[test]
    fn test_batch_keeps_failures_in_place() {
        let runner = QuoteRunner::new();
        let mut inputs = inputs();
        inputs[3].property_value = 0;

        let batch = runner.run_batch(&inputs);
        assert!(batch[3].is_err());
        assert_eq!(batch.iter().filter(|r| r.is_ok()).count(), inputs.len() - 1);
    }

    #[test]
    fn test_comparisons() {
        let runner = QuoteRunner::default();
        let results = runner.run_comparisons(&inputs()[..2]);

        assert_eq!(results.len(), 2);
        let tiers = results[0].as_ref().unwrap();
        assert_eq!(
            tiers.iter().map(|t| t.tier).collect::<Vec<_>>(),
            CoverageTier::ALL.to_vec()
        );
    }

    #[test]
    fn test_custom_tables() {
        let mut tables = RateTables::build_reference();
        tables.base_rate = 0.0;
        tables.value_rate_per_unit = 10.0;
        let runner = QuoteRunner::with_tables(tables);

        // (100,000 / 10,000) * 10 with every multiplier at 1.0
        let input = RatingInput::new(
            100_000,
            "ZZ",
            DwellingType::Apartment,
            CoverageTier::Standard,
            Deductible::D500,
        );
        assert_eq!(runner.run(&input).unwrap().annual_cost, 100);
    }
}
