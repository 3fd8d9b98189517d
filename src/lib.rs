//! Renters Rating - deterministic premium estimates for renters insurance
//!
//! This library provides:
//! - Versioned rate tables (compiled-in reference set or CSV directories)
//! - A pure multiplicative rating engine with DEFAULT location fallback
//! - Coverage feature matrices and tier comparisons
//! - Parallel batch quoting and plain-text reports

pub mod error;
pub mod rates;
pub mod rating;
pub mod batch;
pub mod report;

// Re-export commonly used types
pub use error::{LoadError, RatingError};
pub use rates::{CoverageFeature, RateTables};
pub use rating::{
    compare_tiers, compute_quote, CoverageTier, Deductible, DwellingType, Quote, RatingEngine,
    RatingInput, TierQuote,
};
pub use batch::QuoteRunner;
