//! Rating inputs, the premium engine, and quote output

mod engine;
mod input;
mod quote;
pub mod loader;

pub use engine::{compare_tiers, compute_quote, monthly_from_annual, round_currency, RatingEngine};
pub use input::{
    is_known_jurisdiction, CoverageTier, Deductible, DwellingType, RatingInput, JURISDICTIONS,
    MAX_RECOMMENDED_VALUE, MIN_RECOMMENDED_VALUE, RECOMMENDED_VALUE_STEP,
};
pub use loader::{load_inputs, load_inputs_from_reader};
pub use quote::{Quote, RatingBreakdown, TierQuote};
