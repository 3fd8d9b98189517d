//! AWS Lambda handler for renters insurance estimates
//!
//! Accepts a JSON quote request and returns the quote, plus an optional coverage-tier
//! comparison. Invalid rating factors come back as an error message in the response body.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{debug, warn};
use renters_rating::{
    CoverageTier, Deductible, DwellingType, Quote, RateTables, RatingEngine, RatingError,
    RatingInput, TierQuote,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input for one estimate; omitted fields take the estimator's defaults
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default = "default_property_value")]
    pub property_value: i64,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_dwelling_type")]
    pub dwelling_type: String,

    #[serde(default = "default_coverage_tier")]
    pub coverage_tier: String,

    /// Amount as a number or string, checked when pricing
    #[serde(default = "default_deductible")]
    pub deductible: Value,

    /// Also price every coverage tier
    #[serde(default)]
    pub compare: bool,
}

fn default_property_value() -> i64 { 25_000 }
fn default_location() -> String { "CA".to_string() }
fn default_dwelling_type() -> String { "apartment".to_string() }
fn default_coverage_tier() -> String { "standard".to_string() }
fn default_deductible() -> Value { Value::from(500) }

/// Output for one estimate
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub table_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<TierQuote>>,
    pub execution_time_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuoteRequest {
    fn to_input(&self) -> Result<RatingInput, RatingError> {
        Ok(RatingInput::new(
            self.property_value,
            self.location.trim().to_ascii_uppercase(),
            self.dwelling_type.parse::<DwellingType>()?,
            self.coverage_tier.parse::<CoverageTier>()?,
            self.deductible()?,
        ))
    }

    fn deductible(&self) -> Result<Deductible, RatingError> {
        match &self.deductible {
            Value::String(s) => s.parse(),
            Value::Number(n) => match n.as_u64().and_then(|amount| u32::try_from(amount).ok()) {
                Some(amount) => Deductible::try_from(amount),
                None => Err(RatingError::invalid(format!("unsupported deductible: {}", n))),
            },
            other => Err(RatingError::invalid(format!("unsupported deductible: {}", other))),
        }
    }
}

fn price(request: &QuoteRequest) -> Result<(Quote, Option<Vec<TierQuote>>), RatingError> {
    let engine = RatingEngine::reference();
    let input = request.to_input()?;

    let quote = engine.quote(&input)?;
    let comparison = if request.compare {
        Some(engine.compare_tiers(&input)?)
    } else {
        None
    };
    Ok((quote, comparison))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<QuoteRequest>) -> Result<QuoteResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;
    debug!("Quote request: {:?}", request);

    let mut response = QuoteResponse {
        table_version: RateTables::reference().version.clone(),
        quote: None,
        comparison: None,
        execution_time_us: 0,
        error: None,
    };

    match price(&request) {
        Ok((quote, comparison)) => {
            response.quote = Some(quote);
            response.comparison = comparison;
        }
        Err(e) => {
            warn!("Rejected quote request: {}", e);
            response.error = Some(e.to_string());
        }
    }

    response.execution_time_us = start.elapsed().as_micros() as u64;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
