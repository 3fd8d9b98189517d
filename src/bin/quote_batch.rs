//! Price a CSV of rating inputs
//!
//! Reads PropertyValue,Location,DwellingType,CoverageTier,Deductible rows and writes one
//! quote row per input.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use renters_rating::rating::load_inputs;
use renters_rating::QuoteRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "quote_batch", about = "Price a batch of renters insurance inputs")]
struct Args {
    /// Input CSV of rating factors
    #[arg(long, default_value = "data/sample_inputs.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "quote_batch_output.csv")]
    output: PathBuf,

    /// Rate table directory (built-in tables when omitted)
    #[arg(long)]
    tables: Option<PathBuf>,
}

/// One output row per priced input
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "Row")]
    row: usize,
    #[serde(rename = "PropertyValue")]
    property_value: i64,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "DwellingType")]
    dwelling_type: &'static str,
    #[serde(rename = "CoverageTier")]
    coverage_tier: &'static str,
    #[serde(rename = "Deductible")]
    deductible: u32,
    #[serde(rename = "LocationFallback")]
    location_fallback: Option<bool>,
    #[serde(rename = "AnnualRaw")]
    annual_raw: Option<f64>,
    #[serde(rename = "AnnualCost")]
    annual_cost: Option<u64>,
    #[serde(rename = "MonthlyCost")]
    monthly_cost: Option<u64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let runner = match &args.tables {
        Some(dir) => QuoteRunner::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => QuoteRunner::new(),
    };

    let inputs = load_inputs(&args.input)
        .with_context(|| format!("loading inputs from {}", args.input.display()))?;
    info!("Loaded {} inputs in {:?}", inputs.len(), start.elapsed());

    let priced = Instant::now();
    let results = runner.run_batch(&inputs);
    info!("Priced {} inputs in {:?}", results.len(), priced.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut failures = 0;
    for (i, (input, result)) in inputs.iter().zip(&results).enumerate() {
        let mut row = OutputRow {
            row: i + 1,
            property_value: input.property_value,
            location: &input.location,
            dwelling_type: input.dwelling_type.as_str(),
            coverage_tier: input.coverage_tier.as_str(),
            deductible: input.deductible.amount(),
            location_fallback: None,
            annual_raw: None,
            annual_cost: None,
            monthly_cost: None,
            error: None,
        };

        match result {
            Ok(quote) => {
                row.location_fallback = Some(quote.breakdown.location_fallback);
                row.annual_raw = Some(quote.breakdown.annual_raw);
                row.annual_cost = Some(quote.annual_cost);
                row.monthly_cost = Some(quote.monthly_cost);
            }
            Err(e) => {
                warn!("Row {}: {}", i + 1, e);
                failures += 1;
                row.error = Some(e.to_string());
            }
        }

        writer.serialize(&row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} quotes ({} failed) to {} in {:?}",
        results.len(),
        failures,
        args.output.display(),
        start.elapsed()
    );

    Ok(())
}
