//! Renters quote CLI
//!
//! Command-line interface for pricing a single renters insurance estimate

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use renters_rating::report::{format_comparison, format_quote};
use renters_rating::{
    CoverageTier, Deductible, DwellingType, RateTables, RatingEngine, RatingInput,
};
use renters_rating::rating::{is_known_jurisdiction, MAX_RECOMMENDED_VALUE, MIN_RECOMMENDED_VALUE};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "renters-quote", version, about = "Estimate a renters insurance premium")]
struct Args {
    /// Personal property value in dollars
    #[arg(long = "value", default_value_t = 25_000, allow_negative_numbers = true)]
    property_value: i64,

    /// Two-letter state code
    #[arg(long, default_value = "CA")]
    location: String,

    /// apartment, condo, house, or townhouse
    #[arg(long = "dwelling", default_value = "apartment")]
    dwelling_type: DwellingType,

    /// basic, standard, or premium
    #[arg(long = "tier", default_value = "standard")]
    coverage_tier: CoverageTier,

    /// 250, 500, 1000, or 2500
    #[arg(long, default_value = "500")]
    deductible: Deductible,

    /// Load rate tables from this CSV directory instead of the built-in set
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Also price every coverage tier
    #[arg(long)]
    compare: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    table_version: &'a str,
    input: &'a RatingInput,
    quote: &'a renters_rating::Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a [renters_rating::TierQuote]>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let loaded;
    let tables = match &args.tables {
        Some(dir) => {
            loaded = RateTables::from_csv_path(dir)
                .with_context(|| format!("loading rate tables from {}", dir.display()))?;
            &loaded
        }
        None => RateTables::reference(),
    };

    let input = RatingInput::new(
        args.property_value,
        args.location.trim().to_ascii_uppercase(),
        args.dwelling_type,
        args.coverage_tier,
        args.deductible,
    );

    if !is_known_jurisdiction(&input.location) {
        warn!("{} is not a recognised state code", input.location);
    }
    if !input.in_recommended_range() {
        warn!(
            "Property value {} is outside the usual ${}-${} range",
            input.property_value, MIN_RECOMMENDED_VALUE, MAX_RECOMMENDED_VALUE
        );
    }

    let engine = RatingEngine::new(tables);
    let quote = engine.quote(&input).context("pricing estimate")?;
    let comparison = if args.compare {
        Some(engine.compare_tiers(&input).context("pricing tier comparison")?)
    } else {
        None
    };

    if args.json {
        let output = JsonOutput {
            table_version: &tables.version,
            input: &input,
            quote: &quote,
            comparison: comparison.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", format_quote(&input, &quote));
    if let Some(tiers) = &comparison {
        println!();
        print!("{}", format_comparison(tiers));
    }
    println!("\nRate tables {} effective {}", tables.version, tables.effective_date);

    Ok(())
}
