//! Plain-text rendering of quotes and tier comparisons

use crate::rating::{Quote, RatingInput, TierQuote};

/// Disclaimer printed under every estimate
pub const DISCLAIMER: &str = "This tool provides an informational estimate of renters insurance \
costs based on common rating factors such as personal property value, location, unit type, \
coverage level, and deductible. The figures shown are estimates only. Actual insurance premiums \
vary based on building age, claims history, credit score, and insurer criteria. Contact licensed \
providers for accurate quotes.";

/// Group digits in threes: 1234567 -> "1,234,567"
pub fn format_number(n: i64) -> String {
    let grouped = group_digits(n.unsigned_abs());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar currency: 1850 -> "$1,850"
pub fn format_currency(amount: u64) -> String {
    format!("${}", group_digits(amount))
}

/// Full estimate report for one input
pub fn format_quote(input: &RatingInput, quote: &Quote) -> String {
    let mut out = String::new();

    out.push_str("=== Renters Insurance Cost Estimate ===\n");
    out.push_str(&format!(
        "Location: {}  Dwelling: {}  Coverage: {}  Deductible: {}\n",
        input.location,
        input.dwelling_type,
        input.coverage_tier.display_name(),
        format_currency(input.deductible.amount() as u64),
    ));
    if quote.breakdown.location_fallback {
        out.push_str(&format!(
            "Note: no location factor for {}, standard rate applied\n",
            input.location
        ));
    }
    out.push('\n');

    out.push_str(&format!("Estimated Monthly Cost: {} per month\n", format_currency(quote.monthly_cost)));
    out.push_str(&format!("Annual Cost:            {}\n", format_currency(quote.annual_cost)));
    out.push_str(&format!("Property Value:         ${}\n", format_number(input.property_value)));

    out.push_str("\nCoverage Level Summary\n");
    for bullet in &quote.summary_bullets {
        out.push_str(&format!("  - {}\n", bullet));
    }

    out.push_str("\nCoverage Details\n");
    let width = quote
        .feature_matrix
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);
    for feature in &quote.feature_matrix {
        let status = if feature.included { "Included" } else { "Not Included" };
        out.push_str(&format!("  {:<width$}  {}\n", feature.label, status, width = width));
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Side-by-side annual/monthly cost for every tier
pub fn format_comparison(tiers: &[TierQuote]) -> String {
    let mut out = String::new();

    out.push_str("Coverage Comparison\n");
    out.push_str(&format!("  {:<10} {:>10} {:>10}  {}\n", "Tier", "Annual", "Monthly", "Included"));
    for tier in tiers {
        let included = tier.quote.included_features().count();
        out.push_str(&format!(
            "  {:<10} {:>10} {:>10}  {}/{}\n",
            tier.tier.display_name(),
            format_currency(tier.quote.annual_cost),
            format_currency(tier.quote.monthly_cost),
            included,
            tier.quote.feature_matrix.len(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingEngine;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(25_000), "25,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-5_000), "-5,000");
        assert_eq!(format_number(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_850), "$1,850");
        assert_eq!(format_currency(20), "$20");
        assert_eq!(format_currency(u64::MAX), "$18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_quote() {
        let input = RatingInput::default();
        let quote = RatingEngine::reference().quote(&input).unwrap();
        let text = format_quote(&input, &quote);

        assert!(text.contains("Estimated Monthly Cost: $20 per month"));
        assert!(text.contains("Annual Cost:            $241"));
        assert!(text.contains("Property Value:         $25,000"));
        assert!(text.contains("Water damage protection"));
        assert!(text.contains("Valuable Items Coverage"));
        assert!(text.contains("Not Included"));
        assert!(!text.contains("standard rate applied"));
    }

    #[test]
    fn test_format_quote_notes_fallback() {
        let mut input = RatingInput::default();
        input.location = "ZZ".to_string();
        let quote = RatingEngine::reference().quote(&input).unwrap();

        assert!(format_quote(&input, &quote).contains("no location factor for ZZ"));
    }

    #[test]
    fn test_format_comparison() {
        let tiers = RatingEngine::reference()
            .compare_tiers(&RatingInput::default())
            .unwrap();
        let text = format_comparison(&tiers);

        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("Basic"));
        assert!(text.contains("6/6"));
    }
}
