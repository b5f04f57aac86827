//! Command-line AQI calculator.
//!
//! ```text
//! airwatch PM2.5=80 PM10=40 NO2=35
//! ```

use airwatch::aqi::{aggregate, parse_sample_from_map};
use airwatch::models::aqi::AggregateResult;
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = HashMap::new();
    for arg in std::env::args().skip(1) {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected POLLUTANT=VALUE, got '{}'", arg))?;
        fields.insert(name.to_string(), value.to_string());
    }

    if fields.is_empty() {
        eprintln!("usage: airwatch POLLUTANT=VALUE [POLLUTANT=VALUE ...]");
        eprintln!("example: airwatch PM2.5=80 PM10=40");
        std::process::exit(2);
    }

    let sample = parse_sample_from_map(&fields)?;
    let result = aggregate(&sample)?;
    print_result(&result);

    Ok(())
}

fn print_result(result: &AggregateResult) {
    println!("  AQI: {:.1}", result.overall_index);
    println!(
        "  Category: {} ({})",
        result.category.category.name(),
        result.category.description
    );
    println!("  Dominant pollutant: {}", result.dominant_pollutant);
    println!("  Sub-indices:");
    for (i, sub) in result.sub_indices.iter().enumerate() {
        println!(
            "    {}. {}: {:.1} (range {}-{})",
            i + 1,
            sub.pollutant,
            sub.value,
            sub.range.concentration_low,
            sub.range.concentration_high
        );
    }
}
