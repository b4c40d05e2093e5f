//! elevdesk vat コマンド

use crate::output::print_breakdown;
use crate::vat::VatBreakdown;
use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Unit price (e.g. price per elevator)
    pub unit_price: f64,

    /// Number of units
    #[arg(long, short, default_value_t = 1)]
    pub count: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: Args) -> Result<(), String> {
    if !args.unit_price.is_finite() || args.unit_price < 0.0 {
        return Err(format!("Invalid unit price: {}", args.unit_price));
    }

    let breakdown = VatBreakdown::for_units(args.unit_price, args.count);

    if args.json {
        let json = serde_json::to_string_pretty(&breakdown)
            .map_err(|e| format!("Failed to serialize VAT breakdown: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    print_breakdown(&breakdown);
    Ok(())
}
