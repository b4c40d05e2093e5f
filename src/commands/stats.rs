//! elevdesk stats コマンド

use super::Context;
use crate::auth::Permission;
use crate::dashboard::DashboardStats;
use chrono::Local;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Debug, Parser)]
pub struct Args {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    let db = ctx.load().await?;
    ctx.authorize(&db, Permission::View)?;

    let stats = DashboardStats::compute(&db, Local::now().date_naive());

    if args.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("Failed to serialize stats: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    for (label, value) in stats.rows() {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");
    Ok(())
}
