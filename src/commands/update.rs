//! elevdesk update コマンド
//!
//! レコードのフィールドを部分的に書き換える。指定しなかったフィールドはそのまま残る。

use super::record_input::RecordInput;
use super::Context;
use crate::auth::Permission;
use crate::domain::{draft, Resource};
use crate::output::{print_record_amounts, record_label};
use crate::store;
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Debug, Parser)]
pub struct Args {
    /// Resource the record belongs to
    #[arg(value_enum)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    #[command(flatten)]
    pub input: RecordInput,

    /// Print the updated record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    let users = ctx.load_users().await?;
    ctx.authorize_all(
        &users,
        &[args.resource.required_permission(), Permission::Edit],
    )?;

    let input = args.input.read().await?;
    let patch = draft::prepare_patch(args.resource, &args.id, input).map_err(|e| e.to_string())?;

    let updated = store::update(&ctx.source, &ctx.config.http(), args.resource, &args.id, patch)
        .await
        .map_err(|e| format!("Failed to update {}/{}: {e}", args.resource, args.id))?;

    if args.json {
        let json = serde_json::to_string_pretty(&updated)
            .map_err(|e| format!("Failed to serialize record: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{} Updated {}",
        "✓".green(),
        record_label(args.resource, &updated).bold()
    );
    print_record_amounts(args.resource, &updated);
    Ok(())
}

#[cfg(test)]
#[path = "update_test.rs"]
mod tests;
