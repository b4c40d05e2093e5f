//! elevdesk add コマンド
//!
//! レコードを作成する。`id` と `createdAt` は省略すると作成時刻から付与される。

use super::record_input::RecordInput;
use super::Context;
use crate::auth::Permission;
use crate::domain::{draft, Resource};
use crate::output::{print_record_amounts, record_label};
use crate::store;
use chrono::Utc;
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Debug, Parser)]
pub struct Args {
    /// Resource to add a record to
    #[arg(value_enum)]
    pub resource: Resource,

    #[command(flatten)]
    pub input: RecordInput,

    /// Print the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    // 1. 権限確認（リソースの閲覧 + 作成）
    let users = ctx.load_users().await?;
    ctx.authorize_all(
        &users,
        &[args.resource.required_permission(), Permission::Create],
    )?;

    // 2. 入力を整える
    let input = args.input.read().await?;
    let record =
        draft::prepare_new(args.resource, input, Utc::now()).map_err(|e| e.to_string())?;

    // 3. 保存
    let created = store::create(&ctx.source, &ctx.config.http(), args.resource, record)
        .await
        .map_err(|e| format!("Failed to create {} record: {e}", args.resource))?;

    if args.json {
        let json = serde_json::to_string_pretty(&created)
            .map_err(|e| format!("Failed to serialize record: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{} Created {}",
        "✓".green(),
        record_label(args.resource, &created).bold()
    );
    print_record_amounts(args.resource, &created);
    Ok(())
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
