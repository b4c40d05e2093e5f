//! elevdesk delete コマンド

use super::Context;
use crate::auth::Permission;
use crate::domain::{
    Client, Contract, Invoice, Maintenance, Payment, Project, Resource, ResourceRecord, User,
};
use crate::store::{self, Database};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, Write};

#[derive(Debug, Parser)]
pub struct Args {
    /// Resource the record belongs to
    #[arg(value_enum)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    // 1. 事前チェック: 権限と存在確認
    let db = ctx.load().await?;
    ctx.authorize_all(
        &db.users,
        &[args.resource.required_permission(), Permission::Delete],
    )?;
    if !exists(&db, args.resource, &args.id) {
        return Err(format!("Record not found: {}/{}", args.resource, args.id));
    }

    // 2. 確認プロンプト（--force でスキップ）
    if !args.force && !confirm_delete(args.resource, &args.id)? {
        println!("Delete cancelled.");
        return Ok(());
    }

    // 3. 削除実行
    store::delete(&ctx.source, &ctx.config.http(), args.resource, &args.id)
        .await
        .map_err(|e| format!("Failed to delete {}/{}: {e}", args.resource, args.id))?;

    println!(
        "{} Deleted {}",
        "✓".green(),
        format!("{}/{}", args.resource, args.id).bold()
    );
    Ok(())
}

/// 読み込み済みデータに該当 ID のレコードがあるか
fn exists(db: &Database, resource: Resource, id: &str) -> bool {
    fn has<R: ResourceRecord>(db: &Database, id: &str) -> bool {
        R::select(db).iter().any(|r| r.id() == id)
    }

    match resource {
        Resource::Clients => has::<Client>(db, id),
        Resource::Projects => has::<Project>(db, id),
        Resource::Contracts => has::<Contract>(db, id),
        Resource::Payments => has::<Payment>(db, id),
        Resource::Invoices => has::<Invoice>(db, id),
        Resource::Maintenances => has::<Maintenance>(db, id),
        Resource::Users => has::<User>(db, id),
    }
}

/// ユーザーに削除確認を求める
fn confirm_delete(resource: Resource, id: &str) -> Result<bool, String> {
    print!("Are you sure you want to delete {resource}/{id}? [y/N]: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
#[path = "delete_test.rs"]
mod tests;
