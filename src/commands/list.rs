//! elevdesk list コマンド
//!
//! リソースの一覧を検索・ソートして表示する。

use super::Context;
use crate::auth::Role;
use crate::domain::{
    Client, ColumnContext, Contract, Invoice, Maintenance, Payment, Project, Resource,
    ResourceRecord, User,
};
use crate::output::{build_table, ListSummary};
use crate::store::Database;
use crate::table::{Projection, TableView};
use clap::Parser;
use serde::Serialize;

const AFTER_HELP: &str = "\
OUTPUT FORMATS:
  (default)  Table of the visible columns
  --json     Matched records as a JSON array
  --simple   One record id per line

Sorting on a column that is not sortable leaves the order unchanged.";

#[derive(Debug, Parser)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Resource to list
    #[arg(value_enum)]
    pub resource: Resource,

    /// Free-text search across every field (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,

    /// Column key to sort by (e.g. amount, clientNumber)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Output matched records as JSON
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Output only record ids
    #[arg(long, conflicts_with = "json")]
    pub simple: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    let db = ctx.load().await?;
    let role = ctx.authorize(&db, args.resource.required_permission())?;

    match args.resource {
        Resource::Clients => print_resource::<Client>(&db, role, &args),
        Resource::Projects => print_resource::<Project>(&db, role, &args),
        Resource::Contracts => print_resource::<Contract>(&db, role, &args),
        Resource::Payments => print_resource::<Payment>(&db, role, &args),
        Resource::Invoices => print_resource::<Invoice>(&db, role, &args),
        Resource::Maintenances => print_resource::<Maintenance>(&db, role, &args),
        Resource::Users => print_resource::<User>(&db, role, &args),
    }
}

/// 引数からビューを構成する
fn build_view<R: ResourceRecord>(db: &Database, role: Role, args: &Args) -> TableView<R> {
    let mut view = TableView::new(R::columns(&ColumnContext::new(db, role)));

    if let Some(term) = &args.search {
        view.set_search(term.as_str());
    }
    if let Some(key) = &args.sort {
        // 昇順 → 降順の順に切り替わる
        if view.toggle_sort(key) && args.desc {
            view.toggle_sort(key);
        }
    }
    view
}

fn print_resource<R: ResourceRecord + Serialize>(
    db: &Database,
    role: Role,
    args: &Args,
) -> Result<(), String> {
    let source = R::select(db);
    let view = build_view::<R>(db, role, args);

    if args.json {
        // 空の場合も [] を出力
        return serde_json::to_string_pretty(&view.rows(source))
            .map(|json| println!("{json}"))
            .map_err(|e| format!("Failed to serialize {}: {}", R::RESOURCE, e));
    }

    if args.simple {
        for record in view.rows(source) {
            println!("{}", record.id());
        }
        return Ok(());
    }

    match view.project(source) {
        Projection::Rows(rows) => {
            let cells: Vec<_> = rows.into_iter().map(|row| row.cells).collect();
            println!("{}", build_table(&view.headers(), &cells));
            println!("{}", ListSummary::format(cells.len(), source.len()).line());
        }
        Projection::Empty | Projection::Loading { .. } => {
            println!("{}", ListSummary::format(0, source.len()).line());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
