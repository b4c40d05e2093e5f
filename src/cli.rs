use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{add, browse, delete, list, stats, update, vat};

#[derive(Debug, Parser)]
#[command(name = "elevdesk")]
#[command(
    about = "Elevator services desk: clients, projects, contracts, payments and invoices",
    long_about = None
)]
pub struct Cli {
    /// Data source: path to a db.json file or the API base URL
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Config file (default: ~/.elevdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this user (role decides what is visible)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Password for --user; when given, credentials are verified
    #[arg(long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// リソースの一覧表示（検索・ソート）
    List(list::Args),

    /// 対話的なテーブルブラウザ
    Browse(browse::Args),

    /// ダッシュボード統計
    Stats(stats::Args),

    /// レコードの作成
    Add(add::Args),

    /// レコードの部分更新
    Update(update::Args),

    /// レコードの削除
    Delete(delete::Args),

    /// VAT（15%）の計算
    Vat(vat::Args),
}
