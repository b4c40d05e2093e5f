//! elevdesk browse コマンド
//!
//! データ読み込みをバックグラウンドで開始し、TUI を表示する。

use super::Context;
use crate::domain::Resource;
use crate::tui;
use clap::Parser;
use std::sync::mpsc;

#[derive(Debug, Parser)]
pub struct Args {
    /// Resource tab to open first
    #[arg(long, value_enum)]
    pub resource: Option<Resource>,

    /// Disable the search box
    #[arg(long)]
    pub no_search: bool,

    /// Do not open a detail panel on Enter
    #[arg(long)]
    pub no_details: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), String> {
    let ttl = ctx.config.session_ttl().map_err(|e| e.to_string())?;
    let (tx, rx) = mpsc::channel();

    let loader_ctx = ctx.clone();
    tokio::spawn(async move {
        let result = loader_ctx.load().await;
        // 受信側が先に終了していれば結果は捨てる
        let _ = tx.send(result);
    });

    let options = tui::Options {
        username: ctx.user.clone(),
        password: ctx.password.clone(),
        ttl,
        initial: args.resource,
        searchable: !args.no_search,
        details: !args.no_details,
    };

    tokio::task::spawn_blocking(move || tui::run(rx, options))
        .await
        .map_err(|e| format!("TUI task failed: {e}"))?
        .map_err(|e| format!("TUI error: {e}"))
}
