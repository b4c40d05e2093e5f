mod auth;
mod cli;
mod commands;
mod config;
mod dashboard;
mod domain;
mod error;
mod logging;
mod output;
mod store;
mod table;
mod tui;
mod vat;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
