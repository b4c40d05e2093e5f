use crate::cli::{Cli, Command};

pub mod add;
pub mod browse;
mod context;
pub mod delete;
pub mod list;
mod record_input;
pub mod stats;
pub mod update;
pub mod vat;

pub use context::Context;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Command::List(args) => list::run(&ctx, args).await,
        Command::Browse(args) => browse::run(&ctx, args).await,
        Command::Stats(args) => stats::run(&ctx, args).await,
        Command::Add(args) => add::run(&ctx, args).await,
        Command::Update(args) => update::run(&ctx, args).await,
        Command::Delete(args) => delete::run(&ctx, args).await,
        Command::Vat(args) => vat::run(args),
    }
}
