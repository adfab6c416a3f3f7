mod app;
mod args;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Command};

#[tokio::main]
async fn main() {
    // API keys may live in a .env next to the shell
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    dicta_core::set_verbose(cli.verbose);

    if let Err(e) = run(cli).await {
        ui::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Bare `dicta` runs the full record workflow
        None => commands::record::run(Default::default()).await,
        Some(Command::Record(args)) => commands::record::run(args).await,
        Some(Command::Transcribe(args)) => commands::transcribe::run(args).await,
        Some(Command::Note(args)) => commands::note::run(args).await,
        Some(Command::History { command }) => commands::history::run(command),
        Some(Command::Templates { command }) => commands::templates::run(command),
        Some(Command::Config(args)) => commands::config::run(args),
        Some(Command::Setup) => commands::setup::run(),
        Some(Command::Devices) => commands::devices::run(),
    }
}
