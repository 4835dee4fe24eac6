mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use config::Config;

#[derive(Parser)]
#[command(name = "payday")]
#[command(about = "Telegram bot: worker registration and a daily payout ledger")]
struct Args {
    /// Config file (default: payday.toml or .payday.toml in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(path) => Config::load_from_file(&path)?,
        None => Config::find_and_load()?
            .context("no payday.toml found; pass --config <path>")?,
    };

    payday_web::run(config.into_server_config()?).await
}
