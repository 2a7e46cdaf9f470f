pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "barista")]
#[command(about = "Barista CLI - operator actions for the drinks menu API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Database administration")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Db { cmd } => commands::db::handle(cmd).await,
    }
}
