use clap::Subcommand;

use crate::config::DatabaseConfig;
use crate::database::{manager, DrinkRepository};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Drop and recreate the drinks table (destroys all rows)")]
    Reset {
        #[arg(long, help = "Seed two example drinks after the reset")]
        seed: bool,

        #[arg(long, help = "Confirm the destructive reset")]
        yes: bool,
    },
}

pub async fn handle(cmd: DbCommands) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Reset { seed, yes } => {
            if !yes {
                anyhow::bail!("refusing to reset: this drops every stored drink; re-run with --yes");
            }

            let config = DatabaseConfig::from_env()?;
            let pool = manager::connect(&config).await?;
            DrinkRepository::new(pool).reset_schema(seed).await?;

            println!("Drinks table reset{}", if seed { " and seeded" } else { "" });
            Ok(())
        }
    }
}
