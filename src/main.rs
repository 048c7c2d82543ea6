use anyhow::Result;
use clap::Parser;

use presupuesto_api::cli::{Cli, Commands, ConfigCommands};
use presupuesto_api::{config, init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Cli::parse();

    match args.get_command() {
        Commands::Serve => {
            let cfg = config::load_config(&args.config)?;
            server::start_server(cfg).await?;
        }
        Commands::Config { action } => match action {
            ConfigCommands::Show => {
                let cfg = config::load_config(&args.config)?;
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            ConfigCommands::Validate => {
                config::load_config(&args.config)?;
                println!("Configuration OK");
            }
        },
        Commands::Version => {
            println!("presupuesto-api v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
