use crate::{config::PushdownConfig, error::CliError};
use clap::Parser;
use commands::Commands;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "pushdown", version = "0.1.0", about = "Filter pushdown compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ast { filter } => {
            let tree = filter_syntax::parse(&filter)?;
            let json = serde_json::to_string_pretty(&tree).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
        Commands::Explain { filter } => {
            let tree = filter_syntax::parse(&filter)?;
            println!("{tree}");
            println!("predicates: {}", tree.predicate_count());
        }
        Commands::Prune { filter, config } => {
            let config = PushdownConfig::load(&config).await?;
            let pruned = connectors::plan_for(
                &filter,
                &config.columns,
                &config.capabilities(),
                &config.backend,
            )?;
            output::emit(pruned.map(|tree| tree.to_string()), None).await?;
        }
        Commands::Compile {
            filter,
            config,
            output,
        } => {
            let config = PushdownConfig::load(&config).await?;
            info!(backend = config.backend.name(), "Compiling filter");
            let compiled = connectors::compile(
                &filter,
                &config.columns,
                &config.capabilities(),
                &config.backend,
            )?;
            output::emit(compiled.map(|predicate| predicate.to_string()), output).await?;
        }
    }

    Ok(())
}
