use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedloom::app::AppContext;
use feedloom::cli::{commands, Cli, Commands};
use feedloom::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply(&mut config);
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Detect { path } => {
            commands::detect(&ctx, &path).await?;
        }
        Commands::Parse { path, .. } => {
            commands::parse(&ctx, &path).await?;
        }
        Commands::Batch { paths } => {
            commands::batch(&ctx, paths).await?;
        }
    }

    Ok(())
}
