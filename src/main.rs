use clap::Parser;
use dance_portfolio::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dance_portfolio=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, name }) => {
            dance_portfolio::cli::init::run(path, name).await?;
        }
        Some(Commands::Serve { host, port }) => {
            dance_portfolio::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::List { all, json }) => {
            dance_portfolio::cli::list::run(&cli.config, all, json).await?;
        }
        None => {
            // No subcommand provided, print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
