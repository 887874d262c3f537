use clap::Parser;
use tracing_subscriber::EnvFilter;

use server::config::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = server::run(cli).await {
        tracing::error!("server exited: {err:#}");
        std::process::exit(2);
    }
}
