use anyhow::Context;
use clap::Parser;
use an_scrapers::{logging::init_logging, ScraperCommands, ARXIV_FEED_URL};
use an_web::{create_app, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI research news aggregator", long_about = None)]
pub struct Cli {
    #[arg(long, env = "AN_HOST", default_value = "127.0.0.1", global = true)]
    host: String,
    #[arg(long, env = "AN_PORT", default_value_t = 8000, global = true)]
    port: u16,
    /// Feed to aggregate
    #[arg(long, env = "AN_FEED_URL", default_value = ARXIV_FEED_URL, global = true)]
    feed_url: String,
    /// Default log filter; RUST_LOG takes precedence
    #[arg(long, env = "AN_LOG", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    #[command(flatten)]
    Scrape(ScraperCommands),
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let state = AppState::new(&cli.feed_url).context("Failed to build HTTP client")?;
    let app = create_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, feed = %cli.feed_url, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        None | Some(Commands::Serve) => serve(&cli).await,
        Some(Commands::Scrape(ref command)) => {
            an_scrapers::handle_command(command.clone(), &cli.feed_url).await?;
            Ok(())
        }
    }
}
