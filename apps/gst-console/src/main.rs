//! GST console binary
//!
//! Logs go to stderr so tables on stdout stay clean.

use clap::Parser;
use gst_console::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("gst-console v{}", env!("CARGO_PKG_VERSION"));

    gst_console::app::run(cli).await
}
