//! product-viewer: browse a product catalog and export selections as PDF

use clap::Parser;
use color_eyre::Result;
use product_viewer_core::ViewerConfig;
use product_viewer_tui::App;
use product_viewer_tui::export_log::ExportLogger;
use std::fs::File;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// product-viewer: Terminal dashboard for the product catalog
#[derive(Parser, Debug)]
#[command(name = "product-viewer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.product-viewer/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog base URL, overriding the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Directory the PDF report is written to (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: /tmp/product-viewer.log)
    #[arg(long, default_value = "/tmp/product-viewer.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;

    // Log to a file; stdout belongs to the TUI
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(true)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    tracing::info!("Starting product-viewer");

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load_default()?,
    };
    if let Some(endpoint) = cli.endpoint {
        tracing::info!("Using endpoint: {}", endpoint);
        config.api.base_url = endpoint;
    }

    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    tracing::info!("Reports will be written to {}", output_dir.display());

    let mut app = App::new(config, output_dir, ExportLogger::new());
    app.run().await?;

    tracing::info!("Goodbye!");
    Ok(())
}
