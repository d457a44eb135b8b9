// Main entry point - Dependency injection and layout run
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grafana_autolayout::application::layout_service::LayoutService;
use grafana_autolayout::application::panel_sink::PanelSink;
use grafana_autolayout::infrastructure::config::load_layout_config;
use grafana_autolayout::infrastructure::document_loader::load_document;
use grafana_autolayout::infrastructure::file_sink::{FileSink, StdoutSink};
use grafana_autolayout::presentation::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the panel JSON can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = load_layout_config(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config))?;
    cli.apply_overrides(&mut settings);

    let document = load_document(&cli.input).await?;

    let sink: Arc<dyn PanelSink> = match &cli.output {
        Some(path) => Arc::new(FileSink::new(path)),
        None => Arc::new(StdoutSink),
    };

    let service = LayoutService::new(sink, settings);
    service.render(document).await?;

    Ok(())
}
