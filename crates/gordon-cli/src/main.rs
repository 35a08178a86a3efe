use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod app;

#[derive(Parser)]
#[command(name = "gordon")]
#[command(about = "Gordon - chat with Gemini about text and images")]
#[command(version)]
struct Cli {
    /// Path to the settings file (defaults to <config dir>/gordon/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model to use for both text and image turns
    #[arg(short, long)]
    model: Option<String>,

    /// Send a single prompt and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Image to send with the single prompt
    #[arg(short, long)]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let settings = match cli.config {
        Some(ref path) => gordon_core::Settings::load_from(path),
        None => gordon_core::Settings::load(),
    }
    .context("Failed to load settings")?;

    let settings = match cli.model {
        Some(model) => settings.with_model(model),
        None => settings,
    };

    if cli.prompt.is_some() || cli.image.is_some() {
        app::run_single_prompt(&settings, cli.prompt.as_deref(), cli.image.as_deref()).await?;
    } else {
        app::run_repl(&settings).await?;
    }

    Ok(())
}
