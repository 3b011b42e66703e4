//! Meme Studio
//!
//! Browse Imgflip meme templates and caption them.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::{info, warn};
use meme_studio::api::ImgflipClient;
use meme_studio::config::{Settings, ENV_PASSWORD, ENV_USERNAME};
use meme_studio::App;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "meme-studio", version, about = "Browse and caption Imgflip meme templates")]
struct Args {
    /// Settings file (JSON); defaults to the per-user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// File that receives generated meme URLs
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Imgflip API root
    #[arg(long)]
    api_base: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(path) = args.history_file {
        settings.history_file = path;
    }
    if let Some(base) = args.api_base {
        settings.api_base = base;
    }

    info!(
        "Meme Studio v{} (API {}, history {})",
        env!("CARGO_PKG_VERSION"),
        settings.api_base,
        settings.history_file.display()
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let api = ImgflipClient::new(
        &settings.api_base,
        settings.credentials(),
        settings.request_timeout(),
    )
    .context("Failed to create HTTP client")?;

    if !api.has_credentials() {
        warn!(
            "No Imgflip credentials; set {} and {} to enable meme creation",
            ENV_USERNAME, ENV_PASSWORD
        );
    }

    let api = Arc::new(api);
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1550.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Meme Generator"),
        ..Default::default()
    };

    eframe::run_native(
        "Meme Studio",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, &settings, api, handle)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))?;

    Ok(())
}
