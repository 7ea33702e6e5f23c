//! Kana Quest - Japanese for young learners
//!
//! Run with: cargo run --bin kana-quest

use anyhow::Result;
use clap::Parser;
use iced::application;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kana_quest::config::Config;
use kana_quest::gui::KanaQuestApp;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Gemini API key (overrides the config file)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Audio input device index
    #[arg(short, long)]
    device: Option<usize>,

    /// Skip warming the speech cache at startup
    #[arg(long)]
    no_preload: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    // Setup logging
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kana_quest={level},warn")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🎒 Kana Quest v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(key) = args.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = key;
    }
    if args.device.is_some() {
        config.input_device = args.device;
    }
    if args.no_preload {
        config.preload_on_start = false;
    }
    config.validate()?;
    if !config.has_credential() {
        warn!("⚠️ No API key found, running in offline mode");
    }

    let mut app = KanaQuestApp::new(config)?;
    let boot = app.boot();

    application(KanaQuestApp::title, KanaQuestApp::update, KanaQuestApp::view)
        .theme(KanaQuestApp::theme)
        .window_size((1100.0, 860.0))
        .run_with(move || (app, boot))?;

    Ok(())
}
