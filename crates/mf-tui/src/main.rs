//! Standalone TUI binary for Mystic Forest.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};

use clap::Parser;
use mf_core::ContentCatalog;
use mf_engine::{GameConfig, GameSession};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mf-tui", about = "神秘森林 (Mystic Forest) in the terminal", version)]
struct Args {
    /// Save file location
    #[arg(long, env = "MF_SAVE", default_value = mf_engine::config::DEFAULT_SAVE_PATH)]
    save: PathBuf,

    /// Log filter directive (e.g. mf_engine=debug)
    #[arg(long, env = "MF_LOG", default_value = mf_engine::config::DEFAULT_LOG_FILTER)]
    log: String,

    /// Start in this scene instead of the entrance
    #[arg(long)]
    from: Option<String>,
}

/// Log to a file beside the save so the alternate screen stays clean.
fn init_logging(save: &Path, filter: &str) {
    let path = save.with_file_name("mf-tui.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(mf_engine::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

fn main() {
    let args = Args::parse();

    let mut config = GameConfig::default()
        .with_save_path(args.save)
        .with_log_filter(args.log);
    if let Some(scene) = args.from {
        config = config.with_start_scene(scene);
    }
    init_logging(&config.save_path, &config.log_filter);

    let catalog = match ContentCatalog::mystic_forest() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("error: story content is invalid: {e}");
            process::exit(1);
        }
    };

    let app = mf_tui::app::TuiApp::new(GameSession::new(catalog, config));

    if let Err(e) = mf_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
