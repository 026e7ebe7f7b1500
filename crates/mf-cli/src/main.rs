//! CLI frontend for the Mystic Forest adventure.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mf_engine::GameConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "mf",
    about = "神秘森林 (Mystic Forest) - a text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    /// Save file location
    #[arg(long, global = true, env = "MF_SAVE", default_value = mf_engine::config::DEFAULT_SAVE_PATH)]
    save: PathBuf,

    /// Log filter directive (e.g. mf_engine=debug)
    #[arg(long, global = true, env = "MF_LOG", default_value = mf_engine::config::DEFAULT_LOG_FILTER)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in line mode on stdin/stdout
    Play {
        /// Start in this scene instead of the entrance
        #[arg(long)]
        from: Option<String>,

        /// Resume from the save file if there is one
        #[arg(short, long)]
        resume: bool,
    },

    /// Check the story content for broken references and dead ends
    Check {
        /// Hide warnings, report errors only
        #[arg(short, long)]
        quiet: bool,
    },

    /// List all scenes
    Scenes,

    /// List all items
    Items,

    /// Show one scene in detail
    Show {
        /// Scene id (e.g. forest_path)
        scene: String,
    },
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(mf_engine::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = GameConfig::default()
        .with_save_path(cli.save)
        .with_log_filter(cli.log);
    init_logging(&config.log_filter);

    let result = match cli.command {
        Commands::Play { from, resume } => {
            let config = match from {
                Some(scene) => config.with_start_scene(scene),
                None => config,
            };
            commands::play::run(config, resume)
        }
        Commands::Check { quiet } => commands::check::run(quiet),
        Commands::Scenes => commands::scenes::run(),
        Commands::Items => commands::items::run(),
        Commands::Show { scene } => commands::show::run(&scene),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
