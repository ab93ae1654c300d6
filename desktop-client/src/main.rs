mod audio;
mod command_sender;
mod config;
mod offline;
mod state;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use snake_common::games::snake::DEFAULT_VIEWPORT_PX;
use snake_common::logger::{self, LogLevel};
use snake_common::version::VERSION;
use snake_common::{log, log_warn};

use audio::AudioPlayer;
use config::{Config, get_config_manager};
use offline::{LocalBroadcaster, spawn_snake_game};
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "emoji_snake", version = VERSION)]
struct Args {
    /// Path to the YAML config file. Defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food and bonus placement. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// debug, info, warn or error. Overrides the config file.
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config);
    let (mut config, load_error) = match config_manager.get_config() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.log_level.unwrap_or(config.log_level));

    if let Some(e) = load_error {
        log_warn!("Failed to load config, using defaults: {}", e);
    }
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }

    log!("Emoji Snake {} starting", VERSION);

    let shared_state = SharedState::new();
    let audio = AudioPlayer::spawn(&config.audio);
    let broadcaster = LocalBroadcaster::new(shared_state.clone(), audio.clone());
    let (command_sender, session_handle) = spawn_snake_game(&config.game, broadcaster)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                DEFAULT_VIEWPORT_PX.0 as f32 + 40.0,
                DEFAULT_VIEWPORT_PX.1 as f32 + 220.0,
            ])
            .with_title("Emoji Snake"),
        ..Default::default()
    };

    let app = SnakeApp::new(
        shared_state,
        command_sender.clone(),
        config_manager,
        audio,
        &config,
    );
    eframe::run_native("Emoji Snake", options, Box::new(|_cc| Ok(Box::new(app))))?;

    command_sender.shutdown();
    if session_handle.join().is_err() {
        log_warn!("Session thread panicked");
    }

    Ok(())
}
