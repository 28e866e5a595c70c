//! Battle portrait demo entry point.
//!
//! Runs one scripted, headless battle through the portrait overlay and logs
//! every portrait state change. Use `RUST_LOG=debug` to also see each new
//! show, picture request and load completion.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 720
//! ```

use battleportrait::game;
use battleportrait::resources::director::PortraitDirector;
use battleportrait::resources::gameconfig::GameConfig;
use battleportrait::resources::picturerules::PictureRules;
use battleportrait::resources::picturestore::{
    PictureManifest, setup_picture_loader, shutdown_picture_loader,
};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Battle standing-picture overlay demo
#[derive(Parser)]
#[command(version, about = "Plays a scripted battle through the battle portrait overlay.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./portrait.ini")]
    config: PathBuf,

    /// Picture rule JSON, overriding the configuration.
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Picture size manifest JSON, overriding the configuration.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 720)]
    frames: u64,

    /// Frames per second; 0 runs unthrottled.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for the random victory actor.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(rules) = cli.rules {
        config.rules_path = rules;
    }
    if let Some(manifest) = cli.manifest {
        config.manifest_path = manifest;
    }

    let mut rules = match PictureRules::load_from_file(&config.rules_path.to_string_lossy()) {
        Ok(rules) => rules,
        Err(e) => {
            error!("Failed to load picture rules: {}", e);
            PictureRules::new()
        }
    };
    if let Some(policy) = config.victory_actor {
        rules.victory_actor = policy;
    }

    let manifest = match PictureManifest::load_from_file(&config.manifest_path.to_string_lossy())
    {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("Failed to load picture manifest: {}", e);
            PictureManifest::new()
        }
    };

    let director = match cli.seed {
        Some(seed) => PortraitDirector::with_seed(seed),
        None => PortraitDirector::new(),
    };

    let mut world = game::build_world(
        config,
        rules,
        game::demo_party(),
        game::demo_timeline(),
        director,
    );
    setup_picture_loader(&mut world, manifest);
    let mut schedule = game::build_schedule(true);

    let frame_time = if cli.fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / cli.fps as f64)
    };
    info!("Simulating {} frames", cli.frames);
    game::run(&mut world, &mut schedule, cli.frames, frame_time);

    shutdown_picture_loader(&mut world);
}
