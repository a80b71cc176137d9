//! From Darkness level generator
//!
//! Generates one dungeon level and prints it to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use strum::IntoEnumIterator;

use fd_core::dungeon::{
    FilePrefabLoader, RoomShape, generate_level, render_blueprint, render_tiles,
};
use fd_core::{ConfigError, GenConfig};
use fd_rng::GameRng;

/// Procedural dungeon level generator
#[derive(Parser, Debug)]
#[command(name = "fd-dungeon")]
#[command(author, version, about = "From Darkness - generate a dungeon level", long_about = None)]
struct Args {
    /// JSON configuration file (flags below override it)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Map width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Map height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Target number of rooms
    #[arg(long = "max-rooms")]
    max_rooms: Option<usize>,

    /// Rejected placements tolerated before stopping early
    #[arg(long = "max-tries")]
    max_tries: Option<usize>,

    /// Random seed (random if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding prefab room files
    #[arg(long = "prefab-dir")]
    prefab_dir: Option<PathBuf>,

    /// Print the raw blueprint instead of the tile view
    #[arg(short = 'b', long = "blueprint")]
    blueprint: bool,

    /// Print the generation report as JSON after the map
    #[arg(long = "json")]
    json: bool,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<GenConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => GenConfig::from_json_file(path)?,
        None => GenConfig::default(),
    };
    if let Some(width) = args.width {
        config.map_width = width;
    }
    if let Some(height) = args.height {
        config.map_height = height;
    }
    if let Some(max_rooms) = args.max_rooms {
        config.max_rooms = max_rooms;
    }
    if let Some(max_tries) = args.max_tries {
        config.max_tries = max_tries;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = load_config(args)?;
    let prefabs = match &args.prefab_dir {
        Some(dir) => FilePrefabLoader::new(dir),
        None => FilePrefabLoader::bundled(),
    };
    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(
        "seed {} map {}x{} prefabs from {}",
        rng.seed(),
        config.map_width,
        config.map_height,
        prefabs.root().display()
    );

    let (level, report) = generate_level(&config, &mut rng, &prefabs);

    let map = if args.blueprint {
        render_blueprint(&level)
    } else {
        render_tiles(&level)
    };
    println!("{map}");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let shapes: Vec<String> = RoomShape::iter()
            .map(|s| format!("{s}={}", report.shape_counts.get(&s).copied().unwrap_or(0)))
            .collect();
        eprintln!(
            "seed {}: {} of {} rooms in {} tries ({})",
            rng.seed(),
            report.rooms_placed,
            config.max_rooms,
            report.tries,
            shapes.join(" ")
        );
    }
    Ok(())
}
