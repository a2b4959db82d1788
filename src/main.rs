use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use isovox_sprites::SpriteStore;
use isovox_sprites::palette::pack_rgb;
use isovox_viewport::ViewportParams;
use isovox_world::{WorldGenParams, generate_world};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};

#[cfg(feature = "gui")]
mod app;
mod config;
mod headless;

use config::{AppConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "isovox", about = "Isometric voxel world viewer")]
struct Args {
    /// Configuration file (defaults to ./isovox.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Window width in pixels
    #[arg(long)]
    width: Option<i32>,
    /// Window height in pixels
    #[arg(long)]
    height: Option<i32>,
    /// Terrain noise seed
    #[arg(long)]
    seed: Option<i32>,
    /// Tiles along each world axis
    #[arg(long)]
    world_size: Option<u16>,
    /// Generate a flat world instead of noise terrain
    #[arg(long)]
    flat: bool,
    /// Initial tile width (zoom level)
    #[arg(long)]
    tile_width: Option<u16>,
    /// Run the scripted session without opening a window
    #[arg(long)]
    headless: bool,
    /// Frames to run in headless mode
    #[arg(long, default_value_t = 32)]
    frames: u32,
    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<LevelFilter>,
    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    match &args.log_file {
        Some(path) => {
            let level = args.log_level.unwrap_or(LevelFilter::Info);
            let cfg = simplelog::Config::default();
            CombinedLogger::init(vec![
                TermLogger::new(level, cfg.clone(), TerminalMode::Mixed, ColorChoice::Auto),
                WriteLogger::new(level, cfg, File::create(path)?),
            ])?;
        }
        None => {
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            if let Some(level) = args.log_level {
                builder.filter_level(level);
            }
            builder.try_init()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut cfg = AppConfig::load(args.config.as_deref())?;
    cfg.apply(&Overrides {
        width: args.width,
        height: args.height,
        seed: args.seed,
        world_size: args.world_size,
        flat: args.flat,
        tile_width: args.tile_width,
    });
    cfg.validate()?;

    let world = generate_world(&WorldGenParams::from_config(&cfg.world_gen())?);
    let sprites = SpriteStore::new(&cfg.sprites)?;
    let params = ViewportParams::from_config(
        &cfg.viewport,
        sprites.tile_widths(),
        pack_rgb(cfg.window.background),
    )?;
    let size = (cfg.window.width, cfg.window.height);

    #[cfg(feature = "gui")]
    if !args.headless {
        return app::run(&world, &sprites, &params, size);
    }
    #[cfg(not(feature = "gui"))]
    if !args.headless {
        log::warn!("built without the `gui` feature, running headless");
    }

    let summary = headless::run_session(&world, &sprites, &params, size, args.frames);
    log::info!(
        "headless session: {} frames, {} redraws, {} picks, cursor {:?} on {:?}, {} px covered",
        summary.frames,
        summary.redraws,
        summary.picks,
        summary.cursor,
        summary.cursor_ground,
        summary.covered
    );
    Ok(())
}
