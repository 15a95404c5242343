//! Headless Block World
//!
//! Run with: `cargo run --bin block_world -- [options]`
//!
//! Loads the block catalog and a saved world, optionally stacks new items on
//! top of the tallest column, runs the simulation for a number of frames and
//! saves the result.
//!
//! Options:
//! - `--data DIR`: directory holding the catalog files (default `data`)
//! - `--config FILE`: engine config (default `DIR/engine_config.json` if present)
//! - `--save FILE`: saved world to load and write (default `DIR/world.json`)
//! - `--frames N`: frames to simulate at 60 fps (default 600)
//! - `--stack N`: items to stack before simulating (default 0)
//! - `--type ID`: block type used for stacking (default: the config's default type)
//!
//! Set `RUST_LOG=debug` for per-placement and per-save output.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use glam::DVec3;
use voxel_builder_engine::config::{BlockCatalog, BlockTypeId, EngineConfig};
use voxel_builder_engine::persistence::{JsonFileSink, SavedWorld};
use voxel_builder_engine::world::BlockWorld;
use voxel_builder_engine::{EngineError, EngineResult};

// ============================================================================
// ARGUMENTS
// ============================================================================

const FRAME_TIME: Duration = Duration::from_micros(16_667);

struct Options {
    data_dir: PathBuf,
    config: Option<PathBuf>,
    save: Option<PathBuf>,
    frames: u32,
    stack: u32,
    block_type: Option<BlockTypeId>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Self {
            data_dir: PathBuf::from("data"),
            config: None,
            save: None,
            frames: 600,
            stack: 0,
            block_type: None,
        };

        while let Some(flag) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--data" => options.data_dir = PathBuf::from(value()?),
                "--config" => options.config = Some(PathBuf::from(value()?)),
                "--save" => options.save = Some(PathBuf::from(value()?)),
                "--frames" => options.frames = parse_number(&flag, &value()?)?,
                "--stack" => options.stack = parse_number(&flag, &value()?)?,
                "--type" => options.block_type = Some(parse_number(&flag, &value()?)?),
                other => return Err(format!("unknown option {other}")),
            }
        }
        Ok(options)
    }

    fn save_path(&self) -> PathBuf {
        self.save
            .clone()
            .unwrap_or_else(|| self.data_dir.join("world.json"))
    }

    fn load_config(&self) -> EngineResult<EngineConfig> {
        let default_path = self.data_dir.join("engine_config.json");
        match &self.config {
            Some(path) => Ok(EngineConfig::load(path)?),
            None if default_path.exists() => Ok(EngineConfig::load(default_path)?),
            None => Ok(EngineConfig::default()),
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, text: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("{flag} expects a number, got {text:?}"))
}

// ============================================================================
// SESSION
// ============================================================================

fn run(options: &Options) -> EngineResult<()> {
    let config = options.load_config()?;
    let blocks = BlockCatalog::load(
        options.data_dir.join("item_types_config.json"),
        options.data_dir.join("materials_config.json"),
    )?;

    let save_path = options.save_path();
    let saved = SavedWorld::load(&save_path)?.unwrap_or_default();
    let block_type = options.block_type.unwrap_or(config.default_block_type);

    let mut world = BlockWorld::from_saved(config, blocks, &saved)?;
    world.set_persistence_sink(Box::new(JsonFileSink::new(&save_path)));
    log::info!("World ready with {} items", world.len());

    stack_items(&mut world, block_type, options.stack);
    simulate(&mut world, options.frames);

    world.flush_persistence();
    log::info!("Saved {} items to {}", world.len(), save_path.display());
    Ok(())
}

/// Drops `count` items onto the highest surface above the origin column.
fn stack_items(world: &mut BlockWorld, block_type: BlockTypeId, count: u32) {
    for _ in 0..count {
        let top = world
            .items()
            .map(|item| item.position().y)
            .fold(f64::NEG_INFINITY, f64::max);
        let origin = DVec3::new(0.2, top + 5.0, 0.1);

        let Some(hit) = world.pick(origin, DVec3::NEG_Y, 100.0) else {
            log::warn!("Nothing below {origin:?} to stack on");
            return;
        };
        match world.place(block_type, &hit.target) {
            Ok(id) => log::info!("Placed item {} on item {}", id, hit.target.item),
            Err(err) => {
                log::warn!("Stacking stopped: {err}");
                return;
            }
        }
    }
}

fn simulate(world: &mut BlockWorld, frames: u32) {
    let start = Instant::now();
    let mut ticks = 0;
    let mut moved = 0;
    let mut removed = 0;

    for frame in 0..frames {
        if world.tick(start + FRAME_TIME * frame) {
            ticks += 1;
        }
        let changes = world.drain_changes();
        moved += changes.moved.len();
        removed += changes.removed.len();
    }

    log::info!(
        "Simulated {} frames: {} ticks, {} moves, {} removals",
        frames,
        ticks,
        moved,
        removed
    );
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            log::error!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(EngineError::Config(err)) => {
            log::error!("Configuration error: {err}");
            ExitCode::FAILURE
        }
        Err(EngineError::Persistence(err)) => {
            log::error!("Saved world error: {err}");
            ExitCode::FAILURE
        }
    }
}
