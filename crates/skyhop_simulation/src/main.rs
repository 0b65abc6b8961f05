//! Headless симуляция Skyhop
//!
//! Demo уровень + bot вместо игрока. Конфиг (RON): первый аргумент, опционально.
//!
//! ```text
//! skyhop_headless [config.ron] [ticks] [seed]
//! ```

use anyhow::Context;
use bevy::prelude::*;
use skyhop_simulation::{
    create_headless_app, log_info, setup_demo_level, GameConfig, HeadlessPhysicsPlugin,
    Scoreboard, SkyhopPlugin,
};

const DEFAULT_TICKS: u32 = 3600;
const DEFAULT_SEED: u64 = 42;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {}", path))?,
        None => GameConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid tick count '{}'", raw))?,
        None => DEFAULT_TICKS,
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid seed '{}'", raw))?,
        None => DEFAULT_SEED,
    };

    println!("Starting Skyhop headless simulation (seed: {}, ticks: {})", seed, ticks);

    let mut app = create_headless_app(seed);
    app.add_plugins(SkyhopPlugin::from_config(config)?)
        .add_plugins(HeadlessPhysicsPlugin)
        .add_systems(Startup, setup_demo_level);

    for tick in 0..ticks {
        app.update();

        if tick % 600 == 0 {
            let entity_count = app.world().entities().len();
            let score = app.world().resource::<Scoreboard>().score();
            log_info(&format!("Tick {}: {} entities, score {}", tick, entity_count, score));
        }
    }

    println!("{}", app.world().resource::<Scoreboard>().text());
    Ok(())
}
