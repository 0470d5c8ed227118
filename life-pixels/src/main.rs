#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{LifeWorld, Random};
use log::info;
use pixels_app_support::{AppConfig, animate};

const GRID_WIDTH: u32 = 1280;
const GRID_HEIGHT: u32 = 720;
const INITIAL_ALIVE_PROBABILITY: f64 = 1.0 / 3.0;
const INITIAL_FRAME_DELAY_MILLIS: u64 = 100;

fn main() {
    env_logger::init();
    info!("seeding {GRID_WIDTH}x{GRID_HEIGHT} grid");

    let world = LifeWorld::new(
        GRID_WIDTH,
        GRID_HEIGHT,
        INITIAL_ALIVE_PROBABILITY,
        Random::new(),
    );
    animate(
        AppConfig {
            title: "Game of Life",
            out_width: GRID_WIDTH,
            out_height: GRID_HEIGHT,
            frame_delay_millis: INITIAL_FRAME_DELAY_MILLIS,
        },
        world,
    );
}
