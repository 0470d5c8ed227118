#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod raster;
mod viewport;

pub use raster::Rasterizer;
pub use viewport::{MIN_FRAME_DELAY_MILLIS, ViewCommand, ViewController, Viewport};
