pub mod engine;
pub mod raster;
pub mod tile;

pub use engine::*;
pub use raster::*;
pub use tile::*;
