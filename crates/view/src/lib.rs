pub mod camera;
pub mod clip;
pub mod footprint;
pub mod frustum;

pub use camera::*;
pub use clip::*;
pub use footprint::*;
pub use frustum::*;
