pub mod fuzzy;
pub mod vec;

pub use fuzzy::*;
pub use vec::*;
