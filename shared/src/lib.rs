pub mod hotspots;
pub mod navigation;
pub mod protocol;

pub use hotspots::*;
pub use protocol::*;
