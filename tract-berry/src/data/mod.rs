mod grid;
mod occupancy;
mod tolerance;
mod tractogram;

pub use grid::{GridCoord, VolumeDims};
pub use occupancy::{BinaryMap, OccupancyMap};
pub use tolerance::Tolerance;
pub use tractogram::Tractogram;
