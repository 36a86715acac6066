//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx3d, Point3d, Streamline};

pub use crate::data::{BinaryMap, GridCoord, OccupancyMap, Tolerance, Tractogram, VolumeDims};

pub use crate::density::{closest_edge, rasterize, rasterize_with, TraverseError};

#[cfg(feature = "rayon")]
pub use crate::density::{par_rasterize, par_rasterize_with};

pub use crate::metric::{
    bundle_scores, compare, ComparisonResult, Confusion, LogReporter, MetricSession,
    ScoreReporter, WriteReporter,
};

pub use crate::dataset::home_dataset_dir_with;
pub use crate::dataset::{self, NpzTractogramSource, TractogramSource};
