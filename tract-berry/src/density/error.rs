//! 栅格化运行时错误.

use crate::{Point3d, VolumeDims};
use std::fmt::{self, Display, Formatter};

/// 栅格化运行时错误.
#[derive(Debug, Clone, PartialEq)]
pub enum TraverseError {
    /// 第 `streamline` 条 streamline 经过了网格以外的体素.
    ///
    /// `voxel` 为向下取整后的体素坐标 (可能为负数、无穷或 NaN).
    VoxelOutOfBounds {
        /// streamline 下标.
        streamline: usize,
        /// 越界体素.
        voxel: Point3d,
        /// 声明的网格尺寸.
        dims: VolumeDims,
    },
}

impl Display for TraverseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TraverseError::VoxelOutOfBounds {
                streamline,
                voxel,
                dims,
            } => write!(
                f,
                "streamline {streamline} reaches voxel {voxel:?} outside grid {:?}",
                dims.shape()
            ),
        }
    }
}

impl std::error::Error for TraverseError {}

/// 栅格化运行时结果.
pub type TraverseResult<T> = Result<T, TraverseError>;
