//! 体素网格尺寸与带边界信息的体素坐标.

use crate::{Idx3d, Point3d};
use nifti::NiftiHeader;
use num::ToPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 体素网格尺寸 `(X, Y, Z)`, 三个分量均为正整数.
///
/// 展平时按行优先 (C order) 处理, `x` 变化最慢, `z` 变化最快.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeDims {
    x: usize,
    y: usize,
    z: usize,
}

impl VolumeDims {
    /// 构建网格尺寸.
    ///
    /// 任一分量为 0, 或体素总数超出 `usize` 范围时返回 `None`.
    pub fn new(x: usize, y: usize, z: usize) -> Option<Self> {
        if x == 0 || y == 0 || z == 0 {
            return None;
        }
        x.checked_mul(y)?
            .checked_mul(z)
            .map(|_| Self { x, y, z })
    }

    /// 从 `(x, y, z)` 形状构建网格尺寸. 任一分量为 0 时返回 `None`.
    #[inline]
    pub fn from_shape((x, y, z): Idx3d) -> Option<Self> {
        Self::new(x, y, z)
    }

    /// 从 nifti header 的 `dim[1..=3]` 读取网格尺寸.
    ///
    /// 如果 header 的维度数小于 3, 或任一分量为 0, 则返回 `None`.
    pub fn from_header(header: &NiftiHeader) -> Option<Self> {
        let [ndim, x, y, z, ..] = header.dim;
        if ndim < 3 {
            return None;
        }
        Self::new(x as usize, y as usize, z as usize)
    }

    /// X 方向体素个数.
    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    /// Y 方向体素个数.
    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    /// Z 方向体素个数.
    #[inline]
    pub fn z(&self) -> usize {
        self.z
    }

    /// 获取 `(X, Y, Z)` 形状.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        (self.x, self.y, self.z)
    }

    /// 获取体素总数.
    #[inline]
    pub fn size(&self) -> usize {
        self.x * self.y * self.z
    }

    /// 检查索引是否合法.
    #[inline]
    pub fn check(&self, (x, y, z): &Idx3d) -> bool {
        *x < self.x && *y < self.y && *z < self.z
    }

    /// 行优先展平. 不检查越界.
    #[inline]
    pub fn flatten(&self, (x, y, z): Idx3d) -> usize {
        x * (self.y * self.z) + y * self.z + z
    }

    /// `self.flatten` 的逆操作. 不检查越界.
    #[inline]
    pub fn unflatten(&self, index: usize) -> Idx3d {
        let yz = self.y * self.z;
        (index / yz, (index % yz) / self.z, index % self.z)
    }
}

/// 已知所在网格的体素坐标. 构建成功即代表索引在网格范围内.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    index: Idx3d,
    dims: VolumeDims,
}

impl GridCoord {
    /// 以 `index` 在 `dims` 网格中构建体素坐标. 越界时返回 `None`.
    #[inline]
    pub fn new(index: Idx3d, dims: VolumeDims) -> Option<Self> {
        dims.check(&index).then_some(Self { index, dims })
    }

    /// 获取包含体素空间坐标 `point` 的体素 (即逐分量向下取整).
    ///
    /// 如果 `point` 落在网格之外, 或存在非有限分量, 则返回 `None`.
    pub fn containing(point: &Point3d, dims: VolumeDims) -> Option<Self> {
        let [x, y, z] = point.map(f64::floor);
        let index = (x.to_usize()?, y.to_usize()?, z.to_usize()?);
        Self::new(index, dims)
    }

    /// 三维索引.
    #[inline]
    pub fn index(&self) -> Idx3d {
        self.index
    }

    /// 所在网格.
    #[inline]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// 行优先展平后的线性索引, 一定小于 `self.dims().size()`.
    #[inline]
    pub fn flat(&self) -> usize {
        self.dims.flatten(self.index)
    }
}
