//! 交给栅格化器的 streamline 集合.

use crate::{Point3d, Streamline, VolumeDims};

/// 一组处于同一体素网格中的 streamline (即一个 tractogram 或 bundle).
///
/// 坐标必须已经被变换到体素空间 (体素角点为原点).
#[derive(Debug, Clone, PartialEq)]
pub struct Tractogram {
    streamlines: Vec<Streamline>,
    dims: VolumeDims,
}

impl Tractogram {
    /// 初始化.
    #[inline]
    pub fn new(streamlines: Vec<Streamline>, dims: VolumeDims) -> Self {
        Self { streamlines, dims }
    }

    /// 不含任何 streamline 的 tractogram.
    #[inline]
    pub fn empty(dims: VolumeDims) -> Self {
        Self::new(vec![], dims)
    }

    /// 从 "所有点 + 每条 streamline 的起始下标" 的展平形式构建.
    ///
    /// `offsets` 必须单调不减, 且每个值都小于 `positions.len()`, 否则返回 `None`.
    /// 所有点都必须属于某条 streamline: `offsets` 非空时首项必须为 0,
    /// `offsets` 为空时 `positions` 也必须为空.
    /// 第 `i` 条 streamline 为 `positions[offsets[i]..offsets[i + 1]]`,
    /// 最后一条延伸到 `positions` 末尾.
    pub fn from_flat(positions: &[Point3d], offsets: &[usize], dims: VolumeDims) -> Option<Self> {
        let ordered = offsets.windows(2).all(|w| w[0] <= w[1]);
        let in_range = offsets.iter().all(|o| *o < positions.len());
        let covered = offsets.first().map_or(positions.is_empty(), |o| *o == 0);
        if !ordered || !in_range || !covered {
            return None;
        }

        let ends = offsets.iter().skip(1).copied().chain([positions.len()]);
        let streamlines = offsets
            .iter()
            .zip(ends)
            .map(|(&start, end)| positions[start..end].to_vec())
            .collect();
        Some(Self::new(streamlines, dims))
    }

    /// 网格尺寸.
    #[inline]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// 所有 streamline.
    #[inline]
    pub fn streamlines(&self) -> &[Streamline] {
        &self.streamlines
    }

    /// streamline 条数.
    #[inline]
    pub fn len(&self) -> usize {
        self.streamlines.len()
    }

    /// 是否不含任何 streamline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.streamlines.is_empty()
    }

    /// 所有 streamline 的点数之和.
    pub fn point_count(&self) -> usize {
        self.streamlines.iter().map(Vec::len).sum()
    }

    /// 追加一条 streamline.
    #[inline]
    pub fn push(&mut self, streamline: Streamline) {
        self.streamlines.push(streamline);
    }

    /// 直接获得内部数据的所有权.
    #[inline]
    pub fn into_raw(self) -> (Vec<Streamline>, VolumeDims) {
        (self.streamlines, self.dims)
    }
}
