//! 体素密度图及其二值投影.

use crate::{Idx3d, VolumeDims};
use ndarray::{Array3, ArrayView3};
use ndarray_npy::WriteNpyError;
use std::ops::Index;
use std::path::Path;

/// 体素密度图: 每个体素上 **不同** streamline 的个数 (而非穿越次数).
///
/// 形状与 `VolumeDims` 一致, 按 `(x, y, z)` 访问.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    dims: VolumeDims,
    data: Array3<u32>,
}

impl Index<Idx3d> for OccupancyMap {
    type Output = u32;

    /// 当 `index` 越界时 panic.
    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl OccupancyMap {
    /// 全零密度图.
    pub fn zeros(dims: VolumeDims) -> Self {
        Self {
            dims,
            data: Array3::zeros(dims.shape()),
        }
    }

    /// 由行优先展平的计数构建. `counts` 的长度必须等于 `dims.size()`, 否则 panic.
    pub(crate) fn from_counts(dims: VolumeDims, counts: Vec<u32>) -> Self {
        assert_eq!(counts.len(), dims.size());
        // 长度已检查, 该操作不会生成 `Err`, 可直接 unwrap.
        let data = Array3::from_shape_vec(dims.shape(), counts).unwrap();
        Self { dims, data }
    }

    /// 网格尺寸.
    #[inline]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn view(&self) -> ArrayView3<'_, u32> {
        self.data.view()
    }

    /// 获取 `index` 处的计数. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, index: Idx3d) -> Option<u32> {
        self.data.get(index).copied()
    }

    /// 最大计数. 全零图返回 0.
    pub fn max(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// 被至少一条 streamline 经过的体素个数.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|c| **c > 0).count()
    }

    /// 所有体素计数之和.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|c| *c as u64).sum()
    }

    /// 二值化: 计数大于 0 的体素为 1, 其余为 0.
    pub fn binarize(&self) -> BinaryMap {
        BinaryMap {
            dims: self.dims,
            data: self.data.mapv(|c| u8::from(c > 0)),
        }
    }

    /// 直接获得内部数据的所有权.
    #[inline]
    pub fn into_raw(self) -> Array3<u32> {
        self.data
    }

    /// 以 `u32` npy 格式写入 `path`, 供可视化端使用.
    pub fn write_npy<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteNpyError> {
        ndarray_npy::write_npy(path, &self.data)
    }
}

/// 二值体素图, 元素只有 0 和 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMap {
    dims: VolumeDims,
    data: Array3<u8>,
}

impl BinaryMap {
    /// 由一组体素直接构建二值图. 如果存在越界体素, 则返回 `None`.
    pub fn from_voxels<I: IntoIterator<Item = Idx3d>>(
        dims: VolumeDims,
        voxels: I,
    ) -> Option<Self> {
        let mut data = Array3::<u8>::zeros(dims.shape());
        for pos in voxels {
            *data.get_mut(pos)? = 1;
        }
        Some(Self { dims, data })
    }

    /// 网格尺寸.
    #[inline]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// `index` 处是否为 1. 越界时返回 `false`.
    #[inline]
    pub fn contains(&self, index: Idx3d) -> bool {
        self.data.get(index).is_some_and(|v| *v > 0)
    }

    /// 值为 1 的体素个数.
    pub fn sum(&self) -> usize {
        self.data.iter().filter(|v| **v > 0).count()
    }

    /// 收集所有值为 1 的体素的行优先展平索引, 结果升序.
    pub fn indices(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, v)| (*v > 0).then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryMap, OccupancyMap};
    use crate::VolumeDims;

    fn dims(x: usize, y: usize, z: usize) -> VolumeDims {
        VolumeDims::new(x, y, z).unwrap()
    }

    #[test]
    fn test_occupancy_statistics() {
        let d = dims(2, 2, 2);
        let mut counts = vec![0u32; 8];
        counts[d.flatten((0, 0, 1))] = 3;
        counts[d.flatten((1, 1, 0))] = 1;
        let map = OccupancyMap::from_counts(d, counts);

        assert_eq!(map[(0, 0, 1)], 3);
        assert_eq!(map.get((1, 1, 0)), Some(1));
        assert_eq!(map.get((2, 0, 0)), None);
        assert_eq!(map.max(), 3);
        assert_eq!(map.count_nonzero(), 2);
        assert_eq!(map.total(), 4);

        let bin = map.binarize();
        assert_eq!(bin.sum(), 2);
        assert!(bin.contains((0, 0, 1)));
        assert!(!bin.contains((0, 0, 0)));
        assert_eq!(bin.indices(), vec![1, 6]);
    }

    #[test]
    fn test_binary_from_voxels() {
        let d = dims(3, 1, 1);
        let bin = BinaryMap::from_voxels(d, [(0, 0, 0), (2, 0, 0), (0, 0, 0)]).unwrap();
        assert_eq!(bin.sum(), 2);
        assert_eq!(bin.indices(), vec![0, 2]);
        assert!(BinaryMap::from_voxels(d, [(3, 0, 0)]).is_none());
    }

    #[test]
    fn test_zeros() {
        let map = OccupancyMap::zeros(dims(4, 5, 6));
        assert_eq!(map.max(), 0);
        assert_eq!(map.count_nonzero(), 0);
        assert!(map.binarize().indices().is_empty());
    }

    #[test]
    fn test_write_npy() {
        let d = dims(2, 3, 4);
        let counts = (0..24).collect();
        let map = OccupancyMap::from_counts(d, counts);

        let mut path = std::env::temp_dir();
        path.push(format!("tract-berry-occupancy-{}.npy", std::process::id()));
        map.write_npy(&path).unwrap();

        let back: ndarray::Array3<u32> = ndarray_npy::read_npy(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, map.into_raw());
    }
}
