//! streamline 栅格化: 将一组 streamline 转换为体素密度图.
//!
//! 密度图中每个体素的值是经过该体素的 **不同** streamline 的条数.
//! 同一条 streamline 多次进入同一体素 (例如回环) 只计一次.

mod edge;
mod error;
mod walk;

use crate::{OccupancyMap, Point3d, Tolerance, VolumeDims};
use walk::Walker;

pub use edge::closest_edge;
pub use error::{TraverseError, TraverseResult};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
    }
}

/// 单次栅格化期间使用的去重标记.
///
/// `touched[v]` 保存最近一次使体素 `v` 计数加一的 streamline 的 `下标 + 1`.
struct Tagger {
    touched: Vec<usize>,
    counts: Vec<u32>,
}

impl Tagger {
    #[inline]
    fn new(dims: VolumeDims) -> Self {
        Self {
            touched: vec![0; dims.size()],
            counts: vec![0; dims.size()],
        }
    }

    /// 以标记 `tag` 访问体素 `voxel`. 同一标记在同一体素上只计一次.
    #[inline]
    fn touch(&mut self, voxel: usize, tag: usize) {
        if self.touched[voxel] != tag {
            self.touched[voxel] = tag;
            self.counts[voxel] += 1;
        }
    }

    #[inline]
    fn finish(self, dims: VolumeDims) -> OccupancyMap {
        OccupancyMap::from_counts(dims, self.counts)
    }
}

/// 使用标准遍历门限栅格化 `streamlines`. 见 `rasterize_with`.
#[inline]
pub fn rasterize<S: AsRef<[Point3d]>>(
    streamlines: &[S],
    dims: VolumeDims,
) -> TraverseResult<OccupancyMap> {
    rasterize_with(streamlines, dims, Tolerance::standard())
}

/// 将体素空间中的 `streamlines` 栅格化到 `dims` 网格, 得到 distinct-track 密度图.
///
/// 少于 2 个点的 streamline 和长度为 0 的线段不贡献任何计数.
///
/// # 返回值
///
/// 如果任意一条 streamline 经过网格以外的体素, 则返回
/// `Err(TraverseError::VoxelOutOfBounds)`, 其中包含第一条出错的 streamline 下标.
pub fn rasterize_with<S: AsRef<[Point3d]>>(
    streamlines: &[S],
    dims: VolumeDims,
    tolerance: Tolerance,
) -> TraverseResult<OccupancyMap> {
    let walker = Walker::new(dims, tolerance);
    let mut tagger = Tagger::new(dims);

    for (index, s) in streamlines.iter().enumerate() {
        walker.walk(index, s.as_ref(), |voxel| tagger.touch(voxel, index + 1))?;
    }

    let map = tagger.finish(dims);
    log::debug!(
        "rasterized {} streamlines into {} voxels (max count {})",
        streamlines.len(),
        map.count_nonzero(),
        map.max()
    );
    Ok(map)
}

/// 使用标准遍历门限并行栅格化 `streamlines`. 见 `par_rasterize_with`.
#[cfg(feature = "rayon")]
#[inline]
pub fn par_rasterize<S: AsRef<[Point3d]> + Sync>(
    streamlines: &[S],
    dims: VolumeDims,
) -> TraverseResult<OccupancyMap> {
    par_rasterize_with(streamlines, dims, Tolerance::standard())
}

/// 借助 `rayon`, 以 streamline 为单位并行地执行 `rasterize_with`.
///
/// 每条 streamline 先独立求出去重后的体素集合, 之后再统一累加,
/// 因此结果与 `rasterize_with` 逐位一致. 出错时同样返回下标最小的出错 streamline.
#[cfg(feature = "rayon")]
pub fn par_rasterize_with<S: AsRef<[Point3d]> + Sync>(
    streamlines: &[S],
    dims: VolumeDims,
    tolerance: Tolerance,
) -> TraverseResult<OccupancyMap> {
    let walker = Walker::new(dims, tolerance);

    let visited: Vec<TraverseResult<Vec<usize>>> = streamlines
        .par_iter()
        .enumerate()
        .map(|(index, s)| -> TraverseResult<Vec<usize>> {
            let mut voxels = vec![];
            walker.walk(index, s.as_ref(), |voxel| voxels.push(voxel))?;
            voxels.sort_unstable();
            voxels.dedup();
            Ok(voxels)
        })
        .collect();

    let mut counts = vec![0u32; dims.size()];
    for voxels in visited {
        for v in voxels? {
            counts[v] += 1;
        }
    }

    let map = OccupancyMap::from_counts(dims, counts);
    log::debug!(
        "rasterized {} streamlines in parallel into {} voxels (max count {})",
        streamlines.len(),
        map.count_nonzero(),
        map.max()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::{rasterize, rasterize_with, TraverseError};
    use crate::{Point3d, Streamline, Tolerance, VolumeDims};

    fn dims(x: usize, y: usize, z: usize) -> VolumeDims {
        VolumeDims::new(x, y, z).unwrap()
    }

    /// 体素 `(x, y, z)` 的中心.
    fn center((x, y, z): (usize, usize, usize)) -> Point3d {
        [x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5]
    }

    /// 在 `[0, n)^3` 网格内按固定步长生成的一组折线, 覆盖各种方向与边界情况.
    fn lattice_streamlines(n: usize) -> Vec<Streamline> {
        let coords: Vec<f64> = (0..=(4 * n - 1)).map(|i| i as f64 * 0.25).collect();
        let pick = |k: usize| coords[(k * 7 + 3) % coords.len()];
        (0..60)
            .map(|s| {
                (0..(s % 5 + 2))
                    .map(|j| {
                        let k = s * 11 + j * 5;
                        [pick(k), pick(k + 1), pick(k + 2)]
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_two_point_streamline() {
        let d = dims(3, 3, 3);
        let map = rasterize(&[vec![center((0, 0, 0)), center((1, 0, 0))]], d).unwrap();
        assert_eq!(map.count_nonzero(), 2);
        assert_eq!(map[(0, 0, 0)], 1);
        assert_eq!(map[(1, 0, 0)], 1);
        assert_eq!(map.total(), 2);
    }

    #[test]
    fn test_distinct_tracks() {
        let d = dims(4, 2, 2);
        let line = vec![center((0, 0, 0)), center((3, 0, 0))];
        let map = rasterize(&[line.clone(), line.clone(), line], d).unwrap();
        for x in 0..4 {
            assert_eq!(map[(x, 0, 0)], 3);
        }
        assert_eq!(map.count_nonzero(), 4);
    }

    #[test]
    fn test_loop_counts_once() {
        // 来回穿越同一组体素的回环.
        let d = dims(3, 3, 1);
        let looped = vec![
            center((0, 0, 0)),
            center((2, 0, 0)),
            center((2, 2, 0)),
            center((0, 2, 0)),
            center((0, 0, 0)),
            center((2, 0, 0)),
        ];
        let map = rasterize(&[looped], d).unwrap();
        assert_eq!(map.max(), 1);
        assert_eq!(map.count_nonzero(), 8);
        assert_eq!(map[(1, 1, 0)], 0);
    }

    #[test]
    fn test_empty_and_degenerate() {
        let d = dims(2, 2, 2);
        let none: [Streamline; 0] = [];
        assert_eq!(rasterize(&none, d).unwrap().count_nonzero(), 0);

        let map = rasterize(&[vec![], vec![center((1, 1, 1))]], d).unwrap();
        assert_eq!(map.count_nonzero(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let d = dims(2, 2, 2);
        let ok = vec![center((0, 0, 0)), center((1, 1, 1))];
        let bad = vec![center((0, 0, 0)), [2.5, 0.5, 0.5]];
        let err = rasterize(&[ok, bad], d).unwrap_err();
        assert!(matches!(
            err,
            TraverseError::VoxelOutOfBounds { streamline: 1, .. }
        ));
    }

    #[test]
    fn test_invariants_on_lattice() {
        let d = dims(4, 4, 4);
        let streamlines = lattice_streamlines(4);
        let map = rasterize(&streamlines, d).unwrap();

        // 计数不超过 streamline 条数.
        assert!(map.max() as usize <= streamlines.len());

        // 二值图之和等于被经过的不同体素个数.
        let mut seen = std::collections::BTreeSet::new();
        for s in streamlines.iter() {
            let single = rasterize(&[s], d).unwrap();
            assert!(single.max() <= 1);
            seen.extend(single.binarize().indices());
        }
        assert_eq!(map.binarize().sum(), seen.len());

        // 计数等于每条 streamline 单独栅格化结果之和.
        let total: u64 = streamlines
            .iter()
            .map(|s| rasterize(&[s], d).unwrap().total())
            .sum();
        assert_eq!(map.total(), total);
    }

    #[test]
    fn test_deterministic() {
        let d = dims(4, 4, 4);
        let streamlines = lattice_streamlines(4);
        let a = rasterize(&streamlines, d).unwrap();
        let b = rasterize(&streamlines, d).unwrap();
        assert_eq!(a, b);

        let c = rasterize_with(&streamlines, d, Tolerance::new(1e-8, 1e-16).unwrap()).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_order_independent() {
        let d = dims(4, 4, 4);
        let mut streamlines = lattice_streamlines(4);
        let a = rasterize(&streamlines, d).unwrap();
        streamlines.reverse();
        let b = rasterize(&streamlines, d).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_sequential() {
        use super::par_rasterize;

        let d = dims(4, 4, 4);
        let streamlines = lattice_streamlines(4);
        assert_eq!(
            rasterize(&streamlines, d).unwrap(),
            par_rasterize(&streamlines, d).unwrap()
        );

        let bad = vec![
            vec![center((0, 0, 0)), center((1, 0, 0))],
            vec![center((0, 0, 0)), [0.5, 4.5, 0.5]],
            vec![center((0, 0, 0)), [0.5, 0.5, -1.5]],
        ];
        assert_eq!(
            rasterize(&bad, d).unwrap_err(),
            par_rasterize(&bad, d).unwrap_err()
        );
    }
}
