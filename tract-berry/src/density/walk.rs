//! 单条 streamline 的体素网格遍历.

use super::edge::closest_edge;
use super::error::{TraverseError, TraverseResult};
use crate::consts::traverse::EDGE_EPSILON;
use crate::{GridCoord, Point3d, Tolerance, VolumeDims};
use std::array;

/// 三维向量的欧几里得范数.
#[inline]
fn norm(v: &Point3d) -> f64 {
    v.iter().map(|c| c * c).sum::<f64>().sqrt()
}

/// 点是否严格位于体素内部 (三个分量都不是整数).
#[inline]
fn strictly_inside(p: &Point3d) -> bool {
    p.iter().all(|c| c.floor() != *c)
}

/// 从 `cur` 出发沿 `dir` 到达 `edge` 中最近一个边界的参数距离.
///
/// 只统计 `dir` 分量非零的轴. `dir` 全零时返回 `f64::INFINITY`, 调用方应提前排除.
#[inline]
fn length_ratio(cur: &Point3d, edge: &Point3d, dir: &Point3d) -> f64 {
    (0..3)
        .filter(|a| dir[*a] != 0.0)
        .map(|a| ((edge[a] - cur[a]) / dir[a]).abs())
        .fold(f64::INFINITY, f64::min)
}

/// 体素网格遍历器. 不保存 streamline 之间的任何状态.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Walker {
    dims: VolumeDims,
    tolerance: Tolerance,
}

impl Walker {
    /// 初始化.
    #[inline]
    pub fn new(dims: VolumeDims, tolerance: Tolerance) -> Self {
        Self { dims, tolerance }
    }

    /// 遍历第 `streamline` 条 streamline 的所有点 `points`,
    /// 每进入一个体素就以其展平索引调用一次 `visit`.
    ///
    /// 同一个体素可能被访问多次, 去重由调用方负责.
    /// 少于 2 个点的 streamline 不访问任何体素; 长度为 0 的线段被跳过.
    /// 一旦经过网格以外的体素, 立即返回 `Err`.
    pub fn walk<F: FnMut(usize)>(
        &self,
        streamline: usize,
        points: &[Point3d],
        mut visit: F,
    ) -> TraverseResult<()> {
        if points.len() < 2 {
            return Ok(());
        }

        let (mut cur, mut next) = (points[0], points[0]);

        for wnd in points.windows(2) {
            let [p, q] = wnd else { unreachable!() };
            cur = *p;
            next = *q;

            let dir: Point3d = array::from_fn(|a| q[a] - p[a]);
            let dir_norm = norm(&dir);
            if dir_norm == 0.0 {
                continue;
            }
            let mut remaining = dir_norm;

            // 起点已在某个边界上时, 第一步为零长度, 只记录起点所在体素.
            let mut edge = if strictly_inside(&cur) {
                closest_edge(&cur, &dir, EDGE_EPSILON)
            } else {
                cur
            };

            loop {
                let ratio = length_ratio(&cur, &edge, &dir);

                remaining -= ratio * dir_norm;
                if self.tolerance.is_exhausted(remaining) {
                    break;
                }

                // 以刚走过的子线段中点确定体素, 避开边界上的歧义.
                let mid: Point3d = array::from_fn(|a| cur[a] + 0.5 * ratio * dir[a]);
                visit(self.locate(streamline, &mid)?);

                for a in 0..3 {
                    cur[a] = self.tolerance.snap_to_zero(cur[a] + ratio * dir[a]);
                }
                edge = closest_edge(&cur, &dir, EDGE_EPSILON);
            }
        }

        // 终点所在体素, 即使循环恰好停在边界上也要计入.
        let mid: Point3d = array::from_fn(|a| cur[a] + 0.5 * (next[a] - cur[a]));
        visit(self.locate(streamline, &mid)?);
        Ok(())
    }

    /// 获取包含 `point` 的体素的展平索引.
    #[inline]
    fn locate(&self, streamline: usize, point: &Point3d) -> TraverseResult<usize> {
        GridCoord::containing(point, self.dims)
            .map(|c| c.flat())
            .ok_or_else(|| TraverseError::VoxelOutOfBounds {
                streamline,
                voxel: point.map(f64::floor),
                dims: self.dims,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{length_ratio, strictly_inside, Walker};
    use crate::density::TraverseError;
    use crate::{Point3d, Tolerance, VolumeDims};

    fn walk_all(dims: VolumeDims, points: &[Point3d]) -> Vec<usize> {
        let mut v = vec![];
        Walker::new(dims, Tolerance::standard())
            .walk(0, points, |i| v.push(i))
            .unwrap();
        v
    }

    #[test]
    fn test_length_ratio() {
        let r = length_ratio(&[0.5, 0.5, 0.5], &[1.0, 1.0, 1.0], &[1.0, 0.25, 0.0]);
        assert_eq!(r, 0.5);
        let r = length_ratio(&[0.5, 0.5, 0.5], &[0.0, 1.0, 1.0], &[-2.0, 0.0, 0.0]);
        assert_eq!(r, 0.25);
        assert_eq!(
            length_ratio(&[0.5; 3], &[1.0; 3], &[0.0; 3]),
            f64::INFINITY
        );
    }

    #[test]
    fn test_strictly_inside() {
        assert!(strictly_inside(&[0.5, 0.5, 0.5]));
        assert!(!strictly_inside(&[1.0, 0.5, 0.5]));
        assert!(!strictly_inside(&[0.5, 0.5, 0.0]));
    }

    #[test]
    fn test_walk_along_x() {
        let dims = VolumeDims::new(4, 1, 1).unwrap();
        let v = walk_all(dims, &[[0.5, 0.5, 0.5], [3.5, 0.5, 0.5]]);
        assert_eq!(v, vec![0, 1, 2, 3]);

        // 反方向.
        let v = walk_all(dims, &[[3.5, 0.5, 0.5], [0.5, 0.5, 0.5]]);
        assert_eq!(v, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_walk_diagonal() {
        // 从 (0.5, 0.5) 到 (1.5, 1.25): 先穿过 x = 1, 再穿过 y = 1.
        let dims = VolumeDims::new(2, 2, 1).unwrap();
        let v = walk_all(dims, &[[0.5, 0.5, 0.5], [1.5, 1.25, 0.5]]);
        let expected: Vec<usize> = [(0, 0, 0), (1, 0, 0), (1, 1, 0)]
            .into_iter()
            .map(|p| dims.flatten(p))
            .collect();
        assert_eq!(v, expected);
    }

    #[test]
    fn test_walk_degenerate() {
        let dims = VolumeDims::new(2, 2, 2).unwrap();
        assert!(walk_all(dims, &[]).is_empty());
        assert!(walk_all(dims, &[[0.5, 0.5, 0.5]]).is_empty());

        // 全部线段长度为 0, 只计入终点.
        let v = walk_all(dims, &[[1.5, 0.5, 0.5], [1.5, 0.5, 0.5]]);
        assert_eq!(v, vec![dims.flatten((1, 0, 0))]);
    }

    /// 按体素统计 `walk_all` 的去重结果, 与单条 streamline 的密度图一致.
    fn occupied(dims: VolumeDims, points: &[Point3d]) -> Vec<u32> {
        let mut counts = vec![0; dims.size()];
        for v in walk_all(dims, points) {
            counts[v] = 1;
        }
        counts
    }

    #[test]
    fn test_walk_start_on_face() {
        // 起点恰在 x = 1 面上: 首步长度为 0, 只记录起点所在体素.
        let dims = VolumeDims::new(4, 1, 1).unwrap();
        let v = walk_all(dims, &[[1.0, 0.5, 0.5], [2.5, 0.5, 0.5]]);
        assert_eq!(v, vec![1, 1, 2]);
        assert_eq!(occupied(dims, &[[1.0, 0.5, 0.5], [2.5, 0.5, 0.5]]), [0, 1, 1, 0]);
    }

    #[test]
    fn test_walk_end_on_face() {
        // 中间有一段长度为 0 的线段, 终点恰在 x = 2 面上, 终点体素仍被计入.
        let dims = VolumeDims::new(4, 1, 1).unwrap();
        let points = [[0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [2.0, 0.5, 0.5]];
        assert_eq!(occupied(dims, &points), [1, 1, 1, 0]);

        // 零长度线段不影响结果.
        assert_eq!(
            occupied(dims, &points[1..]),
            occupied(dims, &points)
        );
    }

    #[test]
    fn test_walk_out_of_bounds() {
        let dims = VolumeDims::new(2, 2, 2).unwrap();
        let err = Walker::new(dims, Tolerance::standard())
            .walk(7, &[[0.5, 0.5, 0.5], [2.5, 0.5, 0.5]], |_| {})
            .unwrap_err();
        let TraverseError::VoxelOutOfBounds {
            streamline, voxel, ..
        } = err;
        assert_eq!(streamline, 7);
        assert_eq!(voxel, [2.0, 0.0, 0.0]);

        let err = Walker::new(dims, Tolerance::standard())
            .walk(0, &[[0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]], |_| {})
            .unwrap_err();
        assert!(matches!(err, TraverseError::VoxelOutOfBounds { voxel, .. } if voxel[0] == -1.0));
    }

    #[test]
    fn test_walk_non_finite() {
        let dims = VolumeDims::new(2, 2, 2).unwrap();
        let w = Walker::new(dims, Tolerance::standard());
        assert!(w.walk(0, &[[0.5, 0.5, 0.5], [f64::NAN, 0.5, 0.5]], |_| {}).is_err());
        assert!(w
            .walk(0, &[[0.5, 0.5, 0.5], [f64::INFINITY, 0.5, 0.5]], |_| {})
            .is_err());
    }
}
