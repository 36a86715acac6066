//! 最近体素边界定位.

use crate::Point3d;

/// 沿 `direction` 方向, 逐轴寻找 `point` 前方最近的体素边界.
///
/// 对每个轴: 方向分量非负时取 `floor(p + epsilon)`, 否则取 `ceil(p - epsilon)`.
/// 方向分量恰为 0 的轴按非负处理. `epsilon` 一般为 1.0,
/// 即总是寻找 **下一个** 整数边界, 而不是当前所在的边界.
#[inline]
pub fn closest_edge(point: &Point3d, direction: &Point3d, epsilon: f64) -> Point3d {
    std::array::from_fn(|a| {
        if direction[a] >= 0.0 {
            (point[a] + epsilon).floor()
        } else {
            (point[a] - epsilon).ceil()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::closest_edge;

    #[test]
    fn test_inside_voxel() {
        let p = [0.5, 1.25, 2.75];
        assert_eq!(closest_edge(&p, &[1.0, 1.0, 1.0], 1.0), [1.0, 2.0, 3.0]);
        assert_eq!(closest_edge(&p, &[-1.0, -1.0, -1.0], 1.0), [0.0, 1.0, 2.0]);
        assert_eq!(closest_edge(&p, &[1.0, -0.5, 0.0], 1.0), [1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_on_boundary() {
        // 已在边界上时, 前进到下一条边界.
        let p = [1.0, 2.0, 0.0];
        assert_eq!(closest_edge(&p, &[1.0, 1.0, 1.0], 1.0), [2.0, 3.0, 1.0]);
        assert_eq!(closest_edge(&p, &[-1.0, -1.0, -1.0], 1.0), [0.0, 1.0, -1.0]);
    }

    #[test]
    fn test_zero_direction() {
        // 0 方向偏向 floor.
        let p = [0.5, 0.5, 0.5];
        assert_eq!(closest_edge(&p, &[0.0, -0.0, 0.0], 1.0), [1.0, 1.0, 1.0]);
    }
}
