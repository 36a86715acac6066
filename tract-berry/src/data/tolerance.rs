use crate::consts::traverse::{EXHAUST_TOLERANCE, SNAP_TOLERANCE};

/// 网格遍历的数值门限, 包括线段耗尽门限和坐标吸附门限.
///
/// 该对象是只读的. 若要修改参数, 你应该创建新的实例.
/// 边界步进量不在此列, 它恒为 1 个体素.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance {
    exhaust: f64,
    snap: f64,
}

impl Tolerance {
    /// 构建遍历门限.
    ///
    /// `exhaust` 和 `snap` 都必须在 `[0, 1e-3]` 内, 否则返回 `None`.
    pub fn new(exhaust: f64, snap: f64) -> Option<Tolerance> {
        const SMALL: std::ops::RangeInclusive<f64> = 0.0..=1e-3;
        if SMALL.contains(&exhaust) && SMALL.contains(&snap) {
            Some(Self { exhaust, snap })
        } else {
            None
        }
    }

    /// 标准门限: 耗尽门限 1e-8, 吸附门限 1e-16.
    #[inline]
    pub const fn standard() -> Tolerance {
        Self {
            exhaust: EXHAUST_TOLERANCE,
            snap: SNAP_TOLERANCE,
        }
    }

    /// 线段耗尽门限.
    #[inline]
    pub fn exhaust(&self) -> f64 {
        self.exhaust
    }

    /// 坐标吸附门限.
    #[inline]
    pub fn snap(&self) -> f64 {
        self.snap
    }

    /// 剩余长度 `remaining` 是否代表线段已经走完.
    #[inline]
    pub fn is_exhausted(&self, remaining: f64) -> bool {
        remaining < 0.0 && remaining.abs() >= self.exhaust
    }

    /// 将绝对值不超过吸附门限的坐标分量置为 `0.0`.
    #[inline]
    pub fn snap_to_zero(&self, value: f64) -> f64 {
        if value.abs() <= self.snap {
            0.0
        } else {
            value
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::Tolerance;

    fn is_valid_init(exhaust: f64, snap: f64) -> bool {
        Tolerance::new(exhaust, snap).is_some()
    }

    #[test]
    fn test_tolerance_invalid_input() {
        assert!(!is_valid_init(-1e-8, 1e-16));
        assert!(!is_valid_init(1e-8, 0.5));
        assert!(!is_valid_init(f64::NAN, 1e-16));
        assert!(!is_valid_init(f64::INFINITY, 0.0));
        assert!(is_valid_init(0.0, 0.0));
        assert!(is_valid_init(1e-3, 1e-3));
    }

    #[test]
    fn test_tolerance_standard() {
        let t = Tolerance::default();
        assert_eq!(t, Tolerance::new(1e-8, 1e-16).unwrap());

        assert!(!t.is_exhausted(0.0));
        assert!(!t.is_exhausted(0.5));
        // boundary
        assert!(!t.is_exhausted(-1e-9));
        assert!(t.is_exhausted(-1e-8));
        assert!(t.is_exhausted(-0.5));

        assert_eq!(t.snap_to_zero(1e-17), 0.0);
        assert_eq!(t.snap_to_zero(-1e-16), 0.0);
        assert_eq!(t.snap_to_zero(1e-15), 1e-15);
    }
}
