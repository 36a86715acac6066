//! 通用常量.

/// 网格遍历相关的数值门限.
///
/// 这些值直接决定了遍历在体素边界上是否会死循环或重复计数, 修改前应有回归基线.
pub mod traverse {
    /// 寻找下一个体素边界时的步进量 (单位: 体素).
    pub const EDGE_EPSILON: f64 = 1.0;

    /// 剩余线段长度低于 `-EXHAUST_TOLERANCE` 时视为该线段已走完.
    pub const EXHAUST_TOLERANCE: f64 = 1e-8;

    /// 坐标绝对值不超过该值时被吸附为 `0.0`.
    pub const SNAP_TOLERANCE: f64 = 1e-16;
}

/// npz tractogram 归档中的数组名.
pub mod npz {
    /// 所有点坐标, `f64`, 形状 `[N, 3]`.
    pub const POSITIONS: &str = "positions";

    /// 每条 streamline 的起始行, `u64`, 形状 `[M]`.
    pub const OFFSETS: &str = "offsets";

    /// 体素网格尺寸, `i64`, 形状 `[3]`.
    pub const DIMENSIONS: &str = "dimensions";
}

/// 数据集在 `{用户主目录}/dataset` 下的子目录名.
pub const DATASET_SUBDIR: &str = "tracto";
