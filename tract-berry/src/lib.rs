#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 将纤维束追踪 (tractography) 得到的 streamline 集合栅格化为体素密度图,
//! 并在两个 bundle 之间计算 Dice / overlap / overreach 评分.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 输入的 streamline 必须已经处于体素空间, 且以体素角点为原点
//!   (即体素 `i` 在每个轴上覆盖 `[i, i + 1)`). 空间变换不由本 crate 负责.
//! 2. 越界体素属于数据错误, 会以 `Err` 返回, 而不会被截断.
//!
//! # 开发计划
//!
//! ### 体素网格与最近边界定位 ✅
//!
//! 实现位于 `tract-berry/src/data/grid.rs` 和 `tract-berry/src/density/edge.rs`.
//!
//! ### streamline 栅格化 (distinct-track 密度图) ✅
//!
//! Siddon 风格的网格遍历, 但统计的是 "经过该体素的不同 streamline 个数",
//! 而不是体素内路径长度.
//!
//! 实现位于 `tract-berry/src/density`.
//!
//! ### 多线程栅格化 ✅
//!
//! 以 streamline 为单位并行, 之后统一归约. 结果与单线程版本逐位一致.
//!
//! ### bundle 重叠评分 ✅
//!
//! 1. 二值化两个密度图; ✅
//! 2. 按展平索引求交集/差集, 获得 TP/FP/FN; ✅
//! 3. TP 为 0 时 overreach 无定义, 以 `None` 表示. ✅
//!
//! 实现位于 `tract-berry/src/metric`.
//!
//! ### 数据适配 ✅
//!
//! npz 格式的 tractogram 读取, nifti 参考图像的网格尺寸, 密度图导出为 npy.
//!
//! 实现位于 `tract-berry/src/dataset`.

/// 三维体素索引, 以 `(x, y, z)` 顺序存储.
pub type Idx3d = (usize, usize, usize);

/// 体素空间中的浮点坐标, 以 `[x, y, z]` 顺序存储.
pub type Point3d = [f64; 3];

/// 一条 streamline: 有序的体素空间坐标点.
pub type Streamline = Vec<Point3d>;

/// 基础数据结构.
mod data;

pub use data::{BinaryMap, GridCoord, OccupancyMap, Tolerance, Tractogram, VolumeDims};

pub mod consts;

pub mod density;

pub mod metric;

pub mod dataset;
pub mod prelude;
