//! 消融实验依赖的通用组件.

use tract_berry::VolumeDims;

pub mod loader;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// 简单分隔线.
#[inline]
pub fn sep_to<W: std::io::Write>(mut w: W) -> std::io::Result<()> {
    writeln!(&mut w, "{SEP}")
}

/// 获得可并行核心数.
pub fn cpus() -> usize {
    std::thread::available_parallelism().map_or_else(|_| num_cpus::get(), usize::from)
}

/// 以 `X x Y x Z` 形式展示网格尺寸.
#[inline]
pub fn dims_to_display(dims: VolumeDims) -> String {
    format!("{} x {} x {}", dims.x(), dims.y(), dims.z())
}
