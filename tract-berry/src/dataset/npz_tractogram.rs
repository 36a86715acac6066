//! npz 格式 tractogram 加载器.

use super::{LoadError, TractogramSource};
use crate::consts::npz::{DIMENSIONS, OFFSETS, POSITIONS};
use crate::{Point3d, Tractogram, VolumeDims};
use ndarray::{Array, Dimension, Ix1, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, ReadableElement};
use num::ToPrimitive;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// 从 npz 归档读取 tractogram.
///
/// 归档中必须包含以下数组:
///
/// 1. `positions`: `f64`, 形状 `[N, 3]`, 所有点的体素空间坐标;
/// 2. `offsets`: `u64`, 形状 `[M]`, 每条 streamline 在 `positions` 中的起始行;
/// 3. `dimensions`: `i64`, 形状 `[3]`, 网格尺寸, 各分量为正.
#[derive(Debug, Default, Clone, Copy)]
pub struct NpzTractogramSource;

impl NpzTractogramSource {
    /// 初始化.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

/// 在归档中按名字查找数组. 兼容带或不带 `.npy` 后缀的条目名.
fn read_entry<A: ReadableElement, D: Dimension>(
    npz: &mut NpzReader<File>,
    name: &str,
) -> Result<Array<A, D>, LoadError> {
    let entry = find_entry(npz, name)?;
    Ok(npz.by_name::<OwnedRepr<A>, D>(&entry)?)
}

fn find_entry(npz: &mut NpzReader<File>, name: &str) -> Result<String, LoadError> {
    let suffixed = format!("{name}.npy");
    npz.names()?
        .into_iter()
        .find(|n| n == name || *n == suffixed)
        .ok_or_else(|| LoadError::Malformed(format!("missing array `{name}`")))
}

fn to_usize_vec<T: ToPrimitive + Copy>(what: &str, v: &[T]) -> Result<Vec<usize>, LoadError> {
    v.iter()
        .map(|x| x.to_usize())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| LoadError::Malformed(format!("negative or oversized `{what}`")))
}

impl TractogramSource for NpzTractogramSource {
    fn load(&self, path: &Path) -> Result<Tractogram, LoadError> {
        let file = OpenOptions::new().read(true).open(path)?;
        let mut npz = NpzReader::new(file)?;

        let positions = read_entry::<f64, Ix2>(&mut npz, POSITIONS)?;
        if positions.ncols() != 3 {
            return Err(LoadError::Malformed(format!(
                "`{POSITIONS}` must have 3 columns, got {}",
                positions.ncols()
            )));
        }
        let points: Vec<Point3d> = positions
            .rows()
            .into_iter()
            .map(|r| [r[0], r[1], r[2]])
            .collect();

        let offsets = read_entry::<u64, Ix1>(&mut npz, OFFSETS)?;
        let offsets = to_usize_vec(OFFSETS, &offsets.to_vec())?;

        let dims = read_entry::<i64, Ix1>(&mut npz, DIMENSIONS)?;
        let dims = to_usize_vec(DIMENSIONS, &dims.to_vec())?;
        let [x, y, z] = dims[..] else {
            return Err(LoadError::Malformed(format!(
                "`{DIMENSIONS}` must have 3 elements, got {}",
                dims.len()
            )));
        };
        let dims = VolumeDims::new(x, y, z)
            .ok_or_else(|| LoadError::Malformed(format!("empty or oversized grid {dims:?}")))?;

        let t = Tractogram::from_flat(&points, &offsets, dims).ok_or_else(|| {
            LoadError::Malformed(format!(
                "`{OFFSETS}` must start at 0, be non-decreasing and in range"
            ))
        })?;
        log::info!(
            "loaded {} streamlines ({} points) from {}",
            t.len(),
            t.point_count(),
            path.display()
        );
        Ok(t)
    }
}
