//! 数据集操作.

use crate::{Tractogram, VolumeDims};
use ndarray_npy::ReadNpzError;
use nifti::{NiftiError, NiftiHeader};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

mod npz_tractogram;

pub use npz_tractogram::NpzTractogramSource;

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 加载 tractogram 或参考图像错误.
#[derive(Debug)]
pub enum LoadError {
    /// 底层 I/O 错误.
    Io(std::io::Error),

    /// 读取 npz 归档错误.
    ReadNpz(ReadNpzError),

    /// 读取 nifti 文件错误.
    Nifti(NiftiError),

    /// 文件可以读取, 但内容不符合约定.
    Malformed(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::ReadNpz(e) => write!(f, "npz error: {e}"),
            LoadError::Nifti(e) => write!(f, "nifti error: {e}"),
            LoadError::Malformed(s) => write!(f, "malformed input: {s}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::ReadNpz(e) => Some(e),
            LoadError::Nifti(e) => Some(e),
            LoadError::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ReadNpzError> for LoadError {
    #[inline]
    fn from(e: ReadNpzError) -> Self {
        LoadError::ReadNpz(e)
    }
}

impl From<NiftiError> for LoadError {
    #[inline]
    fn from(e: NiftiError) -> Self {
        LoadError::Nifti(e)
    }
}

/// tractogram 的来源. 给定路径, 产出处于体素空间的 [`Tractogram`].
pub trait TractogramSource {
    /// 从 `path` 加载 tractogram.
    fn load(&self, path: &Path) -> Result<Tractogram, LoadError>;
}

/// 读取 nifti 参考图像 `path` 的 header, 返回其网格尺寸.
///
/// 适用于 tractogram 本身不携带网格尺寸的情形.
pub fn reference_dims<P: AsRef<Path>>(path: P) -> Result<VolumeDims, LoadError> {
    let header = NiftiHeader::from_file(path)?;
    VolumeDims::from_header(&header)
        .ok_or_else(|| LoadError::Malformed(format!("invalid nifti dim {:?}", header.dim)))
}
