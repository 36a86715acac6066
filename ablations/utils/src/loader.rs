//! 对 `tract-berry::dataset` 的更一层封装. 提供更直接的 tractogram 路径与加载器.

use std::env;
use std::path::PathBuf;
use tract_berry::consts::DATASET_SUBDIR;
use tract_berry::dataset::{self, LoadError, NpzTractogramSource, TractogramSource};
use tract_berry::Tractogram;

/// 预测 tractogram 路径环境变量.
pub const PREDICTED_ENV: &str = "TRACT_PREDICTED";

/// 真值 tractogram 路径环境变量.
pub const GROUND_TRUTH_ENV: &str = "TRACT_GROUND_TRUTH";

/// 若环境变量 `key` 非空, 则返回其值; 否则返回 `$HOME/dataset/tracto/{file}`.
fn path_from_env_or_home(key: &str, file: &str) -> Option<PathBuf> {
    match env::var(key) {
        Ok(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => dataset::home_dataset_dir_with([DATASET_SUBDIR, file]),
    }
}

/// 获取预测 tractogram 路径.
///
/// 1. 若环境变量 `$TRACT_PREDICTED` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/tracto/predicted.npz`.
///
/// 无法确定用户主目录时返回 `None`.
#[inline]
pub fn predicted_from_env_or_home() -> Option<PathBuf> {
    path_from_env_or_home(PREDICTED_ENV, "predicted.npz")
}

/// 获取真值 tractogram 路径.
///
/// 1. 若环境变量 `$TRACT_GROUND_TRUTH` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/tracto/ground_truth.npz`.
///
/// 无法确定用户主目录时返回 `None`.
#[inline]
pub fn ground_truth_from_env_or_home() -> Option<PathBuf> {
    path_from_env_or_home(GROUND_TRUTH_ENV, "ground_truth.npz")
}

/// 以 npz 格式加载 `path` 处的 tractogram.
#[inline]
pub fn load_npz(path: &std::path::Path) -> Result<Tractogram, LoadError> {
    NpzTractogramSource::new().load(path)
}
