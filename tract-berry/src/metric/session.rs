//! 一次完整的 bundle 评分流程: 设置输入路径, 加载, 评分, 输出.

use super::{bundle_scores, ComparisonResult, ScoreError, ScoreReporter};
use crate::dataset::{LoadError, TractogramSource};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// 评分流程错误.
#[derive(Debug)]
pub enum SessionError {
    /// 路径不是已存在的普通文件.
    InvalidPath(PathBuf),

    /// 预测或真值路径尚未设置.
    MissingInput,

    /// 加载 tractogram 失败.
    Load(LoadError),

    /// 评分失败.
    Score(ScoreError),

    /// 输出评分结果失败.
    Report(std::io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidPath(p) => write!(f, "not a regular file: {}", p.display()),
            SessionError::MissingInput => {
                write!(f, "both predicted and ground truth paths are required")
            }
            SessionError::Load(e) => e.fmt(f),
            SessionError::Score(e) => e.fmt(f),
            SessionError::Report(e) => write!(f, "failed to report scores: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Load(e) => Some(e),
            SessionError::Score(e) => Some(e),
            SessionError::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadError> for SessionError {
    #[inline]
    fn from(e: LoadError) -> Self {
        SessionError::Load(e)
    }
}

impl From<ScoreError> for SessionError {
    #[inline]
    fn from(e: ScoreError) -> Self {
        SessionError::Score(e)
    }
}

/// 评分会话. 保存预测与真值 tractogram 的路径, 以及最近一次的评分.
#[derive(Debug, Clone, Default)]
pub struct MetricSession {
    predicted: Option<PathBuf>,
    ground_truth: Option<PathBuf>,
    last: Option<ComparisonResult>,
}

/// `path` 必须是已存在的普通文件.
fn checked_file(path: &Path) -> Result<PathBuf, SessionError> {
    if path.is_file() {
        Ok(path.to_owned())
    } else {
        Err(SessionError::InvalidPath(path.to_owned()))
    }
}

impl MetricSession {
    /// 初始化. 两个路径均未设置.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置预测 tractogram 路径.
    pub fn set_predicted_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SessionError> {
        let p = checked_file(path.as_ref())?;
        log::info!("predicted tractogram: {}", p.display());
        self.predicted = Some(p);
        Ok(())
    }

    /// 设置真值 tractogram 路径.
    pub fn set_ground_truth_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SessionError> {
        let p = checked_file(path.as_ref())?;
        log::info!("ground truth tractogram: {}", p.display());
        self.ground_truth = Some(p);
        Ok(())
    }

    /// 预测 tractogram 路径.
    #[inline]
    pub fn predicted_path(&self) -> Option<&Path> {
        self.predicted.as_deref()
    }

    /// 真值 tractogram 路径.
    #[inline]
    pub fn ground_truth_path(&self) -> Option<&Path> {
        self.ground_truth.as_deref()
    }

    /// 通过 `source` 加载两个 tractogram 并评分, 将结果交给 `reporter` 后返回.
    ///
    /// # 注意
    ///
    /// 任一步骤失败时, 上一次的评分保持不变.
    pub fn generate<S, R>(
        &mut self,
        source: &S,
        reporter: &mut R,
    ) -> Result<ComparisonResult, SessionError>
    where
        S: TractogramSource + ?Sized,
        R: ScoreReporter + ?Sized,
    {
        let (Some(pred), Some(truth)) = (&self.predicted, &self.ground_truth) else {
            return Err(SessionError::MissingInput);
        };

        let predicted = source.load(pred)?;
        let reference = source.load(truth)?;
        let result = bundle_scores(&predicted, &reference)?;

        reporter.report(&result).map_err(SessionError::Report)?;
        self.last = Some(result);
        Ok(result)
    }

    /// 最近一次评分. 尚未评分时为 `None`.
    #[inline]
    pub fn last(&self) -> Option<ComparisonResult> {
        self.last
    }

    /// 最近一次的 Dice 系数.
    #[inline]
    pub fn dice(&self) -> Option<f64> {
        self.last.map(|r| r.dice)
    }

    /// 最近一次的 overlap.
    #[inline]
    pub fn overlap(&self) -> Option<f64> {
        self.last.map(|r| r.overlap)
    }

    /// 最近一次的 overreach. 尚未评分, 或者 overreach 无定义时为 `None`.
    #[inline]
    pub fn overreach(&self) -> Option<f64> {
        self.last.and_then(|r| r.overreach)
    }
}
