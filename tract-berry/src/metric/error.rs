//! 评分运行时错误.

use crate::density::TraverseError;
use crate::VolumeDims;
use std::fmt::{self, Display, Formatter};

/// 比较两个体素图时的错误.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    /// 两个体素图的网格尺寸不一致. 依次为候选图和参考图的尺寸.
    ShapeMismatch(VolumeDims, VolumeDims),
}

impl Display for CompareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::ShapeMismatch(a, b) => write!(
                f,
                "candidate grid {:?} does not match reference grid {:?}",
                a.shape(),
                b.shape()
            ),
        }
    }
}

impl std::error::Error for CompareError {}

/// 从 tractogram 直接评分时的错误.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// 栅格化预测 bundle 失败.
    Predicted(TraverseError),

    /// 栅格化参考 (真值) bundle 失败.
    Reference(TraverseError),

    /// 两个 bundle 不可比较.
    Compare(CompareError),
}

impl From<CompareError> for ScoreError {
    #[inline]
    fn from(e: CompareError) -> Self {
        ScoreError::Compare(e)
    }
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Predicted(e) => write!(f, "predicted bundle: {e}"),
            ScoreError::Reference(e) => write!(f, "reference bundle: {e}"),
            ScoreError::Compare(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Predicted(e) | ScoreError::Reference(e) => Some(e),
            ScoreError::Compare(e) => Some(e),
        }
    }
}

/// 比较运行时结果.
pub type CompareResult<T> = Result<T, CompareError>;
