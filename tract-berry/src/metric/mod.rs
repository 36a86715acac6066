//! bundle 之间的体素级重叠评分.
//!
//! 约定第一个参数为候选 (预测) bundle, 第二个参数为参考 (真值) bundle.
//! overlap 和 overreach 关于两者 **不对称**, 调用时务必注意顺序.

mod error;
mod report;
mod session;

use crate::density::rasterize;
use crate::{BinaryMap, OccupancyMap, Tractogram};
use itertools::{EitherOrBoth, Itertools};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::{CompareError, CompareResult, ScoreError};
pub use report::{describe_into, LogReporter, ScoreReporter, WriteReporter};
pub use session::{MetricSession, SessionError};

/// 二值体素集合之间的混淆计数.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confusion {
    /// 同时属于候选和参考的体素个数.
    pub true_pos: u64,

    /// 只属于候选的体素个数.
    pub false_pos: u64,

    /// 只属于参考的体素个数.
    pub false_neg: u64,
}

impl Confusion {
    /// 由两组 **升序且无重复** 的展平体素索引求混淆计数.
    pub fn from_sorted_indices(candidate: &[usize], reference: &[usize]) -> Self {
        debug_assert!(candidate.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(reference.windows(2).all(|w| w[0] < w[1]));

        let mut ans = Self::default();
        for item in candidate
            .iter()
            .merge_join_by(reference.iter(), |a, b| a.cmp(b))
        {
            match item {
                EitherOrBoth::Both(..) => ans.true_pos += 1,
                EitherOrBoth::Left(_) => ans.false_pos += 1,
                EitherOrBoth::Right(_) => ans.false_neg += 1,
            }
        }
        ans
    }

    /// 由混淆计数求三项评分.
    ///
    /// `true_pos` 为 0 时, dice 和 overlap 为 0, overreach 无定义 (`None`).
    pub fn scores(&self) -> ComparisonResult {
        let (tp, fp, fn_) = (
            self.true_pos as f64,
            self.false_pos as f64,
            self.false_neg as f64,
        );
        if self.true_pos == 0 {
            return ComparisonResult {
                dice: 0.0,
                overlap: 0.0,
                overreach: None,
            };
        }
        ComparisonResult {
            dice: 2.0 * tp / (2.0 * tp + fp + fn_),
            overlap: tp / (tp + fn_),
            overreach: Some(fp / (tp + fn_)),
        }
    }
}

/// 两个 bundle 的体素级评分.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonResult {
    /// `2TP / (2TP + FP + FN)`, 在 `[0, 1]` 内.
    pub dice: f64,

    /// 参考体素集合被候选覆盖的比例 `TP / (TP + FN)`, 在 `[0, 1]` 内.
    pub overlap: f64,

    /// 越界体素相对参考集合的比例 `FP / (TP + FN)`.
    ///
    /// 当 `TP` 为 0 时无定义, 此时为 `None`. 注意它与 `Some(0.0)` 含义不同.
    pub overreach: Option<f64>,
}

/// 比较两个二值图, 返回混淆计数.
///
/// 如果两者网格尺寸不一致, 则返回 `Err(CompareError::ShapeMismatch)`.
pub fn confusion(candidate: &BinaryMap, reference: &BinaryMap) -> CompareResult<Confusion> {
    if candidate.dims() != reference.dims() {
        return Err(CompareError::ShapeMismatch(
            candidate.dims(),
            reference.dims(),
        ));
    }
    Ok(Confusion::from_sorted_indices(
        &candidate.indices(),
        &reference.indices(),
    ))
}

/// 比较两个二值图, 返回评分.
#[inline]
pub fn compare_binary(
    candidate: &BinaryMap,
    reference: &BinaryMap,
) -> CompareResult<ComparisonResult> {
    confusion(candidate, reference).map(|c| c.scores())
}

/// 二值化两个密度图并比较, 返回评分.
///
/// 如果两者网格尺寸不一致, 则返回 `Err(CompareError::ShapeMismatch)`.
pub fn compare(
    candidate: &OccupancyMap,
    reference: &OccupancyMap,
) -> CompareResult<ComparisonResult> {
    if candidate.dims() != reference.dims() {
        return Err(CompareError::ShapeMismatch(
            candidate.dims(),
            reference.dims(),
        ));
    }
    compare_binary(&candidate.binarize(), &reference.binarize())
}

/// 分别栅格化预测 bundle `predicted` 与真值 bundle `reference`, 然后比较.
///
/// 网格尺寸不一致时在栅格化之前就返回错误.
pub fn bundle_scores(
    predicted: &Tractogram,
    reference: &Tractogram,
) -> Result<ComparisonResult, ScoreError> {
    if predicted.dims() != reference.dims() {
        return Err(CompareError::ShapeMismatch(predicted.dims(), reference.dims()).into());
    }
    for (name, t) in [("predicted", predicted), ("reference", reference)] {
        if t.is_empty() {
            log::warn!("{name} bundle has no streamlines");
        }
    }

    let a =
        rasterize(predicted.streamlines(), predicted.dims()).map_err(ScoreError::Predicted)?;
    let b =
        rasterize(reference.streamlines(), reference.dims()).map_err(ScoreError::Reference)?;
    Ok(compare(&a, &b)?)
}
