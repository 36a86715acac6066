//! 评分结果输出.

use super::ComparisonResult;
use std::io::{self, Write};

/// 评分结果的输出端.
pub trait ScoreReporter {
    /// 输出一次评分结果.
    fn report(&mut self, result: &ComparisonResult) -> io::Result<()>;
}

#[inline]
fn f64_to_display(f: Option<f64>) -> String {
    match f {
        Some(f) => format!("{f:.6}"),
        None => "/".to_string(),
    }
}

/// 将 `result` 以三行文本写进 `w` 中. 无定义的 overreach 写为 `/`.
pub fn describe_into<W: Write>(result: &ComparisonResult, w: &mut W) -> io::Result<()> {
    writeln!(w, "Dice Score: {}", f64_to_display(Some(result.dice)))?;
    writeln!(w, "Overlap: {}", f64_to_display(Some(result.overlap)))?;
    writeln!(w, "Overreach: {}", f64_to_display(result.overreach))?;
    Ok(())
}

/// 写入任意 `Write` 的输出端, 例如 `std::io::stdout()`.
#[derive(Debug)]
pub struct WriteReporter<W: Write> {
    w: W,
}

impl<W: Write> WriteReporter<W> {
    /// 初始化.
    #[inline]
    pub fn new(w: W) -> Self {
        Self { w }
    }

    /// 取回底层 writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> ScoreReporter for WriteReporter<W> {
    fn report(&mut self, result: &ComparisonResult) -> io::Result<()> {
        describe_into(result, &mut self.w)?;
        self.w.flush()
    }
}

/// 以 `info` 级别写入日志的输出端.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ScoreReporter for LogReporter {
    fn report(&mut self, result: &ComparisonResult) -> io::Result<()> {
        let mut buf = Vec::with_capacity(64);
        describe_into(result, &mut buf)?;
        for line in String::from_utf8_lossy(&buf).lines() {
            log::info!("{line}");
        }
        Ok(())
    }
}
