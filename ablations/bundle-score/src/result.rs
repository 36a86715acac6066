//! 实验结果.

use crate::profile::Profile;
use std::io::{self, Write};
use tract_berry::metric::{self, ComparisonResult};

/// 将 `profile` 的结果写进 `w` 中.
fn describe_into<W: Write>(name: &str, p: &Profile, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn f64_to_display(f: Option<f64>) -> String {
        match f {
            Some(f) => format!("{f:.6}"),
            None => "/".to_string(),
        }
    }

    #[inline]
    fn u64_to_display(u: Option<u64>) -> String {
        match u {
            Some(u) => u.to_string(),
            None => "/".to_string(),
        }
    }

    writeln!(w, "Profile `{name}`:")?;
    writeln!(w, "{S4}Rounds: {}", p.get_rounds())?;
    writeln!(w, "{S4}Streamlines per round: {}", p.get_streamlines())?;
    writeln!(w, "{S4}Rasterization time: {} us", p.get_round_time_us())?;
    writeln!(
        w,
        "{S4}Average round time: {} us",
        f64_to_display(p.get_avg_round_time_us())
    )?;
    writeln!(
        w,
        "{S4}Average streamline time: {} us",
        f64_to_display(p.get_avg_streamline_time_us())
    )?;
    writeln!(w, "{S4}Total machine time: {} us", p.get_real_time_us())?;
    let t = p.get_most_time_consuming().map(|d| d.as_micros() as u64);
    write!(w, "{S4}Most time-consuming round costs {} us", u64_to_display(t))?;
    Ok(())
}

/// 消融实验最终结果.
pub struct AblationResult {
    data: Vec<(&'static str, Profile)>,
    scores: ComparisonResult,
}

impl AblationResult {
    pub fn new<I: IntoIterator<Item = (&'static str, Profile)>>(
        it: I,
        scores: ComparisonResult,
    ) -> Self {
        Self {
            data: it.into_iter().collect(),
            scores,
        }
    }

    /// 将全部运行结果写进 `w` 中.
    pub fn write_into<W: Write>(&self, w: &mut W) -> io::Result<()> {
        utils::sep_to(&mut *w)?;
        for (key, profile) in self.data.iter() {
            describe_into(key, profile, w)?;
            writeln!(w)?;
            utils::sep_to(&mut *w)?;
        }
        metric::describe_into(&self.scores, w)?;
        utils::sep_to(&mut *w)
    }

    /// 分析运行结果.
    pub fn analyze(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_into(&mut lock)
    }
}
