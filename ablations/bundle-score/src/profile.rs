//! 栅格化运行统计.

use std::time::{Duration, Instant};

/// 一种栅格化方式的统计.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 完成的栅格化轮数. 每轮栅格化预测和真值两个 bundle.
    rounds: u64,

    /// 每轮处理的 streamline 条数.
    streamlines: u64,

    /// 栅格化花费的总时间.
    round_time: Duration,

    /// 当前一轮的开始时刻.
    round_since: Instant,

    /// 统计开始时刻.
    created: Instant,

    /// 整个任务花费的总时间 (包括结果检查等). `finish` 之前为 0.
    real_time: Duration,

    /// 最耗时的一轮.
    most: Option<Duration>,
}

impl Profile {
    /// 初始化. 每轮处理 `streamlines` 条 streamline.
    #[inline]
    pub fn new(streamlines: usize) -> Self {
        Self {
            rounds: 0,
            streamlines: streamlines as u64,
            round_time: Duration::ZERO,
            round_since: Instant::now(),
            created: Instant::now(),
            real_time: Duration::ZERO,
            most: None,
        }
    }

    /// 开始一轮计时.
    #[inline]
    pub fn round_start(&mut self) {
        self.round_since = Instant::now();
    }

    /// 结束一轮计时.
    #[inline]
    pub fn round_elapsed(&mut self) {
        let d = self.round_since.elapsed();
        self.round_time += d;
        self.rounds += 1;
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time = self.created.elapsed();
        self
    }

    /// 获得完成轮数.
    #[inline]
    pub fn get_rounds(&self) -> u64 {
        self.rounds
    }

    /// 获得每轮 streamline 条数.
    #[inline]
    pub fn get_streamlines(&self) -> u64 {
        self.streamlines
    }

    /// 以微秒为单位获得栅格化总时间.
    #[inline]
    pub fn get_round_time_us(&self) -> u64 {
        self.round_time.as_micros() as u64
    }

    /// 以微秒为单位获得总自然时间.
    #[inline]
    pub fn get_real_time_us(&self) -> u64 {
        self.real_time.as_micros() as u64
    }

    /// 以微秒为单位获得每轮平均时间. 未完成任何一轮时返回 `None`.
    #[inline]
    pub fn get_avg_round_time_us(&self) -> Option<f64> {
        match self.rounds {
            0 => None,
            rounds => Some(self.get_round_time_us() as f64 / rounds as f64),
        }
    }

    /// 以微秒为单位获得平均每条 streamline 的栅格化时间.
    #[inline]
    pub fn get_avg_streamline_time_us(&self) -> Option<f64> {
        let n = self.rounds * self.streamlines;
        match n {
            0 => None,
            n => Some(self.get_round_time_us() as f64 / n as f64),
        }
    }

    /// 获取最耗时的一轮所消耗的时间. 如果不存在任何一轮, 则返回 `None`.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}
