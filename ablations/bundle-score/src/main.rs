//! 栅格化单线程/多线程消融实验, 以及预测 bundle 的评分.
//!
//! 数据路径见 `utils::loader`.

mod profile;
mod result;
mod runner;

use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .expect("Logger initialization error");

    match runner::run() {
        Ok(r) => r.analyze().expect("Writing to stdout error"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
