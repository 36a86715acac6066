//! 程序运行函数.

use crate::profile::Profile;
use crate::result::AblationResult;
use std::error::Error;
use std::thread;
use tract_berry::density::{par_rasterize, rasterize, TraverseResult};
use tract_berry::metric::{self, CompareError, ScoreError};
use tract_berry::{OccupancyMap, Tractogram};
use utils::loader;

/// 每种栅格化方式重复的轮数, 至少为 1.
const ROUNDS: u32 = 5;

type Rasterizer = fn(&Tractogram) -> TraverseResult<OccupancyMap>;

fn sequential(t: &Tractogram) -> TraverseResult<OccupancyMap> {
    rasterize(t.streamlines(), t.dims())
}

fn parallel(t: &Tractogram) -> TraverseResult<OccupancyMap> {
    par_rasterize(t.streamlines(), t.dims())
}

/// 以 `f` 栅格化 `predicted` 和 `reference` 共 `ROUNDS` 轮, 返回统计与最后一轮的密度图.
fn profiled(
    f: Rasterizer,
    predicted: &Tractogram,
    reference: &Tractogram,
) -> Result<(Profile, [OccupancyMap; 2]), ScoreError> {
    let mut profile = Profile::new(predicted.len() + reference.len());
    let round = |profile: &mut Profile| -> Result<[OccupancyMap; 2], ScoreError> {
        profile.round_start();
        let a = f(predicted).map_err(ScoreError::Predicted)?;
        let b = f(reference).map_err(ScoreError::Reference)?;
        profile.round_elapsed();
        Ok([a, b])
    };

    let mut maps = round(&mut profile)?;
    for _ in 1..ROUNDS {
        maps = round(&mut profile)?;
    }
    Ok((profile.finish(), maps))
}

/// 两个 bundle 必须位于同一网格, 否则不值得开始栅格化.
fn same_grid(predicted: &Tractogram, reference: &Tractogram) -> Result<(), CompareError> {
    if predicted.dims() != reference.dims() {
        return Err(CompareError::ShapeMismatch(
            predicted.dims(),
            reference.dims(),
        ));
    }
    Ok(())
}

/// 实际运行.
pub fn run() -> Result<AblationResult, Box<dyn Error>> {
    let pred_path = loader::predicted_from_env_or_home().ok_or("home directory not found")?;
    let truth_path = loader::ground_truth_from_env_or_home().ok_or("home directory not found")?;

    let predicted = loader::load_npz(&pred_path)?;
    let reference = loader::load_npz(&truth_path)?;
    log::info!(
        "grid {}, {} predicted / {} ground truth streamlines, {} worker threads",
        utils::dims_to_display(predicted.dims()),
        predicted.len(),
        reference.len(),
        utils::cpus()
    );

    same_grid(&predicted, &reference)?;

    println!("Running ablation studies...");
    let (p, r) = (&predicted, &reference);
    let outcomes = thread::scope(|s| {
        let handles =
            [sequential as Rasterizer, parallel].map(|f| s.spawn(move || profiled(f, p, r)));
        handles.map(|th| th.join().expect("Thread joining error"))
    });

    let mut profiles = vec![];
    let mut all_maps = vec![];
    for (name, outcome) in ["sequential", "parallel"].into_iter().zip(outcomes) {
        let (profile, maps) = outcome?;
        profiles.push((name, profile));
        all_maps.push(maps);
    }

    // 两种方式的结果必须逐体素一致.
    if let [first, rest @ ..] = all_maps.as_slice() {
        if rest.iter().any(|m| m != first) {
            return Err("sequential and parallel rasterization disagree".into());
        }
    }
    let [pred_map, truth_map] = &all_maps[0];
    let scores = metric::compare(pred_map, truth_map)?;

    Ok(AblationResult::new(profiles, scores))
}
