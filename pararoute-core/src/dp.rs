//! Stage-indexed dynamic program over candidate touch points, with
//! beam-width pruning. One call to [`dp_pass`] is one forward pass plus a
//! back-trace; [`crate::refine`] drives repeated passes with successively
//! better look-ahead targets.

use std::collections::BTreeMap;

use pararoute_common::Point;
use pararoute_geo::distance;
use tracing::debug;

use crate::config::OptimizationConfig;
use crate::turnpoint::Turnpoint;

#[derive(Debug, Clone, Copy)]
struct StageEntry {
    point: Point,
    distance_m: f64,
    parent_key: Option<(i64, i64)>,
}

type Stage = BTreeMap<(i64, i64), StageEntry>;

/// Result of one DP forward pass: total distance and the back-traced route,
/// one point per turnpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PassResult {
    pub distance_m: f64,
    pub route: Vec<Point>,
}

/// Runs a single DP forward pass and backtrace.
///
/// `look_ahead`, when supplied, must have one entry per turnpoint; stage
/// `i`'s target is `look_ahead[i + 1]` rather than `turnpoints[i + 1].centre`.
/// This is how [`crate::refine`] feeds in the previous pass's own touch
/// points as better look-ahead targets.
pub fn dp_pass(
    turnpoints: &[Turnpoint],
    look_ahead: Option<&[Point]>,
    config: &OptimizationConfig,
) -> PassResult {
    let n = turnpoints.len();
    if n == 0 {
        return PassResult {
            distance_m: 0.0,
            route: vec![],
        };
    }
    if n == 1 {
        return PassResult {
            distance_m: 0.0,
            route: vec![turnpoints[0].centre],
        };
    }

    let mut stages: Vec<Stage> = Vec::with_capacity(n);
    let mut stage0 = Stage::new();
    let origin = turnpoints[0].centre;
    stage0.insert(
        origin.canonical_key(),
        StageEntry {
            point: origin,
            distance_m: 0.0,
            parent_key: None,
        },
    );
    stages.push(stage0);

    for i in 1..n {
        let look_ahead_target = if i < n - 1 {
            look_ahead.map(|l| l[i + 1]).unwrap_or(turnpoints[i + 1].centre)
        } else {
            turnpoints[i].centre
        };

        let mut candidates: Stage = BTreeMap::new();
        for entry in stages[i - 1].values() {
            let touch = turnpoints[i].optimal_touch(entry.point, look_ahead_target, config.angle_step_deg);
            let leg = distance(entry.point, touch);
            let total = entry.distance_m + leg;
            let key = touch.canonical_key();
            let better = candidates
                .get(&key)
                .map(|existing| total < existing.distance_m)
                .unwrap_or(true);
            if better {
                candidates.insert(
                    key,
                    StageEntry {
                        point: touch,
                        distance_m: total,
                        parent_key: Some(entry.point.canonical_key()),
                    },
                );
            }
        }

        let before_pruning = candidates.len();
        let pruned = prune(candidates, config.beam_width);
        debug!(
            stage = i,
            candidates_before = before_pruning,
            candidates_after = pruned.len(),
            "dp stage processed"
        );
        stages.push(pruned);
    }

    backtrace(&stages)
}

/// Keeps the `beam_width` entries with smallest distance. Ties are broken
/// by the `BTreeMap`'s key order (canonicalised lat/lon), which is
/// deterministic and reproducible across runs, per §9's resolution of the
/// tie-break open question.
fn prune(stage: Stage, beam_width: usize) -> Stage {
    if stage.len() <= beam_width {
        return stage;
    }
    let mut entries: Vec<((i64, i64), StageEntry)> = stage.into_iter().collect();
    entries.sort_by(|a, b| {
        a.1.distance_m
            .partial_cmp(&b.1.distance_m)
            .unwrap()
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(beam_width);
    entries.into_iter().collect()
}

fn backtrace(stages: &[Stage]) -> PassResult {
    let last = stages.last().expect("at least stage 0 always exists");
    let (best_key, best_entry) = last
        .iter()
        .min_by(|a, b| {
            a.1.distance_m
                .partial_cmp(&b.1.distance_m)
                .unwrap()
                .then_with(|| a.0.cmp(b.0))
        })
        .expect("each stage after stage 0 has at least one candidate");

    let mut route = vec![best_entry.point];
    let mut current_key = *best_key;
    for stage_idx in (1..stages.len()).rev() {
        let entry = &stages[stage_idx][&current_key];
        let parent_key = entry.parent_key.expect("non-origin stage entries always have a parent");
        let parent_entry = &stages[stage_idx - 1][&parent_key];
        route.push(parent_entry.point);
        current_key = parent_key;
    }
    route.reverse();

    PassResult {
        distance_m: best_entry.distance_m,
        route,
    }
}
