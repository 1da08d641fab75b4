//! Least-risk deployment selection over a candidate list.
//!
//! The sequential walk short-circuits on the first reachable zero-risk
//! candidate: path computation dominates turn compute time, and an
//! equally-scored later candidate buys nothing. The parallel variant
//! gives up the short-circuit (workers cannot coordinate an early hit)
//! in exchange for throughput on large candidate sets; both reduce to
//! the same minimum score.

use crate::host::GameHost;
use crate::location::Location;
use crate::risk::assess;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

/// Walk `candidates` in order and return the least-risk one with its
/// score. Returns `None` for an empty candidate list; callers must have
/// a fallback deployment for that case. Ties break to the earliest
/// candidate. The first candidate with a reachable zero-risk route wins
/// immediately; unreachable candidates score zero for the final minimum
/// but never trigger the early return.
pub fn least_risk_location<H: GameHost>(
    host: &H,
    candidates: &[Location],
) -> Option<(Location, f32)> {
    let mut scores = Vec::with_capacity(candidates.len());
    for &cell in candidates {
        let risk = assess(host, cell);
        if risk.is_safe() {
            debug!("selector: {:?} has a safe route, taking it", cell);
            return Some((cell, 0.0));
        }
        scores.push(risk.score());
    }

    scores
        .iter()
        .copied()
        .position_min_by(f32::total_cmp)
        .map(|index| (candidates[index], scores[index]))
}

/// Fixed-capacity worker pool for fanning risk evaluation across a large
/// candidate set. Sized once at startup so tests run a deterministic
/// small pool; prefer the sequential walk for small inputs, where pool
/// scheduling overhead dominates.
pub struct SelectorPool {
    pool: rayon::ThreadPool,
}

impl SelectorPool {
    pub fn with_workers(workers: usize) -> Result<SelectorPool, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        Ok(SelectorPool { pool })
    }

    /// Evaluate every candidate (no short-circuit) and reduce to the
    /// minimum score, earliest candidate on ties. Workers share the
    /// immutable snapshot and no other state.
    pub fn least_risk_location<H: GameHost + Sync>(
        &self,
        host: &H,
        candidates: &[Location],
    ) -> Option<(Location, f32)> {
        self.pool.install(|| {
            candidates
                .par_iter()
                .enumerate()
                .map(|(index, &cell)| (index, cell, assess(host, cell).score()))
                .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)))
                .map(|(_, cell, score)| (cell, score))
        })
    }
}
