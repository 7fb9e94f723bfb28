//! Instrumentation counters and the per-search context.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::Budget;
use crate::coloring::NacScratch;
use crate::feasibility::Verdict;

/// Budget checks happen every this many candidates.
const TICK_INTERVAL: u64 = 256;

/// Counters exposed for benchmarking and reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Cycle-mask evaluations (incremental updates count one each).
    pub cycle_mask_checks: u64,
    /// Full union-find NAC checks.
    pub nac_checks: u64,
    pub classes: usize,
    /// Colorings handed to the caller so far.
    pub colorings: usize,
    pub blocks: usize,
    pub units: usize,
    /// `None` when the pre-check is disabled.
    pub precheck: Option<Verdict>,
    /// `true` once the search ran to completion; stays `false` after a budget stop.
    pub exhausted: bool,
    pub elapsed_ms: u64,
}

/// Mutable state threaded through every stream of one search.
#[derive(Debug)]
pub(crate) struct Ctx {
    pub(crate) stats: SearchStats,
    pub(crate) rng: StdRng,
    pub(crate) scratch: NacScratch,
    started: Instant,
    deadline: Option<Instant>,
    max_results: Option<usize>,
    ticks: u64,
    cancelled: bool,
}

impl Ctx {
    pub(crate) fn new(budget: Budget, seed: Option<u64>) -> Self {
        let started = Instant::now();
        Self {
            stats: SearchStats::default(),
            rng: StdRng::seed_from_u64(seed.unwrap_or(0)),
            scratch: NacScratch::default(),
            started,
            deadline: budget
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
            max_results: budget.max_results,
            ticks: 0,
            cancelled: false,
        }
    }

    /// Count one candidate; consults the clock every `TICK_INTERVAL` calls.
    /// Returns `false` once the search is cancelled.
    #[inline]
    pub(crate) fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks % TICK_INTERVAL == 0 {
            self.check()
        } else {
            !self.cancelled
        }
    }

    /// Consult the clock now.
    pub(crate) fn check(&mut self) -> bool {
        if !self.cancelled {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    tracing::info!(
                        elapsed_ms = self.started.elapsed().as_millis() as u64,
                        "time budget spent; stopping search"
                    );
                    self.cancelled = true;
                }
            }
        }
        !self.cancelled
    }

    /// Whether `max_results` colorings were already handed out.
    pub(crate) fn results_spent(&self) -> bool {
        self.max_results
            .is_some_and(|max| self.stats.colorings >= max)
    }

    /// Stop after the result budget; logs once.
    pub(crate) fn stop_for_results(&mut self) {
        if !self.cancelled {
            tracing::info!(
                max_results = self.max_results,
                "result budget reached; stopping search"
            );
            self.cancelled = true;
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn touch_elapsed(&mut self) {
        self.stats.elapsed_ms = self.started.elapsed().as_millis() as u64;
    }
}
