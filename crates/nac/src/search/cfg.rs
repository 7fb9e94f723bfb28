//! Search configuration.
//!
//! Policy
//! - Every field has a default, so a partial JSON config deserializes.
//! - Strategy fields (de)serialize as their canonical strings.

use serde::{Deserialize, Serialize};

use super::Algorithm;
use crate::classes::ClassGranularity;
use crate::relabel::RelabelStrategy;

/// Default cap on shortest cycles kept per edge for pruning.
pub(crate) const DEFAULT_MAX_CYCLES_PER_EDGE: usize = 8;

/// Cooperative cancellation limits. `None` means unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub time_limit_ms: Option<u64>,
    pub max_results: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCfg {
    pub algorithm: Algorithm,
    pub relabel: RelabelStrategy,
    pub granularity: ClassGranularity,
    /// Search biconnected blocks separately and combine them by product.
    pub use_decompositions: bool,
    /// Skip the search when the pre-check proves there is no coloring.
    pub use_precheck: bool,
    /// Drives random relabeling and `score` tie-breaks; `None` behaves as 0.
    pub seed: Option<u64>,
    pub budget: Budget,
    pub max_cycles_per_edge: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            relabel: RelabelStrategy::None,
            granularity: ClassGranularity::Monochromatic,
            use_decompositions: true,
            use_precheck: true,
            seed: None,
            budget: Budget::default(),
            max_cycles_per_edge: DEFAULT_MAX_CYCLES_PER_EDGE,
        }
    }
}

impl SearchCfg {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}
