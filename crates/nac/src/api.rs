//! Curated API surface for tools built on this crate (the CLI, benches).
//!
//! Important
//! - Prefer these re-exports over reaching into module internals.

// Graph model
pub use crate::graph::families;
pub use crate::graph::{
    biconnected_components, cycle_candidates, simple_cycles, Blocks, Edge, EdgeId, Graph,
    GraphError, VertexId,
};
// Classes
pub use crate::classes::{find_classes, ClassGranularity, ClassGraph, ClassId, ClassPartition};
// Colorings
pub use crate::coloring::{is_nac_coloring, Color, Coloring};
// Feasibility
pub use crate::feasibility::{
    is_minimally_rigid_2d, is_rigid_2d, is_sparse, is_tight, precheck, sparsity_rank,
    FeasibilityError, PebbleGame, Verdict,
};
// Relabeling
pub use crate::relabel::{relabel, RelabelStrategy, Relabeled};
// Search
pub use crate::search::{
    has_nac_coloring, nac_colorings, search_colorings, single_nac_coloring, Algorithm, Budget,
    MergeStrategy, NacColorings, SearchCfg, SearchError, SearchStats, SplitStrategy,
    MAX_UNIT_CLASSES,
};
