//! NAC-colorings of simple graphs.
//!
//! A NAC-coloring is a surjective red/blue edge coloring in which every cycle
//! is monochromatic or carries at least two edges of each color. Graphs with
//! such a coloring are exactly those with a flexible generic realization in
//! the plane, which is why the pre-check borrows from 2D rigidity.
//!
//! Layout
//! - `graph`: storage, cycles, biconnected blocks, named families.
//! - `classes`: edges forced to share a color (monochromatic classes).
//! - `coloring`: `Coloring`, class bitsets, cycle masks, the full check.
//! - `feasibility`: pebble game and the pre-check verdict.
//! - `relabel`: vertex renumbering before a search.
//! - `search`: configuration, strategies and the lazy search itself.
//!
//! API Policy
//! - `api` and `prelude` are the intended import surfaces; module internals
//!   may move.

pub mod api;
pub mod classes;
pub mod coloring;
pub mod feasibility;
pub mod graph;
pub mod relabel;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use coloring::{is_nac_coloring, Coloring};
pub use graph::{Edge, Graph};
pub use search::{search_colorings, SearchCfg, SearchError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::classes::ClassGranularity;
    pub use crate::coloring::{is_nac_coloring, Color, Coloring};
    pub use crate::graph::{Edge, Graph, GraphError};
    pub use crate::relabel::RelabelStrategy;
    pub use crate::search::{
        has_nac_coloring, nac_colorings, search_colorings, single_nac_coloring, Algorithm, Budget,
        MergeStrategy, SearchCfg, SearchError, SearchStats, SplitStrategy,
    };
}
