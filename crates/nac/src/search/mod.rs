//! NAC-coloring search: naive, cycle-pruned and decomposition variants.
//!
//! Purpose
//! - Enumerate every NAC-coloring of a graph lazily, one `Coloring` at a time.
//! - Make the algorithm choice a structured value parsed once at the boundary.
//!
//! Pipeline
//! - Relabel the graph, run the pre-check, build monochromatic classes.
//! - Split the edges into blocks (or keep one block) and build, per block, the
//!   class-level problem: class edges, class adjacency, cycle masks.
//! - Per block: enumerate class assignments directly (`naive`, `cycles`), or
//!   split the classes into units, enumerate each unit, and merge partial
//!   assignments pairwise (`subgraphs`). Every block stream also yields the two
//!   constant assignments.
//! - Combine blocks by cartesian product and drop the two constant colorings.
//!
//! Why this design
//! - Everything polynomial happens in `search_colorings`, so configuration
//!   errors surface before any exponential work; enumeration starts on the
//!   first `next()`.
//! - Streams own the data they read, so the public iterator holds no borrows.
//!
//! Code cross-refs: `classes::find_classes`, `feasibility::precheck`,
//! `coloring::EdgeSubgraph::is_nac`.

mod blocks;
mod cfg;
mod engine;
mod enumerate;
mod problem;
mod stats;
mod strategy;
mod subgraphs;

use thiserror::Error;

use crate::graph::GraphError;

pub use cfg::{Budget, SearchCfg};
pub use engine::{
    has_nac_coloring, nac_colorings, search_colorings, single_nac_coloring, NacColorings,
};
pub use stats::SearchStats;
pub use strategy::{Algorithm, MergeStrategy, SplitStrategy};

/// Largest number of classes a single enumeration unit may hold.
pub const MAX_UNIT_CLASSES: usize = 64;

/// Configuration errors, reported before any search work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(
        "unknown algorithm `{0}` (expected naive, cycles, subgraphs \
         or subgraphs-<merge>-<split>-<size>)"
    )]
    UnknownAlgorithm(String),
    #[error("unknown merge strategy `{0}` (expected linear, log, score or shared_vertices)")]
    UnknownMergeStrategy(String),
    #[error("unknown split strategy `{0}` (expected none, neighbors or neighbors_degree)")]
    UnknownSplitStrategy(String),
    #[error("invalid subgraph size `{0}` (expected a positive integer)")]
    InvalidSubgraphSize(String),
    #[error("unknown class granularity `{0}` (expected EDGES, TRIANGLES or MONOCHROMATIC)")]
    UnknownGranularity(String),
    #[error("unknown relabel strategy `{0}` (expected none, random or bfs)")]
    UnknownRelabel(String),
    #[error(
        "block with {classes} classes exceeds the {limit}-class limit of direct \
         enumeration; use a subgraphs algorithm"
    )]
    TooManyClasses { classes: usize, limit: usize },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests;
