//! Simple undirected graphs and the cycle/block primitives used by the search.
//!
//! Purpose
//! - Hold a finite simple graph with caller-chosen `usize` vertex labels and a
//!   canonical dense numbering of vertices (`VertexId`) and edges (`EdgeId`).
//! - Provide the structural queries the coloring search needs: triangles,
//!   shortest cycles through an edge, fundamental cycles, biconnected blocks.
//!
//! Conventions
//! - Vertex ids follow ascending label order; edge ids follow ascending
//!   `(min label, max label)` order. Both numberings are therefore a pure
//!   function of the vertex and edge sets.
//! - Graphs are immutable once built; relabeling produces a new graph.
//!
//! Code cross-refs: `classes::find_classes`, `search::engine::search_colorings`.

mod blocks;
mod cycles;
pub mod families;
mod types;

pub use blocks::{biconnected_components, Blocks};
pub use cycles::{
    cycle_candidates, fundamental_cycles, shortest_cycles_through, simple_cycles, triangles,
};
pub use types::{Edge, EdgeId, Graph, VertexId};

use thiserror::Error;

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("self-loop at vertex {0}")]
    SelfLoop(usize),
    #[error("edge ({u}, {v}) references a vertex the graph does not contain")]
    UnknownVertex { u: usize, v: usize },
    #[error("integer representation needs a non-empty graph without isolated vertices")]
    NoIntRepresentation,
    #[error("integer representation overflows 128 bits ({0} vertices)")]
    IntOverflow(usize),
}
