//! Cheap pre-check run before any enumeration.
//!
//! Purpose
//! - Skip the search outright when a graph provably has no NAC-coloring.
//! - Report, for logs and stats, when a coloring is known to exist.
//!
//! Verdicts
//! - `NoColoring`: no vertices, fewer than two edges, or the `MONOCHROMATIC`
//!   closure collapses every edge into one class. Only this verdict stops the
//!   search; it never rejects a graph that has a NAC-coloring.
//! - `ColoringExists`: the edges spread over several blocks (color one block
//!   red, the rest blue), or the single block is flexible in the plane. A
//!   connected flexible graph always has a NAC-coloring; a rigid one may
//!   still have one (K3,3 has 30), so rigidity alone decides nothing.
//! - `Undecided`: everything else.
//!
//! Code cross-refs: `pebble` for the (2,3) rank, `classes::find_classes`.

mod pebble;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classes::{find_classes, ClassGranularity};
use crate::graph::{biconnected_components, Graph, VertexId};

pub use pebble::{
    is_minimally_rigid_2d, is_rigid_2d, is_sparse, is_tight, sparsity_rank, PebbleGame,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeasibilityError {
    #[error("invalid pebble game ({k}, {l}): {reason}")]
    InvalidPebbleParams {
        k: usize,
        l: usize,
        reason: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NoColoring,
    ColoringExists,
    Undecided,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::NoColoring => "no_coloring",
            Verdict::ColoringExists => "coloring_exists",
            Verdict::Undecided => "undecided",
        })
    }
}

/// Classify `g` without enumerating colorings.
pub fn precheck(g: &Graph) -> Verdict {
    if g.vertex_count() == 0 || g.edge_count() < 2 {
        return Verdict::NoColoring;
    }
    let partition = find_classes(g, ClassGranularity::Monochromatic);
    if partition.len() <= 1 {
        return Verdict::NoColoring;
    }
    if biconnected_components(g).blocks.len() > 1 {
        return Verdict::ColoringExists;
    }
    // one block left: rigidity is judged on the vertices it touches
    let touched = (0..g.vertex_count())
        .filter(|&v| g.degree(VertexId(v)) > 0)
        .count();
    match sparsity_rank(g, 2, 3) {
        Ok(rank) if rank < (2 * touched).saturating_sub(3) => Verdict::ColoringExists,
        _ => Verdict::Undecided,
    }
}

#[cfg(test)]
mod tests;
