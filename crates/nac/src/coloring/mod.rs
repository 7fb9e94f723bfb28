//! Colorings, class bitsets, cycle masks and the full NAC check.
//!
//! - `Coloring`: the public result, a red/blue partition of the edge labels.
//! - `ClassBits`: red set of a (partial) class assignment.
//! - `CycleMask`: a cycle as class multiplicities; rejects almost-constant
//!   cycles in O(cycle length).
//! - `EdgeSubgraph`: compact edge set with the union-find NAC check
//!   (every red edge must join two blue components and vice versa).

mod bits;
mod mask;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classes::UnionFind;
use crate::graph::{Edge, EdgeId, Graph, VertexId};

pub use bits::ClassBits;
pub use mask::CycleMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
}

/// Red/blue partition of a graph's edges, in vertex labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coloring {
    pub red: BTreeSet<Edge>,
    pub blue: BTreeSet<Edge>,
}

impl Coloring {
    pub fn new<R, B>(red: R, blue: B) -> Self
    where
        R: IntoIterator<Item = Edge>,
        B: IntoIterator<Item = Edge>,
    {
        Self {
            red: red.into_iter().collect(),
            blue: blue.into_iter().collect(),
        }
    }

    /// Same partition with the colors exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            red: self.blue.clone(),
            blue: self.red.clone(),
        }
    }

    pub fn color_of(&self, edge: Edge) -> Option<Color> {
        if self.red.contains(&edge) {
            Some(Color::Red)
        } else if self.blue.contains(&edge) {
            Some(Color::Blue)
        } else {
            None
        }
    }

    /// Both colors are used.
    pub fn is_surjective(&self) -> bool {
        !self.red.is_empty() && !self.blue.is_empty()
    }
}

/// Whether `coloring` is a NAC-coloring of `g`: an exact, surjective edge
/// partition in which no cycle is almost constant.
pub fn is_nac_coloring(g: &Graph, coloring: &Coloring) -> bool {
    if !coloring.is_surjective() || coloring.red.len() + coloring.blue.len() != g.edge_count() {
        return false;
    }
    let mut red = vec![false; g.edge_count()];
    for &edge in &coloring.red {
        match g.edge_id(edge) {
            Some(e) => red[e.0] = true,
            None => return false,
        }
    }
    for &edge in &coloring.blue {
        match g.edge_id(edge) {
            Some(e) if !red[e.0] => {}
            _ => return false,
        }
    }
    let all: Vec<EdgeId> = (0..g.edge_count()).map(EdgeId).collect();
    let sub = EdgeSubgraph::new(g, all.iter().map(|&e| (e, usize::from(red[e.0]))));
    let mut bits = ClassBits::new(2);
    bits.insert(1);
    sub.is_nac(&bits, &mut NacScratch::default())
}

/// Reusable union-find buffers for repeated NAC checks.
#[derive(Debug)]
pub(crate) struct NacScratch {
    red: UnionFind,
    blue: UnionFind,
}

impl Default for NacScratch {
    fn default() -> Self {
        Self {
            red: UnionFind::new(0),
            blue: UnionFind::new(0),
        }
    }
}

/// Edge subset with compact vertex numbering and a class per edge.
#[derive(Clone, Debug)]
pub(crate) struct EdgeSubgraph {
    ends: Vec<(usize, usize)>,
    class: Vec<usize>,
    vertex_count: usize,
}

impl EdgeSubgraph {
    /// `edges` yields `(edge, class index)` pairs.
    pub(crate) fn new(g: &Graph, edges: impl Iterator<Item = (EdgeId, usize)>) -> Self {
        let mut compact: Vec<Option<usize>> = vec![None; g.vertex_count()];
        let mut vertex_count = 0;
        let mut slot = |v: VertexId| {
            *compact[v.0].get_or_insert_with(|| {
                vertex_count += 1;
                vertex_count - 1
            })
        };
        let mut ends = Vec::new();
        let mut class = Vec::new();
        for (e, c) in edges {
            let (a, b) = g.endpoints(e);
            ends.push((slot(a), slot(b)));
            class.push(c);
        }
        Self {
            ends,
            class,
            vertex_count,
        }
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.ends.len()
    }

    /// No cycle of this edge set has exactly one edge of either color.
    /// Constant assignments pass.
    pub(crate) fn is_nac(&self, red: &ClassBits, scratch: &mut NacScratch) -> bool {
        scratch.red.reset(self.vertex_count);
        scratch.blue.reset(self.vertex_count);
        for (&(a, b), &c) in self.ends.iter().zip(&self.class) {
            if red.contains(c) {
                scratch.red.union(a, b);
            } else {
                scratch.blue.union(a, b);
            }
        }
        self.ends.iter().zip(&self.class).all(|(&(a, b), &c)| {
            if red.contains(c) {
                !scratch.blue.same(a, b)
            } else {
                !scratch.red.same(a, b)
            }
        })
    }
}
