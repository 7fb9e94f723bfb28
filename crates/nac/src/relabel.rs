//! Vertex relabeling applied before a search.
//!
//! The search order, and therefore the speed of the decomposition search,
//! depends on the vertex numbering. Relabeling builds a copy with labels
//! `0..n` and keeps the map back to the caller's labels; colorings found on the
//! copy are translated back, so the result set never changes.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::coloring::Coloring;
use crate::graph::{Edge, Graph, VertexId};
use crate::search::SearchError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelabelStrategy {
    #[default]
    None,
    Random,
    Bfs,
}

impl FromStr for RelabelStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "random" => Ok(Self::Random),
            "bfs" => Ok(Self::Bfs),
            other => Err(SearchError::UnknownRelabel(other.to_string())),
        }
    }
}

impl fmt::Display for RelabelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Random => "random",
            Self::Bfs => "bfs",
        })
    }
}

impl TryFrom<String> for RelabelStrategy {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelabelStrategy> for String {
    fn from(value: RelabelStrategy) -> Self {
        value.to_string()
    }
}

/// A relabeled copy plus the way back.
#[derive(Clone, Debug)]
pub struct Relabeled {
    pub graph: Graph,
    /// `original[new label]` is the caller's label.
    pub original: Vec<usize>,
}

impl Relabeled {
    pub fn original_edge(&self, edge: Edge) -> Edge {
        Edge::new(self.original[edge.0], self.original[edge.1])
    }

    /// Translate a coloring of `self.graph` back to the caller's labels.
    pub fn restore(&self, coloring: &Coloring) -> Coloring {
        Coloring::new(
            coloring.red.iter().map(|&e| self.original_edge(e)),
            coloring.blue.iter().map(|&e| self.original_edge(e)),
        )
    }
}

/// Relabel `g` with `strategy`; `seed` only matters for `Random`.
///
/// `None` still compacts labels to `0..n` in ascending label order.
pub fn relabel(g: &Graph, strategy: RelabelStrategy, seed: Option<u64>) -> Relabeled {
    let n = g.vertex_count();
    // order[k] = vertex that receives new label k
    let order: Vec<usize> = match strategy {
        RelabelStrategy::None => (0..n).collect(),
        RelabelStrategy::Random => {
            let mut rng = StdRng::seed_from_u64(seed.unwrap_or(0));
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(&mut rng);
            order
        }
        RelabelStrategy::Bfs => bfs_order(g),
    };
    let mut new_index = vec![0; n];
    for (new, &old) in order.iter().enumerate() {
        new_index[old] = new;
    }
    Relabeled {
        graph: g.remapped(&new_index),
        original: order.iter().map(|&v| g.label(VertexId(v))).collect(),
    }
}

fn bfs_order(g: &Graph) -> Vec<usize> {
    let n = g.vertex_count();
    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &(w, _) in g.neighbors(VertexId(v)) {
                if !seen[w.0] {
                    seen[w.0] = true;
                    queue.push_back(w.0);
                }
            }
        }
    }
    order
}
