//! Monochromatic edge classes and the class graph.
//!
//! Purpose
//! - Group edges that receive the same color in every NAC-coloring, so the
//!   search makes one binary choice per class instead of per edge.
//!
//! Granularities
//! - `Edges`: no contraction.
//! - `Triangles`: edges of a common triangle are merged, transitively.
//! - `Monochromatic`: the triangle closure plus the cycle rule below, iterated
//!   to a fixpoint. If an edge `uv` of class `B` has both endpoints on another
//!   class `A`, then `A` (a connected edge set) holds a `u`-`v` path, and the
//!   cycle it closes with `uv` would have exactly one edge of `B`'s color unless
//!   `A` and `B` agree. Merges never disconnect a class, and the rule only gets
//!   more applicable as classes grow, so the fixpoint is unique.
//!
//! Class ids are canonical: classes are numbered by their smallest edge id.

mod union_find;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{triangles, EdgeId, Graph, VertexId};

pub(crate) use union_find::UnionFind;

/// How aggressively edges are merged into classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClassGranularity {
    Edges,
    Triangles,
    #[default]
    Monochromatic,
}

impl FromStr for ClassGranularity {
    type Err = crate::search::SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "edges" => Ok(Self::Edges),
            "triangles" => Ok(Self::Triangles),
            "monochromatic" => Ok(Self::Monochromatic),
            _ => Err(crate::search::SearchError::UnknownGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for ClassGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Edges => "EDGES",
            Self::Triangles => "TRIANGLES",
            Self::Monochromatic => "MONOCHROMATIC",
        })
    }
}

impl TryFrom<String> for ClassGranularity {
    type Error = crate::search::SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClassGranularity> for String {
    fn from(value: ClassGranularity) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// One class: its edges and the vertices they touch (both sorted).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonochromaticClass {
    pub edges: Vec<EdgeId>,
    pub vertices: Vec<VertexId>,
}

/// Partition of the edge set into classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassPartition {
    pub granularity: ClassGranularity,
    pub classes: Vec<MonochromaticClass>,
    /// Indexed by `EdgeId`.
    pub class_of: Vec<ClassId>,
}

/// Classes as nodes, adjacent when they share a vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassGraph {
    /// Per class: `(neighbor, shared vertex count)`, sorted by neighbor.
    pub adjacency: Vec<Vec<(ClassId, usize)>>,
}

impl ClassGraph {
    pub fn degree(&self, c: ClassId) -> usize {
        self.adjacency[c.0].len()
    }

    pub fn shared_vertices(&self, a: ClassId, b: ClassId) -> usize {
        let list = &self.adjacency[a.0];
        list.binary_search_by(|&(n, _)| n.cmp(&b))
            .map_or(0, |pos| list[pos].1)
    }
}

/// Compute the class partition of `g` at the given granularity.
pub fn find_classes(g: &Graph, granularity: ClassGranularity) -> ClassPartition {
    let m = g.edge_count();
    let mut uf = UnionFind::new(m);
    if granularity != ClassGranularity::Edges {
        for [a, b, c] in triangles(g) {
            uf.union(a.0, b.0);
            uf.union(b.0, c.0);
        }
    }
    if granularity == ClassGranularity::Monochromatic {
        let mut rounds = 0usize;
        while close_over_cycles(g, &mut uf) {
            rounds += 1;
        }
        tracing::trace!(rounds, "monochromatic closure reached fixpoint");
    }
    collect_partition(g, granularity, &mut uf)
}

/// One pass of the cycle rule. Returns whether any classes merged.
fn close_over_cycles(g: &Graph, uf: &mut UnionFind) -> bool {
    let n = g.vertex_count();
    let m = g.edge_count();
    // classes (by root) touching each vertex
    let mut at_vertex: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    let roots: Vec<usize> = (0..m).map(|e| uf.find(e)).collect();
    for (e, &root) in roots.iter().enumerate() {
        let (a, b) = g.endpoints(EdgeId(e));
        at_vertex[a.0].insert(root);
        at_vertex[b.0].insert(root);
    }
    let mut merges = Vec::new();
    for (e, &own) in roots.iter().enumerate() {
        let (a, b) = g.endpoints(EdgeId(e));
        if let Some(&other) = at_vertex[a.0]
            .intersection(&at_vertex[b.0])
            .find(|&&c| c != own)
        {
            merges.push((own, other));
        }
    }
    let mut changed = false;
    for (x, y) in merges {
        changed |= uf.union(x, y);
    }
    changed
}

fn collect_partition(
    g: &Graph,
    granularity: ClassGranularity,
    uf: &mut UnionFind,
) -> ClassPartition {
    let m = g.edge_count();
    let mut id_of_root: BTreeMap<usize, ClassId> = BTreeMap::new();
    let mut class_of = Vec::with_capacity(m);
    let mut classes: Vec<MonochromaticClass> = Vec::new();
    for e in 0..m {
        let root = uf.find(e);
        let id = *id_of_root.entry(root).or_insert_with(|| {
            classes.push(MonochromaticClass {
                edges: Vec::new(),
                vertices: Vec::new(),
            });
            ClassId(classes.len() - 1)
        });
        class_of.push(id);
        let (a, b) = g.endpoints(EdgeId(e));
        let class = &mut classes[id.0];
        class.edges.push(EdgeId(e));
        class.vertices.push(a);
        class.vertices.push(b);
    }
    for class in classes.iter_mut() {
        class.vertices.sort_unstable();
        class.vertices.dedup();
    }
    ClassPartition {
        granularity,
        classes,
        class_of,
    }
}

impl ClassPartition {
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[inline]
    pub fn class_of(&self, e: EdgeId) -> ClassId {
        self.class_of[e.0]
    }

    pub fn class_graph(&self, g: &Graph) -> ClassGraph {
        let mut at_vertex: Vec<Vec<usize>> = vec![Vec::new(); g.vertex_count()];
        for (c, class) in self.classes.iter().enumerate() {
            for v in &class.vertices {
                at_vertex[v.0].push(c);
            }
        }
        let mut shared: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for list in &at_vertex {
            for (i, &a) in list.iter().enumerate() {
                for &b in &list[i + 1..] {
                    *shared.entry((a, b)).or_insert(0) += 1;
                }
            }
        }
        let mut adjacency = vec![Vec::new(); self.classes.len()];
        for ((a, b), count) in shared {
            adjacency[a].push((ClassId(b), count));
            adjacency[b].push((ClassId(a), count));
        }
        for list in adjacency.iter_mut() {
            list.sort_unstable();
        }
        ClassGraph { adjacency }
    }
}
