//! Graph storage: labels, canonical edge order, sorted adjacency lists.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::GraphError;

/// Dense vertex index (position in ascending label order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Dense edge index (position in canonical edge order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Undirected edge between two vertex labels, normalized to `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    #[inline]
    pub fn new(u: usize, v: usize) -> Self {
        if u <= v {
            Edge(u, v)
        } else {
            Edge(v, u)
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// Finite simple undirected graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<usize>,
    index: HashMap<usize, VertexId>,
    ends: Vec<(VertexId, VertexId)>, // first < second
    adj: Vec<Vec<(VertexId, EdgeId)>>, // sorted by neighbor
}

impl Graph {
    /// Build a graph from a vertex set and an edge list over those vertices.
    ///
    /// Duplicate edges collapse; self-loops and edges to missing vertices are errors.
    pub fn from_vertices_and_edges<V, E>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = usize>,
        E: IntoIterator<Item = (usize, usize)>,
    {
        let labels: Vec<usize> = vertices
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<usize, VertexId> = labels
            .iter()
            .enumerate()
            .map(|(i, &l)| (l, VertexId(i)))
            .collect();
        let mut canonical = BTreeSet::new();
        for (u, v) in edges {
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
            if !index.contains_key(&u) || !index.contains_key(&v) {
                return Err(GraphError::UnknownVertex { u, v });
            }
            canonical.insert(Edge::new(u, v));
        }
        let pairs = canonical
            .into_iter()
            .map(|Edge(u, v)| (index[&u], index[&v]))
            .collect();
        Ok(Self::assemble(labels, index, pairs))
    }

    /// Build a graph whose vertex set is exactly the edge endpoints.
    pub fn from_edges<E>(edges: E) -> Result<Self, GraphError>
    where
        E: IntoIterator<Item = (usize, usize)>,
    {
        let edges: Vec<(usize, usize)> = edges.into_iter().collect();
        let vertices: Vec<usize> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        Self::from_vertices_and_edges(vertices, edges)
    }

    /// Graph without edges.
    pub fn from_vertices<V: IntoIterator<Item = usize>>(vertices: V) -> Self {
        let labels: Vec<usize> = vertices
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, &l)| (l, VertexId(i)))
            .collect();
        Self::assemble(labels, index, Vec::new())
    }

    /// Copy of this graph where vertex `i` becomes label `new_index[i]`.
    ///
    /// `new_index` must be a permutation of `0..vertex_count()`.
    pub(crate) fn remapped(&self, new_index: &[usize]) -> Graph {
        let n = self.vertex_count();
        debug_assert_eq!(new_index.len(), n);
        let labels: Vec<usize> = (0..n).collect();
        let index = labels.iter().map(|&l| (l, VertexId(l))).collect();
        let mut pairs: Vec<(VertexId, VertexId)> = self
            .ends
            .iter()
            .map(|&(a, b)| {
                let (x, y) = (new_index[a.0], new_index[b.0]);
                (VertexId(x.min(y)), VertexId(x.max(y)))
            })
            .collect();
        pairs.sort_unstable();
        Self::assemble(labels, index, pairs)
    }

    fn assemble(
        labels: Vec<usize>,
        index: HashMap<usize, VertexId>,
        ends: Vec<(VertexId, VertexId)>,
    ) -> Self {
        let mut adj = vec![Vec::new(); labels.len()];
        for (i, &(a, b)) in ends.iter().enumerate() {
            adj[a.0].push((b, EdgeId(i)));
            adj[b.0].push((a, EdgeId(i)));
        }
        for list in adj.iter_mut() {
            list.sort_unstable();
        }
        Self {
            labels,
            index,
            ends,
            adj,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.ends.len()
    }

    /// Vertex labels in ascending order.
    pub fn vertex_list(&self) -> &[usize] {
        &self.labels
    }

    /// Edges as label pairs in canonical order.
    pub fn edge_list(&self) -> Vec<Edge> {
        (0..self.edge_count()).map(|i| self.edge(EdgeId(i))).collect()
    }

    #[inline]
    pub fn label(&self, v: VertexId) -> usize {
        self.labels[v.0]
    }

    pub fn vertex(&self, label: usize) -> Option<VertexId> {
        self.index.get(&label).copied()
    }

    #[inline]
    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        self.ends[e.0]
    }

    /// Edge `e` expressed in vertex labels.
    pub fn edge(&self, e: EdgeId) -> Edge {
        let (a, b) = self.ends[e.0];
        Edge::new(self.labels[a.0], self.labels[b.0])
    }

    /// Id of the edge between two labels, if present.
    pub fn edge_id(&self, edge: Edge) -> Option<EdgeId> {
        let a = self.vertex(edge.0)?;
        let b = self.vertex(edge.1)?;
        self.find_edge(a, b)
    }

    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let list = &self.adj[a.0];
        list.binary_search_by(|&(w, _)| w.cmp(&b))
            .ok()
            .map(|pos| list[pos].1)
    }

    /// Neighbors of `v` with the connecting edge, sorted by neighbor id.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, EdgeId)] {
        &self.adj[v.0]
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adj[v.0].len()
    }

    /// Connected components as sorted vertex lists, ordered by smallest vertex.
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let n = self.vertex_count();
        let mut seen = vec![false; n];
        let mut comps = Vec::new();
        for root in 0..n {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            let mut comp = vec![VertexId(root)];
            let mut queue = VecDeque::from([VertexId(root)]);
            while let Some(x) = queue.pop_front() {
                for &(y, _) in self.neighbors(x) {
                    if !seen[y.0] {
                        seen[y.0] = true;
                        comp.push(y);
                        queue.push_back(y);
                    }
                }
            }
            comp.sort_unstable();
            comps.push(comp);
        }
        comps
    }

    /// Integer whose binary expansion is the row-wise upper triangle of the
    /// adjacency matrix (diagonal excluded), vertices in label order.
    pub fn to_int(&self) -> Result<u128, GraphError> {
        let n = self.vertex_count();
        if n == 0 || self.adj.iter().any(|l| l.is_empty()) {
            return Err(GraphError::NoIntRepresentation);
        }
        if n * (n - 1) / 2 > 128 {
            return Err(GraphError::IntOverflow(n));
        }
        let mut value: u128 = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                value <<= 1;
                if self.find_edge(VertexId(i), VertexId(j)).is_some() {
                    value |= 1;
                }
            }
        }
        Ok(value)
    }

    /// Inverse of [`Graph::to_int`] on vertices `0..n` with the smallest fitting `n`.
    pub fn from_int(value: u128) -> Result<Self, GraphError> {
        if value == 0 {
            return Err(GraphError::NoIntRepresentation);
        }
        let bits = (128 - value.leading_zeros()) as usize;
        let mut n = 2;
        while n * (n - 1) / 2 < bits {
            n += 1;
        }
        let total = n * (n - 1) / 2;
        let mut edges = Vec::new();
        let mut pos = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if (value >> (total - 1 - pos)) & 1 == 1 {
                    edges.push((i, j));
                }
                pos += 1;
            }
        }
        Self::from_vertices_and_edges(0..n, edges)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        let edges: Vec<String> = self.edge_list().iter().map(|e| e.to_string()).collect();
        write!(
            f,
            "Graph with vertices [{}] and edges [{}]",
            vertices.join(", "),
            edges.join(", ")
        )
    }
}
