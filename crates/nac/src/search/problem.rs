//! Class-level view of one block.
//!
//! Classes are renumbered `0..k` inside the block ("local" indices); all
//! bitsets, masks and units of the block use local indices. `classes[i]` maps
//! back to the global class id.

use crate::classes::{ClassGraph, ClassId, ClassPartition};
use crate::coloring::{ClassBits, CycleMask, EdgeSubgraph};
use crate::graph::{EdgeId, Graph};

#[derive(Clone, Debug)]
pub(crate) struct BlockProblem {
    /// Local index -> global class.
    pub(crate) classes: Vec<ClassId>,
    pub(crate) class_edges: Vec<Vec<EdgeId>>,
    /// Sorted vertex indices touched by each class.
    pub(crate) class_vertices: Vec<Vec<usize>>,
    /// Local class graph: `(neighbor, shared vertices)`, sorted by neighbor.
    pub(crate) adjacency: Vec<Vec<(usize, usize)>>,
    /// Non-trivial pruning cycles, over local indices.
    pub(crate) cycles: Vec<CycleMask>,
}

impl BlockProblem {
    /// `block_classes` lists the global classes of the block, ascending;
    /// `cycles` are edge cycles of the whole graph (those leaving the block
    /// are ignored).
    pub(crate) fn build(
        partition: &ClassPartition,
        class_graph: &ClassGraph,
        block_classes: &[ClassId],
        cycles: &[Vec<EdgeId>],
    ) -> Self {
        let mut local = vec![None; partition.len()];
        for (i, c) in block_classes.iter().enumerate() {
            local[c.0] = Some(i);
        }
        let class_edges: Vec<Vec<EdgeId>> = block_classes
            .iter()
            .map(|c| partition.classes[c.0].edges.clone())
            .collect();
        let class_vertices: Vec<Vec<usize>> = block_classes
            .iter()
            .map(|c| partition.classes[c.0].vertices.iter().map(|v| v.0).collect())
            .collect();

        let mut adjacency = vec![Vec::new(); block_classes.len()];
        for (i, c) in block_classes.iter().enumerate() {
            for &(other, shared) in &class_graph.adjacency[c.0] {
                if let Some(j) = local[other.0] {
                    adjacency[i].push((j, shared));
                }
            }
        }

        let cycles = cycles
            .iter()
            .filter_map(|cycle| {
                let classes: Option<Vec<usize>> = cycle
                    .iter()
                    .map(|&e| local[partition.class_of(e).0])
                    .collect();
                classes.map(CycleMask::from_classes)
            })
            .filter(|mask| !mask.is_trivial())
            .collect();

        Self {
            classes: block_classes.to_vec(),
            class_edges,
            class_vertices,
            adjacency,
            cycles,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.class_edges.iter().map(Vec::len).sum()
    }

    pub(crate) fn degree(&self, class: usize) -> usize {
        self.adjacency[class].len()
    }

    /// Bitset of the given local classes.
    pub(crate) fn support(&self, members: &[usize]) -> ClassBits {
        let mut bits = ClassBits::new(self.len());
        for &m in members {
            bits.insert(m);
        }
        bits
    }

    /// Edge subgraph spanned by `members`, edges tagged with local class index.
    pub(crate) fn subgraph(&self, g: &Graph, members: &[usize]) -> EdgeSubgraph {
        EdgeSubgraph::new(
            g,
            members
                .iter()
                .flat_map(|&m| self.class_edges[m].iter().map(move |&e| (e, m))),
        )
    }

    /// Sorted, deduplicated vertices touched by `members`.
    pub(crate) fn vertices_of(&self, members: &[usize]) -> Vec<usize> {
        let mut out: Vec<usize> = members
            .iter()
            .flat_map(|&m| self.class_vertices[m].iter().copied())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Number of common elements of two sorted slices.
pub(crate) fn shared_count(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}
