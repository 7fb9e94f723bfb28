//! Biconnected components (blocks) and articulation points.
//!
//! Iterative Tarjan lowpoint search with an edge stack, so deep paths do not
//! grow the call stack. Every edge lands in exactly one block; a cycle never
//! leaves its block.

use super::types::{EdgeId, Graph, VertexId};

/// Edge partition into blocks plus the cut vertices between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blocks {
    /// Sorted edge lists, ordered by smallest edge id.
    pub blocks: Vec<Vec<EdgeId>>,
    /// Sorted articulation points.
    pub articulation_points: Vec<VertexId>,
}

pub fn biconnected_components(g: &Graph) -> Blocks {
    let n = g.vertex_count();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut is_cut = vec![false; n];
    let mut time = 0usize;
    let mut edge_stack: Vec<EdgeId> = Vec::new();
    let mut blocks = Vec::new();

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        let mut root_children = 0usize;
        // (vertex, edge to parent, next neighbor position)
        let mut stack: Vec<(usize, Option<EdgeId>, usize)> = vec![(root, None, 0)];
        while let Some(&(x, parent_edge, pos)) = stack.last() {
            let nbrs = g.neighbors(VertexId(x));
            if pos < nbrs.len() {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                let (y, f) = nbrs[pos];
                if Some(f) == parent_edge {
                    continue;
                }
                if disc[y.0] == usize::MAX {
                    edge_stack.push(f);
                    disc[y.0] = time;
                    low[y.0] = time;
                    time += 1;
                    if x == root {
                        root_children += 1;
                    }
                    stack.push((y.0, Some(f), 0));
                } else if disc[y.0] < disc[x] {
                    edge_stack.push(f);
                    low[x] = low[x].min(disc[y.0]);
                }
                continue;
            }
            stack.pop();
            let (Some(&(p, _, _)), Some(tree_edge)) = (stack.last(), parent_edge) else {
                continue;
            };
            low[p] = low[p].min(low[x]);
            if low[x] >= disc[p] {
                if p != root {
                    is_cut[p] = true;
                }
                let mut block = Vec::new();
                while let Some(f) = edge_stack.pop() {
                    block.push(f);
                    if f == tree_edge {
                        break;
                    }
                }
                block.sort_unstable();
                blocks.push(block);
            }
        }
        if root_children > 1 {
            is_cut[root] = true;
        }
    }

    blocks.sort_by_key(|b: &Vec<EdgeId>| b[0]);
    Blocks {
        blocks,
        articulation_points: (0..n).filter(|&v| is_cut[v]).map(VertexId).collect(),
    }
}
