//! `(k, l)` pebble game on a directed multigraph.
//!
//! Every vertex starts with `k` pebbles. An edge `uv` is independent when
//! `l + 1` pebbles can be gathered on `u` and `v`; it is then oriented away
//! from a vertex that pays one pebble. Pebbles are gathered by reversing a
//! directed path to a vertex that still holds one.

use crate::graph::{EdgeId, Graph};

use super::FeasibilityError;

#[derive(Clone, Debug)]
pub struct PebbleGame {
    k: usize,
    l: usize,
    pebbles: Vec<usize>,
    out: Vec<Vec<usize>>,
    accepted: usize,
}

impl PebbleGame {
    /// Requires `0 < k` and `l < 2k`.
    pub fn new(vertices: usize, k: usize, l: usize) -> Result<Self, FeasibilityError> {
        if k == 0 {
            return Err(FeasibilityError::InvalidPebbleParams {
                k,
                l,
                reason: "K must be positive",
            });
        }
        if l >= 2 * k {
            return Err(FeasibilityError::InvalidPebbleParams {
                k,
                l,
                reason: "L < 2K must hold",
            });
        }
        Ok(Self {
            k,
            l,
            pebbles: vec![k; vertices],
            out: vec![Vec::new(); vertices],
            accepted: 0,
        })
    }

    /// Number of independent edges accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Try to add `uv`; returns whether it was independent.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        while self.pebbles[u] + self.pebbles[v] < self.l + 1 {
            if !self.gather(u, v) && !self.gather(v, u) {
                return false;
            }
        }
        if self.pebbles[u] > 0 {
            self.pebbles[u] -= 1;
            self.out[u].push(v);
        } else {
            self.pebbles[v] -= 1;
            self.out[v].push(u);
        }
        self.accepted += 1;
        true
    }

    /// Move one pebble to `root` along a reversed path, never touching `keep`.
    fn gather(&mut self, root: usize, keep: usize) -> bool {
        if self.pebbles[root] >= self.k {
            return false;
        }
        let n = self.pebbles.len();
        let mut from: Vec<Option<usize>> = vec![None; n];
        let mut seen = vec![false; n];
        seen[root] = true;
        seen[keep] = true;
        let mut stack = vec![root];
        let mut found = None;
        while let Some(x) = stack.pop() {
            if x != root && self.pebbles[x] > 0 {
                found = Some(x);
                break;
            }
            for &y in &self.out[x] {
                if !seen[y] {
                    seen[y] = true;
                    from[y] = Some(x);
                    stack.push(y);
                }
            }
        }
        let Some(target) = found else {
            return false;
        };
        self.pebbles[target] -= 1;
        let mut y = target;
        while let Some(x) = from[y] {
            // reverse x -> y into y -> x
            if let Some(pos) = self.out[x].iter().position(|&w| w == y) {
                self.out[x].swap_remove(pos);
            }
            self.out[y].push(x);
            y = x;
        }
        self.pebbles[root] += 1;
        true
    }
}

/// Size of a maximal `(k, l)`-sparse edge subset (rank of the sparsity matroid).
pub fn sparsity_rank(g: &Graph, k: usize, l: usize) -> Result<usize, FeasibilityError> {
    let mut game = PebbleGame::new(g.vertex_count(), k, l)?;
    for e in 0..g.edge_count() {
        let (a, b) = g.endpoints(EdgeId(e));
        game.add_edge(a.0, b.0);
    }
    Ok(game.accepted())
}

/// Every subgraph on `n'` vertices has at most `k n' - l` edges.
pub fn is_sparse(g: &Graph, k: usize, l: usize) -> Result<bool, FeasibilityError> {
    Ok(sparsity_rank(g, k, l)? == g.edge_count())
}

/// Sparse with exactly `k n - l` edges.
pub fn is_tight(g: &Graph, k: usize, l: usize) -> Result<bool, FeasibilityError> {
    let target = (k * g.vertex_count()).checked_sub(l);
    Ok(is_sparse(g, k, l)? && target == Some(g.edge_count()))
}

/// Generic rigidity in the plane: the (2,3) rank reaches `2n - 3`.
pub fn is_rigid_2d(g: &Graph) -> bool {
    let n = g.vertex_count();
    if n <= 1 {
        return true;
    }
    sparsity_rank(g, 2, 3).is_ok_and(|rank| rank == 2 * n - 3)
}

/// Rigid with no redundant edge, i.e. (2,3)-tight.
pub fn is_minimally_rigid_2d(g: &Graph) -> bool {
    let n = g.vertex_count();
    if n <= 1 {
        return g.edge_count() == 0;
    }
    is_tight(g, 2, 3).unwrap_or(false)
}
