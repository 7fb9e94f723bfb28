//! Named graph families used across tests, benches and the CLI.
//!
//! Vertices are `0..n`; edge lists follow the usual drawings in rigidity
//! theory papers.

use super::types::Graph;

fn build(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Graph {
    Graph::from_vertices_and_edges(0..n, edges).expect("family edges stay within 0..n")
}

/// Path on `n` vertices.
pub fn path(n: usize) -> Graph {
    build(n, (1..n).map(|i| (i - 1, i)))
}

/// Cycle on `n >= 3` vertices.
pub fn cycle(n: usize) -> Graph {
    assert!(n >= 3, "a cycle needs at least three vertices");
    build(n, (0..n).map(|i| (i, (i + 1) % n)))
}

pub fn complete(n: usize) -> Graph {
    build(n, (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
}

/// `K_{m,n}` with parts `0..m` and `m..m+n`.
pub fn complete_bipartite(m: usize, n: usize) -> Graph {
    build(m + n, (0..m).flat_map(|i| (m..m + n).map(move |j| (i, j))))
}

/// `K_n` minus the edge `01`.
pub fn complete_minus_one(n: usize) -> Graph {
    build(
        n,
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&e| e != (0, 1)),
    )
}

/// `K_4` minus an edge.
pub fn diamond() -> Graph {
    build(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)])
}

pub fn k33_plus_edge() -> Graph {
    let mut edges: Vec<(usize, usize)> = (0..3).flat_map(|i| (3..6).map(move |j| (i, j))).collect();
    edges.push((0, 1));
    build(6, edges)
}

pub fn three_prism() -> Graph {
    build(
        6,
        [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (0, 3), (1, 4), (2, 5)],
    )
}

pub fn three_prism_plus_edge() -> Graph {
    build(
        6,
        [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (0, 3), (1, 4), (2, 5), (0, 5)],
    )
}

/// Three-prism with an extra triangle hanging on the connecting edge `03`.
pub fn three_prism_plus_triangle_on_side() -> Graph {
    build(
        7,
        [
            (0, 1),
            (1, 2),
            (0, 2),
            (3, 4),
            (4, 5),
            (3, 5),
            (0, 3),
            (1, 4),
            (2, 5),
            (0, 6),
            (3, 6),
        ],
    )
}

/// Diamond with a zero extension on the opposite spikes `1` and `3`.
pub fn smallest_minimally_rigid() -> Graph {
    build(5, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 4), (3, 4)])
}

/// Cube skeleton with the main diagonal `06`.
pub fn cube_with_diagonal() -> Graph {
    build(
        8,
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (0, 3),
            (4, 5),
            (5, 6),
            (6, 7),
            (4, 7),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
            (0, 6),
        ],
    )
}

pub fn octahedral() -> Graph {
    build(
        6,
        [
            (0, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 2),
            (1, 3),
            (1, 4),
            (1, 5),
            (2, 4),
            (2, 5),
            (3, 4),
            (3, 5),
        ],
    )
}

/// Square grid with `w` vertices per row and `h` rows, numbered row by row.
pub fn square_grid(w: usize, h: usize) -> Graph {
    let mut edges = Vec::new();
    for r in 0..h {
        let offset = r * w;
        for c in offset..offset + w.saturating_sub(1) {
            edges.push((c, c + 1));
        }
        if r > 0 {
            for c in offset..offset + w {
                edges.push((c - w, c));
            }
        }
    }
    build(w * h, edges)
}

/// Disjoint union; the second graph's labels are shifted past the first's.
pub fn disjoint_union(a: &Graph, b: &Graph) -> Graph {
    let shift = a.vertex_list().iter().max().map_or(0, |m| m + 1);
    let vertices = a
        .vertex_list()
        .iter()
        .copied()
        .chain(b.vertex_list().iter().map(|v| v + shift));
    let edges = a
        .edge_list()
        .into_iter()
        .map(|e| (e.0, e.1))
        .chain(b.edge_list().into_iter().map(|e| (e.0 + shift, e.1 + shift)));
    Graph::from_vertices_and_edges(vertices, edges).expect("union of valid graphs is valid")
}
