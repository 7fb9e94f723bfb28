//! Cycle primitives. Cycles are returned as edge-id lists.

use std::collections::{BTreeSet, VecDeque};

use super::types::{EdgeId, Graph, VertexId};

/// All triangles, each reported once as its three edge ids.
pub fn triangles(g: &Graph) -> Vec<[EdgeId; 3]> {
    let mut out = Vec::new();
    for e in 0..g.edge_count() {
        let (u, v) = g.endpoints(EdgeId(e));
        for &(w, uw) in g.neighbors(u) {
            if w <= v {
                continue;
            }
            if let Some(vw) = g.find_edge(v, w) {
                out.push([EdgeId(e), uw, vw]);
            }
        }
    }
    out
}

/// Shortest cycles through `e`, i.e. shortest `u`-`v` paths in `G - e` closed by `e`.
///
/// At most `cap` cycles are returned; the first edge of every cycle is `e`.
pub fn shortest_cycles_through(g: &Graph, e: EdgeId, cap: usize) -> Vec<Vec<EdgeId>> {
    let (u, v) = g.endpoints(e);
    let n = g.vertex_count();
    let mut dist = vec![usize::MAX; n];
    let mut preds: Vec<Vec<(VertexId, EdgeId)>> = vec![Vec::new(); n];
    let mut queue = VecDeque::from([u]);
    dist[u.0] = 0;
    while let Some(x) = queue.pop_front() {
        if dist[v.0] != usize::MAX && dist[x.0] >= dist[v.0] {
            break;
        }
        for &(y, f) in g.neighbors(x) {
            if f == e {
                continue;
            }
            if dist[y.0] == usize::MAX {
                dist[y.0] = dist[x.0] + 1;
                preds[y.0].push((x, f));
                queue.push_back(y);
            } else if dist[y.0] == dist[x.0] + 1 {
                preds[y.0].push((x, f));
            }
        }
    }
    let mut cycles = Vec::new();
    if dist[v.0] == usize::MAX || cap == 0 {
        return cycles;
    }
    let mut path = vec![e];
    walk_back(v, u, &preds, &mut path, &mut cycles, cap);
    cycles
}

fn walk_back(
    cur: VertexId,
    target: VertexId,
    preds: &[Vec<(VertexId, EdgeId)>],
    path: &mut Vec<EdgeId>,
    out: &mut Vec<Vec<EdgeId>>,
    cap: usize,
) {
    if cur == target {
        out.push(path.clone());
        return;
    }
    for &(prev, f) in &preds[cur.0] {
        if out.len() >= cap {
            return;
        }
        path.push(f);
        walk_back(prev, target, preds, path, out, cap);
        path.pop();
    }
}

/// Fundamental cycles of a BFS spanning forest (one per non-tree edge).
pub fn fundamental_cycles(g: &Graph) -> Vec<Vec<EdgeId>> {
    let n = g.vertex_count();
    let mut parent: Vec<Option<(VertexId, EdgeId)>> = vec![None; n];
    let mut depth = vec![usize::MAX; n];
    let mut in_tree = vec![false; g.edge_count()];
    for root in 0..n {
        if depth[root] != usize::MAX {
            continue;
        }
        depth[root] = 0;
        let mut queue = VecDeque::from([VertexId(root)]);
        while let Some(x) = queue.pop_front() {
            for &(y, f) in g.neighbors(x) {
                if depth[y.0] == usize::MAX {
                    depth[y.0] = depth[x.0] + 1;
                    parent[y.0] = Some((x, f));
                    in_tree[f.0] = true;
                    queue.push_back(y);
                }
            }
        }
    }

    let mut cycles = Vec::new();
    for (i, &tree) in in_tree.iter().enumerate() {
        if tree {
            continue;
        }
        let (mut a, mut b) = g.endpoints(EdgeId(i));
        let mut cycle = vec![EdgeId(i)];
        let mut tail = Vec::new();
        while a != b {
            if depth[a.0] >= depth[b.0] {
                let (p, f) = parent[a.0].expect("non-root vertex has a BFS parent");
                cycle.push(f);
                a = p;
            } else {
                let (p, f) = parent[b.0].expect("non-root vertex has a BFS parent");
                tail.push(f);
                b = p;
            }
        }
        cycle.extend(tail.into_iter().rev());
        cycles.push(cycle);
    }
    cycles
}

/// Pruning cycles for the search: every shortest cycle through each edge
/// (capped per edge) plus the fundamental cycles, deduplicated by edge set.
pub fn cycle_candidates(g: &Graph, cap_per_edge: usize) -> Vec<Vec<EdgeId>> {
    let mut seen: BTreeSet<Vec<EdgeId>> = BTreeSet::new();
    let mut out = Vec::new();
    let mut push = |cycle: Vec<EdgeId>| {
        let mut key = cycle.clone();
        key.sort_unstable();
        if seen.insert(key) {
            out.push(cycle);
        }
    };
    for e in 0..g.edge_count() {
        for cycle in shortest_cycles_through(g, EdgeId(e), cap_per_edge) {
            push(cycle);
        }
    }
    for cycle in fundamental_cycles(g) {
        push(cycle);
    }
    out.sort_by_key(|c| c.len());
    out
}

/// Every simple cycle of the graph. Exponential; meant for small graphs.
pub fn simple_cycles(g: &Graph) -> Vec<Vec<EdgeId>> {
    let n = g.vertex_count();
    let mut out = Vec::new();
    for start in 0..n {
        let mut on_path = vec![false; n];
        on_path[start] = true;
        let mut verts = vec![VertexId(start)];
        let mut edges = Vec::new();
        extend_cycles(g, start, &mut on_path, &mut verts, &mut edges, &mut out);
    }
    out
}

fn extend_cycles(
    g: &Graph,
    start: usize,
    on_path: &mut [bool],
    verts: &mut Vec<VertexId>,
    edges: &mut Vec<EdgeId>,
    out: &mut Vec<Vec<EdgeId>>,
) {
    let cur = *verts.last().expect("path is never empty");
    for &(y, f) in g.neighbors(cur) {
        if y.0 == start && edges.len() >= 2 {
            // each cycle is found in both directions; keep one
            if verts[1] < verts[verts.len() - 1] {
                let mut cycle = edges.clone();
                cycle.push(f);
                out.push(cycle);
            }
            continue;
        }
        if y.0 <= start || on_path[y.0] {
            continue;
        }
        on_path[y.0] = true;
        verts.push(y);
        edges.push(f);
        extend_cycles(g, start, on_path, verts, edges, out);
        edges.pop();
        verts.pop();
        on_path[y.0] = false;
    }
}
