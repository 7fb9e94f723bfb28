//! Graph inputs for the CLI: named families or JSON edge lists.

use anyhow::{bail, Context, Result};
use nac::api::{families, Graph};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk graph: `{"vertices": [..], "edges": [[u, v], ..]}`.
/// `vertices` may be omitted when every vertex has an edge.
#[derive(Debug, Deserialize)]
struct GraphFile {
    #[serde(default)]
    vertices: Vec<usize>,
    edges: Vec<(usize, usize)>,
}

/// Resolve a graph spec: a family like `cycle:5` or `bipartite:3,4`, or a
/// path to a JSON file.
pub fn load(spec: &str) -> Result<Graph> {
    if spec.ends_with(".json") {
        return load_file(Path::new(spec));
    }
    let (name, args) = spec.split_once(':').unwrap_or((spec, ""));
    let nums = || -> Result<Vec<usize>> {
        args.split([',', 'x'])
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .with_context(|| format!("bad number `{s}` in graph spec `{spec}`"))
            })
            .collect()
    };
    let graph = match (name, nums()?.as_slice()) {
        ("path", [n]) => families::path(*n),
        ("cycle", [n]) if *n >= 3 => families::cycle(*n),
        ("complete", [n]) => families::complete(*n),
        ("complete_minus_one", [n]) if *n >= 2 => families::complete_minus_one(*n),
        ("bipartite", [m, n]) => families::complete_bipartite(*m, *n),
        ("grid", [w, h]) => families::square_grid(*w, *h),
        ("diamond", []) => families::diamond(),
        ("prism", []) => families::three_prism(),
        ("prism_plus_edge", []) => families::three_prism_plus_edge(),
        ("prism_plus_triangle", []) => families::three_prism_plus_triangle_on_side(),
        ("k33_plus_edge", []) => families::k33_plus_edge(),
        ("minimally_rigid", []) => families::smallest_minimally_rigid(),
        ("cube_with_diagonal", []) => families::cube_with_diagonal(),
        ("octahedral", []) => families::octahedral(),
        _ => bail!(
            "unknown graph spec `{spec}` (try cycle:N, path:N, complete:N, bipartite:M,N, grid:WxH, prism, or a .json file)"
        ),
    };
    Ok(graph)
}

fn load_file(path: &Path) -> Result<Graph> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: GraphFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing graph JSON {}", path.display()))?;
    let vertices = file
        .vertices
        .into_iter()
        .chain(file.edges.iter().flat_map(|&(u, v)| [u, v]));
    Graph::from_vertices_and_edges(vertices, file.edges.iter().copied())
        .with_context(|| format!("building graph from {}", path.display()))
}
