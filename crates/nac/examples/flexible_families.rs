//! Count NAC-colorings over the named graph families.
//!
//! Prints, per graph, the pre-check verdict, the number of colorings found by
//! the default subgraph search, and the first coloring when there is one. A
//! positive count means the graph has a flexible realization in the plane.
//!
//! Run: `cargo run -p nac --example flexible_families`

use std::time::Instant;

use nac::api::{families, is_rigid_2d, precheck, search_colorings, Graph, SearchCfg};

fn main() {
    let graphs: Vec<(&str, Graph)> = vec![
        ("C4", families::cycle(4)),
        ("K4", families::complete(4)),
        ("K3,3", families::complete_bipartite(3, 3)),
        ("K3,4", families::complete_bipartite(3, 4)),
        ("prism", families::three_prism()),
        ("prism+edge", families::three_prism_plus_edge()),
        ("min rigid", families::smallest_minimally_rigid()),
        ("cube+diag", families::cube_with_diagonal()),
        ("octahedral", families::octahedral()),
        ("grid 3x3", families::square_grid(3, 3)),
    ];
    let cfg = SearchCfg::default();
    for (name, g) in &graphs {
        let start = Instant::now();
        let mut found = search_colorings(g, &cfg).expect("default search config is valid");
        let first = found.next();
        let count = first.iter().count() + found.by_ref().count();
        let ms = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "{name:>11}: rigid={:<5} precheck={:<15} colorings={count:<4} classes={:<3} {ms:.2} ms",
            is_rigid_2d(g),
            precheck(g).to_string(),
            found.stats().classes,
        );
        if let Some(c) = first {
            println!("{:>13}red={:?}", "", c.red);
        }
    }
}
