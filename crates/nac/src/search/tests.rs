use std::collections::BTreeSet;

use super::*;
use crate::classes::ClassGranularity;
use crate::coloring::{is_nac_coloring, Coloring};
use crate::feasibility::Verdict;
use crate::graph::families::*;
use crate::graph::{Edge, Graph};
use crate::relabel::RelabelStrategy;

const ALGORITHMS: &[&str] = &[
    "naive",
    "cycles",
    "subgraphs",
    "subgraphs-linear-none-1",
    "subgraphs-linear-neighbors-4",
    "subgraphs-log-neighbors_degree-2",
    "subgraphs-score-neighbors-3",
    "subgraphs-shared_vertices-neighbors_degree-4",
    "subgraphs-log-none-64",
];

fn known_counts() -> Vec<(&'static str, Graph, usize)> {
    vec![
        ("path", path(3), 2),
        (
            "path_and_single_vertex",
            Graph::from_vertices_and_edges([0, 1, 2, 3], [(0, 1), (1, 2)]).unwrap(),
            2,
        ),
        ("cycle3", cycle(3), 0),
        ("cycle4", cycle(4), 6),
        ("cycle5", cycle(5), 20),
        ("complete5", complete(5), 0),
        ("bipartite1x3", complete_bipartite(1, 3), 6),
        (
            "bipartite1x3-improved",
            Graph::from_vertices_and_edges([0, 1, 2, 3], [(0, 1), (0, 2), (0, 3), (2, 3)]).unwrap(),
            2,
        ),
        ("bipartite1x4", complete_bipartite(1, 4), 14),
        (
            "bipartite1x4-improved",
            Graph::from_vertices_and_edges(0..5, [(0, 1), (0, 2), (0, 3), (0, 4), (3, 4)]).unwrap(),
            6,
        ),
        ("bipartite2x3", complete_bipartite(2, 3), 14),
        ("bipartite2x4", complete_bipartite(2, 4), 30),
        ("bipartite3x3", complete_bipartite(3, 3), 30),
        ("bipartite3x4", complete_bipartite(3, 4), 62),
        ("diamond", diamond(), 0),
        ("prism", three_prism(), 2),
        ("prismPlus", three_prism_plus_edge(), 0),
        ("minimallyRigid", smallest_minimally_rigid(), 2),
    ]
}

fn all(g: &Graph, cfg: &SearchCfg) -> BTreeSet<Coloring> {
    search_colorings(g, cfg).unwrap().collect()
}

fn with_algo(algo: &str) -> SearchCfg {
    SearchCfg::default().with_algorithm(algo.parse().unwrap())
}

#[test]
fn known_coloring_counts_for_every_algorithm() {
    for (name, g, expected) in known_counts() {
        for algo in ALGORITHMS {
            let found: Vec<Coloring> = nac_colorings(&g, algo).unwrap().collect();
            assert_eq!(found.len(), expected, "{name} with {algo}");
            let unique: BTreeSet<_> = found.iter().cloned().collect();
            assert_eq!(unique.len(), found.len(), "{name} with {algo}: duplicates");
            for coloring in &found {
                assert!(is_nac_coloring(&g, coloring), "{name} with {algo}: {coloring:?}");
            }
        }
    }
}

#[test]
fn single_and_has_coloring() {
    let cases = [
        (path(3), true),
        (cycle(3), false),
        (cycle(4), true),
        (cycle(5), true),
        (complete(5), false),
        (complete_bipartite(3, 4), true),
        (diamond(), false),
        (three_prism(), true),
        (three_prism_plus_edge(), false),
        (smallest_minimally_rigid(), true),
    ];
    let cfg = SearchCfg::default();
    for (g, expected) in cases {
        let first = single_nac_coloring(&g, &cfg).unwrap();
        assert_eq!(first.is_some(), expected, "{g}");
        assert_eq!(has_nac_coloring(&g, &cfg).unwrap(), expected, "{g}");
        if let Some(coloring) = first {
            assert!(is_nac_coloring(&g, &coloring));
        }
    }
}

#[test]
fn triangle_has_no_coloring() {
    let g = Graph::from_edges([(1, 2), (2, 3), (3, 1)]).unwrap();
    let mut found = search_colorings(&g, &SearchCfg::default()).unwrap();
    assert!(found.next().is_none());
    assert!(found.stats().exhausted);
    assert_eq!(found.stats().precheck, Some(Verdict::NoColoring));
    assert_eq!(found.stats().classes, 1);
}

#[test]
fn four_cycle_colorings() {
    let g = Graph::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)]).unwrap();
    let found = all(&g, &SearchCfg::default());
    let opposite = Coloring::new([Edge(1, 2), Edge(3, 4)], [Edge(2, 3), Edge(1, 4)]);
    assert!(found.contains(&opposite));
    assert!(found.contains(&opposite.swapped()));
    assert!(found.iter().all(|c| c.red.len() == 2 && c.blue.len() == 2));
    // the swap is a distinct coloring, so all three 2+2 splits appear twice
    assert_eq!(found.len(), 6);
}

#[test]
fn path_on_four_vertices_colors_freely() {
    let g = Graph::from_edges([(1, 2), (2, 3), (3, 4)]).unwrap();
    let mut found = search_colorings(&g, &SearchCfg::default()).unwrap();
    assert_eq!(found.by_ref().count(), 6);
    assert_eq!(found.stats().blocks, 3);
    assert_eq!(found.stats().precheck, Some(Verdict::ColoringExists));
    assert!(found.stats().exhausted);
}

#[test]
fn disjoint_triangles_color_one_each() {
    let g = disjoint_union(&complete(3), &complete(3));
    for algo in ALGORITHMS {
        for use_decompositions in [true, false] {
            let cfg = SearchCfg {
                use_decompositions,
                ..with_algo(algo)
            };
            let found = all(&g, &cfg);
            assert_eq!(found.len(), 2, "{algo} decompositions={use_decompositions}");
            for c in &found {
                let reds: BTreeSet<usize> = c.red.iter().flat_map(|e| [e.0, e.1]).collect();
                assert!(reds == BTreeSet::from([0, 1, 2]) || reds == BTreeSet::from([3, 4, 5]));
            }
        }
    }
}

#[test]
fn options_do_not_change_the_result_set() {
    let graphs = [
        complete_bipartite(3, 3),
        three_prism(),
        smallest_minimally_rigid(),
        square_grid(3, 3),
        three_prism_plus_triangle_on_side(),
    ];
    for g in &graphs {
        let reference = all(g, &with_algo("naive"));
        for granularity in [
            ClassGranularity::Edges,
            ClassGranularity::Triangles,
            ClassGranularity::Monochromatic,
        ] {
            for relabel in [RelabelStrategy::None, RelabelStrategy::Random, RelabelStrategy::Bfs] {
                for use_decompositions in [true, false] {
                    let cfg = SearchCfg {
                        granularity,
                        relabel,
                        use_decompositions,
                        use_precheck: false,
                        seed: Some(11),
                        ..SearchCfg::default()
                    };
                    assert_eq!(
                        all(g, &cfg),
                        reference,
                        "{g}: {granularity} {relabel} decompositions={use_decompositions}"
                    );
                }
            }
        }
    }
}

#[test]
fn seeds_do_not_change_the_result_set() {
    let g = complete_bipartite(2, 4);
    let reference = all(&g, &SearchCfg::default());
    for seed in [0, 1, 99, u64::MAX] {
        let cfg = SearchCfg {
            algorithm: "subgraphs-score-none-2".parse().unwrap(),
            relabel: RelabelStrategy::Random,
            seed: Some(seed),
            ..SearchCfg::default()
        };
        assert_eq!(all(&g, &cfg), reference, "seed {seed}");
    }
}

#[test]
fn result_budget_stops_early() {
    let g = complete_bipartite(3, 3);
    let cfg = SearchCfg {
        budget: Budget {
            time_limit_ms: None,
            max_results: Some(3),
        },
        ..SearchCfg::default()
    };
    let mut found = search_colorings(&g, &cfg).unwrap();
    assert_eq!(found.by_ref().count(), 3);
    assert!(!found.stats().exhausted);
    assert_eq!(found.stats().colorings, 3);
}

#[test]
fn result_budget_equal_to_the_total_still_exhausts() {
    // the prism has exactly two colorings
    let g = three_prism();
    for algo in ["cycles", "subgraphs"] {
        let cfg = SearchCfg {
            budget: Budget {
                time_limit_ms: None,
                max_results: Some(2),
            },
            ..with_algo(algo)
        };
        let mut found = search_colorings(&g, &cfg).unwrap();
        assert_eq!(found.by_ref().count(), 2);
        assert!(found.stats().exhausted, "{algo}");
    }
    let cfg = SearchCfg {
        budget: Budget {
            time_limit_ms: None,
            max_results: Some(1),
        },
        ..SearchCfg::default()
    };
    let mut found = search_colorings(&g, &cfg).unwrap();
    assert_eq!(found.by_ref().count(), 1);
    assert!(!found.stats().exhausted);
}

#[test]
fn spent_time_budget_is_not_a_negative_answer() {
    let g = complete_bipartite(3, 3);
    let cfg = SearchCfg {
        budget: Budget {
            time_limit_ms: Some(0),
            max_results: None,
        },
        ..SearchCfg::default()
    };
    let mut found = search_colorings(&g, &cfg).unwrap();
    assert!(found.next().is_none());
    assert!(!found.stats().exhausted);
}

#[test]
fn unlimited_search_reports_exhaustion_and_counters() {
    let g = complete_bipartite(3, 3);
    let mut found = search_colorings(&g, &with_algo("cycles")).unwrap();
    assert_eq!(found.by_ref().count(), 30);
    let stats = found.stats();
    assert!(stats.exhausted);
    assert_eq!(stats.colorings, 30);
    assert_eq!(stats.classes, 9);
    assert_eq!(stats.blocks, 1);
    assert_eq!(stats.units, 1);
    assert_eq!(stats.precheck, Some(Verdict::Undecided));
    assert!(stats.nac_checks > 0 && stats.nac_checks < 256);
    assert!(stats.cycle_mask_checks > 0);
}

#[test]
fn disabled_precheck_still_finds_nothing_on_a_triangle() {
    let cfg = SearchCfg {
        use_precheck: false,
        ..with_algo("naive")
    };
    let mut found = search_colorings(&complete(3), &cfg).unwrap();
    assert!(found.next().is_none());
    assert!(found.stats().exhausted);
    assert_eq!(found.stats().precheck, None);
}

#[test]
fn edgeless_and_empty_graphs() {
    let cfg = SearchCfg {
        use_precheck: false,
        ..SearchCfg::default()
    };
    for g in [Graph::from_vertices([]), Graph::from_vertices([4, 5]), complete(2)] {
        let mut found = search_colorings(&g, &cfg).unwrap();
        assert!(found.next().is_none(), "{g}");
        assert!(found.stats().exhausted);
    }
}

#[test]
fn direct_enumeration_rejects_large_blocks() {
    let g = cycle(65);
    let cfg = SearchCfg {
        granularity: ClassGranularity::Edges,
        ..with_algo("cycles")
    };
    assert_eq!(
        search_colorings(&g, &cfg).unwrap_err(),
        SearchError::TooManyClasses {
            classes: 65,
            limit: MAX_UNIT_CLASSES
        }
    );
    // units stay small, so the decomposition search accepts it
    let lazy = search_colorings(&g, &SearchCfg::default()).unwrap();
    assert_eq!(lazy.stats().classes, 65);
}

#[test]
fn first_coloring_of_a_longer_cycle() {
    let g = cycle(40);
    let mut found = search_colorings(&g, &SearchCfg::default()).unwrap();
    let first = found.next();
    assert!(first.is_some_and(|c| is_nac_coloring(&g, &c)));
    assert!(found.stats().units >= 10);
    assert!(found.stats().nac_checks < 200, "{:?}", found.stats());
}

#[test]
fn first_coloring_does_not_finish_other_blocks() {
    let single = complete_bipartite(3, 3);
    let mut full = search_colorings(&single, &with_algo("cycles")).unwrap();
    assert_eq!(full.by_ref().count(), 30);
    let full_checks = full.stats().nac_checks;

    let twice = disjoint_union(&single, &single);
    let mut found = search_colorings(&twice, &with_algo("cycles")).unwrap();
    assert_eq!(found.stats().nac_checks, 0);
    assert!(found.next().is_some());
    assert_eq!(found.stats().blocks, 2);
    assert!(
        found.stats().nac_checks < full_checks,
        "{} vs {full_checks}",
        found.stats().nac_checks
    );
}

#[test]
fn first_coloring_of_a_grid_is_cheaper_than_all() {
    let g = square_grid(4, 4);
    let mut all = search_colorings(&g, &SearchCfg::default()).unwrap();
    let total = all.by_ref().count();
    assert!(all.stats().exhausted);
    let full = all.stats().clone();

    let mut found = search_colorings(&g, &SearchCfg::default()).unwrap();
    assert!(found.next().is_some_and(|c| is_nac_coloring(&g, &c)));
    let first = found.stats();
    assert!(total > 1);
    assert!(first.nac_checks * 2 < full.nac_checks, "{first:?} vs {full:?}");
    assert!(first.cycle_mask_checks < full.cycle_mask_checks);
}

#[test]
fn algorithm_strings_parse_and_print() {
    assert_eq!("naive".parse::<Algorithm>().unwrap(), Algorithm::Naive);
    assert_eq!("cycles".parse::<Algorithm>().unwrap(), Algorithm::Cycles);
    assert_eq!(
        "subgraphs".parse::<Algorithm>().unwrap(),
        Algorithm::Subgraphs {
            merge: MergeStrategy::Log,
            split: SplitStrategy::NeighborsDegree,
            size: 4
        }
    );
    assert_eq!(
        "subgraphs-shared_vertices-neighbors_degree-12"
            .parse::<Algorithm>()
            .unwrap(),
        Algorithm::Subgraphs {
            merge: MergeStrategy::SharedVertices,
            split: SplitStrategy::NeighborsDegree,
            size: 12
        }
    );
    for algo in ALGORITHMS.iter().filter(|a| a.contains('-')) {
        assert_eq!(algo.parse::<Algorithm>().unwrap().to_string(), *algo);
    }
    assert_eq!(Algorithm::default().to_string(), "subgraphs-log-neighbors_degree-4");
}

#[test]
fn malformed_algorithm_strings_are_errors() {
    let err = |s: &str| s.parse::<Algorithm>().unwrap_err();
    assert_eq!(err("brute"), SearchError::UnknownAlgorithm("brute".into()));
    assert_eq!(err("subgraphs-log-4"), SearchError::UnknownAlgorithm("subgraphs-log-4".into()));
    assert_eq!(
        err("naive-linear-none-4"),
        SearchError::UnknownAlgorithm("naive-linear-none-4".into())
    );
    assert_eq!(
        err("subgraphs-random-none-4"),
        SearchError::UnknownMergeStrategy("random".into())
    );
    assert_eq!(
        err("subgraphs-log-cuts-4"),
        SearchError::UnknownSplitStrategy("cuts".into())
    );
    for size in ["0", "-3", "four", "1.5", ""] {
        let s = format!("subgraphs-log-none-{size}");
        assert!(
            matches!(
                s.parse::<Algorithm>(),
                Err(SearchError::InvalidSubgraphSize(_)) | Err(SearchError::UnknownAlgorithm(_))
            ),
            "{s}"
        );
    }
    assert_eq!(
        err("subgraphs-log-none-0"),
        SearchError::InvalidSubgraphSize("0".into())
    );
    assert!(nac_colorings(&cycle(4), "subgraphs-log-none-x").is_err());
}

#[test]
fn sizes_above_the_unit_limit_are_capped() {
    let algo: Algorithm = "subgraphs-linear-neighbors-100".parse().unwrap();
    assert_eq!(algo.to_string(), "subgraphs-linear-neighbors-100");

    // 70 edge classes: one unit of 64 and one of 6
    let g = cycle(70);
    let cfg = SearchCfg {
        granularity: ClassGranularity::Edges,
        budget: Budget {
            time_limit_ms: None,
            max_results: Some(5),
        },
        ..SearchCfg::default().with_algorithm(algo)
    };
    let mut found = search_colorings(&g, &cfg).unwrap();
    let first: Vec<Coloring> = found.by_ref().collect();
    assert_eq!(first.len(), 5);
    assert!(first.iter().all(|c| is_nac_coloring(&g, c)));
    assert_eq!(found.stats().units, 2);
}

#[test]
fn config_round_trips_through_json() {
    let cfg: SearchCfg = serde_json::from_str(
        r#"{
            "algorithm": "subgraphs-score-neighbors-6",
            "relabel": "bfs",
            "granularity": "TRIANGLES",
            "seed": 5
        }"#,
    )
    .unwrap();
    assert_eq!(
        cfg.algorithm,
        Algorithm::Subgraphs {
            merge: MergeStrategy::Score,
            split: SplitStrategy::Neighbors,
            size: 6
        }
    );
    assert_eq!(cfg.relabel, RelabelStrategy::Bfs);
    assert_eq!(cfg.granularity, ClassGranularity::Triangles);
    assert!(cfg.use_decompositions && cfg.use_precheck);
    assert_eq!(cfg.budget, Budget::default());

    let json = serde_json::to_string(&cfg).unwrap();
    let back: SearchCfg = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);

    let bad = serde_json::from_str::<SearchCfg>(r#"{"algorithm": "subgraphs-log-none-0"}"#);
    assert!(bad.is_err());
}
