use super::*;
use crate::graph::families::*;

fn rigid() -> Vec<Graph> {
    vec![
        complete(2),
        complete(3),
        complete(4),
        complete_bipartite(3, 3),
        complete_bipartite(3, 4),
        complete_bipartite(4, 4),
        diamond(),
        k33_plus_edge(),
        three_prism(),
        three_prism_plus_edge(),
    ]
}

fn flexible() -> Vec<Graph> {
    vec![
        complete_bipartite(1, 3),
        complete_bipartite(2, 3),
        cycle(4),
        cycle(5),
        path(3),
        path(4),
    ]
}

#[test]
fn rigidity_in_the_plane() {
    for g in rigid() {
        assert!(is_rigid_2d(&g), "{g}");
    }
    for g in flexible() {
        assert!(!is_rigid_2d(&g), "{g}");
    }
}

#[test]
fn two_three_sparsity() {
    let sparse = [
        complete_bipartite(1, 3),
        complete_bipartite(2, 3),
        complete_bipartite(3, 3),
        complete(2),
        complete(3),
        cycle(4),
        cycle(5),
        diamond(),
        path(3),
        path(4),
        three_prism(),
    ];
    for g in &sparse {
        assert!(is_sparse(g, 2, 3).unwrap(), "{g}");
    }
    let dense = [
        complete(4),
        complete_bipartite(3, 4),
        complete_bipartite(4, 4),
        k33_plus_edge(),
        three_prism_plus_edge(),
    ];
    for g in &dense {
        assert!(!is_sparse(g, 2, 3).unwrap(), "{g}");
    }
}

#[test]
fn tightness_matches_minimal_rigidity() {
    let tight = [
        complete(2),
        complete(3),
        complete_bipartite(3, 3),
        diamond(),
        three_prism(),
        smallest_minimally_rigid(),
    ];
    for g in &tight {
        assert!(is_tight(g, 2, 3).unwrap(), "{g}");
        assert!(is_minimally_rigid_2d(g), "{g}");
    }
    let loose = [
        complete(4),
        complete_bipartite(1, 3),
        complete_bipartite(2, 3),
        complete_bipartite(3, 4),
        cycle(4),
        cycle(5),
        k33_plus_edge(),
        path(3),
        three_prism_plus_edge(),
    ];
    for g in &loose {
        assert!(!is_tight(g, 2, 3).unwrap(), "{g}");
        assert!(!is_minimally_rigid_2d(g), "{g}");
    }
}

#[test]
fn other_sparsity_parameters() {
    // (1,1)-sparse means forest
    assert!(is_sparse(&path(5), 1, 1).unwrap());
    assert!(is_tight(&path(5), 1, 1).unwrap());
    assert!(!is_sparse(&cycle(5), 1, 1).unwrap());
    // (1,0): at most one cycle per component
    assert!(is_tight(&cycle(5), 1, 0).unwrap());
    assert_eq!(sparsity_rank(&complete(4), 1, 1).unwrap(), 3);
}

#[test]
fn invalid_pebble_parameters() {
    assert!(matches!(
        PebbleGame::new(3, 0, 0),
        Err(FeasibilityError::InvalidPebbleParams { k: 0, .. })
    ));
    assert!(PebbleGame::new(3, 2, 4).is_err());
    assert!(PebbleGame::new(3, 2, 3).is_ok());
    assert!(is_sparse(&path(3), 1, 2).is_err());
}

#[test]
fn precheck_verdicts() {
    assert_eq!(precheck(&Graph::from_vertices([])), Verdict::NoColoring);
    assert_eq!(precheck(&complete(2)), Verdict::NoColoring);
    assert_eq!(precheck(&Graph::from_vertices(0..4)), Verdict::NoColoring);
    assert_eq!(precheck(&complete(3)), Verdict::NoColoring);
    assert_eq!(precheck(&complete(5)), Verdict::NoColoring);
    assert_eq!(precheck(&diamond()), Verdict::NoColoring);
    assert_eq!(precheck(&three_prism_plus_edge()), Verdict::NoColoring);

    assert_eq!(precheck(&path(3)), Verdict::ColoringExists);
    assert_eq!(precheck(&cycle(4)), Verdict::ColoringExists);
    assert_eq!(precheck(&complete_bipartite(2, 3)), Verdict::ColoringExists);
    assert_eq!(
        precheck(&disjoint_union(&complete(3), &complete(3))),
        Verdict::ColoringExists
    );

    // rigid graphs stay open, whether or not they have colorings
    assert_eq!(precheck(&three_prism()), Verdict::Undecided);
    assert_eq!(precheck(&complete_bipartite(3, 3)), Verdict::Undecided);
    assert_eq!(precheck(&smallest_minimally_rigid()), Verdict::Undecided);
    // isolated vertices do not make a rigid block flexible
    let lonely = disjoint_union(&three_prism(), &Graph::from_vertices([0]));
    assert_eq!(precheck(&lonely), Verdict::Undecided);
}

#[test]
fn verdict_serializes_as_snake_case() {
    let json = serde_json::to_string(&Verdict::ColoringExists).unwrap();
    assert_eq!(json, "\"coloring_exists\"");
    assert_eq!(Verdict::Undecided.to_string(), "undecided");
}
