use std::collections::BTreeMap;

use gamegen_test_support::tracing::RecordingLayer;
use proptest::prelude::*;
use rstest::rstest;
use test_strategy::Arbitrary;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use super::*;
use crate::test_utils::{edge_list, rng, sorted_neighbours, suite_proptest_config};

/// Registry entry selected by property tests, weighted towards the random
/// models.
#[derive(Clone, Copy, Debug, Arbitrary)]
enum Model {
    #[weight(3)]
    Uniform,
    #[weight(3)]
    Preferential,
    #[weight(2)]
    Plod,
    #[weight(3)]
    SmallWorld,
    Complete,
    Star,
    RingOfRings,
    Road,
    Tree,
    Grid,
    WrappedGrid,
}

impl Model {
    fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Preferential => "preferential",
            Self::Plod => "plod",
            Self::SmallWorld => "small-world",
            Self::Complete => "complete",
            Self::Star => "star",
            Self::RingOfRings => "ring-of-rings",
            Self::Road => "road",
            Self::Tree => "tree",
            Self::Grid => "grid",
            Self::WrappedGrid => "wrapped-grid",
        }
    }
}

fn generate(model: impl Into<Topology>, seed: u64) -> Generated {
    model
        .into()
        .generate(&mut rng(seed))
        .expect("validated models generate")
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn generated_graphs_honour_declared_policy(model in any::<Model>(), seed in any::<u64>()) {
        let mut rng = rng(seed);
        let topology = Topology::from_name(model.name(), &mut rng).expect("model is registered");
        prop_assert_eq!(topology.name(), model.name());
        let generated: Generated = topology.generate(&mut rng).expect("sampled models generate");
        prop_assert_eq!(generated.graph.node_count(), topology.node_count());
        prop_assert_eq!(generated.graph.policy(), topology.policy());
        prop_assert_eq!(generated.graph.check_policy(), Ok(()));
    }

    #[test]
    fn generation_is_reproducible_for_a_seed(model in any::<Model>(), seed in any::<u64>()) {
        let topology = Topology::from_name(model.name(), &mut rng(seed)).expect("model is registered");
        let first: Generated = topology.generate(&mut rng(seed ^ 1)).expect("generates");
        let second: Generated = topology.generate(&mut rng(seed ^ 1)).expect("generates");
        prop_assert_eq!(edge_list(&first.graph), edge_list(&second.graph));
        prop_assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn uniform_places_exactly_the_requested_edges(
        nodes in 2_usize..=12,
        symmetric in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let policy = EdgePolicy::new(symmetric, false);
        let edges = max_edges(nodes, policy).div_ceil(2);
        let generated = generate(UniformRandom::new(nodes, edges, policy).expect("valid"), seed);
        let factor = if symmetric { 2 } else { 1 };
        prop_assert_eq!(generated.graph.edge_count(), edges * factor);
        prop_assert!(generated.outcome.is_complete());
    }
}

#[rstest]
#[case(EdgePolicy::new(true, false), 6, 12)]
#[case(EdgePolicy::new(true, true), 10, 16)]
#[case(EdgePolicy::new(false, false), 12, 12)]
#[case(EdgePolicy::new(false, true), 16, 16)]
fn uniform_can_fill_every_admissible_slot(
    #[case] policy: EdgePolicy,
    #[case] edges: usize,
    #[case] directed_edges: usize,
) {
    let generated = generate(UniformRandom::new(4, edges, policy).expect("valid"), 11);
    assert_eq!(generated.graph.edge_count(), directed_edges);
    assert_eq!(generated.graph.check_policy(), Ok(()));
}

#[rstest]
#[case(EdgePolicy::new(true, false), 7, 6)]
#[case(EdgePolicy::new(false, true), 17, 16)]
fn uniform_rejects_impossible_edge_counts(
    #[case] policy: EdgePolicy,
    #[case] requested: usize,
    #[case] max: usize,
) {
    let err = UniformRandom::new(4, requested, policy).expect_err("too many edges");
    assert_eq!(err, GeneratorError::TooManyEdges { requested, max });
    assert_eq!(err.code(), GeneratorErrorCode::TooManyEdges);
}

#[test]
fn preferential_attachment_grows_a_heavy_tail() {
    let generated = generate(PreferentialAttachment::new(5, 1, 95).expect("valid"), 2024);
    let graph = &generated.graph;
    assert_eq!(graph.node_count(), 100);
    assert_eq!(graph.edge_count(), 2 * 95);
    for arrival in 5..100 {
        assert!(graph.degree(arrival) >= 1, "node {arrival} never attached");
    }

    let mut bins = BTreeMap::new();
    for node in 0..graph.node_count() {
        let degree = graph.degree(node);
        if degree > 0 {
            *bins.entry(degree.ilog2()).or_insert(0_usize) += 1;
        }
    }
    let counts: Vec<usize> = (0..4).map(|bin| bins.get(&bin).copied().unwrap_or(0)).collect();
    assert!(
        counts.windows(2).all(|pair| pair[0] >= pair[1]),
        "log-binned degree counts must not increase: {counts:?}"
    );
    let max_degree = (0..100).map(|node| graph.degree(node)).max().unwrap_or(0);
    assert!(max_degree >= 5, "expected a hub, max degree was {max_degree}");
}

#[test]
fn preferential_attachment_never_duplicates_edges() {
    let generated = generate(PreferentialAttachment::new(3, 3, 40).expect("valid"), 5);
    let mut edges = edge_list(&generated.graph);
    let total = edges.len();
    edges.sort_unstable();
    edges.dedup();
    assert_eq!(edges.len(), total);
    assert_eq!(generated.graph.check_policy(), Ok(()));
}

#[test]
fn plod_stops_early_when_the_budget_runs_out() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let model = PowerLawOutDegree::new(20, 190, true).expect("valid");

    let generated = tracing::subscriber::with_default(subscriber, || generate(model, 9));

    let GenerationOutcome::Partial { requested, produced } = generated.outcome else {
        panic!("expected a partial outcome, got {:?}", generated.outcome);
    };
    assert_eq!(requested, 190);
    assert!(produced < requested);
    assert_eq!(generated.graph.edge_count(), 2 * produced);
    assert_eq!(generated.graph.check_policy(), Ok(()));

    let warning = layer
        .events()
        .into_iter()
        .find(|event| event.level == Level::WARN)
        .expect("partial generation must warn");
    assert_eq!(warning.fields.get("requested").map(String::as_str), Some("190"));
    assert_eq!(
        warning.fields.get("produced"),
        Some(&produced.to_string())
    );
}

#[test]
fn plod_completes_with_a_generous_budget() {
    let model = PowerLawOutDegree::new(6, 30, false)
        .and_then(|model| model.with_alpha(1.0))
        .and_then(|model| model.with_beta(100_000.0))
        .expect("valid");
    let generated = generate(model, 17);
    assert!(generated.outcome.is_complete());
    assert_eq!(generated.graph.edge_count(), 30);
    assert_eq!(generated.graph.check_policy(), Ok(()));
}

#[rstest]
#[case::symmetric(true)]
#[case::directed(false)]
fn plod_with_sparse_budgets_on_a_large_graph_terminates(#[case] symmetric: bool) {
    let model = PowerLawOutDegree::new(5_000, 40, symmetric)
        .and_then(|model| model.with_beta(20.0))
        .expect("valid");
    let generated = generate(model, 23);
    let per_edge = if symmetric { 2 } else { 1 };
    let produced = match generated.outcome {
        GenerationOutcome::Complete => 40,
        GenerationOutcome::Partial { requested, produced } => {
            assert_eq!(requested, 40);
            produced
        }
    };
    assert_eq!(generated.graph.edge_count(), per_edge * produced);
    assert_eq!(generated.graph.check_policy(), Ok(()));
}

#[test]
fn small_world_without_rewiring_is_a_ring_lattice() {
    let generated = generate(SmallWorld::new(10, 2, 0.0).expect("valid"), 3);
    let graph = &generated.graph;
    assert_eq!(graph.edge_count(), 40);
    for node in 0..10 {
        let mut expected: Vec<usize> = [1, 2, 8, 9].iter().map(|offset| (node + offset) % 10).collect();
        expected.sort_unstable();
        assert_eq!(sorted_neighbours(graph, node), expected, "node {node}");
    }
}

#[test]
fn full_rewiring_replaces_every_lattice_edge() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let generated = tracing::subscriber::with_default(subscriber, || {
        generate(SmallWorld::new(30, 2, 1.0).expect("valid"), 8)
    });
    assert_eq!(generated.graph.edge_count(), 2 * 30 * 2);
    assert_eq!(generated.graph.check_policy(), Ok(()));

    let events = layer.events_at(Level::TRACE);
    let finished = events
        .iter()
        .find(|event| event.message() == Some("small-world rewiring finished"))
        .expect("rewiring summary recorded");
    assert_eq!(finished.fields.get("rewired").map(String::as_str), Some("60"));

    let field = |event: &gamegen_test_support::tracing::EventRecord, name: &str| {
        event.fields.get(name).cloned().unwrap_or_default()
    };
    let mut removed: Vec<(String, String)> = events
        .iter()
        .filter(|event| event.message() == Some("lattice edge rewired"))
        .map(|event| (field(event, "node"), field(event, "lattice_target")))
        .collect();
    removed.sort();
    let mut lattice: Vec<(String, String)> = (1..=2)
        .flat_map(|offset| (0..30).map(move |node| (node.to_string(), ((node + offset) % 30).to_string())))
        .collect();
    lattice.sort();
    assert_eq!(removed, lattice);
}

#[rstest]
#[case::complete(CompleteGraph::new(4).expect("valid").into(), 4, 12)]
#[case::complete_with_loops(CompleteGraph::new(4).expect("valid").with_self_loops(true).into(), 4, 16)]
#[case::star(StarGraph::new(5).expect("valid").into(), 5, 8)]
#[case::star_single(StarGraph::new(1).expect("valid").into(), 1, 0)]
#[case::rings(RingOfRings::new(3, 4).expect("valid").into(), 12, 30)]
#[case::rings_pair(RingOfRings::new(2, 3).expect("valid").into(), 6, 14)]
#[case::rings_single(RingOfRings::new(1, 1).expect("valid").into(), 1, 0)]
#[case::road_even(RoadGraph::new(6).expect("valid").into(), 6, 14)]
#[case::road_odd(RoadGraph::new(5).expect("valid").into(), 5, 10)]
#[case::tree(NAryTree::new(2, 3).expect("valid").into(), 7, 12)]
#[case::tree_root(NAryTree::new(3, 1).expect("valid").into(), 1, 0)]
#[case::path(NAryTree::new(1, 4).expect("valid").into(), 4, 6)]
#[case::grid(NDimensionalGrid::new(2, 3).expect("valid").into(), 9, 24)]
#[case::torus(NDimensionalGrid::wrapped(2, 3).expect("valid").into(), 9, 36)]
#[case::torus_side_two(NDimensionalGrid::wrapped(1, 2).expect("valid").into(), 2, 2)]
#[case::torus_side_one(NDimensionalGrid::wrapped(2, 1).expect("valid").into(), 1, 0)]
fn templates_have_expected_shape(
    #[case] topology: Topology,
    #[case] nodes: usize,
    #[case] directed_edges: usize,
) {
    let generated = generate(topology.clone(), 0);
    assert_eq!(generated.graph.node_count(), nodes);
    assert_eq!(generated.graph.edge_count(), directed_edges);
    assert_eq!(generated.graph.check_policy(), Ok(()));
    assert_eq!(
        edge_list(&generated.graph),
        edge_list(&generate(topology, 99).graph),
        "templates ignore the random source"
    );
}

#[test]
fn tree_children_have_exactly_one_parent() {
    let generated = generate(NAryTree::new(3, 4).expect("valid"), 0);
    let graph = &generated.graph;
    assert_eq!(graph.node_count(), 1 + 3 + 9 + 27);
    for child in 1..graph.node_count() {
        let parents: Vec<_> = graph.neighbours(child).filter(|&n| n < child).collect();
        assert_eq!(parents, [(child - 1) / 3], "node {child}");
    }
}

#[test]
fn grid_links_axis_neighbours() {
    let grid = NDimensionalGrid::new(2, 3).expect("valid");
    let centre = grid.node_at(&[1, 1]).expect("in range");
    assert_eq!(centre, 4);
    assert_eq!(grid.node_at(&[3, 0]), None);
    let generated = generate(grid, 0);
    assert_eq!(sorted_neighbours(&generated.graph, centre), [1, 3, 5, 7]);
    assert_eq!(sorted_neighbours(&generated.graph, 0), [1, 3]);
}

#[test]
fn torus_corners_wrap() {
    let generated = generate(NDimensionalGrid::wrapped(2, 3).expect("valid"), 0);
    assert_eq!(sorted_neighbours(&generated.graph, 0), [1, 2, 3, 6]);
}

#[rstest]
#[case::ba_m_above_m0(PreferentialAttachment::new(2, 3, 10).map(drop), "m")]
#[case::ba_zero_steps(PreferentialAttachment::new(2, 1, 0).map(drop), "t")]
#[case::small_world_dense(SmallWorld::new(4, 2, 0.5).map(drop), "K")]
#[case::small_world_probability(SmallWorld::new(10, 2, 1.5).map(drop), "p")]
#[case::plod_alpha(PowerLawOutDegree::new(10, 5, true).and_then(|m| m.with_alpha(0.5)).map(drop), "alpha")]
#[case::uniform_no_edges(UniformRandom::new(5, 0, EdgePolicy::UNDIRECTED).map(drop), "edges")]
#[case::rings_too_wide(RingOfRings::new(51, 2).map(drop), "inner_nodes")]
#[case::tree_too_deep(NAryTree::new(2, 9).map(drop), "depth")]
#[case::grid_too_large(NDimensionalGrid::new(10, 20).map(drop), "dim_size")]
#[case::star_empty(StarGraph::new(0).map(drop), "nodes")]
fn invalid_parameters_are_rejected(
    #[case] result: Result<(), GeneratorError>,
    #[case] expected: &str,
) {
    let err = result.expect_err("configuration must be rejected");
    assert_eq!(err.code().as_str(), "GENERATOR_INVALID_PARAMETER");
    let GeneratorError::InvalidParameter { parameter, .. } = err else {
        panic!("expected an invalid-parameter error, got {err:?}");
    };
    assert_eq!(parameter, expected);
}

#[test]
fn registry_lists_every_model() {
    let names: Vec<_> = Topology::names().collect();
    assert_eq!(
        names,
        [
            "uniform",
            "preferential",
            "plod",
            "small-world",
            "complete",
            "star",
            "ring-of-rings",
            "road",
            "tree",
            "grid",
            "wrapped-grid",
        ]
    );
    let mut rng = rng(1);
    for name in names {
        let topology = Topology::from_name(name, &mut rng).expect("registered");
        assert_eq!(topology.name(), name);
    }
}

#[test]
fn registry_rejects_unknown_models() {
    let err = Topology::from_name("hypercube", &mut rng(0)).expect_err("unknown");
    assert_eq!(err.code(), GeneratorErrorCode::UnknownModel);
    assert_eq!(err.to_string(), "unknown graph model `hypercube`");
}

#[test]
fn populating_a_frozen_graph_surfaces_the_graph_error() {
    let mut graph: Graph<crate::Tensor, ()> = Graph::with_nodes(3);
    graph
        .set_node_data(0, crate::Tensor::new(&[2]).expect("shape is valid"))
        .expect("isolated node accepts a rank-1 tensor");
    let err = StarGraph::new(3)
        .expect("valid")
        .populate(&mut graph, &mut rng(0))
        .expect_err("hub is frozen");
    assert_eq!(err.code(), GeneratorErrorCode::Graph);
}
