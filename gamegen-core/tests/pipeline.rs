//! End-to-end tests: generate a topology, attach payoffs, tabulate games.

use gamegen_core::{
    ActionProfile, Effect, GenerationOutcome, GraphGenerator, GraphicalPayoffs, LocalEffectPayoffs,
    PowerLawOutDegree, SmallWorld, StarGraph, Tensor, Topology, rng::seeded,
};
use gamegen_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn profiles_enumerate_with_player_zero_fastest() {
    let visited: Vec<Vec<usize>> = ActionProfile::new(&[2, 3]).expect("valid").iter().collect();
    assert_eq!(
        visited,
        [
            vec![1, 1],
            vec![2, 1],
            vec![1, 2],
            vec![2, 2],
            vec![1, 3],
            vec![2, 3],
        ]
    );
}

#[test]
fn tensors_store_the_last_axis_fastest() {
    let tensor = Tensor::from_fn(&[2, 3], |index| (10 * index[0] + index[1]) as f64).expect("shape");
    assert_eq!(tensor.values(), [11.0, 12.0, 13.0, 21.0, 22.0, 23.0]);
    assert_eq!(tensor.offset(&[2, 1]), Ok(3));
}

#[rstest]
#[case::small_world("small-world", 3)]
#[case::tree("tree", 5)]
#[case::wrapped_grid("wrapped-grid", 8)]
fn registry_topologies_host_graphical_games(#[case] name: &str, #[case] seed: u64) {
    let mut rng = seeded(seed);
    let topology = Topology::from_name(name, &mut rng).expect("registered");
    let generated = topology
        .generate::<Tensor, Tensor, _>(&mut rng)
        .expect("generates");
    let players = generated.graph.node_count();
    let mut game = GraphicalPayoffs::new(generated.graph, &vec![2; players]).expect("one node per player");
    game.fill_random_node_tensors(&mut rng, 0.0..=10.0).expect("valid range");
    for player in 0..players {
        let payoff = game.payoff(&vec![2; players], player).expect("valid profile");
        assert!((0.0..=10.0).contains(&payoff));
    }
    if players <= 8 {
        let table = game.payoff_table(0).expect("table builds");
        assert_eq!(table.len(), 1 << players);
        assert!(table.values().iter().all(|value| (0.0..=10.0).contains(value)));
    }
}

#[test]
fn star_polymatrix_game_is_tabulated() {
    let star = StarGraph::new(4)
        .expect("valid")
        .generate::<Tensor, Tensor, _>(&mut seeded(0))
        .expect("generates");
    let mut game = GraphicalPayoffs::new(star.graph, &[3, 2, 2, 2]).expect("valid");
    game.fill_random_edge_tensors(&mut seeded(1), -1.0..=1.0).expect("star is symmetric");

    let hub = game.payoff_table(0).expect("hub table");
    assert_eq!(hub.shape(), [3, 2, 2, 2]);
    for actions in ActionProfile::new(&[3, 2, 2, 2]).expect("valid").iter() {
        let manual: f64 = (1..4)
            .map(|spoke| {
                let tensor = game
                    .graph()
                    .edge(0, spoke)
                    .and_then(|edge| edge.data())
                    .expect("edge tensor attached");
                tensor.get(&[actions[0], actions[spoke]]).expect("in range")
            })
            .sum();
        let stored = hub.get(&actions).expect("in range");
        assert!((stored - manual).abs() < 1e-12, "{actions:?}: {stored} != {manual}");
    }
}

#[test]
fn small_world_hosts_a_congestion_game() {
    let generated = SmallWorld::new(5, 1, 0.0)
        .expect("valid")
        .generate(&mut seeded(2))
        .expect("generates");
    let mut game = LocalEffectPayoffs::new(generated.graph, 3).expect("valid");
    for action in 0..game.action_count() {
        game.set_node_effect(action, Effect::linear(1.0, 0.0)).expect("node exists");
    }
    // Everyone on action 1: the shared node costs 3 and its ring neighbours are empty.
    assert_eq!(game.payoff(&[1, 1, 1], 2), Ok(-3.0));
    let table = game.payoff_table(0).expect("table builds");
    assert_eq!(table.len(), 125);
}

#[test]
fn exhausted_plod_budget_is_reported_not_raised() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let model = PowerLawOutDegree::new(12, 60, true)
        .and_then(|model| model.with_beta(1.0))
        .expect("valid");

    let generated = tracing::subscriber::with_default(subscriber, || {
        model.generate::<(), (), _>(&mut seeded(3))
    })
    .expect("partial generation is not an error");

    assert!(matches!(
        generated.outcome,
        GenerationOutcome::Partial { requested: 60, .. }
    ));
    assert!(generated.graph.edge_count() < 2 * 60);
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::WARN && event.fields.contains_key("produced"))
    );
    let span = layer
        .spans()
        .into_iter()
        .find(|span| span.name == "generator.generate")
        .expect("generation span recorded");
    assert_eq!(span.fields.get("model").map(String::as_str), Some("plod"));
    assert_eq!(
        span.fields.get("edges"),
        Some(&generated.graph.edge_count().to_string())
    );
}
