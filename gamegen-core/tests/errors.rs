use gamegen_core::{
    GeneratorError, GeneratorErrorCode, GraphError, GraphErrorCode, PayoffError, PayoffErrorCode,
    ProfileError, ProfileErrorCode, TensorError, TensorErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(ProfileError::NoPlayers, ProfileErrorCode::NoPlayers, "PROFILE_NO_PLAYERS")]
#[case(
    ProfileError::ZeroActions { player: 1 },
    ProfileErrorCode::ZeroActions,
    "PROFILE_ZERO_ACTIONS",
)]
#[case(ProfileError::Exhausted, ProfileErrorCode::Exhausted, "PROFILE_EXHAUSTED")]
#[case(ProfileError::Overflow, ProfileErrorCode::Overflow, "PROFILE_OVERFLOW")]
fn returns_expected_profile_code(
    #[case] error: ProfileError,
    #[case] expected: ProfileErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
}

#[rstest]
#[case(TensorError::EmptyShape, TensorErrorCode::EmptyShape)]
#[case(TensorError::ZeroDimension { axis: 0 }, TensorErrorCode::ZeroDimension)]
#[case(
    TensorError::RankMismatch { expected: 2, got: 3 },
    TensorErrorCode::RankMismatch,
)]
#[case(
    TensorError::IndexOutOfRange { axis: 1, index: 4, size: 3 },
    TensorErrorCode::IndexOutOfRange,
)]
fn returns_expected_tensor_code(#[case] error: TensorError, #[case] expected: TensorErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[rstest]
#[case(
    GraphError::UnknownNode { node: 9, node_count: 3 },
    "GRAPH_UNKNOWN_NODE",
)]
#[case(
    GraphError::MissingEdge { origin: 0, target: 1 },
    "GRAPH_MISSING_EDGE",
)]
#[case(
    GraphError::ArityMismatch { node: 0, arity: 3, degree: 1 },
    "GRAPH_ARITY_MISMATCH",
)]
#[case(GraphError::FrozenNode { node: 2 }, "GRAPH_FROZEN_NODE")]
fn graph_codes_are_stable(#[case] error: GraphError, #[case] code: &str) {
    assert_eq!(error.code().as_str(), code);
}

#[test]
fn wrapped_errors_keep_the_inner_message() {
    let inner = GraphError::FrozenNode { node: 4 };
    let generator = GeneratorError::from(inner.clone());
    assert_eq!(generator.code(), GeneratorErrorCode::Graph);
    assert_eq!(generator.to_string(), inner.to_string());

    let payoff = PayoffError::from(inner.clone());
    assert_eq!(payoff.code(), PayoffErrorCode::Graph);
    assert_eq!(payoff.to_string(), inner.to_string());
    assert_eq!(inner.code(), GraphErrorCode::FrozenNode);
}

#[test]
fn error_messages_name_the_offending_values() {
    let err = GeneratorError::TooManyEdges {
        requested: 7,
        max: 6,
    };
    assert_eq!(err.to_string(), "7 edges requested but at most 6 fit");
    let err = TensorError::IndexOutOfRange {
        axis: 1,
        index: 4,
        size: 3,
    };
    assert_eq!(err.to_string(), "index 4 on axis 1 is outside 1..=3");
}
