use tonewalk_core::{StateId, TwError, NUM_STATES};

#[test]
fn state_ids_cover_the_graph() {
    let all: Vec<_> = StateId::all().map(|s| s.index()).collect();
    assert_eq!(all, (0..NUM_STATES).collect::<Vec<_>>());
}

#[test]
fn out_of_range_states_are_graph_errors() {
    let err = StateId::new(NUM_STATES).unwrap_err();
    match err {
        TwError::Graph(info) => {
            assert_eq!(info.code, "state-out-of-range");
            assert_eq!(info.context.get("index").map(String::as_str), Some("16"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn state_ids_serialize_as_plain_integers() {
    let states = vec![StateId::new(0).unwrap(), StateId::new(15).unwrap()];
    let json = serde_json::to_string(&states).unwrap();
    assert_eq!(json, "[0,15]");
    let back: Vec<StateId> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, states);
    assert!(serde_json::from_str::<StateId>("16").is_err());
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = TwError::empty_neighbor_set(StateId::new(2).unwrap(), "inject-violations");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Sampling");
    assert_eq!(json["detail"]["code"], "empty-neighbor-set");
    let back: TwError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
