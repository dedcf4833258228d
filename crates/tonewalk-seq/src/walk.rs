use rand::seq::SliceRandom;
use rand::Rng;
use tonewalk_core::{RngHandle, StateId, TwError, NUM_STATES};
use tonewalk_graph::TransitionGraph;

/// Generates a walk of exactly `length` states over `graph`.
///
/// The first state is uniform over all states; every later state is uniform
/// over the outgoing neighbours of the previous one, so each consecutive pair
/// is an edge of `graph`. A zero length yields an empty walk.
///
/// Fails with an empty-neighbor-set error when the walk reaches a state with
/// no outgoing edges, which happens immediately on graphs built from an
/// unknown preset.
pub fn random_walk(
    length: usize,
    graph: &TransitionGraph,
    rng: &mut RngHandle,
) -> Result<Vec<StateId>, TwError> {
    let mut walk = Vec::with_capacity(length);
    if length == 0 {
        return Ok(walk);
    }
    let mut current = StateId::new(rng.gen_range(0..NUM_STATES))?;
    walk.push(current);
    while walk.len() < length {
        let neighbors = graph.neighbors(current);
        current = *neighbors
            .choose(rng)
            .ok_or_else(|| TwError::empty_neighbor_set(current, "random-walk"))?;
        walk.push(current);
    }
    Ok(walk)
}
