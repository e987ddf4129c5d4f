//! Quiz round selection: one random question from the pool that has not been served yet.

use crate::model::Question;
use rand::Rng;
use std::collections::HashSet;

/// Pick uniformly among `pool` minus `previous`. `None` once every candidate has been served.
pub fn select_question<R>(pool: Vec<Question>, previous: &[i64], rng: &mut R) -> Option<Question>
where
    R: Rng,
{
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let mut candidates: Vec<Question> = pool.into_iter().filter(|q| !seen.contains(&q.id)).collect();
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..candidates.len());
    Some(candidates.swap_remove(idx))
}
