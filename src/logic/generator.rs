//! Round-robin match generation for a pool.

use crate::models::{CompetitionType, EngineError, GameMatch, Pool};

/// Generate the full round-robin for a pool.
///
/// 1. Require at least 2 participants.
/// 2. For every pair (i, j) with i < j in participant list order, emit one match: side 1 = i, side 2 = j.
/// 3. Team pools get 5 empty sub-games per match.
///
/// Output depends only on participant order. Existing matches are not consulted.
pub fn generate_matches(pool: &Pool) -> Result<Vec<GameMatch>, EngineError> {
    let n = pool.participants.len();
    if n < 2 {
        return Err(EngineError::InsufficientParticipants { found: n });
    }

    let mut matches = Vec::with_capacity(n * (n - 1) / 2);
    for (i, a) in pool.participants.iter().enumerate() {
        for b in &pool.participants[i + 1..] {
            let m = match pool.competition {
                CompetitionType::Team => GameMatch::composite(pool.id, a.id(), b.id()),
                CompetitionType::Individual | CompetitionType::Pair => {
                    GameMatch::between(pool.id, a.id(), b.id())
                }
            };
            matches.push(m);
        }
    }

    log::debug!(
        "Generated {} {} matches for pool {}",
        matches.len(),
        pool.competition,
        pool.name
    );
    Ok(matches)
}

/// Generate and append the round-robin to the pool; returns how many matches were added.
///
/// Does not dedupe: calling this on a pool that already has matches adds a second full set.
/// Use `Pool::clear_matches` first to regenerate.
pub fn generate_pool_matches(pool: &mut Pool) -> Result<usize, EngineError> {
    let matches = generate_matches(pool)?;
    let added = matches.len();
    if !pool.matches.is_empty() {
        log::warn!(
            "Pool {} already has {} matches; appending another {}",
            pool.name,
            pool.matches.len(),
            added
        );
    }
    pool.matches.extend(matches);
    Ok(added)
}
