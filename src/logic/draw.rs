//! Spin-wheel draw: random, capacity-constrained placement of entrants into pools.

use crate::models::{EngineError, Participant, Pool};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Place every entrant into a random pool that still has room.
///
/// 1. Check total free capacity, entrant shapes, names and ids up front; nothing is placed
///    on error.
/// 2. Shuffle the entrants.
/// 3. Each entrant goes to a uniformly chosen pool among those with a free slot.
pub fn draw_into_pools<R: Rng + ?Sized>(
    mut entrants: Vec<Participant>,
    pools: &mut [Pool],
    rng: &mut R,
) -> Result<(), EngineError> {
    let available: usize = pools.iter().map(Pool::free_slots).sum();
    if entrants.len() > available {
        return Err(EngineError::InsufficientCapacity {
            needed: entrants.len(),
            available,
        });
    }
    for entrant in &entrants {
        if let Some(pool) = pools
            .iter()
            .find(|p| p.competition != entrant.competition_type())
        {
            return Err(EngineError::ShapeMismatch {
                expected: pool.competition,
                found: entrant.competition_type(),
            });
        }
    }

    let mut seen: HashSet<_> = pools
        .iter()
        .flat_map(|p| p.participants.iter().map(Participant::id))
        .collect();
    for entrant in &entrants {
        if entrant.primary_name().trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        if !seen.insert(entrant.id()) {
            return Err(EngineError::DuplicateParticipant(entrant.id()));
        }
    }

    entrants.shuffle(rng);
    for entrant in entrants {
        let open: Vec<usize> = pools
            .iter()
            .enumerate()
            .filter(|(_, p)| p.free_slots() > 0)
            .map(|(i, _)| i)
            .collect();
        let &target = open.choose(rng).ok_or(EngineError::InsufficientCapacity {
            needed: 1,
            available: 0,
        })?;
        log::debug!("Drew {} into {}", entrant.display_name(), pools[target].name);
        pools[target].add_participant(entrant)?;
    }
    Ok(())
}
