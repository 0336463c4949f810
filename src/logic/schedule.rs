//! Bulk scheduling: sequential time slots, alternating across a fixed set of venues.

use crate::models::{EngineError, GameMatch};
use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchedulePlan {
    pub start: DateTime<Utc>,
    pub slot_length: Duration,
    pub venues: Vec<String>,
}

impl SchedulePlan {
    pub fn new(start: DateTime<Utc>, slot_length: Duration, venues: Vec<String>) -> Self {
        Self {
            start,
            slot_length,
            venues,
        }
    }

    /// Time and venue for the i-th match: venues rotate first, then the clock moves one slot.
    pub fn slot(&self, i: usize) -> Result<(DateTime<Utc>, &str), EngineError> {
        if self.venues.is_empty() {
            return Err(EngineError::NoVenues);
        }
        if self.slot_length <= Duration::zero() {
            return Err(EngineError::InvalidSlotLength);
        }
        let round = i32::try_from(i / self.venues.len()).map_err(|_| EngineError::ScheduleOverflow)?;
        let at = self
            .slot_length
            .checked_mul(round)
            .and_then(|offset| self.start.checked_add_signed(offset))
            .ok_or(EngineError::ScheduleOverflow)?;
        Ok((at, self.venues[i % self.venues.len()].as_str()))
    }
}

/// Assign time and venue to every match in list order. Only touches scheduling fields, and
/// only once every slot has been computed.
pub fn assign_time_slots(matches: &mut [GameMatch], plan: &SchedulePlan) -> Result<(), EngineError> {
    let slots = (0..matches.len().max(1))
        .map(|i| plan.slot(i))
        .collect::<Result<Vec<_>, _>>()?;
    for (m, (at, venue)) in matches.iter_mut().zip(slots) {
        m.scheduled_at = Some(at);
        m.venue = Some(venue.to_string());
    }
    log::debug!(
        "Scheduled {} matches across {} venues from {}",
        matches.len(),
        plan.venues.len(),
        plan.start
    );
    Ok(())
}
