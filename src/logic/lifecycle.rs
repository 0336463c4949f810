//! Match lifecycle: scheduled -> in_progress -> completed, with cancelled reachable from
//! either non-terminal state. Each operation returns the audit entry for what it changed.

use crate::logic::composite::{resolve_composite, Resolution};
use crate::models::{
    AuditEntry, AuditKind, EngineError, GameMatch, MatchId, MatchStatus, ParticipantId, Pool, Side,
    SideRef,
};
use chrono::{DateTime, Utc};

/// Final score of a non-composite match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FinalScore {
    pub side_one: u32,
    pub side_two: u32,
    /// Explicit winner; when None the higher score wins and a tie is a draw.
    pub winner: Option<Side>,
}

impl FinalScore {
    pub fn new(side_one: u32, side_two: u32) -> Self {
        Self {
            side_one,
            side_two,
            winner: None,
        }
    }

    pub fn with_winner(mut self, winner: Side) -> Self {
        self.winner = Some(winner);
        self
    }

    /// Winner by override, else by score. None is a draw.
    pub fn resolved_winner(&self) -> Option<Side> {
        self.winner.or(match self.side_one.cmp(&self.side_two) {
            std::cmp::Ordering::Greater => Some(Side::One),
            std::cmp::Ordering::Less => Some(Side::Two),
            std::cmp::Ordering::Equal => None,
        })
    }
}

fn transition(m: &mut GameMatch, to: MatchStatus) -> AuditEntry {
    let from = m.status;
    m.status = to;
    log::info!("Match {}: {} -> {}", m.id, from, to);
    AuditEntry::new(m.id, AuditKind::Transition { from, to })
}

fn illegal(m: &GameMatch, to: MatchStatus) -> EngineError {
    EngineError::IllegalStateTransition { from: m.status, to }
}

/// Begin live play. Resets both scores to zero; never use this to resume a match.
pub fn start_match(m: &mut GameMatch) -> Result<AuditEntry, EngineError> {
    if m.status != MatchStatus::Scheduled {
        return Err(illegal(m, MatchStatus::InProgress));
    }
    m.side_one_score = Some(0);
    m.side_two_score = Some(0);
    Ok(transition(m, MatchStatus::InProgress))
}

/// Write the running score of an in-progress, non-composite match.
pub fn update_live_score(m: &mut GameMatch, side_one: u32, side_two: u32) -> Result<(), EngineError> {
    if m.is_composite() {
        return Err(EngineError::CompositeScoreDerived(m.id));
    }
    if m.status != MatchStatus::InProgress {
        return Err(illegal(m, MatchStatus::InProgress));
    }
    m.side_one_score = Some(side_one);
    m.side_two_score = Some(side_two);
    Ok(())
}

/// Finish a non-composite match with the given score.
pub fn complete_match(m: &mut GameMatch, score: FinalScore) -> Result<AuditEntry, EngineError> {
    if m.status != MatchStatus::InProgress {
        return Err(illegal(m, MatchStatus::Completed));
    }
    if m.is_composite() {
        return Err(EngineError::CompositeScoreDerived(m.id));
    }
    m.side_one_score = Some(score.side_one);
    m.side_two_score = Some(score.side_two);
    m.winner = score.resolved_winner();
    Ok(transition(m, MatchStatus::Completed))
}

/// Finish a composite match from its sub-games. Fails with `IncompleteComposite` until all
/// 5 are completed.
pub fn complete_composite(m: &mut GameMatch) -> Result<AuditEntry, EngineError> {
    if m.status != MatchStatus::InProgress {
        return Err(illegal(m, MatchStatus::Completed));
    }
    match resolve_composite(m)? {
        Resolution::Decided {
            winner,
            side_one,
            side_two,
        } => {
            m.side_one_score = Some(side_one);
            m.side_two_score = Some(side_two);
            m.winner = Some(winner);
            Ok(transition(m, MatchStatus::Completed))
        }
        Resolution::Undetermined { .. } => Err(EngineError::IncompleteComposite(m.id)),
    }
}

/// Cancel a scheduled or in-progress match. No score needed.
pub fn cancel_match(m: &mut GameMatch) -> Result<AuditEntry, EngineError> {
    if m.status.is_terminal() {
        return Err(illegal(m, MatchStatus::Cancelled));
    }
    Ok(transition(m, MatchStatus::Cancelled))
}

/// Administrative correction of a completed, non-composite match. Status stays `Completed`.
pub fn override_score(m: &mut GameMatch, score: FinalScore) -> Result<AuditEntry, EngineError> {
    if m.status != MatchStatus::Completed {
        return Err(illegal(m, MatchStatus::Completed));
    }
    if m.is_composite() {
        return Err(EngineError::CompositeScoreDerived(m.id));
    }
    let previous = (m.side_one_score, m.side_two_score);
    let winner = score.resolved_winner();
    m.side_one_score = Some(score.side_one);
    m.side_two_score = Some(score.side_two);
    m.winner = winner;
    log::info!(
        "Match {} score overridden: {:?} -> ({}, {})",
        m.id,
        previous,
        score.side_one,
        score.side_two
    );
    Ok(AuditEntry::new(
        m.id,
        AuditKind::ScoreOverride {
            previous,
            new: (score.side_one, score.side_two),
            winner,
        },
    ))
}

/// Fill a placeholder side with a concrete participant.
pub fn assign_side(
    m: &mut GameMatch,
    side: Side,
    participant: ParticipantId,
) -> Result<AuditEntry, EngineError> {
    if m.status.is_terminal() {
        return Err(illegal(m, m.status));
    }
    let slot = m.side_mut(side);
    if !slot.is_placeholder() {
        return Err(EngineError::SideAlreadyAssigned(side));
    }
    *slot = SideRef::Participant(participant);
    Ok(AuditEntry::new(
        m.id,
        AuditKind::SideAssigned { side, participant },
    ))
}

/// Pool-level `assign_side`: the participant must belong to the pool.
pub fn assign_pool_side(
    pool: &mut Pool,
    match_id: MatchId,
    side: Side,
    participant: ParticipantId,
) -> Result<(), EngineError> {
    if pool.participant(participant).is_none() {
        log::warn!("Pool {} has no participant {}", pool.name, participant);
        return Err(EngineError::UnknownParticipant(participant));
    }
    pool.apply(match_id, |m| assign_side(m, side, participant))
}

/// Change time and venue of a match that has not finished.
pub fn reschedule(
    m: &mut GameMatch,
    at: Option<DateTime<Utc>>,
    venue: Option<String>,
) -> Result<AuditEntry, EngineError> {
    if m.status.is_terminal() {
        return Err(illegal(m, m.status));
    }
    m.scheduled_at = at;
    m.venue = venue;
    Ok(AuditEntry::new(m.id, AuditKind::Rescheduled))
}
