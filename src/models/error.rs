//! Engine errors.

use crate::models::game::{MatchId, MatchStatus, Side};
use crate::models::participant::{CompetitionType, ParticipantId, PlayerId};

/// Errors that can occur during generation, scoring, lifecycle and standings operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Fewer than 2 participants at generation time.
    InsufficientParticipants { found: usize },
    /// A match references a participant absent from the supplied set.
    UnknownParticipant(ParticipantId),
    /// A lineup references a player not on the team roster.
    UnknownPlayer(PlayerId),
    /// The requested status change is not an edge of the lifecycle graph.
    IllegalStateTransition { from: MatchStatus, to: MatchStatus },
    /// Completion requested on a composite match before all 5 sub-games are completed.
    IncompleteComposite(MatchId),
    MatchNotFound(MatchId),
    SubGameNotFound { match_id: MatchId, index: usize },
    /// Sub-game operation on a match without sub-games.
    NotComposite(MatchId),
    /// Direct score write on a composite match; its score is derived from its sub-games.
    CompositeScoreDerived(MatchId),
    /// A sub-game was scored before both sides had a full lineup for its slot.
    IncompleteLineup { match_id: MatchId, index: usize },
    /// Too many players for a sub-game slot.
    SlotOverfilled { capacity: usize, given: usize },
    /// Participant shape does not match the pool's competition type.
    ShapeMismatch {
        expected: CompetitionType,
        found: CompetitionType,
    },
    PoolFull { capacity: usize },
    DuplicateParticipant(ParticipantId),
    EmptyName,
    /// Competition type or participant list changed after matches exist.
    CompetitionTypeLocked,
    SideAlreadyAssigned(Side),
    /// The side is still a placeholder.
    UnassignedSide(Side),
    NoVenues,
    /// Zero or negative time between scheduled slots.
    InvalidSlotLength,
    /// A slot time falls outside the representable date range.
    ScheduleOverflow,
    /// Spin-wheel draw has more entrants than free pool slots.
    InsufficientCapacity { needed: usize, available: usize },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InsufficientParticipants { found } => {
                write!(f, "Need at least 2 participants to generate matches (found {})", found)
            }
            EngineError::UnknownParticipant(id) => write!(f, "Unknown participant {}", id),
            EngineError::UnknownPlayer(id) => write!(f, "Player {} is not on the team roster", id),
            EngineError::IllegalStateTransition { from, to } => {
                write!(f, "Cannot move match from {} to {}", from, to)
            }
            EngineError::IncompleteComposite(_) => {
                write!(f, "All 5 games must be completed before the match is decided")
            }
            EngineError::MatchNotFound(_) => write!(f, "Match not found"),
            EngineError::SubGameNotFound { index, .. } => write!(f, "No game {} in this match", index + 1),
            EngineError::NotComposite(_) => write!(f, "Match has no team games"),
            EngineError::CompositeScoreDerived(_) => {
                write!(f, "Team match score is computed from its games")
            }
            EngineError::IncompleteLineup { index, .. } => {
                write!(f, "Lineup for game {} is incomplete", index + 1)
            }
            EngineError::SlotOverfilled { capacity, given } => {
                write!(f, "Slot takes {} player(s) per side (given {})", capacity, given)
            }
            EngineError::ShapeMismatch { expected, found } => {
                write!(f, "Pool takes {} participants, not {}", expected, found)
            }
            EngineError::PoolFull { capacity } => write!(f, "Pool is full ({} participants)", capacity),
            EngineError::DuplicateParticipant(_) => write!(f, "Participant is already in the pool"),
            EngineError::EmptyName => write!(f, "Name must not be empty"),
            EngineError::CompetitionTypeLocked => {
                write!(f, "Pool already has matches; clear them first")
            }
            EngineError::SideAlreadyAssigned(side) => write!(f, "{} is already assigned", side),
            EngineError::UnassignedSide(side) => write!(f, "{} has no participant yet", side),
            EngineError::NoVenues => write!(f, "At least one venue is needed to schedule matches"),
            EngineError::InvalidSlotLength => write!(f, "Slot length must be positive"),
            EngineError::ScheduleOverflow => write!(f, "Schedule runs past the supported date range"),
            EngineError::InsufficientCapacity { needed, available } => write!(
                f,
                "Not enough pool slots: {} entrants, {} free slots",
                needed, available
            ),
        }
    }
}

impl std::error::Error for EngineError {}
