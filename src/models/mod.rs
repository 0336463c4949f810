//! Data structures for the tournament engine: participants, pools, matches, sub-games.

mod audit;
mod error;
mod game;
mod participant;
mod pool;

pub use audit::{AuditEntry, AuditKind};
pub use error::EngineError;
pub use game::{GameMatch, MatchId, MatchStatus, Side, SideRef, SlotKind, SubGame, SubGameId, SubGameState};
pub use participant::{
    CompetitionType, Individual, Lineup, PairEntry, Participant, ParticipantId, Player, PlayerId,
    TeamEntry, LINEUP_SLOTS,
};
pub use pool::{Pool, PoolId};
