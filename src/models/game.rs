//! Match, SubGame, sides and match status.

use crate::models::participant::{ParticipantId, PlayerId, LINEUP_SLOTS};
use crate::models::pool::PoolId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a sub-game of a composite match.
pub type SubGameId = Uuid;

/// One of the two sides of a match (side 1 / side 2).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::One => write!(f, "side 1"),
            Side::Two => write!(f, "side 2"),
        }
    }
}

/// What occupies a side: a concrete participant or a label waiting for one
/// (e.g. "2nd place Group D").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideRef {
    Participant(ParticipantId),
    Placeholder(String),
}

impl SideRef {
    pub fn participant(&self) -> Option<ParticipantId> {
        match self {
            SideRef::Participant(id) => Some(*id),
            SideRef::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SideRef::Placeholder(_))
    }
}

/// Match lifecycle status. `Completed` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Kind of a composite slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Singles,
    Doubles,
}

impl SlotKind {
    /// Fixed slot order of a composite team match.
    pub const ORDER: [SlotKind; LINEUP_SLOTS] = [
        SlotKind::Singles,
        SlotKind::Singles,
        SlotKind::Doubles,
        SlotKind::Doubles,
        SlotKind::Doubles,
    ];

    pub fn players_per_side(self) -> usize {
        match self {
            SlotKind::Singles => 1,
            SlotKind::Doubles => 2,
        }
    }
}

/// Derived progress of a sub-game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubGameState {
    Empty,
    Scored,
    Completed,
}

/// One game inside a composite team match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubGame {
    pub id: SubGameId,
    pub match_id: MatchId,
    pub slot: SlotKind,
    pub side_one_players: Vec<PlayerId>,
    pub side_two_players: Vec<PlayerId>,
    pub side_one_score: Option<u32>,
    pub side_two_score: Option<u32>,
    pub completed: bool,
}

impl SubGame {
    pub fn new(match_id: MatchId, slot: SlotKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            slot,
            side_one_players: Vec::new(),
            side_two_players: Vec::new(),
            side_one_score: None,
            side_two_score: None,
            completed: false,
        }
    }

    pub fn state(&self) -> SubGameState {
        if self.completed {
            SubGameState::Completed
        } else if self.side_one_score.is_none() && self.side_two_score.is_none() {
            SubGameState::Empty
        } else {
            SubGameState::Scored
        }
    }

    pub fn players(&self, side: Side) -> &[PlayerId] {
        match side {
            Side::One => &self.side_one_players,
            Side::Two => &self.side_two_players,
        }
    }

    pub fn players_mut(&mut self, side: Side) -> &mut Vec<PlayerId> {
        match side {
            Side::One => &mut self.side_one_players,
            Side::Two => &mut self.side_two_players,
        }
    }

    /// Both sides have as many players as the slot needs.
    pub fn lineup_complete(&self) -> bool {
        let need = self.slot.players_per_side();
        self.side_one_players.len() == need && self.side_two_players.len() == need
    }
}

/// A match between two sides of a pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub pool_id: PoolId,
    pub side_one: SideRef,
    pub side_two: SideRef,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub status: MatchStatus,
    /// Points for individual/pair matches, sub-game wins for composite matches.
    pub side_one_score: Option<u32>,
    pub side_two_score: Option<u32>,
    /// None while undecided, and for a completed draw.
    pub winner: Option<Side>,
    pub note: Option<String>,
    pub referee: Option<String>,
    /// Empty unless this is a composite team match, which owns exactly 5.
    pub sub_games: Vec<SubGame>,
}

impl GameMatch {
    pub fn new(pool_id: PoolId, side_one: SideRef, side_two: SideRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_id,
            side_one,
            side_two,
            scheduled_at: None,
            venue: None,
            status: MatchStatus::Scheduled,
            side_one_score: None,
            side_two_score: None,
            winner: None,
            note: None,
            referee: None,
            sub_games: Vec::new(),
        }
    }

    /// Match between two concrete participants.
    pub fn between(pool_id: PoolId, one: ParticipantId, two: ParticipantId) -> Self {
        Self::new(pool_id, SideRef::Participant(one), SideRef::Participant(two))
    }

    /// Composite team match with its 5 empty sub-games in fixed slot order.
    pub fn composite(pool_id: PoolId, one: ParticipantId, two: ParticipantId) -> Self {
        let mut m = Self::between(pool_id, one, two);
        m.sub_games = SlotKind::ORDER
            .iter()
            .map(|&slot| SubGame::new(m.id, slot))
            .collect();
        m
    }

    /// Bracket/cross-pool match whose sides are labels until assigned.
    pub fn placeholder(
        pool_id: PoolId,
        label_one: impl Into<String>,
        label_two: impl Into<String>,
    ) -> Self {
        Self::new(
            pool_id,
            SideRef::Placeholder(label_one.into()),
            SideRef::Placeholder(label_two.into()),
        )
    }

    pub fn is_composite(&self) -> bool {
        !self.sub_games.is_empty()
    }

    /// True when both sides are concrete participants.
    pub fn is_resolved(&self) -> bool {
        !self.side_one.is_placeholder() && !self.side_two.is_placeholder()
    }

    pub fn side(&self, side: Side) -> &SideRef {
        match side {
            Side::One => &self.side_one,
            Side::Two => &self.side_two,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideRef {
        match side {
            Side::One => &mut self.side_one,
            Side::Two => &mut self.side_two,
        }
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        [&self.side_one, &self.side_two]
            .into_iter()
            .filter_map(SideRef::participant)
    }

    /// Scores as a pair, with unset scores read as zero.
    pub fn scores(&self) -> (u32, u32) {
        (
            self.side_one_score.unwrap_or(0),
            self.side_two_score.unwrap_or(0),
        )
    }
}
