//! Participant shapes (team, individual, pair) behind one tagged type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (team, individual or pair).
pub type ParticipantId = Uuid;

/// Unique identifier for a rostered player of a team.
pub type PlayerId = Uuid;

/// Number of slots in a composite team lineup.
pub const LINEUP_SLOTS: usize = 5;

/// Competition type of a pool; every participant in the pool has this shape.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    Team,
    #[default]
    Individual,
    Pair,
}

impl std::fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionType::Team => write!(f, "team"),
            CompetitionType::Individual => write!(f, "individual"),
            CompetitionType::Pair => write!(f, "pair"),
        }
    }
}

/// A rostered player of a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A team: display name plus an ordered roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub id: ParticipantId,
    pub name: String,
    pub roster: Vec<Player>,
}

impl TeamEntry {
    pub fn new(name: impl Into<String>, roster: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            roster,
        }
    }

    /// Default 5-slot lineup taken from roster order:
    /// singles 1 and 2 are roster[0] and roster[1], doubles 1..3 are the next three pairs.
    /// A short roster leaves the trailing slots partially or fully empty.
    pub fn lineup(&self) -> Lineup {
        let ids: Vec<PlayerId> = self.roster.iter().map(|p| p.id).collect();
        let take = |from: usize, count: usize| -> Vec<PlayerId> {
            ids.iter().skip(from).take(count).copied().collect()
        };
        Lineup {
            slots: [take(0, 1), take(1, 1), take(2, 2), take(4, 2), take(6, 2)],
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.roster.iter().any(|p| p.id == player_id)
    }
}

/// Player ids for the 5 composite slots, in fixed order {singles, singles, doubles, doubles, doubles}.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub slots: [Vec<PlayerId>; LINEUP_SLOTS],
}

impl Lineup {
    pub fn slot(&self, index: usize) -> Option<&[PlayerId]> {
        self.slots.get(index).map(Vec::as_slice)
    }
}

/// A single competitor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id: ParticipantId,
    pub name: String,
}

impl Individual {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Two players competing as one unit. The partner may be unknown at creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairEntry {
    pub id: ParticipantId,
    pub player_one: String,
    pub player_two: Option<String>,
}

impl PairEntry {
    pub fn new(player_one: impl Into<String>, player_two: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_one: player_one.into(),
            player_two,
        }
    }
}

/// Any competitor in a pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Participant {
    Team(TeamEntry),
    Individual(Individual),
    Pair(PairEntry),
}

impl Participant {
    pub fn team(name: impl Into<String>, roster: Vec<Player>) -> Self {
        Participant::Team(TeamEntry::new(name, roster))
    }

    pub fn individual(name: impl Into<String>) -> Self {
        Participant::Individual(Individual::new(name))
    }

    pub fn pair(player_one: impl Into<String>, player_two: Option<String>) -> Self {
        Participant::Pair(PairEntry::new(player_one, player_two))
    }

    /// Identity key.
    pub fn id(&self) -> ParticipantId {
        match self {
            Participant::Team(t) => t.id,
            Participant::Individual(i) => i.id,
            Participant::Pair(p) => p.id,
        }
    }

    /// Canonical display name. Pairs render as "A / B", or just "A" while the partner is unknown.
    pub fn display_name(&self) -> String {
        match self {
            Participant::Team(t) => t.name.clone(),
            Participant::Individual(i) => i.name.clone(),
            Participant::Pair(p) => match &p.player_two {
                Some(partner) if !partner.trim().is_empty() => {
                    format!("{} / {}", p.player_one, partner)
                }
                _ => p.player_one.clone(),
            },
        }
    }

    pub fn competition_type(&self) -> CompetitionType {
        match self {
            Participant::Team(_) => CompetitionType::Team,
            Participant::Individual(_) => CompetitionType::Individual,
            Participant::Pair(_) => CompetitionType::Pair,
        }
    }

    /// Composite lineup; only teams have one.
    pub fn lineup(&self) -> Option<Lineup> {
        match self {
            Participant::Team(t) => Some(t.lineup()),
            _ => None,
        }
    }

    pub fn as_team(&self) -> Option<&TeamEntry> {
        match self {
            Participant::Team(t) => Some(t),
            _ => None,
        }
    }

    /// The name field that must be non-empty (team name, player name or first pair player).
    pub(crate) fn primary_name(&self) -> &str {
        match self {
            Participant::Team(t) => &t.name,
            Participant::Individual(i) => &i.name,
            Participant::Pair(p) => &p.player_one,
        }
    }
}
