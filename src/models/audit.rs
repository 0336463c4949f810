//! Audit trail entries for match changes.

use crate::models::game::{MatchId, MatchStatus, Side};
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditKind {
    /// Normal lifecycle transition.
    Transition { from: MatchStatus, to: MatchStatus },
    /// Administrative correction of a completed match. Status is unchanged.
    ScoreOverride {
        previous: (Option<u32>, Option<u32>),
        new: (u32, u32),
        winner: Option<Side>,
    },
    /// Composite match fields rewritten from its sub-games.
    CompositeRefresh {
        status: MatchStatus,
        winner: Option<Side>,
        side_one: u32,
        side_two: u32,
    },
    SideAssigned { side: Side, participant: ParticipantId },
    Rescheduled,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub match_id: MatchId,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: AuditKind,
}

impl AuditEntry {
    pub fn new(match_id: MatchId, kind: AuditKind) -> Self {
        Self {
            match_id,
            at: Utc::now(),
            kind,
        }
    }

    /// True for administrative overrides, false for everything done through the normal path.
    pub fn is_override(&self) -> bool {
        matches!(self.kind, AuditKind::ScoreOverride { .. })
    }
}
