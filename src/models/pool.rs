//! Pool: a group of participants playing a round-robin, with its matches and audit trail.

use crate::models::audit::AuditEntry;
use crate::models::error::EngineError;
use crate::models::game::{GameMatch, MatchId};
use crate::models::participant::{CompetitionType, Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pool.
pub type PoolId = Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    pub competition: CompetitionType,
    /// Maximum number of participants.
    pub capacity: usize,
    pub participants: Vec<Participant>,
    pub matches: Vec<GameMatch>,
    /// Lifecycle changes made through this pool, oldest first.
    pub audit: Vec<AuditEntry>,
}

impl Pool {
    /// Create an empty pool.
    pub fn new(name: impl Into<String>, competition: CompetitionType, capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            competition,
            capacity,
            participants: Vec::new(),
            matches: Vec::new(),
            audit: Vec::new(),
        }
    }

    /// Create a pool with initial participants (capacity = participant count unless larger is given).
    pub fn with_participants(
        name: impl Into<String>,
        competition: CompetitionType,
        participants: Vec<Participant>,
    ) -> Result<Self, EngineError> {
        let mut pool = Self::new(name, competition, participants.len());
        for p in participants {
            pool.add_participant(p)?;
        }
        Ok(pool)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, EngineError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EngineError::MatchNotFound(id))
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.participants.len())
    }

    /// Add a participant. Shape must match the competition type; the pool must have room.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), EngineError> {
        if participant.primary_name().trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        if participant.competition_type() != self.competition {
            return Err(EngineError::ShapeMismatch {
                expected: self.competition,
                found: participant.competition_type(),
            });
        }
        if self.participant(participant.id()).is_some() {
            return Err(EngineError::DuplicateParticipant(participant.id()));
        }
        if self.participants.len() >= self.capacity {
            return Err(EngineError::PoolFull {
                capacity: self.capacity,
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant by id (only while the pool has no matches).
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, EngineError> {
        if !self.matches.is_empty() {
            return Err(EngineError::CompetitionTypeLocked);
        }
        let idx = self
            .participants
            .iter()
            .position(|p| p.id() == id)
            .ok_or(EngineError::UnknownParticipant(id))?;
        Ok(self.participants.remove(idx))
    }

    /// Change the competition type. Only allowed while the pool has no matches and no
    /// participants of another shape.
    pub fn set_competition_type(&mut self, competition: CompetitionType) -> Result<(), EngineError> {
        if !self.matches.is_empty() {
            return Err(EngineError::CompetitionTypeLocked);
        }
        if let Some(p) = self
            .participants
            .iter()
            .find(|p| p.competition_type() != competition)
        {
            return Err(EngineError::ShapeMismatch {
                expected: competition,
                found: p.competition_type(),
            });
        }
        self.competition = competition;
        Ok(())
    }

    /// Drop every match (and the audit trail that refers to them).
    pub fn clear_matches(&mut self) {
        self.matches.clear();
        self.audit.clear();
    }

    /// Run an operation against one match and record its audit entry.
    pub fn apply<F>(&mut self, match_id: MatchId, op: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut GameMatch) -> Result<AuditEntry, EngineError>,
    {
        let entry = op(self.get_match_mut(match_id)?)?;
        self.audit.push(entry);
        Ok(())
    }

    /// Like `apply`, for operations that only sometimes produce an audit entry.
    pub fn apply_optional<F>(&mut self, match_id: MatchId, op: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut GameMatch) -> Result<Option<AuditEntry>, EngineError>,
    {
        if let Some(entry) = op(self.get_match_mut(match_id)?)? {
            self.audit.push(entry);
        }
        Ok(())
    }
}
