//! Live scoring session for one match, with the display-only side switch.

use crate::logic::lifecycle::update_live_score;
use crate::models::{EngineError, GameMatch, MatchId, MatchStatus, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What spectator displays receive. Scores are always in side 1 / side 2 order; the flag
/// tells the display whether to draw them swapped.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub match_id: MatchId,
    pub side_scores: [u32; 2],
    pub side_switched: bool,
    pub timestamp: DateTime<Utc>,
}

/// Running score of an in-progress match. Dropped when scoring ends; the switch flag lives
/// only here.
#[derive(Clone, Debug)]
pub struct LiveScoreSession {
    match_id: MatchId,
    scores: [u32; 2],
    sides_switched: bool,
}

fn index(side: Side) -> usize {
    match side {
        Side::One => 0,
        Side::Two => 1,
    }
}

impl LiveScoreSession {
    /// Open a session on an in-progress, non-composite match, continuing from its current score.
    pub fn open(m: &GameMatch) -> Result<Self, EngineError> {
        if m.is_composite() {
            return Err(EngineError::CompositeScoreDerived(m.id));
        }
        if m.status != MatchStatus::InProgress {
            return Err(EngineError::IllegalStateTransition {
                from: m.status,
                to: MatchStatus::InProgress,
            });
        }
        let (one, two) = m.scores();
        Ok(Self {
            match_id: m.id,
            scores: [one, two],
            sides_switched: false,
        })
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[index(side)]
    }

    /// Add a point; saturates instead of wrapping.
    pub fn add_point(&mut self, side: Side) {
        let s = &mut self.scores[index(side)];
        *s = s.saturating_add(1);
    }

    /// Take back a point; never goes below zero.
    pub fn remove_point(&mut self, side: Side) {
        let s = &mut self.scores[index(side)];
        *s = s.saturating_sub(1);
    }

    pub fn switch_sides(&mut self) {
        self.sides_switched = !self.sides_switched;
    }

    pub fn sides_switched(&self) -> bool {
        self.sides_switched
    }

    /// (left, right) as shown on screen.
    pub fn display_scores(&self) -> (u32, u32) {
        let [one, two] = self.scores;
        if self.sides_switched {
            (two, one)
        } else {
            (one, two)
        }
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            match_id: self.match_id,
            side_scores: self.scores,
            side_switched: self.sides_switched,
            timestamp: Utc::now(),
        }
    }

    /// Write the running score into the match. The switch flag is not part of match state.
    pub fn commit(&self, m: &mut GameMatch) -> Result<(), EngineError> {
        if m.id != self.match_id {
            return Err(EngineError::MatchNotFound(self.match_id));
        }
        update_live_score(m, self.scores[0], self.scores[1])
    }
}
