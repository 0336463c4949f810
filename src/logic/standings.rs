//! Standings: fold completed matches of one pool into ranked per-participant rows.

use crate::models::{EngineError, GameMatch, MatchStatus, Participant, ParticipantId, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ranking points per match won. Draws and losses score nothing.
pub const POINTS_PER_WIN: u32 = 2;

/// One participant's aggregated record. Units are sub-games for team pools, points otherwise.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub participant_id: ParticipantId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub units_won: u32,
    pub units_lost: u32,
    pub points: u32,
}

impl StandingsRow {
    fn new(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id(),
            name: participant.display_name(),
            ..Self::default()
        }
    }

    fn record(&mut self, own: u32, opponent: u32, outcome: Ordering) {
        self.played += 1;
        match outcome {
            Ordering::Greater => self.won += 1,
            Ordering::Less => self.lost += 1,
            Ordering::Equal => {}
        }
        self.units_won += own;
        self.units_lost += opponent;
        self.points = self.won * POINTS_PER_WIN;
    }

    /// unitsWon / (unitsWon + unitsLost); 0 when nothing was played.
    pub fn win_percentage(&self) -> f64 {
        let total = self.units_won + self.units_lost;
        if total == 0 {
            0.0
        } else {
            f64::from(self.units_won) / f64::from(total)
        }
    }
}

/// Compare unit win-percentages exactly, without going through floats.
/// An empty record has 0 units won, so it compares as 0 / 1.
fn cmp_win_percentage(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    let a_total = (u64::from(a.units_won) + u64::from(a.units_lost)).max(1);
    let b_total = (u64::from(b.units_won) + u64::from(b.units_lost)).max(1);
    (u64::from(a.units_won) * b_total).cmp(&(u64::from(b.units_won) * a_total))
}

/// Ranking order, best first: points, matches won, unit win-percentage, raw units won.
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.won.cmp(&a.won))
        .then_with(|| cmp_win_percentage(b, a))
        .then_with(|| b.units_won.cmp(&a.units_won))
}

/// Outcome for side 1: the stored winner if there is one, else by score (equal = draw).
fn side_one_outcome(m: &GameMatch) -> Ordering {
    match m.winner {
        Some(Side::One) => Ordering::Greater,
        Some(Side::Two) => Ordering::Less,
        None => {
            let (a, b) = m.scores();
            a.cmp(&b)
        }
    }
}

/// Compute ranked standings for one pool.
///
/// Only completed matches with two concrete sides count. A match naming a participant that
/// is not in `participants` is an error. Rows that tie on every key keep participant order.
pub fn compute_standings(
    participants: &[Participant],
    matches: &[GameMatch],
) -> Result<Vec<StandingsRow>, EngineError> {
    let mut rows: Vec<StandingsRow> = participants.iter().map(StandingsRow::new).collect();
    let index: HashMap<ParticipantId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.participant_id, i))
        .collect();

    for m in matches {
        for id in m.participant_ids() {
            if !index.contains_key(&id) {
                log::warn!("Match {} references unknown participant {}", m.id, id);
                return Err(EngineError::UnknownParticipant(id));
            }
        }
        if m.status != MatchStatus::Completed {
            continue;
        }
        let (Some(one), Some(two)) = (m.side_one.participant(), m.side_two.participant()) else {
            continue;
        };
        let (score_one, score_two) = m.scores();
        let outcome = side_one_outcome(m);
        rows[index[&one]].record(score_one, score_two, outcome);
        rows[index[&two]].record(score_two, score_one, outcome.reverse());
    }

    rows.sort_by(compare_rows);
    log::debug!(
        "Computed standings for {} participants over {} matches",
        rows.len(),
        matches.len()
    );
    Ok(rows)
}
