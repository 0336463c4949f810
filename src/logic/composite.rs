//! Composite (team) matches: sub-game scoring, lineups, and best-of-five resolution.

use crate::models::{
    AuditEntry, AuditKind, EngineError, GameMatch, MatchId, MatchStatus, Participant, PlayerId,
    Pool, Side, SubGame, SubGameState, TeamEntry, LINEUP_SLOTS,
};
use serde::{Deserialize, Serialize};

/// Cap score of a sub-game: reaching it wins the game.
pub const MATCH_POINT: u32 = 30;

/// Outcome of aggregating a composite match's sub-games.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// All 5 sub-games completed and one side won more of them.
    Decided {
        winner: Side,
        side_one: u32,
        side_two: u32,
    },
    /// Not all sub-games are completed yet. Counts are the wins so far.
    Undetermined { side_one: u32, side_two: u32 },
}

impl Resolution {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Resolution::Decided { winner, .. } => Some(*winner),
            Resolution::Undetermined { .. } => None,
        }
    }

    pub fn wins(&self) -> (u32, u32) {
        match *self {
            Resolution::Decided {
                side_one, side_two, ..
            }
            | Resolution::Undetermined { side_one, side_two } => (side_one, side_two),
        }
    }
}

/// Winner of a sub-game with the given scores, or None if it is still open.
///
/// A side wins if it has reached the cap while the opponent has not, or if it is strictly
/// ahead while neither side is at the cap. The second clause means any unequal score below
/// the cap (e.g. 28-27) already counts as decided.
pub fn sub_game_winner(side_one: u32, side_two: u32) -> Option<Side> {
    if side_one >= MATCH_POINT && side_two < MATCH_POINT {
        return Some(Side::One);
    }
    if side_two >= MATCH_POINT && side_one < MATCH_POINT {
        return Some(Side::Two);
    }
    if side_one == MATCH_POINT || side_two == MATCH_POINT {
        return None;
    }
    match side_one.cmp(&side_two) {
        std::cmp::Ordering::Greater => Some(Side::One),
        std::cmp::Ordering::Less => Some(Side::Two),
        std::cmp::Ordering::Equal => None,
    }
}

/// Winner of a completed sub-game; None for an open one.
pub fn completed_winner(game: &SubGame) -> Option<Side> {
    if !game.completed {
        return None;
    }
    match (game.side_one_score, game.side_two_score) {
        (Some(a), Some(b)) => sub_game_winner(a, b),
        _ => None,
    }
}

/// Count sub-game winners into a resolution. Decided only when every slot has a winner.
fn tally<I>(winners: I) -> Resolution
where
    I: IntoIterator<Item = Option<Side>>,
{
    let mut side_one = 0;
    let mut side_two = 0;
    let mut decided = 0;
    for winner in winners {
        match winner {
            Some(Side::One) => side_one += 1,
            Some(Side::Two) => side_two += 1,
            None => continue,
        }
        decided += 1;
    }

    if decided < LINEUP_SLOTS || side_one == side_two {
        return Resolution::Undetermined { side_one, side_two };
    }
    let winner = if side_one > side_two { Side::One } else { Side::Two };
    Resolution::Decided {
        winner,
        side_one,
        side_two,
    }
}

/// Aggregate the sub-games of a composite match. Pure; reads only the sub-game set.
///
/// The match is only decided once all 5 sub-games are completed, even if one side already
/// holds 3 wins.
pub fn resolve_composite(m: &GameMatch) -> Result<Resolution, EngineError> {
    if !m.is_composite() {
        return Err(EngineError::NotComposite(m.id));
    }
    Ok(tally(m.sub_games.iter().map(completed_winner)))
}

fn reopen_refused() -> EngineError {
    EngineError::IllegalStateTransition {
        from: MatchStatus::Completed,
        to: MatchStatus::InProgress,
    }
}

/// Bring the match's own score, winner and status back in line with its sub-games.
///
/// Scores always track the sub-game win counts. Status and winner are rewritten when they
/// disagree with the resolution; that rewrite is returned as an audit entry. A completed
/// match whose games no longer decide it is refused and left untouched: completed is terminal.
pub fn refresh_composite(m: &mut GameMatch) -> Result<Option<AuditEntry>, EngineError> {
    let resolution = resolve_composite(m)?;
    if m.status == MatchStatus::Completed && resolution.winner().is_none() {
        return Err(reopen_refused());
    }
    let (side_one, side_two) = resolution.wins();
    m.side_one_score = Some(side_one);
    m.side_two_score = Some(side_two);

    let any_scored = m
        .sub_games
        .iter()
        .any(|g| g.state() != SubGameState::Empty);
    let (status, winner) = match resolution {
        Resolution::Decided { winner, .. } => (MatchStatus::Completed, Some(winner)),
        Resolution::Undetermined { .. } => {
            let status = if any_scored && m.status == MatchStatus::Scheduled {
                MatchStatus::InProgress
            } else {
                m.status
            };
            (status, None)
        }
    };

    if m.status == status && m.winner == winner {
        return Ok(None);
    }
    log::info!(
        "Match {} refreshed from games: {} -> {}, {}-{}",
        m.id,
        m.status,
        status,
        side_one,
        side_two
    );
    m.status = status;
    m.winner = winner;
    Ok(Some(AuditEntry::new(
        m.id,
        AuditKind::CompositeRefresh {
            status,
            winner,
            side_one,
            side_two,
        },
    )))
}

fn sub_game_mut(m: &mut GameMatch, index: usize) -> Result<&mut SubGame, EngineError> {
    if !m.is_composite() {
        return Err(EngineError::NotComposite(m.id));
    }
    let match_id = m.id;
    m.sub_games
        .get_mut(index)
        .ok_or(EngineError::SubGameNotFound { match_id, index })
}

/// Record the score of one sub-game (0-based index), then refresh the parent match.
///
/// Both sides need a full lineup for the slot. Completion follows `sub_game_winner`; a
/// correction that makes the game open again clears its completed flag. On a completed match
/// a correction may flip the winner but must keep the match decided; otherwise it is refused
/// before anything is written.
pub fn record_sub_game_score(
    m: &mut GameMatch,
    index: usize,
    side_one: u32,
    side_two: u32,
) -> Result<Option<AuditEntry>, EngineError> {
    if m.status == MatchStatus::Cancelled {
        return Err(EngineError::IllegalStateTransition {
            from: MatchStatus::Cancelled,
            to: MatchStatus::InProgress,
        });
    }
    let match_id = m.id;
    if !sub_game_mut(m, index)?.lineup_complete() {
        return Err(EngineError::IncompleteLineup { match_id, index });
    }
    let game_winner = sub_game_winner(side_one, side_two);
    if m.status == MatchStatus::Completed {
        let after = tally(m.sub_games.iter().enumerate().map(|(i, g)| {
            if i == index {
                game_winner
            } else {
                completed_winner(g)
            }
        }));
        if after.winner().is_none() {
            log::warn!("Match {} is completed; correction to game {} would reopen it", match_id, index + 1);
            return Err(reopen_refused());
        }
    }

    let game = sub_game_mut(m, index)?;
    game.side_one_score = Some(side_one);
    game.side_two_score = Some(side_two);
    game.completed = game_winner.is_some();
    refresh_composite(m)
}

fn check_team_side(m: &GameMatch, side: Side, team: &TeamEntry) -> Result<(), EngineError> {
    match m.side(side).participant() {
        Some(id) if id == team.id => Ok(()),
        Some(_) => Err(EngineError::UnknownParticipant(team.id)),
        None => Err(EngineError::UnassignedSide(side)),
    }
}

/// Write one side's players into a sub-game slot. Players must be on the team's roster.
pub fn set_sub_game_players(
    m: &mut GameMatch,
    index: usize,
    side: Side,
    players: Vec<PlayerId>,
    team: &TeamEntry,
) -> Result<(), EngineError> {
    check_team_side(m, side, team)?;
    let game = sub_game_mut(m, index)?;
    let capacity = game.slot.players_per_side();
    if players.len() > capacity {
        return Err(EngineError::SlotOverfilled {
            capacity,
            given: players.len(),
        });
    }
    if let Some(&unknown) = players.iter().find(|&&p| !team.has_player(p)) {
        return Err(EngineError::UnknownPlayer(unknown));
    }
    *game.players_mut(side) = players;
    Ok(())
}

/// Fill every empty slot on one side from the team's roster-order lineup.
pub fn apply_team_lineup(m: &mut GameMatch, side: Side, team: &TeamEntry) -> Result<(), EngineError> {
    check_team_side(m, side, team)?;
    if !m.is_composite() {
        return Err(EngineError::NotComposite(m.id));
    }
    let lineup = team.lineup();
    for (game, slot) in m.sub_games.iter_mut().zip(lineup.slots) {
        let players = game.players_mut(side);
        if players.is_empty() {
            *players = slot;
        }
    }
    Ok(())
}

/// Pool-level `set_sub_game_players`: looks up the team on the given side.
pub fn set_pool_sub_game_players(
    pool: &mut Pool,
    match_id: MatchId,
    index: usize,
    side: Side,
    players: Vec<PlayerId>,
) -> Result<(), EngineError> {
    let m = pool
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;
    let team_id = m
        .side(side)
        .participant()
        .ok_or(EngineError::UnassignedSide(side))?;
    let team = pool
        .participants
        .iter()
        .find(|p| p.id() == team_id)
        .and_then(Participant::as_team)
        .ok_or(EngineError::UnknownParticipant(team_id))?;
    set_sub_game_players(m, index, side, players, team)
}

/// Pool-level `apply_team_lineup` for both sides of a match.
pub fn apply_pool_lineups(pool: &mut Pool, match_id: MatchId) -> Result<(), EngineError> {
    let m = pool
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;
    for side in [Side::One, Side::Two] {
        let team_id = m
            .side(side)
            .participant()
            .ok_or(EngineError::UnassignedSide(side))?;
        let team = pool
            .participants
            .iter()
            .find(|p| p.id() == team_id)
            .and_then(Participant::as_team)
            .ok_or(EngineError::UnknownParticipant(team_id))?;
        apply_team_lineup(m, side, team)?;
    }
    Ok(())
}
