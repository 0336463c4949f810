//! Tournament operations dashboard: library with the match and standings engine.

pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    apply_pool_lineups, apply_team_lineup, assign_pool_side, assign_side, assign_time_slots,
    cancel_match, compare_rows, complete_composite, complete_match, completed_winner,
    compute_standings, draw_into_pools, generate_matches, generate_pool_matches,
    import_participants, override_score, record_sub_game_score, refresh_composite, reschedule,
    resolve_composite, set_pool_sub_game_players, set_sub_game_players, start_match,
    sub_game_winner, update_live_score, write_standings_csv, CsvError, FinalScore,
    LiveScoreSession, Resolution, SchedulePlan, ScoreSnapshot, StandingsRow, MATCH_POINT,
    POINTS_PER_WIN,
};
pub use models::{
    AuditEntry, AuditKind, CompetitionType, EngineError, GameMatch, Individual, Lineup, MatchId,
    MatchStatus, PairEntry, Participant, ParticipantId, Player, PlayerId, Pool, PoolId, Side,
    SideRef, SlotKind, SubGame, SubGameId, SubGameState, TeamEntry, LINEUP_SLOTS,
};
