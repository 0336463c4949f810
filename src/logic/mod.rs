//! Tournament engine operations: generation, composite scoring, lifecycle, standings, and
//! the helpers around them (scheduling, draw, live scoring, CSV).

mod composite;
mod csv_io;
mod draw;
mod generator;
mod lifecycle;
mod live;
mod schedule;
mod standings;

pub use composite::{
    apply_pool_lineups, apply_team_lineup, completed_winner, record_sub_game_score,
    refresh_composite, resolve_composite, set_pool_sub_game_players, set_sub_game_players,
    sub_game_winner, Resolution, MATCH_POINT,
};
pub use csv_io::{import_participants, write_standings_csv, CsvError};
pub use draw::draw_into_pools;
pub use generator::{generate_matches, generate_pool_matches};
pub use lifecycle::{
    assign_pool_side, assign_side, cancel_match, complete_composite, complete_match,
    override_score, reschedule, start_match, update_live_score, FinalScore,
};
pub use live::{LiveScoreSession, ScoreSnapshot};
pub use schedule::{assign_time_slots, SchedulePlan};
pub use standings::{compare_rows, compute_standings, StandingsRow, POINTS_PER_WIN};
