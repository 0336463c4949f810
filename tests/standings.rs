//! Integration tests for standings aggregation and the tie-break chain.

use std::cmp::Ordering;
use tournament_dashboard::{
    apply_pool_lineups, compare_rows, complete_match, compute_standings, generate_pool_matches,
    override_score, record_sub_game_score, start_match, CompetitionType, EngineError, FinalScore,
    GameMatch, Participant, ParticipantId, Player, Pool, Side, StandingsRow, POINTS_PER_WIN,
};

fn individuals(names: &[&str]) -> Vec<Participant> {
    names.iter().map(|n| Participant::individual(*n)).collect()
}

fn played(pool_id: uuid::Uuid, a: ParticipantId, b: ParticipantId, sa: u32, sb: u32) -> GameMatch {
    let mut m = GameMatch::between(pool_id, a, b);
    start_match(&mut m).unwrap();
    complete_match(&mut m, FinalScore::new(sa, sb)).unwrap();
    m
}

fn names(rows: &[StandingsRow]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn no_completed_matches_gives_zeroed_rows_in_input_order() {
    let mut pool =
        Pool::with_participants("G", CompetitionType::Individual, individuals(&["Dee", "Al", "Cy", "Bo"]))
            .unwrap();
    generate_pool_matches(&mut pool).unwrap();
    let rows = compute_standings(&pool.participants, &pool.matches).unwrap();
    assert_eq!(names(&rows), vec!["Dee", "Al", "Cy", "Bo"]);
    for r in &rows {
        assert_eq!((r.played, r.won, r.lost, r.units_won, r.units_lost, r.points), (0, 0, 0, 0, 0, 0));
        assert_eq!(r.win_percentage(), 0.0);
    }
}

#[test]
fn three_cycle_is_broken_by_unit_percentage() {
    let participants = individuals(&["A", "B", "C"]);
    let (a, b, c) = (participants[0].id(), participants[1].id(), participants[2].id());
    let pool = uuid::Uuid::new_v4();
    let matches = vec![
        played(pool, a, b, 2, 0),
        played(pool, b, c, 2, 1),
        played(pool, c, a, 2, 1),
    ];

    let rows = compute_standings(&participants, &matches).unwrap();
    assert_eq!(names(&rows), vec!["A", "C", "B"]);

    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.played, r.won, r.lost, r.units_won, r.units_lost, r.points))
        .collect();
    assert_eq!(
        summary,
        vec![
            (2, 1, 1, 3, 2, 2), // A: 3/5 = 0.60
            (2, 1, 1, 3, 3, 2), // C: 3/6 = 0.50
            (2, 1, 1, 2, 3, 2), // B: 2/5 = 0.40
        ]
    );
}

#[test]
fn four_player_pool_end_to_end() {
    let mut pool =
        Pool::with_participants("Open", CompetitionType::Individual, individuals(&["P1", "P2", "P3", "P4"]))
            .unwrap();
    assert_eq!(generate_pool_matches(&mut pool).unwrap(), 6);

    // (P1,P2) 21-15, (P1,P3) 18-21, (P2,P3) 21-19; everything involving P4 stays scheduled.
    for (i, (sa, sb)) in [(0, (21, 15)), (1, (18, 21)), (3, (21, 19))] {
        let id = pool.matches[i].id;
        pool.apply(id, start_match).unwrap();
        pool.apply(id, |m| complete_match(m, FinalScore::new(sa, sb))).unwrap();
    }

    let rows = compute_standings(&pool.participants, &pool.matches).unwrap();
    assert_eq!(rows.len(), 4);
    // All three played sides are 1-1; percentage decides: P1 39/75, P3 40/79, P2 36/76.
    assert_eq!(names(&rows), vec!["P1", "P3", "P2", "P4"]);
    assert_eq!(rows[0].units_won, 39);
    assert_eq!(rows[0].units_lost, 36);
    assert_eq!(rows[3].played, 0);
    assert_eq!(rows[3].points, 0);
    assert!(rows[..3].iter().all(|r| r.points == POINTS_PER_WIN));
}

#[test]
fn draw_counts_as_played_but_not_won_or_lost() {
    let participants = individuals(&["A", "B"]);
    let matches = vec![played(uuid::Uuid::new_v4(), participants[0].id(), participants[1].id(), 21, 21)];
    let rows = compute_standings(&participants, &matches).unwrap();
    for r in &rows {
        assert_eq!((r.played, r.won, r.lost, r.points), (1, 0, 0, 0));
        assert_eq!((r.units_won, r.units_lost), (21, 21));
    }
    assert_eq!(names(&rows), vec!["A", "B"]);
}

#[test]
fn stored_winner_beats_the_score_comparison() {
    let participants = individuals(&["A", "B", "C", "D"]);
    let id = |i: usize| participants[i].id();
    let pool = uuid::Uuid::new_v4();

    // Level score, winner named explicitly.
    let mut level = GameMatch::between(pool, id(0), id(1));
    start_match(&mut level).unwrap();
    complete_match(&mut level, FinalScore::new(10, 10).with_winner(Side::Two)).unwrap();

    // Override that hands the match to the lower scorer.
    let mut overridden = played(pool, id(2), id(3), 21, 15);
    override_score(&mut overridden, FinalScore::new(21, 15).with_winner(Side::Two)).unwrap();

    let rows = compute_standings(&participants, &[level, overridden]).unwrap();
    let by_name = |n: &str| rows.iter().find(|r| r.name == n).unwrap().clone();

    let (a, b) = (by_name("A"), by_name("B"));
    assert_eq!((a.won, a.lost, a.points), (0, 1, 0));
    assert_eq!((b.won, b.lost, b.points), (1, 0, POINTS_PER_WIN));
    assert_eq!((b.units_won, b.units_lost), (10, 10));

    let (c, d) = (by_name("C"), by_name("D"));
    assert_eq!((c.won, c.lost, c.units_won), (0, 1, 21));
    assert_eq!((d.won, d.lost, d.units_won), (1, 0, 15));

    // Winners rank first; D's 15/36 trails B's 10/20 on percentage.
    assert_eq!(names(&rows), vec!["B", "D", "C", "A"]);
}

#[test]
fn full_ties_keep_input_order() {
    let participants = individuals(&["C", "A", "D", "B"]);
    let id = |i: usize| participants[i].id();
    let pool = uuid::Uuid::new_v4();
    let matches = vec![played(pool, id(1), id(0), 10, 5), played(pool, id(3), id(2), 10, 5)];
    let rows = compute_standings(&participants, &matches).unwrap();
    assert_eq!(names(&rows), vec!["A", "B", "C", "D"]);
}

#[test]
fn unfinished_and_placeholder_matches_are_skipped() {
    let participants = individuals(&["A", "B"]);
    let pool = uuid::Uuid::new_v4();
    let mut in_progress = GameMatch::between(pool, participants[0].id(), participants[1].id());
    start_match(&mut in_progress).unwrap();
    let mut half_known = GameMatch::placeholder(pool, "Winner SF1", "Winner SF2");
    half_known.side_one = tournament_dashboard::SideRef::Participant(participants[0].id());
    half_known.status = tournament_dashboard::MatchStatus::Completed;
    half_known.side_one_score = Some(21);
    half_known.side_two_score = Some(3);

    let rows = compute_standings(&participants, &[in_progress, half_known]).unwrap();
    assert!(rows.iter().all(|r| r.played == 0));
}

#[test]
fn unknown_participant_fails_loudly() {
    let participants = individuals(&["A", "B"]);
    let stranger = Participant::individual("Z").id();
    let pool = uuid::Uuid::new_v4();
    let matches = vec![
        played(pool, participants[0].id(), participants[1].id(), 21, 3),
        GameMatch::between(pool, participants[0].id(), stranger),
    ];
    assert_eq!(
        compute_standings(&participants, &matches),
        Err(EngineError::UnknownParticipant(stranger))
    );
}

#[test]
fn team_standings_count_games_not_points() {
    let team = |name: &str| {
        let roster = (0..8).map(|j| Player::new(format!("{name}{j}"))).collect();
        Participant::team(name, roster)
    };
    let mut pool =
        Pool::with_participants("Teams", CompetitionType::Team, vec![team("North"), team("South")]).unwrap();
    generate_pool_matches(&mut pool).unwrap();
    let id = pool.matches[0].id;
    apply_pool_lineups(&mut pool, id).unwrap();
    for (i, (a, b)) in [(30, 12), (28, 30), (30, 29), (30, 2), (11, 30)].into_iter().enumerate() {
        pool.apply_optional(id, |m| record_sub_game_score(m, i, a, b)).unwrap();
    }

    let rows = compute_standings(&pool.participants, &pool.matches).unwrap();
    assert_eq!(names(&rows), vec!["North", "South"]);
    assert_eq!((rows[0].won, rows[0].units_won, rows[0].units_lost), (1, 3, 2));
    assert_eq!((rows[1].lost, rows[1].units_won, rows[1].units_lost), (1, 2, 3));
}

fn row(won: u32, units_won: u32, units_lost: u32) -> StandingsRow {
    StandingsRow {
        won,
        played: won,
        units_won,
        units_lost,
        points: won * POINTS_PER_WIN,
        ..StandingsRow::default()
    }
}

#[test]
fn comparator_key_order() {
    // Points first.
    assert_eq!(compare_rows(&row(2, 0, 50), &row(1, 50, 0)), Ordering::Less);
    // Same points and wins: better percentage first.
    assert_eq!(compare_rows(&row(1, 6, 4), &row(1, 5, 5)), Ordering::Less);
    // Same percentage: more raw units first.
    assert_eq!(compare_rows(&row(1, 4, 4), &row(1, 2, 2)), Ordering::Less);
    // Empty record counts as 0%.
    assert_eq!(compare_rows(&row(0, 0, 0), &row(0, 0, 3)), Ordering::Equal);
    assert_eq!(compare_rows(&row(0, 0, 0), &row(0, 1, 3)), Ordering::Greater);
    // Identical rows tie.
    assert_eq!(compare_rows(&row(1, 3, 3), &row(1, 3, 3)), Ordering::Equal);
}
