use tournament_dashboard::{
    generate_pool_matches, start_match, update_live_score, CompetitionType, EngineError, GameMatch,
    LiveScoreSession, MatchStatus, Participant, Player, Pool, Side,
};

fn match_in(competition: CompetitionType) -> GameMatch {
    let entrants = match competition {
        CompetitionType::Team => ["A", "B"]
            .iter()
            .map(|n| {
                let roster = (0..8).map(|j| Player::new(format!("{n}{j}"))).collect();
                Participant::team(*n, roster)
            })
            .collect(),
        _ => vec![Participant::individual("A"), Participant::individual("B")],
    };
    let mut pool = Pool::with_participants("Live", competition, entrants).unwrap();
    generate_pool_matches(&mut pool).unwrap();
    pool.matches.remove(0)
}

#[test]
fn points_accumulate_and_commit_to_the_match() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    let mut live = LiveScoreSession::open(&m).unwrap();
    for _ in 0..3 {
        live.add_point(Side::One);
    }
    live.add_point(Side::Two);
    assert_eq!((live.score(Side::One), live.score(Side::Two)), (3, 1));

    live.commit(&mut m).unwrap();
    assert_eq!((m.side_one_score, m.side_two_score), (Some(3), Some(1)));
    assert_eq!(m.status, MatchStatus::InProgress);
}

#[test]
fn remove_point_stops_at_zero() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    let mut live = LiveScoreSession::open(&m).unwrap();
    live.add_point(Side::Two);
    live.remove_point(Side::Two);
    live.remove_point(Side::Two);
    live.remove_point(Side::One);
    assert_eq!((live.score(Side::One), live.score(Side::Two)), (0, 0));
}

#[test]
fn switching_sides_only_changes_the_display() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    let mut live = LiveScoreSession::open(&m).unwrap();
    live.add_point(Side::One);
    live.add_point(Side::One);
    live.add_point(Side::Two);

    live.switch_sides();
    assert!(live.sides_switched());
    assert_eq!(live.display_scores(), (1, 2));
    assert_eq!(live.score(Side::One), 2);

    let snap = live.snapshot();
    assert_eq!(snap.match_id, m.id);
    assert_eq!(snap.side_scores, [2, 1]);
    assert!(snap.side_switched);

    live.commit(&mut m).unwrap();
    assert_eq!(m.scores(), (2, 1));

    live.switch_sides();
    assert_eq!(live.display_scores(), (2, 1));
}

#[test]
fn reopening_continues_from_the_stored_score() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    let mut live = LiveScoreSession::open(&m).unwrap();
    live.add_point(Side::Two);
    live.commit(&mut m).unwrap();

    let again = LiveScoreSession::open(&m).unwrap();
    assert_eq!(again.score(Side::Two), 1);
    assert!(!again.sides_switched());
}

#[test]
fn open_requires_a_running_plain_match() {
    let scheduled = match_in(CompetitionType::Individual);
    assert!(matches!(
        LiveScoreSession::open(&scheduled),
        Err(EngineError::IllegalStateTransition { from: MatchStatus::Scheduled, .. })
    ));

    let team = match_in(CompetitionType::Team);
    assert_eq!(
        LiveScoreSession::open(&team).map(|_| ()),
        Err(EngineError::CompositeScoreDerived(team.id))
    );
}

#[test]
fn commit_refuses_a_different_match() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    let live = LiveScoreSession::open(&m).unwrap();
    let mut other = match_in(CompetitionType::Individual);
    start_match(&mut other).unwrap();
    assert_eq!(live.commit(&mut other), Err(EngineError::MatchNotFound(m.id)));
}

#[test]
fn add_point_saturates_at_the_top() {
    let mut m = match_in(CompetitionType::Individual);
    start_match(&mut m).unwrap();
    update_live_score(&mut m, u32::MAX, 0).unwrap();
    let mut live = LiveScoreSession::open(&m).unwrap();
    live.add_point(Side::One);
    assert_eq!(live.score(Side::One), u32::MAX);
    live.commit(&mut m).unwrap();
    assert_eq!(m.scores(), (u32::MAX, 0));
}
