use chrono::{Duration, TimeZone, Utc};
use tournament_dashboard::{
    assign_time_slots, generate_pool_matches, CompetitionType, EngineError, MatchStatus,
    Participant, Pool, SchedulePlan,
};

fn pool_with_matches(n: usize) -> Pool {
    let players = (0..n).map(|i| Participant::individual(format!("P{i}"))).collect();
    let mut pool = Pool::with_participants("Sched", CompetitionType::Individual, players).unwrap();
    generate_pool_matches(&mut pool).unwrap();
    pool
}

#[test]
fn venues_rotate_before_the_clock_advances() {
    let mut pool = pool_with_matches(4);
    let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let plan = SchedulePlan::new(
        start,
        Duration::minutes(30),
        vec!["Court 1".to_string(), "Court 2".to_string()],
    );
    assign_time_slots(&mut pool.matches, &plan).unwrap();

    let got: Vec<_> = pool
        .matches
        .iter()
        .map(|m| (m.scheduled_at.unwrap(), m.venue.clone().unwrap()))
        .collect();
    let expected: Vec<_> = [(0, "Court 1"), (0, "Court 2"), (30, "Court 1"), (30, "Court 2"), (60, "Court 1"), (60, "Court 2")]
        .into_iter()
        .map(|(mins, v)| (start + Duration::minutes(mins), v.to_string()))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn single_venue_runs_back_to_back() {
    let mut pool = pool_with_matches(3);
    let start = Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap();
    let plan = SchedulePlan::new(start, Duration::minutes(45), vec!["Main".to_string()]);
    assign_time_slots(&mut pool.matches, &plan).unwrap();
    let times: Vec<_> = pool.matches.iter().map(|m| m.scheduled_at.unwrap()).collect();
    assert_eq!(
        times,
        vec![start, start + Duration::minutes(45), start + Duration::minutes(90)]
    );
}

#[test]
fn scheduling_leaves_status_and_scores_alone() {
    let mut pool = pool_with_matches(2);
    let plan = SchedulePlan::new(Utc::now(), Duration::minutes(20), vec!["A".to_string()]);
    assign_time_slots(&mut pool.matches, &plan).unwrap();
    let m = &pool.matches[0];
    assert_eq!(m.status, MatchStatus::Scheduled);
    assert_eq!(m.side_one_score, None);
    assert_eq!(m.winner, None);
}

#[test]
fn no_venues_is_an_error() {
    let mut pool = pool_with_matches(2);
    let plan = SchedulePlan::new(Utc::now(), Duration::minutes(20), Vec::new());
    assert_eq!(assign_time_slots(&mut pool.matches, &plan), Err(EngineError::NoVenues));
    assert_eq!(plan.slot(0), Err(EngineError::NoVenues));
    assert!(pool.matches[0].scheduled_at.is_none());
}

#[test]
fn slot_length_must_be_positive() {
    let mut pool = pool_with_matches(3);
    for minutes in [0, -30] {
        let plan = SchedulePlan::new(Utc::now(), Duration::minutes(minutes), vec!["A".to_string()]);
        assert_eq!(
            assign_time_slots(&mut pool.matches, &plan),
            Err(EngineError::InvalidSlotLength)
        );
    }
    assert!(pool.matches.iter().all(|m| m.scheduled_at.is_none()));
}

#[test]
fn out_of_range_times_are_an_error_not_a_panic() {
    let mut pool = pool_with_matches(3);
    let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let plan = SchedulePlan::new(
        start,
        Duration::minutes(1_000_000_000_000),
        vec!["Court 1".to_string(), "Court 2".to_string()],
    );
    assert_eq!(
        assign_time_slots(&mut pool.matches, &plan),
        Err(EngineError::ScheduleOverflow)
    );
    assert!(pool.matches.iter().all(|m| m.scheduled_at.is_none() && m.venue.is_none()));
}

#[test]
fn later_slot_overflowing_leaves_earlier_matches_untouched() {
    let mut pool = pool_with_matches(3);
    let start = chrono::DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
    let plan = SchedulePlan::new(start, Duration::minutes(30), vec!["Main".to_string()]);
    assert!(plan.slot(0).is_ok());
    assert_eq!(plan.slot(1), Err(EngineError::ScheduleOverflow));
    assert_eq!(
        assign_time_slots(&mut pool.matches, &plan),
        Err(EngineError::ScheduleOverflow)
    );
    assert!(pool.matches[0].scheduled_at.is_none());
}
