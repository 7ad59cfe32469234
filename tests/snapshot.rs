use std::time::Duration;

use courtside::clock::MatchDuration;
use courtside::director::MatchDirector;
use courtside::event::{EventDraft, EventKind};
use courtside::persistence::MatchSnapshot;
use courtside::state::MatchState;
use courtside::team::{EventTeam, Side, default_teams};
use instant::Instant;
use pretty_assertions::assert_eq;


// A match with a bit of everything: a start, a goal, a foul, a pause.
fn played_director() -> (MatchDirector, Instant) {
    let t0 = Instant::now();
    let mut m = MatchDirector::new(default_teams());
    m.start(t0);
    m.quick_score(Side::Home, 2, t0 + Duration::from_secs(5)).unwrap();
    m.record(EventDraft::new(EventKind::Foul, EventTeam::Away), t0 + Duration::from_secs(6))
        .unwrap();
    m.pause(t0 + Duration::from_secs(7));
    (m, t0)
}


#[test]
fn json_round_trip() {
    let (m, _) = played_director();
    let snapshot = m.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).unwrap();
    let restored: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.teams, snapshot.teams);
    assert_eq!(restored.match_state, snapshot.match_state);
    assert_eq!(restored.ledger, snapshot.ledger);
}

#[test]
fn restored_director_continues_ids() {
    let (m, t0) = played_director();
    let expected_next = m.ledger().next_id();
    let mut restored = MatchDirector::from_snapshot(m.snapshot());
    let event = restored
        .record(
            EventDraft::new(EventKind::Comment, EventTeam::Both).describe("Back after restart"),
            t0 + Duration::from_secs(60),
        )
        .unwrap();
    assert_eq!(event.id, expected_next);
}

#[test]
fn empty_snapshot_overlays_defaults() {
    let snapshot: MatchSnapshot = serde_json::from_str("{}").unwrap();
    assert_eq!(snapshot.match_state, MatchState::default());
    assert_eq!(snapshot.teams, default_teams());
    assert!(snapshot.ledger.is_empty());
    assert_eq!(snapshot.ledger.next_id(), 1);
}

#[test]
fn partial_match_state_overlays_defaults() {
    let json = r#"{"matchState": {"currentPeriod": 3}, "savedAt": "2026-08-08T12:00:00Z"}"#;
    let snapshot: MatchSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.match_state.current_period, 3);
    assert_eq!(snapshot.match_state.max_periods, 4);
    assert_eq!(snapshot.match_state.period_duration, MatchDuration::from_mins(10));
    assert!(!snapshot.match_state.running);
}

#[test]
fn snapshot_wire_shape() {
    let (m, _) = played_director();
    let json = serde_json::to_value(m.snapshot()).unwrap();

    assert!(json["savedAt"].is_string());
    assert_eq!(json["matchState"]["currentPeriod"], 1);
    assert_eq!(json["matchState"]["periodDuration"], 600_000);
    assert_eq!(json["matchState"]["clock"], 7_000);
    assert_eq!(json["matchState"]["running"], true);
    assert_eq!(json["matchState"]["paused"], true);
    assert_eq!(json["matchState"]["scores"]["totals"]["home"], 2);
    assert_eq!(json["matchState"]["fouls"]["away"], 1);
    assert_eq!(json["teams"]["home"]["color1"], "#ffffff");
    assert_eq!(json["ledger"]["nextId"], 5);

    // Newest first on the wire too.
    let first = &json["ledger"]["entries"][0];
    assert_eq!(first["kind"], "pause");
    assert_eq!(first["team"], "both");
    assert!(first["createdAt"].is_string());
}

#[test]
fn running_snapshot_resumes_from_saved_clock() {
    let t0 = Instant::now();
    let mut m = MatchDirector::new(default_teams());
    m.start(t0);
    m.tick(t0 + Duration::from_secs(5));
    let snapshot = m.snapshot();
    assert!(snapshot.match_state.running);
    assert_eq!(snapshot.match_state.clock, MatchDuration::from_secs(5));

    // Much later, in a fresh process: the clock picks up where it left off
    // instead of jumping by the downtime.
    let t1 = t0 + Duration::from_secs(900);
    let mut restored = MatchDirector::from_snapshot(snapshot);
    restored.tick(t1);
    assert_eq!(restored.current_time(t1), MatchDuration::from_secs(5));
    restored.tick(t1 + Duration::from_secs(2));
    assert_eq!(
        restored.current_time(t1 + Duration::from_secs(2)),
        MatchDuration::from_secs(7)
    );
}
