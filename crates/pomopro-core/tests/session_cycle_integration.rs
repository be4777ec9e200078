//! Integration tests for full Pomodoro cycles through the public API.
//!
//! Cycle layout exercised here:
//! | verdict | next break  | length |
//! |---------|-------------|--------|
//! | 1..=3   | Short Break | 300s   |
//! | 4       | Long Break  | 900s   |
//! | 5..=7   | Short Break | 300s   |
//! | 8       | Long Break  | 900s   |

use pomopro_core::{DeferredPrompt, Event, SessionEngine, SessionType, StaticPrompt, DURATIONS};

// ============================================================================
// Test Helpers
// ============================================================================

fn tick_n(engine: &mut SessionEngine, n: u32) -> Option<Event> {
    let mut last = None;
    for _ in 0..n {
        last = engine.tick();
    }
    last
}

/// Start the current session and tick until it reaches zero.
fn run_session(engine: &mut SessionEngine) -> Option<Event> {
    engine.start();
    let seconds = engine.seconds_left();
    tick_n(engine, seconds)
}

// ============================================================================
// Work → verdict → break
// ============================================================================

#[test]
fn test_work_session_reaches_pending_confirmation() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.start();
    tick_n(&mut engine, 1500);

    assert!(engine.pending_confirmation());
    assert!(!engine.is_running());
    assert_eq!(engine.seconds_left(), 0);
    assert_eq!(engine.clock(), "00:00");
}

#[test]
fn test_first_verdict_records_goal_and_starts_short_break() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.set_goal("draft");
    engine.start();
    tick_n(&mut engine, 1500);
    engine.resolve_goal(true);

    let records = engine.habit_log().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].session_number, 1);
    assert_eq!(records[0].goal, "draft");
    assert!(records[0].success);
    assert_eq!(records[0].to_string(), "1. draft - Success");

    assert_eq!(engine.completed_work_sessions(), 1);
    assert_eq!(engine.session_type(), SessionType::ShortBreak);
    assert_eq!(engine.seconds_left(), 300);
    assert!(!engine.is_running());
}

#[test]
fn test_every_fourth_verdict_routes_to_long_break() {
    let goals: Vec<String> = (1..=8).map(|n| format!("goal {n}")).collect();
    let mut engine = SessionEngine::new(StaticPrompt::new(goals.iter().skip(1).cloned()));
    engine.set_goal(goals[0].clone());

    for n in 1..=8u32 {
        assert_eq!(engine.session_type(), SessionType::Work);
        run_session(&mut engine);
        assert!(engine.pending_confirmation());

        let event = engine.resolve_goal(n % 3 != 0);
        let expected = if n % 4 == 0 {
            SessionType::LongBreak
        } else {
            SessionType::ShortBreak
        };
        assert!(matches!(event, Some(Event::GoalResolved { next, .. }) if next == expected));
        assert_eq!(engine.session_type(), expected);
        assert_eq!(engine.seconds_left(), DURATIONS.seconds_for(expected));
        assert!(!engine.is_running());

        let event = run_session(&mut engine);
        assert!(matches!(event, Some(Event::BreakFinished { finished, .. }) if finished == expected));
    }

    let log = engine.habit_log();
    assert_eq!(log.len(), 8);
    assert_eq!(engine.completed_work_sessions(), 8);
    let logged: Vec<&str> = log.iter().map(|r| r.goal.as_str()).collect();
    let expected: Vec<&str> = goals.iter().map(String::as_str).collect();
    assert_eq!(logged, expected);
    assert_eq!(log.failures(), 2);
}

// ============================================================================
// Command semantics
// ============================================================================

#[test]
fn test_reset_is_idempotent() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.start();
    tick_n(&mut engine, 42);

    engine.reset(SessionType::LongBreak);
    let first = engine.state().clone();
    engine.reset(SessionType::LongBreak);
    assert_eq!(engine.state(), &first);
    assert_eq!(first.seconds_left, 900);
    assert!(!first.is_running);
    assert!(!first.pending_confirmation);
}

#[test]
fn test_stop_resume_preserves_remaining_seconds() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.start();
    tick_n(&mut engine, 10);
    assert_eq!(engine.seconds_left(), 1490);
    engine.stop();
    tick_n(&mut engine, 10);
    engine.resume();
    assert_eq!(engine.seconds_left(), 1490);
    assert!(engine.is_running());
}

#[test]
fn test_resolve_goal_when_not_pending_changes_nothing() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.set_goal("unused");
    let before = engine.snapshot();
    assert!(engine.resolve_goal(true).is_none());
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_set_goal_is_allowed_while_pending() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.set_goal("first");
    run_session(&mut engine);
    engine.set_goal("renamed");
    engine.resolve_goal(false);
    assert_eq!(engine.habit_log().records()[0].goal, "renamed");
    assert!(!engine.habit_log().records()[0].success);
}

// ============================================================================
// Deferred goal prompt
// ============================================================================

#[test]
fn test_deferred_prompt_cycle() {
    let mut engine = SessionEngine::new(DeferredPrompt);
    engine.set_goal("write docs");
    run_session(&mut engine);
    engine.resolve_goal(true);

    let event = run_session(&mut engine);
    assert!(matches!(event, Some(Event::GoalRequested { ref prompt, .. })
        if prompt == "Enter your goal for the next work session:"));
    assert!(engine.awaiting_goal());

    engine.provide_goal(None);
    assert_eq!(engine.session_type(), SessionType::Work);
    assert_eq!(engine.seconds_left(), 1500);
    assert_eq!(engine.current_goal(), "");
}

#[test]
fn test_reset_abandons_deferred_goal_request() {
    let mut engine = SessionEngine::new(DeferredPrompt);
    engine.reset(SessionType::ShortBreak);
    run_session(&mut engine);
    assert!(engine.awaiting_goal());

    engine.reset(SessionType::Work);
    assert!(!engine.awaiting_goal());
    assert!(engine.provide_goal(Some("late".into())).is_none());
    assert!(engine.start().is_some());
}

#[test]
fn test_snapshot_json_includes_log_and_summary() {
    let mut engine = SessionEngine::new(StaticPrompt::silent());
    engine.set_goal("ship");
    run_session(&mut engine);
    engine.resolve_goal(true);

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["session_type"], "short_break");
    assert_eq!(json["clock"], "05:00");
    assert_eq!(json["completed_work_sessions"], 1);
    assert_eq!(json["habit_log"][0]["goal"], "ship");
    assert_eq!(json["summary"]["successes"], 1);
}
