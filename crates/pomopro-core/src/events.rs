use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::HabitRecord;
use crate::timer::SessionType;

/// Every accepted state change in the engine produces an Event.
/// The presentation layer renders them; ignored commands produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        session_type: SessionType,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    SessionStopped {
        session_type: SessionType,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        session_type: SessionType,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        session_type: SessionType,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    /// A work session reached zero and waits for a verdict.
    ConfirmationRequested {
        goal: String,
        session_number: u32,
        at: DateTime<Utc>,
    },
    /// A break reached zero and the goal prompt deferred its answer.
    GoalRequested {
        prompt: String,
        at: DateTime<Utc>,
    },
    /// A break is over and the engine is back on an idle work session.
    BreakFinished {
        finished: SessionType,
        goal: String,
        at: DateTime<Utc>,
    },
    GoalResolved {
        record: HabitRecord,
        next: SessionType,
        at: DateTime<Utc>,
    },
    GoalSet {
        goal: String,
        at: DateTime<Utc>,
    },
}
