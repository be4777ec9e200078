//! Session engine implementation.
//!
//! The engine is a tick-driven state machine over one countdown. It does not
//! use internal threads - the caller (usually [`crate::ticker::TickScheduler`])
//! is responsible for calling `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Work(running)         --timeout-->      Work(pending confirmation)
//! Work(pending)         --resolve_goal--> ShortBreak | LongBreak (idle)
//! Break(running)        --timeout-->      [goal prompt] --> Work(idle)
//! Break(awaiting goal)  --provide_goal--> Work(idle)
//! any(idle)             --start/resume--> any(running)
//! any(running)          --stop-->         any(idle, same seconds)
//! any                   --reset(T)-->     T(idle, full duration)
//! ```
//!
//! Commands return `Some(Event)` when they changed the state and `None` when
//! they were ignored because their precondition did not hold.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(StaticPrompt::new(["write tests"]));
//! engine.set_goal("draft chapter");
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when the session ends
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::prompt::{GoalPrompt, GoalReply, DEFAULT_GOAL_PROMPT};
use super::session::{format_clock, SessionType, DURATIONS};
use crate::error::InvariantViolation;
use crate::events::Event;
use crate::habit::{HabitLog, HabitRecord, HabitSummary};

/// The mutable session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub session_type: SessionType,
    pub seconds_left: u32,
    pub is_running: bool,
    /// A work session hit zero and waits for a success/failure verdict.
    pub pending_confirmation: bool,
    /// A break hit zero and a deferred goal prompt has not answered yet.
    pub awaiting_goal: bool,
    pub current_goal: String,
    pub completed_work_sessions: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            session_type: SessionType::Work,
            seconds_left: DURATIONS.work,
            is_running: false,
            pending_confirmation: false,
            awaiting_goal: false,
            current_goal: String::new(),
            completed_work_sessions: 0,
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    #[serde(flatten)]
    pub state: TimerState,
    pub clock: String,
    pub total_seconds: u32,
    pub habit_log: HabitLog,
    pub summary: HabitSummary,
}

/// Core session engine.
///
/// Owns the timer state, the habit log and the goal prompt capability.
pub struct SessionEngine {
    state: TimerState,
    habit_log: HabitLog,
    prompt: Box<dyn GoalPrompt>,
    prompt_text: String,
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("state", &self.state)
            .field("habit_log", &self.habit_log)
            .field("prompt_text", &self.prompt_text)
            .finish_non_exhaustive()
    }
}

impl SessionEngine {
    /// Create an engine on an idle work session with an empty goal.
    pub fn new(prompt: impl GoalPrompt + 'static) -> Self {
        Self {
            state: TimerState::default(),
            habit_log: HabitLog::new(),
            prompt: Box::new(prompt),
            prompt_text: DEFAULT_GOAL_PROMPT.to_string(),
        }
    }

    /// Override the question passed to the goal prompt when a break ends.
    pub fn with_prompt_text(mut self, text: impl Into<String>) -> Self {
        self.prompt_text = text.into();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn session_type(&self) -> SessionType {
        self.state.session_type
    }

    pub fn seconds_left(&self) -> u32 {
        self.state.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn pending_confirmation(&self) -> bool {
        self.state.pending_confirmation
    }

    pub fn awaiting_goal(&self) -> bool {
        self.state.awaiting_goal
    }

    pub fn current_goal(&self) -> &str {
        &self.state.current_goal
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.state.completed_work_sessions
    }

    pub fn habit_log(&self) -> &HabitLog {
        &self.habit_log
    }

    pub fn total_seconds(&self) -> u32 {
        DURATIONS.seconds_for(self.state.session_type)
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.state.seconds_left)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state.clone(),
            clock: self.clock(),
            total_seconds: self.total_seconds(),
            habit_log: self.habit_log.clone(),
            summary: self.habit_log.summary(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running || self.state.pending_confirmation || self.state.awaiting_goal {
            return None;
        }
        self.state.is_running = true;
        tracing::debug!(session = %self.state.session_type, seconds_left = self.state.seconds_left, "session started");
        self.debug_check();
        Some(Event::SessionStarted {
            session_type: self.state.session_type,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    /// Always leaves the engine idle. Only reports an event if it was running.
    pub fn stop(&mut self) -> Option<Event> {
        let was_running = self.state.is_running;
        self.state.is_running = false;
        if !was_running {
            return None;
        }
        tracing::debug!(session = %self.state.session_type, seconds_left = self.state.seconds_left, "session stopped");
        self.debug_check();
        Some(Event::SessionStopped {
            session_type: self.state.session_type,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state.is_running
            || self.state.seconds_left == 0
            || self.state.pending_confirmation
            || self.state.awaiting_goal
        {
            return None;
        }
        self.state.is_running = true;
        tracing::debug!(session = %self.state.session_type, seconds_left = self.state.seconds_left, "session resumed");
        self.debug_check();
        Some(Event::SessionResumed {
            session_type: self.state.session_type,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    /// The only way the session type changes. Clears any pending verdict or goal request.
    pub fn reset(&mut self, session_type: SessionType) -> Option<Event> {
        self.state.is_running = false;
        self.state.pending_confirmation = false;
        self.state.awaiting_goal = false;
        self.state.session_type = session_type;
        self.state.seconds_left = DURATIONS.seconds_for(session_type);
        tracing::debug!(session = %session_type, "session reset");
        self.debug_check();
        Some(Event::SessionReset {
            session_type,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    /// Call once per elapsed second. Returns `Some(Event)` when the session ends.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        if self.state.seconds_left > 0 {
            self.state.seconds_left -= 1;
        }
        if self.state.seconds_left > 0 {
            return None;
        }
        self.state.is_running = false;
        let event = self.complete_session();
        self.debug_check();
        Some(event)
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) -> Option<Event> {
        self.state.current_goal = goal.into();
        Some(Event::GoalSet {
            goal: self.state.current_goal.clone(),
            at: Utc::now(),
        })
    }

    /// Record the verdict for the finished work session and move to the next break.
    pub fn resolve_goal(&mut self, success: bool) -> Option<Event> {
        if !self.state.pending_confirmation {
            return None;
        }
        let session_number = self.state.completed_work_sessions + 1;
        let record = HabitRecord {
            session_number,
            goal: self.state.current_goal.clone(),
            success,
            recorded_at: Utc::now(),
        };
        self.habit_log.push(record.clone());
        self.state.completed_work_sessions = session_number;
        self.state.pending_confirmation = false;

        let next = DURATIONS.break_after(session_number);
        tracing::info!(session_number, success, next = %next, "goal resolved");
        self.reset(next);
        Some(Event::GoalResolved {
            record,
            next,
            at: Utc::now(),
        })
    }

    /// Deliver the answer to a deferred goal prompt and return to an idle work session.
    pub fn provide_goal(&mut self, goal: Option<String>) -> Option<Event> {
        if !self.state.awaiting_goal {
            return None;
        }
        let finished = self.state.session_type;
        Some(self.begin_work(finished, goal))
    }

    /// Check every state invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let s = &self.state;
        let max = DURATIONS.seconds_for(s.session_type);
        if s.seconds_left > max {
            return Err(InvariantViolation::SecondsOutOfRange {
                seconds_left: s.seconds_left,
                max,
            });
        }
        if s.is_running && s.pending_confirmation {
            return Err(InvariantViolation::RunningWhilePending);
        }
        if s.awaiting_goal
            && (s.is_running || s.pending_confirmation || s.session_type == SessionType::Work)
        {
            return Err(InvariantViolation::AwaitingGoalWhileActive);
        }
        if self.habit_log.len() != s.completed_work_sessions as usize {
            return Err(InvariantViolation::LogLengthMismatch {
                log_len: self.habit_log.len(),
                completed: s.completed_work_sessions,
            });
        }
        for (index, record) in self.habit_log.iter().enumerate() {
            let expected = index as u32 + 1;
            if record.session_number != expected {
                return Err(InvariantViolation::SessionNumberGap {
                    index,
                    expected,
                    found: record.session_number,
                });
            }
        }
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_session(&mut self) -> Event {
        let finished = self.state.session_type;
        if finished == SessionType::Work {
            self.state.pending_confirmation = true;
            tracing::info!(goal = %self.state.current_goal, "work session finished, awaiting verdict");
            return Event::ConfirmationRequested {
                goal: self.state.current_goal.clone(),
                session_number: self.state.completed_work_sessions + 1,
                at: Utc::now(),
            };
        }

        tracing::info!(session = %finished, "break finished");
        match self.prompt.request_goal(&self.prompt_text) {
            GoalReply::Ready(goal) => self.begin_work(finished, goal),
            GoalReply::Deferred => {
                self.state.awaiting_goal = true;
                Event::GoalRequested {
                    prompt: self.prompt_text.clone(),
                    at: Utc::now(),
                }
            }
        }
    }

    fn begin_work(&mut self, finished: SessionType, goal: Option<String>) -> Event {
        self.state.current_goal = goal.unwrap_or_default();
        self.reset(SessionType::Work);
        Event::BreakFinished {
            finished,
            goal: self.state.current_goal.clone(),
            at: Utc::now(),
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "session invariant violated: {:?}",
            self.check_invariants()
        );
    }
}
