//! # Pomodoro Pro Core Library
//!
//! This library provides the session logic for the Pomodoro Pro timer:
//! alternating work and break intervals, a goal per work session, and an
//! append-only habit log of goal outcomes. Front ends (the `pomopro` CLI)
//! are thin layers that call into this crate and render its state.
//!
//! ## Architecture
//!
//! - **Session Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per elapsed second
//! - **Tick Scheduler**: a tokio task that drives the engine while it runs
//!   and is cancelled as soon as it stops
//! - **Habit Log**: verdict history for completed work sessions
//! - **Storage**: TOML-based configuration for the front end
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core timer state machine
//! - [`TickScheduler`]: Periodic driver with scoped cancellation
//! - [`HabitLog`]: Append-only goal outcome history
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod habit;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use error::{ConfigError, CoreError, InvariantViolation, ValidationError};
pub use events::Event;
pub use habit::{HabitLog, HabitRecord, HabitSummary};
pub use storage::Config;
pub use ticker::{lock_engine, shared, SharedEngine, TickScheduler};
pub use timer::{
    format_clock, DeferredPrompt, Durations, EngineSnapshot, GoalPrompt, GoalReply, SessionEngine,
    SessionType, StaticPrompt, TimerState, DURATIONS,
};
