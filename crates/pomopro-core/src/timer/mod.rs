mod engine;
mod prompt;
mod session;

pub use engine::{EngineSnapshot, SessionEngine, TimerState};
pub use prompt::{DeferredPrompt, GoalPrompt, GoalReply, StaticPrompt, DEFAULT_GOAL_PROMPT};
pub use session::{format_clock, Durations, SessionType, DURATIONS};
