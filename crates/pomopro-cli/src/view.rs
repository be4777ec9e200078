//! Plain-text rendering of engine events and state.

use pomopro_core::{format_clock, Config, Event, HabitLog, SessionEngine, DURATIONS};

pub struct View {
    confirm_text: String,
    show_log_on_status: bool,
}

impl View {
    pub fn new(config: &Config) -> Self {
        Self {
            confirm_text: config.display.confirm_text.clone(),
            show_log_on_status: config.display.show_log_on_status,
        }
    }

    pub fn event(&self, event: &Event) -> String {
        match event {
            Event::SessionStarted {
                session_type,
                seconds_left,
                ..
            } => format!("{session_type} session started ({})", format_clock(*seconds_left)),
            Event::SessionStopped {
                session_type,
                seconds_left,
                ..
            } => format!("{session_type} session stopped at {}", format_clock(*seconds_left)),
            Event::SessionResumed {
                session_type,
                seconds_left,
                ..
            } => format!("{session_type} session resumed ({})", format_clock(*seconds_left)),
            Event::SessionReset {
                session_type,
                seconds_left,
                ..
            } => format!("{session_type} session ready ({})", format_clock(*seconds_left)),
            Event::ConfirmationRequested { goal, .. } => {
                format!("Work session finished. {}: \"{goal}\"? [yes/no]", self.confirm_text)
            }
            Event::GoalRequested { prompt, .. } => prompt.clone(),
            Event::BreakFinished { finished, goal, .. } => {
                let goal = if goal.is_empty() { "(none)" } else { goal.as_str() };
                format!(
                    "{finished} over. Next goal: {goal}\nWork session ready ({})",
                    format_clock(DURATIONS.work)
                )
            }
            Event::GoalResolved { record, next, .. } => format!(
                "Recorded {record}\n{next} session ready ({})",
                format_clock(DURATIONS.seconds_for(*next))
            ),
            Event::GoalSet { goal, .. } => format!("Goal set: {goal}"),
        }
    }

    pub fn status(&self, engine: &SessionEngine) -> String {
        let activity = if engine.pending_confirmation() {
            "waiting for verdict"
        } else if engine.awaiting_goal() {
            "waiting for next goal"
        } else if engine.is_running() {
            "running"
        } else {
            "idle"
        };
        let goal = if engine.current_goal().is_empty() {
            "(none)"
        } else {
            engine.current_goal()
        };
        let mut out = format!(
            "{} Session  {}  [{activity}]\nGoal: {goal}\nCompleted work sessions: {}",
            engine.session_type(),
            engine.clock(),
            engine.completed_work_sessions()
        );
        if self.show_log_on_status {
            out.push('\n');
            out.push_str(&self.log(engine.habit_log()));
        }
        out
    }

    pub fn log(&self, log: &HabitLog) -> String {
        let mut out = String::from("Habit Tracker");
        if log.is_empty() {
            out.push_str("\nNo sessions tracked yet.");
            return out;
        }
        for record in log {
            out.push('\n');
            out.push_str(&record.to_string());
        }
        out.push('\n');
        out.push_str(&log.summary().to_string());
        out
    }

    /// Explain why a command had no effect.
    pub fn ignored(&self, command: &str, engine: &SessionEngine) -> String {
        let reason = if engine.pending_confirmation() {
            "a verdict is pending, answer yes or no"
        } else if engine.awaiting_goal() {
            "waiting for the next goal"
        } else if engine.is_running() {
            "the session is already running"
        } else if command == "resume" && engine.seconds_left() == 0 {
            "no time left in this session"
        } else if command == "yes" || command == "no" {
            "no session is waiting for a verdict"
        } else if command == "stop" {
            "the session is not running"
        } else {
            "not valid right now"
        };
        format!("{command} ignored: {reason}")
    }
}
