use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(SessionType::Work),
            "short" | "short-break" | "short_break" | "short break" => Ok(SessionType::ShortBreak),
            "long" | "long-break" | "long_break" | "long break" => Ok(SessionType::LongBreak),
            _ => Err(ValidationError::InvalidValue {
                field: "session_type".into(),
                message: format!("expected work, short or long, got '{s}'"),
            }),
        }
    }
}

/// Fixed interval lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Durations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub sessions_before_long_break: u32,
}

/// The built-in intervals. These do not change for the lifetime of the process.
pub const DURATIONS: Durations = Durations {
    work: 25 * 60,
    short_break: 5 * 60,
    long_break: 15 * 60,
    sessions_before_long_break: 4,
};

impl Durations {
    pub fn seconds_for(&self, session_type: SessionType) -> u32 {
        match session_type {
            SessionType::Work => self.work,
            SessionType::ShortBreak => self.short_break,
            SessionType::LongBreak => self.long_break,
        }
    }

    /// Break that follows the verdict which brought the completed count to `completed`.
    pub fn break_after(&self, completed: u32) -> SessionType {
        if self.sessions_before_long_break > 0 && completed % self.sessions_before_long_break == 0 {
            SessionType::LongBreak
        } else {
            SessionType::ShortBreak
        }
    }
}

/// Render seconds as `MM:SS`. There is no hour component.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
