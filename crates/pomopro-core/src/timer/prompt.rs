//! Goal prompt capability.
//!
//! When a break ends the engine asks the presentation layer for the next
//! work goal. A prompt either answers right away or defers; a deferred
//! answer is delivered later through `SessionEngine::provide_goal`.

use std::collections::VecDeque;

/// Default question shown when a break ends.
pub const DEFAULT_GOAL_PROMPT: &str = "Enter your goal for the next work session:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalReply {
    /// Answered synchronously. `None` means the user gave nothing.
    Ready(Option<String>),
    /// The answer arrives later via `provide_goal`.
    Deferred,
}

pub trait GoalPrompt: Send {
    fn request_goal(&mut self, prompt: &str) -> GoalReply;
}

impl<F> GoalPrompt for F
where
    F: FnMut(&str) -> Option<String> + Send,
{
    fn request_goal(&mut self, prompt: &str) -> GoalReply {
        GoalReply::Ready(self(prompt))
    }
}

/// Always defers. Used by interactive front ends that collect the goal
/// from their own input stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredPrompt;

impl GoalPrompt for DeferredPrompt {
    fn request_goal(&mut self, _prompt: &str) -> GoalReply {
        GoalReply::Deferred
    }
}

/// Answers from a queue of prepared goals, then with `None` once drained.
#[derive(Debug, Default, Clone)]
pub struct StaticPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl StaticPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|s| Some(s.into())).collect(),
            asked: Vec::new(),
        }
    }

    /// A prompt whose user never types anything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Prompt texts seen so far, oldest first.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl GoalPrompt for StaticPrompt {
    fn request_goal(&mut self, prompt: &str) -> GoalReply {
        self.asked.push(prompt.to_string());
        GoalReply::Ready(self.answers.pop_front().flatten())
    }
}
