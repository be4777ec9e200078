//! Periodic tick driver for a shared [`SessionEngine`].
//!
//! The scheduler owns at most one spawned tokio task per engine. The task
//! ticks the engine once per period while it is running and exits on its
//! own when a tick leaves the engine idle. Call [`TickScheduler::sync`]
//! after every user command so the task follows the running flag; dropping
//! the scheduler aborts the task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::events::Event;
use crate::timer::SessionEngine;

/// Engine handle shared between the presentation layer and the ticking task.
pub type SharedEngine = Arc<Mutex<SessionEngine>>;

pub fn shared(engine: SessionEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Lock the engine. Each operation runs to completion, so a poisoned lock
/// still guards a consistent state.
pub fn lock_engine(engine: &SharedEngine) -> MutexGuard<'_, SessionEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct TickScheduler {
    engine: SharedEngine,
    period: Duration,
    events: mpsc::UnboundedSender<Event>,
    task: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(
        engine: SharedEngine,
        period: Duration,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            engine,
            period,
            events,
            task: None,
        }
    }

    /// Whether a ticking task is alive.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawn the ticking task if the engine runs, cancel it if it does not.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self) {
        let running = lock_engine(&self.engine).is_running();
        if running {
            if !self.is_active() {
                self.spawn();
            }
        } else {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("tick task cancelled");
        }
    }

    fn spawn(&mut self) {
        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        let period = self.period;
        tracing::debug!(period_ms = period.as_millis() as u64, "tick task spawned");

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (event, still_running) = {
                    let mut engine = lock_engine(&engine);
                    if !engine.is_running() {
                        break;
                    }
                    let event = engine.tick();
                    (event, engine.is_running())
                };
                if let Some(event) = event {
                    if events.send(event).is_err() {
                        break;
                    }
                }
                if !still_running {
                    break;
                }
            }
            tracing::debug!("tick task finished");
        }));
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{SessionType, StaticPrompt};

    fn setup() -> (SharedEngine, TickScheduler, mpsc::UnboundedReceiver<Event>) {
        let engine = shared(SessionEngine::new(StaticPrompt::new(["next goal"])));
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = TickScheduler::new(Arc::clone(&engine), Duration::from_secs(1), tx);
        (engine, scheduler, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_while_running() {
        let (engine, mut scheduler, _rx) = setup();
        lock_engine(&engine).start();
        scheduler.sync();
        assert!(scheduler.is_active());

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(lock_engine(&engine).seconds_left(), 1490);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_engine_spawns_nothing() {
        let (engine, mut scheduler, _rx) = setup();
        scheduler.sync();
        assert!(!scheduler.is_active());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(lock_engine(&engine).seconds_left(), 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_task() {
        let (engine, mut scheduler, _rx) = setup();
        lock_engine(&engine).start();
        scheduler.sync();
        tokio::time::sleep(Duration::from_millis(5_500)).await;

        lock_engine(&engine).stop();
        scheduler.sync();
        assert!(!scheduler.is_active());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(lock_engine(&engine).seconds_left(), 1495);
    }

    #[tokio::test(start_paused = true)]
    async fn task_exits_when_session_ends() {
        let (engine, mut scheduler, mut rx) = setup();
        {
            let mut engine = lock_engine(&engine);
            engine.reset(SessionType::ShortBreak);
            engine.start();
        }
        scheduler.sync();

        tokio::time::sleep(Duration::from_millis(300_500)).await;
        let event = rx.recv().await;
        assert!(matches!(
            event,
            Some(Event::BreakFinished { finished: SessionType::ShortBreak, .. })
        ));
        assert!(!scheduler.is_active());

        let engine = lock_engine(&engine);
        assert_eq!(engine.session_type(), SessionType::Work);
        assert_eq!(engine.seconds_left(), 1500);
        assert_eq!(engine.current_goal(), "next goal");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_aborts_ticking() {
        let (engine, mut scheduler, _rx) = setup();
        lock_engine(&engine).start();
        scheduler.sync();
        drop(scheduler);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let engine = lock_engine(&engine);
        assert!(engine.is_running());
        assert_eq!(engine.seconds_left(), 1500);
    }
}
