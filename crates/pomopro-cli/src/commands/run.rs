//! Interactive timer session.
//!
//! One command per stdin line. The engine is shared with a [`TickScheduler`]
//! that ticks it in real time; tick events arrive over a channel and are
//! printed as they happen. While the engine waits for the next goal, the
//! whole next line is taken as the goal text. Input is read as raw bytes and
//! decoded lossily, so a stray non-UTF-8 byte never ends the session.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use pomopro_core::{
    lock_engine, shared, Config, DeferredPrompt, Event, SessionEngine, SessionType, SharedEngine,
    TickScheduler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::view::View;

const HELP: &str = "\
commands:
  start                   begin counting down
  stop                    pause the countdown
  resume                  continue a paused countdown
  reset <work|short|long> switch to a fresh session of that type
                          (refused while a verdict is pending)
  goal <text>             set the goal for the work session
  yes | no                verdict for a finished work session
  tick [n]                advance the timer by n seconds (default 1)
  status [--json]         show the current session
  log [--json]            show the habit tracker
  help                    show this help
  quit                    leave

after a break ends, the next line is the goal for the coming work session,
even if it reads like a command.";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Resume,
    Reset(SessionType),
    Goal(String),
    Verdict(bool),
    Tick(u32),
    Status { json: bool },
    Log { json: bool },
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let json = rest == "--json";
    let command = match word.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "stop" | "pause" => Command::Stop,
        "resume" => Command::Resume,
        "reset" => {
            let target = if rest.is_empty() { "work" } else { rest };
            Command::Reset(target.parse::<SessionType>().map_err(|e| e.to_string())?)
        }
        "goal" => Command::Goal(rest.to_string()),
        "yes" | "y" => Command::Verdict(true),
        "no" | "n" => Command::Verdict(false),
        "tick" => {
            let n = if rest.is_empty() {
                1
            } else {
                rest.parse::<u32>()
                    .map_err(|_| format!("tick expects a number of seconds, got '{rest}'"))?
            };
            Command::Tick(n)
        }
        "status" => Command::Status { json },
        "log" => Command::Log { json },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', type help")),
    };
    Ok(command)
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(config: Config, tick_ms: Option<u64>) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(config, tick_ms));
    // A pending stdin read would otherwise hold shutdown until the next line.
    runtime.shutdown_background();
    result
}

async fn session(config: Config, tick_ms: Option<u64>) -> Result<(), Box<dyn Error>> {
    let period = tick_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.tick_period());
    let view = View::new(&config);
    let engine = shared(
        SessionEngine::new(DeferredPrompt).with_prompt_text(config.prompt.goal_text.clone()),
    );
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut scheduler = TickScheduler::new(Arc::clone(&engine), period, events_tx);
    tracing::info!(period_ms = period.as_millis() as u64, "interactive session started");

    println!("Pomodoro Pro (type help for commands)");
    println!("{}", view.status(&lock_engine(&engine)));

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    loop {
        tokio::select! {
            line = lines.next_segment() => {
                let Some(bytes) = line? else { break };
                let line = String::from_utf8_lossy(&bytes);
                let flow = handle_line(&engine, &view, &line)?;
                scheduler.sync();
                if let Flow::Quit = flow {
                    break;
                }
            }
            Some(event) = events_rx.recv() => {
                println!("{}", view.event(&event));
            }
        }
    }

    scheduler.cancel();
    tracing::info!("interactive session ended");
    Ok(())
}

/// Tick a running engine up to `seconds` times, stopping as soon as the
/// countdown ends.
fn advance(engine: &mut SessionEngine, seconds: u32) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..seconds {
        if !engine.is_running() {
            break;
        }
        events.extend(engine.tick());
    }
    events
}

fn handle_line(engine: &SharedEngine, view: &View, line: &str) -> Result<Flow, Box<dyn Error>> {
    let mut engine = lock_engine(engine);

    if engine.awaiting_goal() {
        let goal = line.trim();
        let goal = (!goal.is_empty()).then(|| goal.to_string());
        if let Some(event) = engine.provide_goal(goal) {
            println!("{}", view.event(&event));
        }
        return Ok(Flow::Continue);
    }

    if line.trim().is_empty() {
        return Ok(Flow::Continue);
    }
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(message) => {
            println!("{message}");
            return Ok(Flow::Continue);
        }
    };
    tracing::debug!(?command, "command");

    let (name, event) = match command {
        Command::Start => ("start", engine.start()),
        Command::Stop => ("stop", engine.stop()),
        Command::Resume => ("resume", engine.resume()),
        Command::Reset(_) if engine.pending_confirmation() => ("reset", None),
        Command::Reset(session_type) => ("reset", engine.reset(session_type)),
        Command::Goal(goal) => ("goal", engine.set_goal(goal)),
        Command::Verdict(success) => (
            if success { "yes" } else { "no" },
            engine.resolve_goal(success),
        ),
        Command::Tick(n) => {
            for event in advance(&mut engine, n) {
                println!("{}", view.event(&event));
            }
            return Ok(Flow::Continue);
        }
        Command::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            } else {
                println!("{}", view.status(&engine));
            }
            return Ok(Flow::Continue);
        }
        Command::Log { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.habit_log())?);
            } else {
                println!("{}", view.log(engine.habit_log()));
            }
            return Ok(Flow::Continue);
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    match event {
        Some(event) => println!("{}", view.event(&event)),
        None => println!("{}", view.ignored(name, &engine)),
    }
    Ok(Flow::Continue)
}
