//! Greenroom console entry point.
//!
//! Runs one funnel session in a terminal: the scripted conversation
//! replays on its own pacing while stdin drives the funnel intents.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use greenroom_core::clock::SystemClock;
use greenroom_core::delay::{DelayPolicy, UniformDelayPolicy};
use greenroom_gate::domain::events::GateEventKind;
use greenroom_script::samples;
use greenroom_script::script::Script;
use greenroom_session::session::FunnelSession;

mod actions;
mod config;
mod render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. The default filter keeps log lines
    // from interleaving with the rendered transcript.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if std::env::var("GREENROOM_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Read configuration from environment.
    let config = config::ConsoleConfig::from_env()?;
    let script = match &config.script_path {
        Some(path) => {
            let payload = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read script {path}: {e}"))?;
            Script::from_json(&payload)?
        }
        None => samples::launch_group(),
    };
    let delays: Box<dyn DelayPolicy> = match config.seed {
        Some(seed) => Box::new(UniformDelayPolicy::from_seed(seed)),
        None => Box::new(UniformDelayPolicy::from_os_rng()),
    };

    // Start the session.
    let share_quota = config.session.share_quota;
    let mut session = FunnelSession::start(
        Arc::new(script),
        config.session,
        Arc::new(SystemClock),
        delays,
        Arc::new(actions::ConsoleActions),
    );
    tracing::info!(session_id = %session.session_id(), "console session started");

    println!("Greenroom. Commands: join, share, tap, quit.");
    println!();

    let mut replay_feed = session
        .take_replay_events()
        .ok_or("replay feed already taken")?;
    let mut gate_feed = session.take_gate_events().ok_or("gate feed already taken")?;
    let mut replay_feed_open = true;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = replay_feed.recv(), if replay_feed_open => {
                match event {
                    Some(event) => {
                        if let Some(line) = render::replay_line(&event.kind) {
                            println!("{line}");
                        }
                    }
                    None => replay_feed_open = false,
                }
            }
            event = gate_feed.recv() => {
                let Some(event) = event else { break };
                if let Some(line) = render::gate_line(&event.kind, share_quota) {
                    println!("{line}");
                }
                if matches!(event.kind, GateEventKind::ShareQuotaReached(_)) {
                    break;
                }
            }
            line = input.next_line() => {
                match line? {
                    Some(line) => match line.trim() {
                        "join" => {
                            if let Err(error) = session.join().await {
                                println!("!! {error}");
                            }
                        }
                        "share" => session.share().await,
                        "tap" => session.tap().await,
                        "quit" | "exit" => break,
                        "" => {}
                        other => println!("!! unknown command: {other}"),
                    },
                    None => break,
                }
            }
        }
    }

    session.teardown().await;
    println!("session over.");

    Ok(())
}
