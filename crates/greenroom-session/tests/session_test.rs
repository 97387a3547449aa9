//! Integration tests for the funnel session.
//!
//! These run on a paused tokio clock: awaiting a snapshot change parks
//! the test, which auto-advances time to the next due timer, so whole
//! funnel runs execute deterministically and instantly.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::advance;
use uuid::Uuid;

use greenroom_gate::domain::events::GateEventKind;
use greenroom_script::message::{MessageKind, Sender, ScriptedMessage};
use greenroom_script::script::Script;
use greenroom_session::config::SessionConfig;
use greenroom_session::session::FunnelSession;
use greenroom_test_support::{ExternalCall, FixedClock, MinDelayPolicy, RecordingActions};

fn peer(content: &str, avatar: &str) -> ScriptedMessage {
    ScriptedMessage {
        sender: Sender::Peer,
        kind: MessageKind::Text,
        content: content.to_owned(),
        avatar_ref: Some(avatar.to_owned()),
    }
}

fn local(content: &str) -> ScriptedMessage {
    ScriptedMessage {
        sender: Sender::Local,
        kind: MessageKind::Text,
        content: content.to_owned(),
        avatar_ref: None,
    }
}

fn start_session(
    messages: Vec<ScriptedMessage>,
    config: SessionConfig,
) -> (FunnelSession, Arc<RecordingActions>) {
    let actions = Arc::new(RecordingActions::new());
    let session = FunnelSession::start(
        Arc::new(Script::new(messages)),
        config,
        Arc::new(FixedClock::at(2026, 8, 24, 12, 0, 0)),
        Box::new(MinDelayPolicy),
        Arc::clone(&actions) as Arc<dyn greenroom_core::actions::ExternalActions>,
    );
    (session, actions)
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_runs_the_funnel_to_the_terminal_redirect() {
    // Arrange
    let (session, actions) = start_session(
        vec![peer("welcome to the launch", "avatar-nora"), local("hey all")],
        SessionConfig::default(),
    );
    let join_url = session.config().destinations.join_url.clone();
    let share_text = session.config().destinations.share_text.clone();
    let redirect_url = session.config().destinations.redirect_url.clone();

    // The replay finishes on its own pacing.
    let mut replay_rx = session.subscribe_replay();
    replay_rx
        .wait_for(|snapshot| snapshot.completed)
        .await
        .unwrap();
    assert_eq!(session.snapshot().replay.transcript.len(), 2);

    // The call-to-action reveals at its own deadline, after completion.
    let mut gate_rx = session.subscribe_gate();
    gate_rx
        .wait_for(|snapshot| snapshot.call_to_action_revealed)
        .await
        .unwrap();

    // Act: accept the call-to-action, then share up to the quota.
    session.join().await.unwrap();
    assert!(session.snapshot().gate.gate_open);
    for _ in 0..5 {
        session.share().await;
    }

    // Assert: the join link, five composers, and exactly one redirect, in
    // that order, with the redirect directly after the fifth composer.
    let mut expected = vec![ExternalCall::Link(join_url)];
    expected.extend(std::iter::repeat_n(
        ExternalCall::ShareComposer(share_text.clone()),
        5,
    ));
    expected.push(ExternalCall::Redirect(redirect_url));
    assert_eq!(actions.calls(), expected);

    let gate = session.snapshot().gate;
    assert_eq!(gate.share_count, 5);
    assert!(gate.quota_reached);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shares_past_the_quota_never_redirect_again() {
    // Arrange
    let (session, actions) = start_session(vec![local("hi")], SessionConfig::default());
    let mut gate_rx = session.subscribe_gate();
    gate_rx
        .wait_for(|snapshot| snapshot.call_to_action_revealed)
        .await
        .unwrap();
    session.join().await.unwrap();

    // Act
    for _ in 0..8 {
        session.share().await;
    }

    // Assert
    assert_eq!(actions.redirect_count(), 1);
    let composers = actions
        .calls()
        .iter()
        .filter(|call| matches!(call, ExternalCall::ShareComposer(_)))
        .count();
    assert_eq!(composers, 8);
    assert_eq!(session.snapshot().gate.share_count, 5);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shares_count_and_redirect_without_a_join() {
    // Arrange: sharing is a plain counter, independent of the reveal and
    // of whether the gate view was ever opened.
    let (session, actions) = start_session(vec![local("hi")], SessionConfig::default());
    let redirect_url = session.config().destinations.redirect_url.clone();

    // Act
    let mut counts = Vec::new();
    for _ in 0..5 {
        session.share().await;
        counts.push(session.snapshot().gate.share_count);
    }

    // Assert
    assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    assert_eq!(actions.redirect_count(), 1);
    let calls = actions.calls();
    assert_eq!(calls.last(), Some(&ExternalCall::Redirect(redirect_url)));
    assert!(!session.snapshot().gate.gate_open);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_second_join_is_rejected_after_the_link_opens() {
    // Arrange
    let (mut session, actions) = start_session(vec![local("hi")], SessionConfig::default());
    let join_url = session.config().destinations.join_url.clone();
    let mut gate_rx = session.subscribe_gate();
    gate_rx
        .wait_for(|snapshot| snapshot.call_to_action_revealed)
        .await
        .unwrap();

    // Act
    session.join().await.unwrap();
    let second = session.join().await;

    // Assert: the destination opens on every join, but only the first one
    // flips the gate.
    assert!(second.is_err());
    assert_eq!(
        actions.calls(),
        vec![
            ExternalCall::Link(join_url.clone()),
            ExternalCall::Link(join_url)
        ]
    );
    let mut feed = session.take_gate_events().unwrap();
    let mut opened = 0;
    while let Ok(event) = feed.try_recv() {
        if matches!(event.kind, GateEventKind::GateOpened(_)) {
            opened += 1;
        }
    }
    assert_eq!(opened, 1);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_reveal_lands_while_the_replay_is_still_running() {
    // Arrange: six peer messages outlast the 8000ms reveal delay.
    let script = (0..6)
        .map(|index| peer(&format!("message {index}"), "avatar-nora"))
        .collect();
    let (session, _actions) = start_session(script, SessionConfig::default());

    // Act
    let mut gate_rx = session.subscribe_gate();
    gate_rx
        .wait_for(|snapshot| snapshot.call_to_action_revealed)
        .await
        .unwrap();

    // Assert: with minimum pacing the first three messages land by 7600ms,
    // and the rest of the script is still ahead when the reveal fires.
    let replay = session.snapshot().replay;
    assert!(!replay.completed);
    assert_eq!(replay.transcript.len(), 3);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_tap_promotes_the_join_destination_without_touching_the_gate() {
    // Arrange
    let (session, actions) = start_session(vec![local("hi")], SessionConfig::default());
    let join_url = session.config().destinations.join_url.clone();

    // Act
    session.tap().await;
    session.tap().await;

    // Assert
    assert_eq!(
        actions.calls(),
        vec![
            ExternalCall::Link(join_url.clone()),
            ExternalCall::Link(join_url)
        ]
    );
    assert_eq!(session.snapshot().gate.version, 0);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_event_feeds_can_be_taken_exactly_once() {
    // Arrange
    let (mut session, _actions) = start_session(vec![local("hi")], SessionConfig::default());

    // Act
    let replay_feed = session.take_replay_events();
    let gate_feed = session.take_gate_events();

    // Assert
    assert!(replay_feed.is_some());
    assert!(gate_feed.is_some());
    assert!(session.take_replay_events().is_none());
    assert!(session.take_gate_events().is_none());

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_teardown_freezes_replay_and_reveal() {
    // Arrange
    let (session, actions) = start_session(
        vec![peer("first", "avatar-nora"), peer("second", "avatar-priya")],
        SessionConfig::default(),
    );
    let replay_rx = session.subscribe_replay();
    let gate_rx = session.subscribe_gate();

    // Run into the first composing pause, then tear down.
    advance(Duration::from_millis(1000)).await;
    settle().await;

    // Act
    session.teardown().await;
    advance(Duration::from_millis(20_000)).await;
    settle().await;

    // Assert: no delivery, no reveal, no outbound calls after teardown.
    assert!(replay_rx.borrow().transcript.is_empty());
    assert!(!replay_rx.borrow().completed);
    assert!(!gate_rx.borrow().call_to_action_revealed);
    assert!(actions.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_share_quota_of_one_redirects_on_the_first_share() {
    // Arrange
    let config = SessionConfig {
        share_quota: 1,
        ..SessionConfig::default()
    };
    let (session, actions) = start_session(vec![local("hi")], config);
    let mut gate_rx = session.subscribe_gate();
    gate_rx
        .wait_for(|snapshot| snapshot.call_to_action_revealed)
        .await
        .unwrap();
    session.join().await.unwrap();

    // Act
    session.share().await;

    // Assert
    assert_eq!(actions.redirect_count(), 1);
    assert!(session.snapshot().gate.quota_reached);

    session.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_session_ids_are_unique_per_start() {
    let (first, _) = start_session(vec![local("hi")], SessionConfig::default());
    let (second, _) = start_session(vec![local("hi")], SessionConfig::default());

    assert_ne!(first.session_id(), second.session_id());
    assert_ne!(first.session_id(), Uuid::nil());

    first.teardown().await;
    second.teardown().await;
}
