//! Bundled sample script used by the console and scenario tests.

use crate::message::{MessageKind, ScriptedMessage, Sender};
use crate::script::Script;

fn entry(
    sender: Sender,
    kind: MessageKind,
    content: &str,
    avatar_ref: Option<&str>,
) -> ScriptedMessage {
    ScriptedMessage {
        sender,
        kind,
        content: content.to_owned(),
        avatar_ref: avatar_ref.map(str::to_owned),
    }
}

/// A short group-chat script covering every message shape: peer texts
/// with typing phases, system notices, an image drop, and one seeded
/// local reply.
#[must_use]
pub fn launch_group() -> Script {
    Script::new(vec![
        entry(
            Sender::System,
            MessageKind::SystemNotice,
            "You were added to Early Crate Drops",
            None,
        ),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "welcome!! drops go live here before anywhere else",
            Some("avatar-nora"),
        ),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "got the courier bag last week, still can't believe the price",
            Some("avatar-priya"),
        ),
        entry(
            Sender::Peer,
            MessageKind::Image,
            "assets/unboxing-01.jpg",
            Some("avatar-marcus"),
        ),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "proof 📦 arrived in two days",
            Some("avatar-marcus"),
        ),
        entry(
            Sender::System,
            MessageKind::SystemNotice,
            "Dani joined from the invite link",
            None,
        ),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "is the weekend drop still happening?",
            Some("avatar-dani"),
        ),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "yes — members get the link first, keep notifications on",
            Some("avatar-nora"),
        ),
        entry(Sender::Local, MessageKind::Text, "how do I get access?", None),
        entry(
            Sender::Peer,
            MessageKind::Text,
            "tap join below when it appears 👆",
            Some("avatar-nora"),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_group_exercises_every_sender_and_kind() {
        let script = launch_group();

        assert!(!script.is_empty());
        assert!(script.iter().any(|m| m.sender == Sender::Peer));
        assert!(script.iter().any(|m| m.sender == Sender::Local));
        assert!(script.iter().any(|m| m.kind == MessageKind::SystemNotice));
        assert!(script.iter().any(|m| m.kind == MessageKind::Image));
        // Every peer message in the sample carries an avatar for the
        // typing indicator.
        assert!(
            script
                .iter()
                .filter(|m| m.sender == Sender::Peer)
                .all(|m| m.avatar_ref.is_some())
        );
    }
}
