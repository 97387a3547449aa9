//! Terminal rendering for the event feeds.

use chrono::{DateTime, Utc};

use greenroom_gate::domain::events::GateEventKind;
use greenroom_replay::domain::events::ReplayEventKind;
use greenroom_script::message::{MessageKind, Sender};

/// Renders one replay event as a transcript line. Returns `None` for
/// events with no visible representation.
pub fn replay_line(event: &ReplayEventKind) -> Option<String> {
    match event {
        ReplayEventKind::TypingStarted(typing) => Some(format!(
            "   {} is typing...",
            peer_name(typing.avatar_ref.as_deref())
        )),
        ReplayEventKind::MessageDelivered(delivered) => {
            let message = &delivered.message;
            let stamp = clock_face(message.delivered_at);
            Some(match (&message.sender, &message.kind) {
                (Sender::System, _) | (_, MessageKind::SystemNotice) => {
                    format!("-- {} --", message.content)
                }
                (Sender::Local, _) => format!("[{stamp}] you: {}", message.content),
                (Sender::Peer, MessageKind::Image) => format!(
                    "[{stamp}] {}: (photo) {}",
                    peer_name(message.avatar_ref.as_deref()),
                    message.content
                ),
                (Sender::Peer, _) => format!(
                    "[{stamp}] {}: {}",
                    peer_name(message.avatar_ref.as_deref()),
                    message.content
                ),
            })
        }
        ReplayEventKind::ReplayCompleted(_) => None,
    }
}

/// Renders one gate event as a status line.
pub fn gate_line(event: &GateEventKind, share_quota: u32) -> Option<String> {
    match event {
        GateEventKind::CallToActionRevealed(_) => {
            Some("** a join button appeared below the conversation **".to_owned())
        }
        GateEventKind::GateOpened(_) => Some(format!(
            "** share with {share_quota} groups or friends to unlock access **"
        )),
        GateEventKind::ShareRecorded(recorded) => Some(format!(
            "   shared {}",
            progress_bar(recorded.share_count, recorded.share_quota)
        )),
        GateEventKind::ShareQuotaReached(_) => {
            Some("** quota reached, access unlocked **".to_owned())
        }
    }
}

/// Display name derived from an avatar reference, so `avatar-nora`
/// renders as `nora`.
fn peer_name(avatar_ref: Option<&str>) -> String {
    match avatar_ref {
        Some(avatar) => avatar.strip_prefix("avatar-").unwrap_or(avatar).to_owned(),
        None => "someone".to_owned(),
    }
}

fn clock_face(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// ASCII progress toward the quota, e.g. `[###--] 3/5`.
fn progress_bar(count: u32, quota: u32) -> String {
    let filled = count.min(quota) as usize;
    let empty = quota.saturating_sub(count) as usize;
    format!(
        "[{}{}] {count}/{quota}",
        "#".repeat(filled),
        "-".repeat(empty)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use greenroom_gate::domain::events::{GateOpened, ShareRecorded};
    use greenroom_replay::domain::events::{DeliveredMessage, MessageDelivered, TypingStarted};
    use uuid::Uuid;

    fn delivered(
        sender: Sender,
        kind: MessageKind,
        content: &str,
        avatar: Option<&str>,
    ) -> MessageDelivered {
        MessageDelivered {
            session_id: Uuid::nil(),
            message: DeliveredMessage {
                delivery_id: 1,
                script_index: 0,
                sender,
                kind,
                content: content.to_owned(),
                avatar_ref: avatar.map(str::to_owned),
                delivered_at: Utc.with_ymd_and_hms(2026, 8, 24, 12, 7, 0).unwrap(),
            },
        }
    }

    #[test]
    fn test_peer_text_line_shows_name_and_timestamp() {
        let event = ReplayEventKind::MessageDelivered(delivered(
            Sender::Peer,
            MessageKind::Text,
            "welcome!!",
            Some("avatar-nora"),
        ));

        assert_eq!(
            replay_line(&event),
            Some("[12:07] nora: welcome!!".to_owned())
        );
    }

    #[test]
    fn test_local_and_system_lines_have_their_own_shapes() {
        let local = ReplayEventKind::MessageDelivered(delivered(
            Sender::Local,
            MessageKind::Text,
            "how do I get access?",
            None,
        ));
        let notice = ReplayEventKind::MessageDelivered(delivered(
            Sender::System,
            MessageKind::SystemNotice,
            "Dani joined",
            None,
        ));

        assert_eq!(
            replay_line(&local),
            Some("[12:07] you: how do I get access?".to_owned())
        );
        assert_eq!(replay_line(&notice), Some("-- Dani joined --".to_owned()));
    }

    #[test]
    fn test_image_delivery_is_marked_as_a_photo() {
        let event = ReplayEventKind::MessageDelivered(delivered(
            Sender::Peer,
            MessageKind::Image,
            "assets/unboxing-01.jpg",
            Some("avatar-marcus"),
        ));

        assert_eq!(
            replay_line(&event),
            Some("[12:07] marcus: (photo) assets/unboxing-01.jpg".to_owned())
        );
    }

    #[test]
    fn test_typing_line_names_the_composing_peer() {
        let named = ReplayEventKind::TypingStarted(TypingStarted {
            session_id: Uuid::nil(),
            script_index: 0,
            avatar_ref: Some("avatar-priya".to_owned()),
        });
        let anonymous = ReplayEventKind::TypingStarted(TypingStarted {
            session_id: Uuid::nil(),
            script_index: 0,
            avatar_ref: None,
        });

        assert_eq!(replay_line(&named), Some("   priya is typing...".to_owned()));
        assert_eq!(
            replay_line(&anonymous),
            Some("   someone is typing...".to_owned())
        );
    }

    #[test]
    fn test_share_progress_renders_an_ascii_bar() {
        let event = GateEventKind::ShareRecorded(ShareRecorded {
            session_id: Uuid::nil(),
            share_count: 3,
            share_quota: 5,
        });

        assert_eq!(
            gate_line(&event, 5),
            Some("   shared [###--] 3/5".to_owned())
        );
    }

    #[test]
    fn test_gate_open_line_quotes_the_quota() {
        let event = GateEventKind::GateOpened(GateOpened {
            session_id: Uuid::nil(),
        });

        assert_eq!(
            gate_line(&event, 5),
            Some("** share with 5 groups or friends to unlock access **".to_owned())
        );
    }
}
