//! Aggregate roots for the Engagement Gate context.

use greenroom_core::aggregate::AggregateRoot;
use greenroom_core::clock::Clock;
use greenroom_core::error::DomainError;
use greenroom_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    CallToActionRevealed, GateEvent, GateEventKind, GateOpened, ShareQuotaReached, ShareRecorded,
};

/// The aggregate root for one session's engagement gate.
///
/// Tracks the one-shot call-to-action reveal, whether the share gate has
/// replaced the conversation view, and the share count bounded by the
/// quota. The quota crossing is itself an event, so downstream effects of
/// reaching it run exactly once.
#[derive(Debug)]
pub struct EngagementGate {
    /// Aggregate identifier, shared with the owning session.
    pub id: Uuid,
    /// Current version (event count).
    version: i64,
    /// Shares required before the quota is considered reached.
    share_quota: u32,
    /// Whether the join call-to-action has been revealed.
    call_to_action_revealed: bool,
    /// Whether the share gate has replaced the conversation view.
    gate_open: bool,
    /// Shares recorded so far, clamped at the quota.
    share_count: u32,
    /// Whether the quota crossing has already happened.
    quota_reached: bool,
    /// Uncommitted events pending publication.
    uncommitted_events: Vec<GateEvent>,
}

impl EngagementGate {
    /// Creates a gate with nothing revealed and no shares recorded.
    #[must_use]
    pub fn new(id: Uuid, share_quota: u32) -> Self {
        Self {
            id,
            version: 0,
            share_quota,
            call_to_action_revealed: false,
            gate_open: false,
            share_count: 0,
            quota_reached: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the shares recorded so far, clamped at the quota.
    #[must_use]
    pub fn share_count(&self) -> u32 {
        self.share_count
    }

    /// Returns the quota the share count climbs toward.
    #[must_use]
    pub fn share_quota(&self) -> u32 {
        self.share_quota
    }

    /// Returns whether the join call-to-action has been revealed.
    #[must_use]
    pub fn is_call_to_action_revealed(&self) -> bool {
        self.call_to_action_revealed
    }

    /// Returns whether the share gate has replaced the conversation view.
    #[must_use]
    pub fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    /// Returns whether the share quota has been reached.
    #[must_use]
    pub fn is_quota_reached(&self) -> bool {
        self.quota_reached
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn new_event(
        &self,
        event_type: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
        kind: GateEventKind,
    ) -> GateEvent {
        GateEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                session_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        }
    }

    /// Reveals the join call-to-action, producing a `CallToActionRevealed`
    /// event. The reveal is one-shot and never resets.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the call-to-action was already
    /// revealed.
    pub fn reveal_call_to_action(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.call_to_action_revealed {
            return Err(DomainError::Validation(
                "call to action already revealed".to_owned(),
            ));
        }

        let event = self.new_event(
            "gate.call_to_action_revealed",
            correlation_id,
            clock,
            GateEventKind::CallToActionRevealed(CallToActionRevealed { session_id: self.id }),
        );
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Opens the share gate over the conversation view, producing a
    /// `GateOpened` event. The gate is a plain view switch, independent of
    /// the reveal flag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the gate is already open.
    pub fn open_gate(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.gate_open {
            return Err(DomainError::Validation("share gate already open".to_owned()));
        }

        let event = self.new_event(
            "gate.opened",
            correlation_id,
            clock,
            GateEventKind::GateOpened(GateOpened { session_id: self.id }),
        );
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Records one completed share, producing a `ShareRecorded` event with
    /// the count clamped at the quota. On the share that first reaches the
    /// quota, a `ShareQuotaReached` event follows in the same commit; later
    /// shares never produce it again.
    ///
    /// The caller has already initiated the external share action; it is
    /// trusted to have happened, so recording cannot fail.
    pub fn record_share(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let previous = self.share_count;
        let updated = previous.saturating_add(1).min(self.share_quota);

        let recorded = self.new_event(
            "gate.share_recorded",
            correlation_id,
            clock,
            GateEventKind::ShareRecorded(ShareRecorded {
                session_id: self.id,
                share_count: updated,
                share_quota: self.share_quota,
            }),
        );
        self.uncommitted_events.push(recorded);

        if previous < self.share_quota && updated >= self.share_quota {
            let crossed = self.new_event(
                "gate.share_quota_reached",
                correlation_id,
                clock,
                GateEventKind::ShareQuotaReached(ShareQuotaReached {
                    session_id: self.id,
                    share_count: updated,
                }),
            );
            self.uncommitted_events.push(crossed);
        }
    }
}

impl AggregateRoot for EngagementGate {
    type Event = GateEvent;

    fn session_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            GateEventKind::CallToActionRevealed(_) => {
                self.call_to_action_revealed = true;
            }
            GateEventKind::GateOpened(_) => {
                self.gate_open = true;
            }
            GateEventKind::ShareRecorded(payload) => {
                self.share_count = payload.share_count;
            }
            GateEventKind::ShareQuotaReached(_) => {
                self.quota_reached = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenroom_core::aggregate::commit;
    use greenroom_core::event::DomainEvent;
    use greenroom_test_support::FixedClock;

    #[test]
    fn test_reveal_call_to_action_produces_event_once() {
        // Arrange
        let session_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(session_id, 5);

        // Act
        gate.reveal_call_to_action(correlation_id, &clock).unwrap();
        let events = commit(&mut gate);

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "gate.call_to_action_revealed");

        let meta = events[0].metadata();
        assert_eq!(meta.session_id, session_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.causation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);
        assert!(gate.is_call_to_action_revealed());

        // The reveal is one-shot.
        match gate.reveal_call_to_action(correlation_id, &clock).unwrap_err() {
            DomainError::Validation(message) => {
                assert!(message.contains("already revealed"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_open_gate_does_not_depend_on_the_reveal() {
        // Arrange: nothing revealed yet.
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(Uuid::new_v4(), 5);

        // Act
        gate.open_gate(correlation_id, &clock).unwrap();
        let events = commit(&mut gate);

        // Assert: the view switch is a plain flag.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "gate.opened");
        assert!(gate.is_gate_open());
        assert!(!gate.is_call_to_action_revealed());
    }

    #[test]
    fn test_open_gate_rejected_when_already_open() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(Uuid::new_v4(), 5);
        gate.open_gate(Uuid::new_v4(), &clock).unwrap();
        commit(&mut gate);

        // Act
        let result = gate.open_gate(Uuid::new_v4(), &clock);

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(message) => {
                assert!(message.contains("already open"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_share_count_climbs_then_clamps_at_the_quota() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(Uuid::new_v4(), 5);

        // Act
        let mut counts = Vec::new();
        for _ in 0..7 {
            gate.record_share(correlation_id, &clock);
            commit(&mut gate);
            counts.push(gate.share_count());
        }

        // Assert
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 5, 5]);
        assert!(gate.is_quota_reached());
    }

    #[test]
    fn test_share_quota_reached_is_emitted_exactly_once() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(Uuid::new_v4(), 5);

        // Act
        let mut all_events = Vec::new();
        for _ in 0..7 {
            gate.record_share(correlation_id, &clock);
            all_events.extend(commit(&mut gate));
        }

        // Assert: seven ShareRecorded, one ShareQuotaReached on the fifth.
        let crossings: Vec<&GateEvent> = all_events
            .iter()
            .filter(|event| matches!(event.kind, GateEventKind::ShareQuotaReached(_)))
            .collect();
        assert_eq!(crossings.len(), 1);
        match &crossings[0].kind {
            GateEventKind::ShareQuotaReached(payload) => {
                assert_eq!(payload.share_count, 5);
            }
            other => panic!("expected ShareQuotaReached, got {other:?}"),
        }

        let recorded_count = all_events
            .iter()
            .filter(|event| matches!(event.kind, GateEventKind::ShareRecorded(_)))
            .count();
        assert_eq!(recorded_count, 7);

        // The crossing follows its ShareRecorded inside one commit.
        let fifth = all_events
            .iter()
            .position(|event| matches!(event.kind, GateEventKind::ShareQuotaReached(_)))
            .unwrap();
        match &all_events[fifth - 1].kind {
            GateEventKind::ShareRecorded(payload) => {
                assert_eq!(payload.share_count, 5);
            }
            other => panic!("expected ShareRecorded, got {other:?}"),
        }
    }

    #[test]
    fn test_quota_of_one_crosses_on_the_first_share() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut gate = EngagementGate::new(Uuid::new_v4(), 1);

        // Act
        gate.record_share(correlation_id, &clock);
        let events = commit(&mut gate);

        // Assert
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "gate.share_recorded");
        assert_eq!(events[1].event_type(), "gate.share_quota_reached");
        assert_eq!(gate.share_count(), 1);
        assert!(gate.is_quota_reached());
    }
}
