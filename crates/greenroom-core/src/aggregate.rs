//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregate roots whose state advances by applying events.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the session this aggregate belongs to.
    fn session_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns uncommitted events produced by command handling.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains all uncommitted events.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}

/// Applies and drains an aggregate's uncommitted events.
///
/// There is no storage layer in this system: committing means folding
/// pending events into the aggregate's live state and handing them to
/// the caller for publication to observers.
pub fn commit<A: AggregateRoot>(aggregate: &mut A) -> Vec<A::Event> {
    let events = aggregate.take_uncommitted_events();
    for event in &events {
        aggregate.apply(event);
    }
    events
}
