use crate::engine::IntDomainEvent;

/// A wrapper for a domain event, which forces the propagator to go through the variable it
/// registered in order to interpret the event.
#[derive(Clone, Copy, Debug)]
pub struct OpaqueDomainEvent(IntDomainEvent);

impl From<IntDomainEvent> for OpaqueDomainEvent {
    fn from(event: IntDomainEvent) -> Self {
        OpaqueDomainEvent(event)
    }
}

impl OpaqueDomainEvent {
    pub fn unwrap(self) -> IntDomainEvent {
        self.0
    }
}
