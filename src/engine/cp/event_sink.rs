use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::IntDomainEvent;
use crate::engine::variables::DomainId;

/// Records the events which occurred on the domains since the last drain, deduplicated per
/// domain. Drained by the host after propagation to decide which propagators to wake up.
#[derive(Default, Debug)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<IntDomainEvent>>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: IntDomainEvent, domain: DomainId) {
        self.present[domain] |= event;
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (IntDomainEvent, DomainId)> {
        let mut drained = Vec::new();
        let keys = self.present.keys().collect::<Vec<_>>();
        for domain in keys {
            let events = std::mem::replace(&mut self.present[domain], EnumSet::new());
            for event in events {
                drained.push((event, domain));
            }
        }
        drained.into_iter()
    }
}
