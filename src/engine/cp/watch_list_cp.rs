use enumset::EnumSet;
use enumset::EnumSetType;

use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;

/// A description of the kinds of events that can happen on a domain variable.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// Event where an (integer) variable domain collapses to a single value.
    Assign,
    /// Event where an (integer) variable domain tightens the lower bound.
    LowerBound,
    /// Event where an (integer) variable domain tightens the upper bound.
    UpperBound,
    /// Event where an (integer) variable domain removes an inner value within the domain.
    Removal,
}

impl std::fmt::Display for IntDomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntDomainEvent::Assign => write!(f, "[Event:Assign]"),
            IntDomainEvent::LowerBound => write!(f, "[Event:LB]"),
            IntDomainEvent::UpperBound => write!(f, "[Event:UB]"),
            IntDomainEvent::Removal => write!(f, "[Event:Remove]"),
        }
    }
}

/// Records for every domain which propagators have to be notified of which events.
#[derive(Default, Debug)]
pub struct WatchListCP {
    watchers: KeyedVec<DomainId, WatcherCP>,
}

#[derive(Default, Debug)]
struct WatcherCP {
    assign_watchers: Vec<PropagatorVarId>,
    lower_bound_watchers: Vec<PropagatorVarId>,
    upper_bound_watchers: Vec<PropagatorVarId>,
    removal_watchers: Vec<PropagatorVarId>,
}

impl WatchListCP {
    /// Allocates the watcher lists for one more domain. Must be kept in sync with
    /// [`Assignments::grow`][crate::engine::Assignments::grow].
    pub fn grow(&mut self) {
        let _ = self.watchers.push(WatcherCP::default());
    }

    pub fn num_domains(&self) -> u32 {
        self.watchers.len() as u32
    }

    /// The propagators which subscribed to `event` on `domain`.
    pub fn get_affected_propagators(
        &self,
        event: IntDomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        let watcher = &self.watchers[domain];

        match event {
            IntDomainEvent::Assign => &watcher.assign_watchers,
            IntDomainEvent::LowerBound => &watcher.lower_bound_watchers,
            IntDomainEvent::UpperBound => &watcher.upper_bound_watchers,
            IntDomainEvent::Removal => &watcher.removal_watchers,
        }
    }
}

/// Used to register a propagator for notifications about events on a particular variable.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchListCP,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchListCP) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        let watcher = &mut self.watch_list.watchers[domain];

        for event in events {
            let event_watchers = match event {
                IntDomainEvent::Assign => &mut watcher.assign_watchers,
                IntDomainEvent::LowerBound => &mut watcher.lower_bound_watchers,
                IntDomainEvent::UpperBound => &mut watcher.upper_bound_watchers,
                IntDomainEvent::Removal => &mut watcher.removal_watchers,
            };

            if !event_watchers.contains(&self.propagator_var) {
                event_watchers.push(self.propagator_var);
            }
        }
    }
}
