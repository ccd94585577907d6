use fnv::FnvHashSet;

use crate::containers::KeyedVec;
use crate::engine::cp::EventSink;
use crate::engine::IntDomainEvent;
use crate::engine::variables::DomainId;
use crate::nbcc_assert_simple;

/// The structure which grows and stores the integer domains.
///
/// A domain is identified by a [`DomainId`] and is represented by its bounds plus an explicit
/// set of removed values strictly inside them. Operations which would leave a domain empty
/// return [`EmptyDomain`]; the emptied state is left in place, since without a backtracking
/// host there is nothing to restore to, and the caller is expected to discard the state.
#[derive(Default, Debug)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    events: EventSink,
}

/// The contradiction value: a requested domain operation would leave the target domain empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

impl Assignments {
    /// Creates a new domain `[lower_bound, upper_bound]` and returns its id.
    pub fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        nbcc_assert_simple!(lower_bound <= upper_bound, "cannot create an empty domain");
        self.events.grow();
        self.domains
            .push(IntegerDomain::new(lower_bound, upper_bound))
    }

    pub fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].is_assigned()
    }

    /// The assigned value of the domain, or `None` when it is not a singleton.
    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        let domain = &self.domains[domain_id];
        domain.is_assigned().then_some(domain.lower_bound)
    }

    /// The smallest value greater than or equal to `value` which is in the domain, or `None`
    /// when every remaining value is smaller than `value`. Used to enumerate sparse domains.
    pub fn get_next_value(&self, domain_id: DomainId, value: i32) -> Option<i32> {
        self.domains[domain_id].next_value(value)
    }

    /// Iterates the values of the domain in increasing order.
    pub fn get_domain_iterator(&self, domain_id: DomainId) -> IntegerDomainIterator<'_> {
        IntegerDomainIterator::new(&self.domains[domain_id])
    }

    /// Raises the lower bound of the domain to `bound`. Requesting a bound at or below the
    /// current one is a no-op.
    pub fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        {
            let domain = &mut self.domains[domain_id];
            if bound <= domain.lower_bound {
                return Ok(());
            }
            domain.set_lower_bound(bound);
            if domain.is_empty() {
                return Err(EmptyDomain);
            }
        }

        self.events
            .event_occurred(IntDomainEvent::LowerBound, domain_id);
        if self.domains[domain_id].is_assigned() {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }
        Ok(())
    }

    /// Lowers the upper bound of the domain to `bound`. Requesting a bound at or above the
    /// current one is a no-op.
    pub fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        {
            let domain = &mut self.domains[domain_id];
            if bound >= domain.upper_bound {
                return Ok(());
            }
            domain.set_upper_bound(bound);
            if domain.is_empty() {
                return Err(EmptyDomain);
            }
        }

        self.events
            .event_occurred(IntDomainEvent::UpperBound, domain_id);
        if self.domains[domain_id].is_assigned() {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }
        Ok(())
    }

    /// Removes `value` from the domain. Removing an absent value is a no-op; removing a bound
    /// value advances that bound past any neighbouring removed values.
    pub fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        let event = {
            let domain = &mut self.domains[domain_id];
            if !domain.contains(value) {
                return Ok(());
            }
            if value == domain.lower_bound {
                domain.set_lower_bound(value + 1);
                if domain.is_empty() {
                    return Err(EmptyDomain);
                }
                IntDomainEvent::LowerBound
            } else if value == domain.upper_bound {
                domain.set_upper_bound(value - 1);
                if domain.is_empty() {
                    return Err(EmptyDomain);
                }
                IntDomainEvent::UpperBound
            } else {
                let _ = domain.holes.insert(value);
                IntDomainEvent::Removal
            }
        };

        self.events.event_occurred(event, domain_id);
        if self.domains[domain_id].is_assigned() {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }
        Ok(())
    }

    /// Assigns the domain to `value`. Assigning a value which is not in the domain empties it.
    pub fn make_assignment(&mut self, domain_id: DomainId, value: i32) -> Result<(), EmptyDomain> {
        if !self.is_value_in_domain(domain_id, value) {
            let domain = &mut self.domains[domain_id];
            domain.lower_bound = domain.upper_bound + 1;
            return Err(EmptyDomain);
        }
        self.tighten_lower_bound(domain_id, value)?;
        self.tighten_upper_bound(domain_id, value)
    }

    /// Drains the events which occurred since the last drain, deduplicated per domain.
    pub fn drain_domain_events(&mut self) -> impl Iterator<Item = (IntDomainEvent, DomainId)> {
        self.events.drain()
    }
}

/// The representation of a domain: bounds plus removed values strictly inside them. The bounds
/// are always values of the domain; when the domain is empty, `lower_bound > upper_bound`.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    /// Values strictly between the bounds which have been removed.
    holes: FnvHashSet<i32>,
}

impl IntegerDomain {
    fn new(lower_bound: i32, upper_bound: i32) -> IntegerDomain {
        IntegerDomain {
            lower_bound,
            upper_bound,
            holes: FnvHashSet::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.lower_bound > self.upper_bound
    }

    fn is_assigned(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    fn contains(&self, value: i32) -> bool {
        value >= self.lower_bound && value <= self.upper_bound && !self.holes.contains(&value)
    }

    fn set_lower_bound(&mut self, bound: i32) {
        self.lower_bound = bound;
        while !self.is_empty() && self.holes.contains(&self.lower_bound) {
            self.lower_bound += 1;
        }
    }

    fn set_upper_bound(&mut self, bound: i32) {
        self.upper_bound = bound;
        while !self.is_empty() && self.holes.contains(&self.upper_bound) {
            self.upper_bound -= 1;
        }
    }

    fn next_value(&self, value: i32) -> Option<i32> {
        let mut candidate = value.max(self.lower_bound);
        while candidate <= self.upper_bound {
            if !self.holes.contains(&candidate) {
                return Some(candidate);
            }
            candidate += 1;
        }
        None
    }
}

/// Iterates the values of a domain in increasing order, skipping removed values.
#[derive(Debug)]
pub struct IntegerDomainIterator<'a> {
    domain: &'a IntegerDomain,
    current_value: i32,
}

impl<'a> IntegerDomainIterator<'a> {
    fn new(domain: &'a IntegerDomain) -> IntegerDomainIterator<'a> {
        IntegerDomainIterator {
            domain,
            current_value: domain.lower_bound,
        }
    }
}

impl Iterator for IntegerDomainIterator<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let result = self.domain.next_value(self.current_value)?;
        self.current_value = result + 1;
        Some(result)
    }
}
