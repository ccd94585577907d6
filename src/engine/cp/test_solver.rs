#![cfg(any(test, doc))]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use std::fmt::Debug;
use std::fmt::Formatter;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::WatchListCP;

/// A container for domain variables, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    assignments: Assignments,
    watch_list: WatchListCP,
    next_propagator_id: u32,
}

type BoxedPropagator = Box<dyn Propagator>;

impl Debug for BoxedPropagator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "test_solver::Propagator(<boxed value>)")
    }
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lb, ub)
    }

    /// Boxes the propagator, initialises it at the root and runs one propagation to fixed
    /// point, as the host would when the constraint is posted.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<BoxedPropagator, ConstraintOperationError> {
        let id = PropagatorId(self.next_propagator_id);
        self.next_propagator_id += 1;

        let mut propagator: BoxedPropagator = Box::new(propagator);
        propagator.initialise_at_root(&mut PropagatorInitialisationContext::new(
            &mut self.watch_list,
            id,
            &self.assignments,
        ))?;
        self.propagate_until_fixed_point(&mut propagator)
            .map_err(|_| ConstraintOperationError::InfeasibleAtRoot)?;

        Ok(propagator)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub(crate) fn contains(&self, var: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(var, value)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_lower_bound(var, bound)
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_upper_bound(var, bound)
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.remove_value_from_domain(var, value)
    }

    pub(crate) fn assign(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.make_assignment(var, value)
    }

    pub(crate) fn propagate(&mut self, propagator: &mut BoxedPropagator) -> PropagationStatus {
        propagator.propagate(PropagationContextMut::new(&mut self.assignments))
    }

    /// Alternates propagation and notification until the propagation emits no further domain
    /// events.
    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: &mut BoxedPropagator,
    ) -> PropagationStatus {
        loop {
            propagator.propagate(PropagationContextMut::new(&mut self.assignments))?;
            let events = self.assignments.drain_domain_events().collect::<Vec<_>>();
            if events.is_empty() {
                return Ok(());
            }
            let context = PropagationContext::new(&self.assignments);
            for (event, domain) in events {
                for propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                    let _ = propagator.notify(context, propagator_var.variable, event.into());
                }
            }
        }
    }

    /// Drains the pending domain events and notifies the propagator of the ones it watches.
    #[allow(dead_code)]
    pub(crate) fn notify_propagator(&mut self, propagator: &mut BoxedPropagator) {
        let events = self.assignments.drain_domain_events().collect::<Vec<_>>();
        let context = PropagationContext::new(&self.assignments);
        for (event, domain) in events {
            for propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                let _ = propagator.notify(context, propagator_var.variable, event.into());
            }
        }
    }

    pub(crate) fn is_entailed(&self, propagator: &mut BoxedPropagator) -> Entailment {
        propagator.is_entailed(PropagationContext::new(&self.assignments))
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}
