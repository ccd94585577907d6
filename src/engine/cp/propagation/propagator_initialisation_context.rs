use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::DomainEvents;
use crate::engine::WatchListCP;
use crate::engine::Watchers;

/// [`PropagatorInitialisationContext`] is used when [`Propagator`]s are initialised after
/// creation.
///
/// It represents a communication point between the host and the propagator. Propagators use the
/// [`PropagatorInitialisationContext`] to register to domain changes of variables and to
/// retrieve the current domains of variables.
///
/// [`Propagator`]: crate::engine::propagation::Propagator
#[derive(Debug)]
pub struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchListCP,
    propagator_id: PropagatorId,

    context: PropagationContext<'a>,
}

impl PropagatorInitialisationContext<'_> {
    pub fn new<'a>(
        watch_list: &'a mut WatchListCP,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> PropagatorInitialisationContext<'a> {
        PropagatorInitialisationContext {
            watch_list,
            propagator_id,

            context: PropagationContext::new(assignments),
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the
    /// propagator. The [`LocalId`] is internal information related to the propagator, which is
    /// used when calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be the index of the
    /// variable in the internal array of variables.
    ///
    /// [`Propagator::notify()`]: crate::engine::propagation::Propagator::notify
    pub fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());

        var
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        self.context
    }
}
