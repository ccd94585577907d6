use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::OpaqueDomainEvent;

/// All propagators implement the [`Propagator`] trait, which defines the main propagator logic
/// with regards to propagation and detecting conflicts.
///
/// The only required functions are [`Propagator::name`], [`Propagator::initialise_at_root`] and
/// [`Propagator::propagate`]; all other functions have default implementations.
pub trait Propagator {
    /// Return the name of the propagator; this is a convenience method that is used for
    /// printing.
    fn name(&self) -> &str;

    /// Initialises the propagator: this is where it validates the variables it was posted over
    /// and registers the domain events it has to be woken up on. Called once by the host,
    /// before any call to [`Propagator::propagate`].
    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), ConstraintOperationError>;

    /// Propagate method that will be called during search.
    ///
    /// This method extends the current domains with inferred changes. In case no conflict has
    /// been detected it should return [`Result::Ok`]; otherwise it should return a
    /// [`Result::Err`] with an [`Inconsistency`][crate::basic_types::Inconsistency], which
    /// aborts the current propagation pass and triggers backtracking in the host.
    ///
    /// Propagators are not required to propagate until a fixed point; the method will be called
    /// again by the host until no further propagations happen.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatus;

    /// Called when an event happens to one of the variables the propagator is subscribed to. It
    /// indicates whether the provided event should cause the propagator to be enqueued.
    ///
    /// This can be used to incrementally maintain data structures or perform propagations, and
    /// should only be used for computationally cheap logic. Expensive computation should be
    /// performed in the [`Propagator::propagate`] method.
    ///
    /// By default the propagator is always enqueued for every event. Not all propagators will
    /// benefit from implementing this, so it is not required to do so.
    fn notify(
        &mut self,
        _context: PropagationContext<'_>,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Returns the priority of the propagator represented as an integer. Lower values mean
    /// higher priority and the priority determines the order in which propagators will be asked
    /// to propagate. It is custom for simpler propagators to have lower priority values.
    fn priority(&self) -> u32 {
        3
    }

    /// A three-valued satisfiability estimate based on the current domains, used by the host's
    /// consistency checks outside full propagation. The estimate must not mutate any domain;
    /// internal scratch state may be reused, hence the mutable receiver.
    fn is_entailed(&mut self, _context: PropagationContext<'_>) -> Entailment {
        Entailment::Undecided
    }
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}
