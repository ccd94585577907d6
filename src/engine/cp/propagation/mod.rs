//! The contract between a propagator and the host solving engine: the [`Propagator`] trait, the
//! contexts through which domains are read and tightened, and the identifiers used to subscribe
//! to domain changes.
mod local_id;
mod propagation_context;
mod propagator;
mod propagator_id;
mod propagator_initialisation_context;

pub use local_id::LocalId;
pub use propagation_context::HasAssignments;
pub use propagation_context::PropagationContext;
pub use propagation_context::PropagationContextMut;
pub use propagation_context::ReadDomains;
pub use propagator::EnqueueDecision;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;
pub use propagator_id::PropagatorVarId;
pub use propagator_initialisation_context::PropagatorInitialisationContext;
