//! A bounds-consistency propagator for the number of connected components of the undirected
//! graph induced by an array of successor variables, written against a minimal variable/domain
//! abstraction so that it can be embedded in a constraint programming host.
//!
//! The constraint relates `n` successor variables (the domain of `successors[i]` is the set of
//! nodes that node `i` may still point to) and one count variable holding the number of
//! connected components of the induced graph. The
//! [`NbConnectedComponentsPropagator`][crate::propagators::graph::NbConnectedComponentsPropagator]
//! narrows the count variable from both sides:
//!
//! * a *lower bound* from the graph with an edge for every still-possible successor value
//!   (maximal connectivity: future assignments can only remove possibilities), and
//! * an *upper bound* from the graph with an edge for every already-fixed successor (minimal
//!   connectivity: future assignments can only add edges).
//!
//! Narrowing the count variable to an empty interval signals a contradiction to the host, which
//! is expected to backtrack. The propagator can also answer a three-valued entailment query
//! ([`Entailment`][crate::basic_types::Entailment]) without mutating any domain.
//!
//! # Example
//! ```
//! use nbcc_propagator::engine::propagation::PropagationContextMut;
//! use nbcc_propagator::engine::propagation::Propagator;
//! use nbcc_propagator::engine::propagation::PropagatorId;
//! use nbcc_propagator::engine::propagation::PropagatorInitialisationContext;
//! use nbcc_propagator::engine::Assignments;
//! use nbcc_propagator::engine::WatchListCP;
//! use nbcc_propagator::propagators::graph::NbConnectedComponentsPropagator;
//!
//! // Four nodes, each of which may still point to any node.
//! let mut assignments = Assignments::default();
//! let mut watch_list = WatchListCP::default();
//! let mut successors = Vec::new();
//! for _ in 0..4 {
//!     watch_list.grow();
//!     successors.push(assignments.grow(0, 3));
//! }
//! watch_list.grow();
//! let count = assignments.grow(1, 10);
//!
//! let mut propagator =
//!     NbConnectedComponentsPropagator::new(successors.into_boxed_slice(), count)
//!         .expect("well-formed construction");
//! propagator
//!     .initialise_at_root(&mut PropagatorInitialisationContext::new(
//!         &mut watch_list,
//!         PropagatorId(0),
//!         &assignments,
//!     ))
//!     .expect("well-formed construction");
//! propagator
//!     .propagate(PropagationContextMut::new(&mut assignments))
//!     .expect("no contradiction");
//!
//! // One component is still possible (everything may merge), and with nothing fixed yet every
//! // node may also end up isolated: the count is narrowed to the node range.
//! assert_eq!(assignments.get_lower_bound(count), 1);
//! assert_eq!(assignments.get_upper_bound(count), 4);
//! ```
pub mod asserts;
pub mod basic_types;
pub mod containers;
pub mod engine;
pub mod propagators;
