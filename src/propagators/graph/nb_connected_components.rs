use log::trace;
use log::warn;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainEvents;
use crate::engine::OpaqueDomainEvent;
use crate::propagators::graph::ConnectivityFinder;
use crate::propagators::graph::UndirectedGraph;

/// Propagator ensuring that the undirected graph induced by an array of successor variables has
/// a number of connected components within the bounds of a count variable.
///
/// Node `i` may point to any node in the domain of `successors[i]`. On every call the propagator
/// derives two graphs from the current domains:
///
/// - the *optimistic* graph has an edge `(i, j)` for every value `j` still possible for
///   `successors[i]`; it is a superset of every graph reachable by future assignments, so its
///   component count is a valid lower bound on the final count (assignments can only merge
///   components further, never split below what maximal connectivity achieves);
/// - the *pessimistic* graph has an edge `(i, v)` only when `successors[i]` is already fixed to
///   `v`; it is a subset of every reachable graph, so its component count is a valid upper bound
///   (further fixings only add edges, which can only merge components).
///
/// The count variable is then narrowed towards `[optimistic, pessimistic]`; narrowing it to an
/// empty interval raises the contradiction to the host. The successor variables themselves are
/// only ever read.
#[derive(Debug)]
pub struct NbConnectedComponentsPropagator<Var> {
    successors: Box<[Var]>,
    count: Var,
    /// Edge scaffold shared by both phases; wiped before each rebuild.
    graph: UndirectedGraph,
    finder: ConnectivityFinder,
}

impl<Var: IntegerVariable> NbConnectedComponentsPropagator<Var> {
    /// Creates the propagator over `successors` and the component-count variable `count`.
    ///
    /// There is one graph node per successor variable; the successor domains are expected to
    /// range over the node indices `[0, n)`, which is validated in
    /// [`Propagator::initialise_at_root`].
    pub fn new(successors: Box<[Var]>, count: Var) -> Result<Self, ConstraintOperationError> {
        if successors.is_empty() {
            return Err(ConstraintOperationError::NoSuccessorVariables);
        }

        let num_nodes = successors.len();
        if num_nodes == 1 {
            warn!("Posting a connected-components constraint over a single node, unusual!");
        }

        Ok(NbConnectedComponentsPropagator {
            successors,
            count,
            graph: UndirectedGraph::new(num_nodes),
            finder: ConnectivityFinder::new(num_nodes),
        })
    }

    /// Rebuilds the scaffold with an edge `(i, j)` for every value `j` in the domain of
    /// `successors[i]` and returns the number of components: the lower bound of the final
    /// count. Domains may be sparse, so the enumeration goes through the next-value operation
    /// rather than the bounds alone.
    fn optimistic_component_count(&mut self, context: PropagationContext<'_>) -> usize {
        self.graph.clear();
        for (i, successor) in self.successors.iter().enumerate() {
            // A node whose own index is in its domain gets a self-loop, which is harmless.
            for j in context.iterate_domain(successor) {
                self.graph.add_edge(i, j as usize);
            }
        }
        self.finder.find_all_components(&self.graph)
    }

    /// Rebuilds the scaffold with an edge `(i, v)` for every successor already fixed to `v` and
    /// returns the number of components: the upper bound of the final count. Unfixed nodes
    /// contribute no edges.
    fn pessimistic_component_count(&mut self, context: PropagationContext<'_>) -> usize {
        self.graph.clear();
        for (i, successor) in self.successors.iter().enumerate() {
            if context.is_fixed(successor) {
                self.graph
                    .add_edge(i, context.lower_bound(successor) as usize);
            }
        }
        self.finder.find_all_components(&self.graph)
    }

    fn all_successors_fixed(&self, context: PropagationContext<'_>) -> bool {
        self.successors
            .iter()
            .all(|successor| context.is_fixed(successor))
    }
}

impl<Var: IntegerVariable> Propagator for NbConnectedComponentsPropagator<Var> {
    fn name(&self) -> &str {
        "NbConnectedComponents"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), ConstraintOperationError> {
        let num_nodes = self.successors.len();
        for (i, successor) in self.successors.iter().enumerate() {
            let lower_bound = context.as_readonly().lower_bound(successor);
            let upper_bound = context.as_readonly().upper_bound(successor);
            if lower_bound < 0 || upper_bound >= num_nodes as i32 {
                return Err(ConstraintOperationError::SuccessorOutOfRange {
                    index: i,
                    lower_bound,
                    upper_bound,
                    num_nodes,
                });
            }
        }

        // Any single bound or hole change can alter global connectivity, so the wake-up
        // conditions cannot be narrowed below "any domain change" on every variable.
        for (i, successor) in self.successors.iter().enumerate() {
            let _ = context.register(
                successor.clone(),
                DomainEvents::ANY_INT,
                LocalId::from(i as u32),
            );
        }
        let _ = context.register(
            self.count.clone(),
            DomainEvents::ANY_INT,
            LocalId::from(num_nodes as u32),
        );

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let optimistic = self.optimistic_component_count(context.as_readonly());
        trace!(
            "{}: optimistic graph has {optimistic} components",
            self.name()
        );
        context.set_lower_bound(&self.count, optimistic as i32)?;

        let pessimistic = self.pessimistic_component_count(context.as_readonly());
        trace!(
            "{}: pessimistic graph has {pessimistic} components",
            self.name()
        );
        context.set_upper_bound(&self.count, pessimistic as i32)?;

        Ok(())
    }

    fn notify(
        &mut self,
        _context: PropagationContext<'_>,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        // A single domain change can alter global connectivity, so there is no cheaper
        // incremental path: every notification re-triggers the full computation.
        EnqueueDecision::Enqueue
    }

    fn priority(&self) -> u32 {
        // Both phases are linear in the total size of the successor domains.
        2
    }

    fn is_entailed(&mut self, context: PropagationContext<'_>) -> Entailment {
        // Even the maximally connected graph has more components than allowed.
        let optimistic = self.optimistic_component_count(context);
        if context.upper_bound(&self.count) < optimistic as i32 {
            return Entailment::Violated;
        }

        // The fixed edges alone already leave fewer components than required, and further
        // fixings can only merge more.
        let pessimistic = self.pessimistic_component_count(context);
        if context.lower_bound(&self.count) > pessimistic as i32 {
            return Entailment::Violated;
        }

        if self.all_successors_fixed(context) {
            // Both graphs coincide with the final graph, so the checks above are decisive.
            Entailment::Satisfied
        } else {
            Entailment::Undecided
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::engine::variables::DomainId;

    fn post(
        solver: &mut TestSolver,
        successors: &[DomainId],
        count: DomainId,
    ) -> Result<Box<dyn Propagator>, ConstraintOperationError> {
        let propagator =
            NbConnectedComponentsPropagator::new(successors.to_vec().into_boxed_slice(), count)?;
        solver.new_propagator(propagator)
    }

    #[test]
    fn fully_possible_graph_narrows_count_to_node_range() {
        let mut solver = TestSolver::default();
        let successors = (0..4).map(|_| solver.new_variable(0, 3)).collect::<Vec<_>>();
        let count = solver.new_variable(0, 10);

        let _ = post(&mut solver, &successors, count).expect("no contradiction at the root");

        // All pairs are still reachable, so one component is possible; nothing is fixed, so
        // four isolated nodes are possible as well.
        solver.assert_bounds(count, 1, 4);
    }

    #[test]
    fn two_fixed_two_cycles_yield_exactly_two_components() {
        let mut solver = TestSolver::default();
        let targets = [1, 0, 3, 2];
        let successors = targets
            .iter()
            .map(|&v| solver.new_variable(v, v))
            .collect::<Vec<_>>();
        let count = solver.new_variable(1, 4);

        let _ = post(&mut solver, &successors, count).expect("no contradiction at the root");

        solver.assert_bounds(count, 2, 2);
    }

    #[test]
    fn contradiction_when_count_cannot_reach_the_pessimistic_bound() {
        let mut solver = TestSolver::default();
        let targets = [1, 0, 3, 2];
        let successors = targets
            .iter()
            .map(|&v| solver.new_variable(v, v))
            .collect::<Vec<_>>();
        // The two 2-cycles allow exactly two components; requiring at least three must fail
        // when the propagator lowers the upper bound to two.
        let count = solver.new_variable(3, 4);

        let propagator = NbConnectedComponentsPropagator::new(
            successors.into_boxed_slice(),
            count,
        )
        .expect("well-formed construction");
        let mut propagator: Box<dyn Propagator> = Box::new(propagator);

        let status = solver.propagate(&mut propagator);
        assert_eq!(status, Err(Inconsistency::EmptyDomain));
    }

    #[test]
    fn fixed_triangle_is_entailed_when_count_includes_one() {
        let mut solver = TestSolver::default();
        let targets = [1, 2, 0];
        let successors = targets
            .iter()
            .map(|&v| solver.new_variable(v, v))
            .collect::<Vec<_>>();
        let count = solver.new_variable(1, 3);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");

        solver.assert_bounds(count, 1, 1);
        assert_eq!(solver.is_entailed(&mut propagator), Entailment::Satisfied);
    }

    #[test]
    fn fixed_triangle_is_violated_when_count_excludes_one() {
        let mut solver = TestSolver::default();
        let targets = [1, 2, 0];
        let successors = targets
            .iter()
            .map(|&v| solver.new_variable(v, v))
            .collect::<Vec<_>>();
        let count = solver.new_variable(2, 3);

        // Posting runs propagation, which already detects the contradiction.
        assert_eq!(
            post(&mut solver, &successors, count).err(),
            Some(ConstraintOperationError::InfeasibleAtRoot)
        );
    }

    #[test]
    fn entailment_is_undecided_while_successors_are_free() {
        let mut solver = TestSolver::default();
        let successors = (0..4).map(|_| solver.new_variable(0, 3)).collect::<Vec<_>>();
        let count = solver.new_variable(1, 4);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");

        assert_eq!(solver.is_entailed(&mut propagator), Entailment::Undecided);
    }

    #[test]
    fn entailment_reports_violation_without_touching_any_domain() {
        let mut solver = TestSolver::default();
        let targets = [1, 2, 0];
        let successors = targets
            .iter()
            .map(|&v| solver.new_variable(v, v))
            .collect::<Vec<_>>();
        // The triangle has one component; a count domain of [2, 3] cannot be met, which the
        // entailment check reports without propagating.
        let count = solver.new_variable(2, 3);

        let propagator = NbConnectedComponentsPropagator::new(
            successors.clone().into_boxed_slice(),
            count,
        )
        .expect("well-formed construction");
        let mut propagator: Box<dyn Propagator> = Box::new(propagator);

        assert_eq!(solver.is_entailed(&mut propagator), Entailment::Violated);
        solver.assert_bounds(count, 2, 3);
    }

    #[test]
    fn self_loops_do_not_connect_anything() {
        let mut solver = TestSolver::default();
        // Both nodes may point to either node, including themselves.
        let successors = (0..2).map(|_| solver.new_variable(0, 1)).collect::<Vec<_>>();
        let count = solver.new_variable(1, 2);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");

        // Fixing node 0 onto itself only adds a self-loop: both nodes stay separate in the
        // pessimistic graph.
        solver.assign(successors[0], 0).expect("non-empty domain");
        solver
            .propagate_until_fixed_point(&mut propagator)
            .expect("no contradiction");

        solver.assert_bounds(count, 1, 2);
        assert_eq!(solver.is_entailed(&mut propagator), Entailment::Undecided);
    }

    #[test]
    fn propagation_is_idempotent_without_domain_changes() {
        let mut solver = TestSolver::default();
        let successors = vec![
            solver.new_variable(1, 1),
            solver.new_variable(0, 2),
            solver.new_variable(1, 2),
        ];
        let count = solver.new_variable(1, 3);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");

        let bounds_after_first = (solver.lower_bound(count), solver.upper_bound(count));
        solver.propagate(&mut propagator).expect("no contradiction");
        assert_eq!(
            bounds_after_first,
            (solver.lower_bound(count), solver.upper_bound(count))
        );
    }

    #[test]
    fn tightening_successor_bounds_reruns_both_phases() {
        let mut solver = TestSolver::default();
        let successors = vec![
            solver.new_variable(0, 2),
            solver.new_variable(0, 2),
            solver.new_variable(2, 2),
        ];
        let count = solver.new_variable(1, 3);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");
        solver.assert_bounds(count, 1, 3);

        // Fix node 0 onto node 1 and node 1 onto node 0 through bound tightenings; node 2 keeps
        // its self-loop, so exactly two components remain.
        solver.set_lower_bound(successors[0], 1).expect("non-empty domain");
        solver.set_upper_bound(successors[0], 1).expect("non-empty domain");
        solver.set_upper_bound(successors[1], 0).expect("non-empty domain");
        solver
            .propagate_until_fixed_point(&mut propagator)
            .expect("no contradiction");

        solver.assert_bounds(count, 2, 2);
        assert_eq!(solver.is_entailed(&mut propagator), Entailment::Satisfied);
    }

    #[test]
    fn sparse_domains_are_enumerated_through_their_holes() {
        let mut solver = TestSolver::default();
        // Node 0 may point to 1 or 3 once 2 is removed; the edge (0, 2) must not appear in the
        // optimistic graph.
        let successors = vec![
            solver.new_variable(1, 3),
            solver.new_variable(0, 0),
            solver.new_variable(2, 2),
            solver.new_variable(3, 3),
        ];
        let count = solver.new_variable(1, 4);

        let mut propagator =
            post(&mut solver, &successors, count).expect("no contradiction at the root");
        solver.remove(successors[0], 2).expect("non-empty domain");
        solver
            .propagate_until_fixed_point(&mut propagator)
            .expect("no contradiction");

        // Fixed edges: (1, 0), (2, 2) self-loop, (3, 3) self-loop. Optimistically node 0 may
        // still reach 1 or 3, but 2 is isolated apart from its self-loop: at least two
        // components remain.
        solver.assert_bounds(count, 2, 3);
    }

    #[test]
    fn shrinking_domains_never_loosens_either_bound() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut solver = TestSolver::default();
            let num_nodes = 6;
            let successors = (0..num_nodes)
                .map(|_| solver.new_variable(0, num_nodes as i32 - 1))
                .collect::<Vec<_>>();
            let count = solver.new_variable(1, num_nodes as i32);

            let mut propagator =
                post(&mut solver, &successors, count).expect("no contradiction at the root");

            let mut previous_bounds = (solver.lower_bound(count), solver.upper_bound(count));
            loop {
                // Pick a successor which is not fixed yet and remove one of its values.
                let free = (0..num_nodes)
                    .filter(|&i| solver.lower_bound(successors[i]) < solver.upper_bound(successors[i]))
                    .collect::<Vec<_>>();
                let Some(&node) = free.get(rng.gen_range(0..free.len().max(1))) else {
                    break;
                };
                let victim = loop {
                    let candidate = rng.gen_range(0..num_nodes as i32);
                    if solver.contains(successors[node], candidate) {
                        break candidate;
                    }
                };
                solver.remove(successors[node], victim).expect("non-empty domain");

                solver
                    .propagate_until_fixed_point(&mut propagator)
                    .expect("the count domain spans the full node range");

                let bounds = (solver.lower_bound(count), solver.upper_bound(count));
                assert!(
                    bounds.0 >= previous_bounds.0,
                    "removing a value must never decrease the optimistic lower bound"
                );
                assert!(
                    bounds.1 <= previous_bounds.1,
                    "removing a value must never increase the pessimistic upper bound"
                );
                previous_bounds = bounds;
            }

            // Everything is fixed now, so the count is decided and the constraint entailed.
            assert_eq!(solver.lower_bound(count), solver.upper_bound(count));
            assert_eq!(solver.is_entailed(&mut propagator), Entailment::Satisfied);
        }
    }

    #[test]
    fn posting_without_successors_is_rejected() {
        let successors: Box<[DomainId]> = Box::new([]);
        let count = DomainId::new(0);
        assert_eq!(
            NbConnectedComponentsPropagator::new(successors, count).err(),
            Some(ConstraintOperationError::NoSuccessorVariables)
        );
    }

    #[test]
    fn posting_with_out_of_range_successors_is_rejected() {
        let mut solver = TestSolver::default();
        let successors = vec![solver.new_variable(0, 5), solver.new_variable(0, 1)];
        let count = solver.new_variable(1, 2);

        assert_eq!(
            post(&mut solver, &successors, count).err(),
            Some(ConstraintOperationError::SuccessorOutOfRange {
                index: 0,
                lower_bound: 0,
                upper_bound: 5,
                num_nodes: 2,
            })
        );
    }
}
