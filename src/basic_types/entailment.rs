/// A three-valued satisfiability verdict reported by a propagator outside full propagation.
///
/// Used by the host's consistency checks: the answer is based on the current domains only and
/// does not mutate any variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entailment {
    /// The constraint is guaranteed to hold no matter how the remaining domains are narrowed.
    Satisfied,
    /// The constraint is already violated by the current domains.
    Violated,
    /// Neither of the above can be concluded yet.
    Undecided,
}
