use crate::engine::EmptyDomain;

/// The result of invoking a constraint programming propagator. The propagation either succeeds,
/// possibly after tightening domains, or it identifies the current domains as inconsistent.
pub type PropagationStatus = Result<(), Inconsistency>;

/// The contradiction signal surfaced to the host search engine. It is raised synchronously when a
/// requested bound tightening would leave the target domain empty, and is meant to trigger
/// backtracking; it is never swallowed or retried at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    EmptyDomain,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
