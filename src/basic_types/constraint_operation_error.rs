use thiserror::Error;

/// Errors related to posting a propagator. These are precondition violations which are reported
/// at construction time, rather than surfacing later as a wrong bound during search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The constraint was posted over an empty array of successor variables.
    #[error("cannot post a connected-components constraint without successor variables")]
    NoSuccessorVariables,
    /// A successor variable can take values outside the node range.
    #[error(
        "successor variable {index} ranges over [{lower_bound}, {upper_bound}], which leaves the node range [0, {num_nodes})"
    )]
    SuccessorOutOfRange {
        index: usize,
        lower_bound: i32,
        upper_bound: i32,
        num_nodes: usize,
    },
    /// The constraint is infeasible with the root domains.
    #[error("posting the constraint failed because it is infeasible at the root")]
    InfeasibleAtRoot,
}
