mod constraint_operation_error;
mod entailment;
mod propagation_status;

pub use constraint_operation_error::ConstraintOperationError;
pub use entailment::Entailment;
pub use propagation_status::Inconsistency;
pub use propagation_status::PropagationStatus;
