use enumset::EnumSet;

use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::IntDomainEvent;
use crate::engine::Watchers;

/// The view of an integer decision variable a propagator is written against. The state of the
/// variable lives in [`Assignments`], which is owned by the host; the variable itself is a
/// cheap handle.
pub trait IntegerVariable: Clone {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// The smallest value greater than or equal to `value` which is in the domain, or `None`
    /// when every remaining value is smaller than `value`. Enumerates possibly sparse domains.
    fn next_value(&self, assignments: &Assignments, value: i32) -> Option<i32>;

    /// Iterate over the values of the domain, in increasing order.
    fn iterate_domain<'a>(&self, assignments: &'a Assignments) -> impl Iterator<Item = i32> + 'a;

    /// Tighten the lower bound of the domain of this variable to `bound`.
    fn set_lower_bound(&self, assignments: &mut Assignments, bound: i32) -> Result<(), EmptyDomain>;

    /// Tighten the upper bound of the domain of this variable to `bound`.
    fn set_upper_bound(&self, assignments: &mut Assignments, bound: i32) -> Result<(), EmptyDomain>;

    /// Remove `value` from the domain of this variable.
    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Register a watch for this variable for the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);
}
