use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// [`PropagationContext`] is passed to propagators during propagation. It may be queried to
/// retrieve information about the current variable domains, such as the lower bound of a
/// particular variable.
///
/// Note that the contexts are the only point of communication between a propagator and the host
/// during propagation.
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// The mutable counterpart of [`PropagationContext`], which additionally allows the propagator
/// to tighten domains.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }
}

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    /// Returns the stored [`Assignments`].
    fn assignments(&self) -> &Assignments;
}

mod private {
    use super::*;

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

/// The read operations every context supports.
pub trait ReadDomains: HasAssignments {
    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    /// The smallest in-domain value greater than or equal to `value`; enumerates possibly
    /// sparse domains.
    fn next_value<Var: IntegerVariable>(&self, var: &Var, value: i32) -> Option<i32> {
        var.next_value(self.assignments(), value)
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

impl PropagationContextMut<'_> {
    /// Tightens the lower bound of `var` to `bound`; a bound which does not improve the current
    /// one is ignored.
    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound > var.lower_bound(self.assignments) {
            return var.set_lower_bound(self.assignments, bound);
        }

        Ok(())
    }

    /// Tightens the upper bound of `var` to `bound`; a bound which does not improve the current
    /// one is ignored.
    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound < var.upper_bound(self.assignments) {
            return var.set_upper_bound(self.assignments, bound);
        }

        Ok(())
    }

    /// Removes `value` from the domain of `var`; an absent value is ignored.
    pub fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        if var.contains(self.assignments, value) {
            return var.remove(self.assignments, value);
        }

        Ok(())
    }
}
