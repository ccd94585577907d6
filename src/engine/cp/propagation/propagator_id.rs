use crate::containers::StorageKey;
use crate::engine::propagation::LocalId;

/// An identifier of a propagator instance within the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropagatorId(pub u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

impl std::fmt::Display for PropagatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A propagator together with the [`LocalId`] under which it registered a variable; this is what
/// the watch lists store, so that a notification can tell the propagator which of its variables
/// changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropagatorVarId {
    pub propagator: PropagatorId,
    pub variable: LocalId,
}
