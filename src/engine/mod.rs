pub mod cp;
pub mod variables;

pub use cp::propagation;
pub use cp::Assignments;
pub use cp::DomainEvents;
pub use cp::EmptyDomain;
pub use cp::IntDomainEvent;
pub use cp::IntegerDomainIterator;
pub use cp::OpaqueDomainEvent;
pub use cp::WatchListCP;
pub use cp::Watchers;
