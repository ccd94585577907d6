mod assignments;
mod domain_events;
mod event_sink;
mod opaque_domain_event;
pub mod propagation;
pub(crate) mod test_solver;
mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use assignments::IntegerDomainIterator;
pub use domain_events::DomainEvents;
pub use opaque_domain_event::OpaqueDomainEvent;
pub use watch_list_cp::IntDomainEvent;
pub use watch_list_cp::WatchListCP;
pub use watch_list_cp::Watchers;

pub(crate) use event_sink::EventSink;
