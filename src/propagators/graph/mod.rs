//! Propagators reasoning about the graph induced by an array of successor variables.
mod connectivity;
mod nb_connected_components;
mod undirected_graph;

pub use connectivity::ConnectivityFinder;
pub use nb_connected_components::NbConnectedComponentsPropagator;
pub use undirected_graph::UndirectedGraph;
