use crate::nbcc_assert_simple;
use crate::propagators::graph::UndirectedGraph;

const UNVISITED: usize = usize::MAX;

/// Computes the partition of the nodes of an [`UndirectedGraph`] into connected components.
///
/// One finder is created per propagator and lives as long as it does; the labelling buffers are
/// owned and reused, so repeated calls do not allocate. Each call recomputes the partition from
/// scratch for whatever edge set is currently present in the graph.
#[derive(Debug)]
pub struct ConnectivityFinder {
    /// For every node, the id of its component; ids are consecutive from 0 in the order in
    /// which components are discovered.
    component_of: Vec<usize>,
    /// Scratch stack for the depth-first traversal.
    stack: Vec<usize>,
    num_components: usize,
}

impl ConnectivityFinder {
    pub fn new(num_nodes: usize) -> Self {
        ConnectivityFinder {
            component_of: vec![UNVISITED; num_nodes],
            stack: Vec::with_capacity(num_nodes),
            num_components: 0,
        }
    }

    /// Computes the connected components of `graph` and returns their number.
    ///
    /// Every node is visited exactly once, whether or not it has edges; isolated nodes form
    /// singleton components, so the returned count is at least 1 for a non-empty node set.
    pub fn find_all_components(&mut self, graph: &UndirectedGraph) -> usize {
        nbcc_assert_simple!(graph.num_nodes() == self.component_of.len());

        self.component_of.fill(UNVISITED);
        self.num_components = 0;

        for root in 0..graph.num_nodes() {
            if self.component_of[root] != UNVISITED {
                continue;
            }

            let component = self.num_components;
            self.num_components += 1;

            self.component_of[root] = component;
            self.stack.push(root);
            while let Some(node) = self.stack.pop() {
                for neighbour in graph.neighbours(node) {
                    if self.component_of[neighbour] == UNVISITED {
                        self.component_of[neighbour] = component;
                        self.stack.push(neighbour);
                    }
                }
            }
        }

        self.num_components
    }

    /// The number of components found by the last call to
    /// [`find_all_components`][Self::find_all_components].
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// The component id assigned to `node` by the last call to
    /// [`find_all_components`][Self::find_all_components].
    pub fn component_of(&self, node: usize) -> usize {
        self.component_of[node]
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectivityFinder;
    use super::UndirectedGraph;

    #[test]
    fn isolated_nodes_form_singleton_components() {
        let graph = UndirectedGraph::new(5);
        let mut finder = ConnectivityFinder::new(5);

        assert_eq!(finder.find_all_components(&graph), 5);

        // Every node gets its own id.
        let mut ids = (0..5).map(|node| finder.component_of(node)).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn a_path_is_a_single_component() {
        let mut graph = UndirectedGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        let mut finder = ConnectivityFinder::new(4);

        assert_eq!(finder.find_all_components(&graph), 1);
    }

    #[test]
    fn nodes_share_an_id_iff_connected() {
        let mut graph = UndirectedGraph::new(5);
        graph.add_edge(0, 1);
        graph.add_edge(3, 4);
        let mut finder = ConnectivityFinder::new(5);

        assert_eq!(finder.find_all_components(&graph), 3);
        assert_eq!(finder.component_of(0), finder.component_of(1));
        assert_eq!(finder.component_of(3), finder.component_of(4));
        assert_ne!(finder.component_of(0), finder.component_of(2));
        assert_ne!(finder.component_of(0), finder.component_of(3));
        assert_ne!(finder.component_of(2), finder.component_of(3));
    }

    #[test]
    fn self_loops_do_not_affect_the_partition() {
        let mut graph = UndirectedGraph::new(3);
        graph.add_edge(0, 0);
        graph.add_edge(1, 2);
        let mut finder = ConnectivityFinder::new(3);

        assert_eq!(finder.find_all_components(&graph), 2);
    }

    #[test]
    fn recomputation_after_rebuilding_the_graph_starts_fresh() {
        let mut graph = UndirectedGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        let mut finder = ConnectivityFinder::new(4);
        assert_eq!(finder.find_all_components(&graph), 2);

        graph.clear();
        graph.add_edge(1, 2);

        assert_eq!(finder.find_all_components(&graph), 3);
        assert_eq!(finder.component_of(1), finder.component_of(2));
    }
}
