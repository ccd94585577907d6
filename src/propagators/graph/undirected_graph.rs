use crate::containers::SparseSet;
use crate::nbcc_assert_simple;

/// An undirected graph over the fixed node set `0..n`, used as a reusable scaffold: the edge set
/// is wiped and rebuilt from variable domains on every propagation phase, while the adjacency
/// storage is allocated once and lives as long as the owning propagator.
///
/// Self-loops may be added; they are stored but have no effect on connectivity.
#[derive(Debug)]
pub struct UndirectedGraph {
    adjacency: Vec<SparseSet<usize>>,
}

fn node_index(node: &usize) -> usize {
    *node
}

impl UndirectedGraph {
    /// Creates a graph over the nodes `0..num_nodes` with no edges.
    pub fn new(num_nodes: usize) -> Self {
        UndirectedGraph {
            adjacency: (0..num_nodes).map(|_| SparseSet::new(node_index)).collect(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds the undirected edge `(u, v)`. Adding an edge which is already present is a no-op.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        nbcc_assert_simple!(u < self.num_nodes() && v < self.num_nodes());
        self.adjacency[u].insert(v);
        if u != v {
            self.adjacency[v].insert(u);
        }
    }

    /// Removes every edge; the node set is unchanged. Must be called before every rebuild:
    /// edges leaking between phases would corrupt the computed bound in either direction.
    pub fn clear(&mut self) {
        for neighbours in self.adjacency.iter_mut() {
            neighbours.clear();
        }
    }

    /// The neighbours of `u`, in no particular order.
    pub fn neighbours(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[u].iter().copied()
    }
}
