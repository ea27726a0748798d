//! Read-only graph abstraction for generic algorithms.
//!
//! [`UndirectedGraph`] exposes just enough of a graph for traversal-style
//! algorithms (BFS, connectivity, degree statistics) to run over any
//! implementor without knowing about half-edges or faces.

use crate::topology::entity::Items;
use crate::topology::graph::{Graph, Ids};
use crate::topology::handle::{EdgeId, NodeId};
use crate::topology::traversal::Neighbors;

/// Node/adjacency queries over an undirected graph.
pub trait UndirectedGraph {
    type NodeIter<'a>: Iterator<Item = NodeId>
    where
        Self: 'a;
    type NeighborIter<'a>: Iterator<Item = NodeId>
    where
        Self: 'a;

    /// Every node, in unspecified order.
    fn nodes<'a>(&'a self) -> Self::NodeIter<'a>;
    /// Nodes adjacent to `n`. Empty if `n` is absent.
    fn neighbors<'a>(&'a self, n: NodeId) -> Self::NeighborIter<'a>;
    fn has_node(&self, n: NodeId) -> bool;
    /// The edge joining `x` and `y`, in either orientation.
    fn edge_between(&self, x: NodeId, y: NodeId) -> Option<EdgeId>;

    fn has_edge_between(&self, x: NodeId, y: NodeId) -> bool {
        self.edge_between(x, y).is_some()
    }

    fn degree(&self, n: NodeId) -> usize {
        self.neighbors(n).count()
    }

    /// Every edge once, as `(u, v)` with `u < v`.
    fn edge_pairs<'a>(&'a self) -> Box<dyn Iterator<Item = (NodeId, NodeId)> + 'a> {
        Box::new(
            self.nodes()
                .flat_map(move |u| self.neighbors(u).filter(move |&v| u < v).map(move |v| (u, v))),
        )
    }
}

impl<I: Items> UndirectedGraph for Graph<I> {
    type NodeIter<'a>
        = Ids<'a, NodeId, I::Node>
    where
        Self: 'a;
    type NeighborIter<'a>
        = Neighbors<'a, I>
    where
        Self: 'a;

    fn nodes<'a>(&'a self) -> Self::NodeIter<'a> {
        Graph::nodes(self)
    }

    fn neighbors<'a>(&'a self, n: NodeId) -> Self::NeighborIter<'a> {
        Graph::from(self, n)
    }

    fn has_node(&self, n: NodeId) -> bool {
        Graph::has_node(self, n)
    }

    fn edge_between(&self, x: NodeId, y: NodeId) -> Option<EdgeId> {
        Graph::edge_between(self, x, y)
    }

    fn degree(&self, n: NodeId) -> usize {
        Graph::degree(self, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::handle::FaceId;

    fn edge_count<G: UndirectedGraph>(g: &G) -> usize {
        g.edge_pairs().count()
    }

    #[test]
    fn generic_view_of_a_square() {
        let mut g = Graph::new();
        let ns: Vec<_> = (0..4).map(NodeId).collect();
        g.add_face(FaceId(0), &ns).unwrap();

        assert_eq!(edge_count(&g), 4);
        assert!(UndirectedGraph::has_edge_between(&g, ns[0], ns[3]));
        assert!(!UndirectedGraph::has_edge_between(&g, ns[0], ns[2]));
        assert_eq!(UndirectedGraph::degree(&g, ns[1]), 2);
        let mut pairs: Vec<_> = g.edge_pairs().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![(ns[0], ns[1]), (ns[0], ns[3]), (ns[1], ns[2]), (ns[2], ns[3])]
        );
    }
}
