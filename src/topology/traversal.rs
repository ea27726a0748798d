//! Read-only traversal over rotations and face loops.
//!
//! Every query walks the linked structure directly: rotations cost
//! O(degree), face loops O(boundary length). Absent or isolated nodes yield
//! empty rotations rather than errors.

use crate::topology::entity::{FaceEntity, HalfedgeEntity, Items, NodeEntity};
use crate::topology::graph::Graph;
use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};

/// Outgoing half-edges of one node, following `twin(h).next`.
pub struct Rotation<'a, I: Items> {
    graph: &'a Graph<I>,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    steps: usize,
}

impl<'a, I: Items> Rotation<'a, I> {
    pub(crate) fn new(graph: &'a Graph<I>, start: Option<HalfedgeId>) -> Self {
        Self {
            graph,
            start: start.unwrap_or(HalfedgeId::UNLINKED),
            current: start,
            steps: 0,
        }
    }
}

impl<'a, I: Items> Iterator for Rotation<'a, I> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let h = self.current?;
        let next = self.graph.next_of(self.graph.twin_of(h));
        self.steps += 1;
        if next == self.start {
            self.current = None;
        } else if self.steps > self.graph.halfedges.len() {
            panic!("dcel: rotation starting at halfedge {} does not close", self.start);
        } else {
            self.current = Some(next);
        }
        Some(h)
    }
}

/// Half-edges of one `next` loop, starting at a given half-edge.
pub struct FaceLoop<'a, I: Items> {
    graph: &'a Graph<I>,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    steps: usize,
}

impl<'a, I: Items> Iterator for FaceLoop<'a, I> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let h = self.current?;
        let next = self.graph.next_of(h);
        self.steps += 1;
        if next == self.start {
            self.current = None;
        } else if self.steps > self.graph.halfedges.len() {
            panic!("dcel: loop starting at halfedge {} does not close", self.start);
        } else {
            self.current = Some(next);
        }
        Some(h)
    }
}

/// Neighbor nodes of one node, in rotation order.
pub struct Neighbors<'a, I: Items> {
    rotation: Rotation<'a, I>,
}

impl<'a, I: Items> Iterator for Neighbors<'a, I> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let h = self.rotation.next()?;
        let graph = self.rotation.graph;
        Some(graph.origin_of(graph.twin_of(h)))
    }
}

/// Incoming half-edges of one node: the twins of its rotation.
pub struct Incoming<'a, I: Items> {
    rotation: Rotation<'a, I>,
}

impl<'a, I: Items> Iterator for Incoming<'a, I> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let h = self.rotation.next()?;
        Some(self.rotation.graph.twin_of(h))
    }
}

impl<I: Items> Graph<I> {
    /// Outgoing half-edges of `x`. Empty if `x` is absent or isolated.
    pub fn halfedges_from(&self, x: NodeId) -> Rotation<'_, I> {
        let start = self.nodes.get(&x).and_then(|n| n.halfedge());
        Rotation::new(self, start)
    }

    /// Incoming half-edges of `x`. Empty if `x` is absent or isolated.
    pub fn halfedges_to(&self, x: NodeId) -> Incoming<'_, I> {
        Incoming {
            rotation: self.halfedges_from(x),
        }
    }

    /// Neighbor nodes of `x`, visiting its rotation once.
    pub fn from(&self, x: NodeId) -> Neighbors<'_, I> {
        Neighbors {
            rotation: self.halfedges_from(x),
        }
    }

    /// Number of edges incident to `x`.
    pub fn degree(&self, x: NodeId) -> usize {
        self.halfedges_from(x).count()
    }

    /// The half-edge leaving `x` towards `y`, if the two are adjacent.
    pub fn halfedge(&self, x: NodeId, y: NodeId) -> Option<HalfedgeId> {
        if !self.has_node(x) || !self.has_node(y) {
            return None;
        }
        self.halfedges_from(x)
            .find(|&h| self.he(self.twin_of(h)).from() == Some(y))
    }

    /// The edge joining `x` and `y`, if any.
    pub fn edge_between(&self, x: NodeId, y: NodeId) -> Option<EdgeId> {
        self.halfedge(x, y).map(|h| self.he(h).edge())
    }

    /// The boundary loop of `f`, starting at its recorded half-edge. `None`
    /// if `f` is absent or has no boundary.
    pub fn halfedges_around(&self, f: FaceId) -> Option<FaceLoop<'_, I>> {
        let start = self.faces.get(&f)?.halfedge()?;
        Some(self.face_loop(start))
    }

    /// Corner nodes of `f` in boundary order.
    pub fn face_nodes(&self, f: FaceId) -> Option<impl Iterator<Item = NodeId> + '_> {
        Some(self.halfedges_around(f)?.map(|h| self.origin_of(h)))
    }

    /// The `next` loop through `start`, faced or free.
    pub fn face_loop(&self, start: HalfedgeId) -> FaceLoop<'_, I> {
        FaceLoop {
            graph: self,
            start,
            current: self.halfedges.contains_key(&start).then_some(start),
            steps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::topology::graph::Graph;
    use crate::topology::handle::{FaceId, NodeId};

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn absent_and_isolated_nodes_are_empty() {
        let mut g = Graph::new();
        g.add_node(n(0));
        assert_eq!(g.from(n(0)).count(), 0);
        assert_eq!(g.from(n(5)).count(), 0);
        assert_eq!(g.halfedges_to(n(5)).count(), 0);
        assert_eq!(g.halfedge(n(0), n(5)), None);
        assert_eq!(g.edge_between(n(5), n(0)), None);
    }

    #[test]
    fn rotation_of_triangle_corner() {
        let mut g = Graph::new();
        g.add_face(FaceId(0), &[n(0), n(1), n(2)]).unwrap();
        let mut nbrs: Vec<_> = g.from(n(0)).collect();
        nbrs.sort();
        assert_eq!(nbrs, vec![n(1), n(2)]);

        for h in g.halfedges_to(n(0)) {
            assert_eq!(g.dest(h), Some(n(0)));
        }
        for h in g.halfedges_from(n(0)) {
            assert_eq!(g.origin(h), Some(n(0)));
        }
    }

    #[test]
    fn edge_between_is_symmetric() {
        let mut g = Graph::new();
        g.add_face(FaceId(0), &[n(0), n(1), n(2)]).unwrap();
        let e = g.edge_between(n(1), n(2)).unwrap();
        assert_eq!(g.edge_between(n(2), n(1)), Some(e));
        assert_eq!(g.halfedge(n(1), n(2)).unwrap().twin(), g.halfedge(n(2), n(1)).unwrap());
    }

    #[test]
    fn face_nodes_follow_boundary() {
        let mut g = Graph::new();
        let f = g.add_face(FaceId(0), &[n(3), n(1), n(2), n(0)]).unwrap();
        let corners: Vec<_> = g.face_nodes(f).unwrap().collect();
        assert_eq!(corners, vec![n(3), n(1), n(2), n(0)]);
        assert!(g.halfedges_around(FaceId(9)).is_none());
    }
}
