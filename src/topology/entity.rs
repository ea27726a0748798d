//! Entity contracts and the allocation collaborator.
//!
//! The engine never constructs nodes, half-edges, edges or faces itself: it
//! asks an [`Items`] allocator for them and from then on manipulates them only
//! through the accessor traits below. Callers who want to hang application
//! payload (coordinates, labels, weights, ...) off the topology implement
//! these traits for their own types; [`BaseItems`] is the payload-free
//! default.
//!
//! Link setters exist for the engine's benefit. Rewriting links through
//! `Graph::*_mut` accessors breaks the structure's invariants.

use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};

/// A graph node.
pub trait NodeEntity {
    fn id(&self) -> NodeId;
    /// An outgoing half-edge, `None` when the node is isolated. When the node
    /// lies on a boundary the engine keeps this pointed at a free half-edge.
    fn halfedge(&self) -> Option<HalfedgeId>;
    fn set_halfedge(&mut self, h: Option<HalfedgeId>);
}

/// One oriented half of an undirected edge.
pub trait HalfedgeEntity {
    /// Origin node; `None` once the half-edge has been detached.
    fn from(&self) -> Option<NodeId>;
    fn set_from(&mut self, n: Option<NodeId>);

    /// The oppositely oriented half of the same edge.
    fn twin(&self) -> HalfedgeId;
    fn set_twin(&mut self, h: HalfedgeId);

    /// Successor around the adjacent face (or the free boundary).
    fn next(&self) -> HalfedgeId;
    fn set_next(&mut self, h: HalfedgeId);

    /// Predecessor around the adjacent face (or the free boundary).
    fn prev(&self) -> HalfedgeId;
    fn set_prev(&mut self, h: HalfedgeId);

    fn edge(&self) -> EdgeId;
    fn set_edge(&mut self, e: EdgeId);

    /// Adjacent face, `None` for free boundary half-edges.
    fn face(&self) -> Option<FaceId>;
    fn set_face(&mut self, f: Option<FaceId>);
}

/// An undirected edge.
pub trait EdgeEntity {
    fn id(&self) -> EdgeId;
    /// The two halves, `(from -> to, to -> from)`.
    fn halfedges(&self) -> (HalfedgeId, HalfedgeId);
    fn set_halfedges(&mut self, h1: HalfedgeId, h2: HalfedgeId);
}

/// A bounded face.
pub trait FaceEntity {
    fn id(&self) -> FaceId;
    /// A boundary half-edge; `None` once the face has been released.
    fn halfedge(&self) -> Option<HalfedgeId>;
    fn set_halfedge(&mut self, h: Option<HalfedgeId>);
}

/// Allocates graph entities that can be stored in a [`Graph`](crate::topology::graph::Graph).
pub trait Items {
    type Node: NodeEntity;
    type Halfedge: HalfedgeEntity;
    type Edge: EdgeEntity;
    type Face: FaceEntity;

    /// A new isolated node with the given id.
    fn new_node(&mut self, id: NodeId) -> Self::Node;
    /// A new, unlinked half-edge.
    fn new_halfedge(&mut self) -> Self::Halfedge;
    /// A new edge with the given id, halves not yet assigned.
    fn new_edge(&mut self, id: EdgeId) -> Self::Edge;
    /// A new face with the given id and no boundary.
    fn new_face(&mut self, id: FaceId) -> Self::Face;
}

// ---------------------------------------------------------------------------
// Payload-free defaults
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseNode {
    id: NodeId,
    h: Option<HalfedgeId>,
}

impl BaseNode {
    pub fn new(id: NodeId) -> Self {
        Self { id, h: None }
    }
}

impl NodeEntity for BaseNode {
    fn id(&self) -> NodeId {
        self.id
    }
    fn halfedge(&self) -> Option<HalfedgeId> {
        self.h
    }
    fn set_halfedge(&mut self, h: Option<HalfedgeId>) {
        self.h = h;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseHalfedge {
    from: Option<NodeId>,
    twin: HalfedgeId,
    next: HalfedgeId,
    prev: HalfedgeId,
    edge: EdgeId,
    face: Option<FaceId>,
}

impl Default for BaseHalfedge {
    fn default() -> Self {
        Self {
            from: None,
            twin: HalfedgeId::UNLINKED,
            next: HalfedgeId::UNLINKED,
            prev: HalfedgeId::UNLINKED,
            edge: EdgeId(u32::MAX),
            face: None,
        }
    }
}

impl HalfedgeEntity for BaseHalfedge {
    fn from(&self) -> Option<NodeId> {
        self.from
    }
    fn set_from(&mut self, n: Option<NodeId>) {
        self.from = n;
    }
    fn twin(&self) -> HalfedgeId {
        self.twin
    }
    fn set_twin(&mut self, h: HalfedgeId) {
        self.twin = h;
    }
    fn next(&self) -> HalfedgeId {
        self.next
    }
    fn set_next(&mut self, h: HalfedgeId) {
        self.next = h;
    }
    fn prev(&self) -> HalfedgeId {
        self.prev
    }
    fn set_prev(&mut self, h: HalfedgeId) {
        self.prev = h;
    }
    fn edge(&self) -> EdgeId {
        self.edge
    }
    fn set_edge(&mut self, e: EdgeId) {
        self.edge = e;
    }
    fn face(&self) -> Option<FaceId> {
        self.face
    }
    fn set_face(&mut self, f: Option<FaceId>) {
        self.face = f;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseEdge {
    id: EdgeId,
    h1: HalfedgeId,
    h2: HalfedgeId,
}

impl BaseEdge {
    pub fn new(id: EdgeId) -> Self {
        Self {
            id,
            h1: HalfedgeId::UNLINKED,
            h2: HalfedgeId::UNLINKED,
        }
    }
}

impl EdgeEntity for BaseEdge {
    fn id(&self) -> EdgeId {
        self.id
    }
    fn halfedges(&self) -> (HalfedgeId, HalfedgeId) {
        (self.h1, self.h2)
    }
    fn set_halfedges(&mut self, h1: HalfedgeId, h2: HalfedgeId) {
        self.h1 = h1;
        self.h2 = h2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseFace {
    id: FaceId,
    h: Option<HalfedgeId>,
}

impl BaseFace {
    pub fn new(id: FaceId) -> Self {
        Self { id, h: None }
    }
}

impl FaceEntity for BaseFace {
    fn id(&self) -> FaceId {
        self.id
    }
    fn halfedge(&self) -> Option<HalfedgeId> {
        self.h
    }
    fn set_halfedge(&mut self, h: Option<HalfedgeId>) {
        self.h = h;
    }
}

/// Allocates the payload-free `Base*` entities.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseItems;

impl Items for BaseItems {
    type Node = BaseNode;
    type Halfedge = BaseHalfedge;
    type Edge = BaseEdge;
    type Face = BaseFace;

    fn new_node(&mut self, id: NodeId) -> BaseNode {
        BaseNode::new(id)
    }
    fn new_halfedge(&mut self) -> BaseHalfedge {
        BaseHalfedge::default()
    }
    fn new_edge(&mut self, id: EdgeId) -> BaseEdge {
        BaseEdge::new(id)
    }
    fn new_face(&mut self, id: FaceId) -> BaseFace {
        BaseFace::new(id)
    }
}
