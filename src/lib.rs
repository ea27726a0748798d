#![cfg_attr(docsrs, feature(doc_cfg))]
//! # planar-dcel
//!
//! planar-dcel is a mutable doubly-connected edge list (half-edge structure)
//! for planar subdivisions. It supports incremental construction and teardown
//! of nodes, undirected edges and the faces they bound, and keeps every
//! rotation and boundary invariant intact after each mutation.
//!
//! ## Features
//! - Constant-time local traversal: outgoing half-edges of a node, the
//!   boundary of a face, the edge between two nodes
//! - Face construction from node cycles or from explicit half-edge chains
//! - Id recycling per entity kind
//! - Custom entity payloads through the [`Items`](topology::Items) allocator
//! - Full structural validation, run after every mutation in debug builds or
//!   with the `strict-invariants` / `check-invariants` features
//!
//! ## Errors
//!
//! Requests the current topology cannot accommodate return
//! [`DcelError`](dcel_error::DcelError). Contract violations (id collisions,
//! faces with fewer than three corners) panic. `add_face` is not
//! transactional: edges it created before a refusal stay in the graph.
//!
//! ## Usage
//! ```rust
//! use planar_dcel::prelude::*;
//!
//! let mut g = Graph::new();
//! g.add_face(FaceId(0), &[NodeId(0), NodeId(1), NodeId(2)]).unwrap();
//! g.add_face(FaceId(1), &[NodeId(2), NodeId(1), NodeId(3)]).unwrap();
//! assert_eq!(g.edge_count(), 5);
//!
//! let shared = g.halfedge(NodeId(1), NodeId(2)).unwrap();
//! assert_eq!(g.halfedge_entity(shared).unwrap().face(), Some(FaceId(0)));
//! assert_eq!(g.halfedge_entity(shared.twin()).unwrap().face(), Some(FaceId(1)));
//! ```

pub mod dcel_error;
pub mod debug_invariants;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::dcel_error::DcelError;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::topology::entity::{
        BaseEdge, BaseFace, BaseHalfedge, BaseItems, BaseNode, EdgeEntity, FaceEntity,
        HalfedgeEntity, Items, NodeEntity,
    };
    pub use crate::topology::graph::Graph;
    pub use crate::topology::graph_traits::UndirectedGraph;
    pub use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId, Side};
    pub use crate::topology::validation::{ValidationOptions, ViolationHandling, validate_graph};
}
