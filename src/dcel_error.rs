//! DcelError: Unified error type for planar-dcel public APIs
//!
//! Topology refusals (a request the current structure cannot accommodate) and
//! invariant-validation failures are reported through this type. Violated
//! preconditions and internal corruption detected mid-surgery panic instead;
//! after such a panic the graph must be discarded.

use thiserror::Error;

use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId};

/// Unified error type for DCEL operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DcelError {
    /// Every half-edge around the node already bounds a face, so no new edge
    /// can be spliced into its rotation.
    #[error("dcel: no free halfedge from node {node}")]
    NoFreeHalfedge { node: NodeId },
    /// The rotation around `node` does not allow the requested face to close.
    #[error("dcel: halfedge reconnection failed around node {node}")]
    ReconnectFailed { node: NodeId },
    /// A boundary half-edge requested for a new face is already claimed.
    #[error("dcel: cannot set face {face}, halfedge from {from} to {to} already has a face")]
    HalfedgeAlreadyFaced {
        face: FaceId,
        from: NodeId,
        to: NodeId,
    },
    /// The node list of a face repeats a node.
    #[error("dcel: cannot set face {face}, nodes are not distinct")]
    NonDistinctNodes { face: FaceId },
    /// The given half-edges do not form a closed chain.
    #[error("dcel: cannot set face {face}, halfedges do not form a chain")]
    NotAChain { face: FaceId },
    /// An endpoint of a directly constructed edge is not in the graph.
    #[error("dcel: node {0} not present")]
    NodeNotPresent(NodeId),
    /// Direct edge construction with identical endpoints.
    #[error("dcel: trying to set a loop edge at node {0}")]
    LoopEdge(NodeId),
    /// Direct edge construction with an id that is already live.
    #[error("dcel: edge ID collision: {0}")]
    EdgeIdCollision(EdgeId),
    /// A half-edge handle that does not belong to a live edge.
    #[error("dcel: halfedge {0} not present")]
    MissingHalfedge(HalfedgeId),

    // ---------- invariant validation ----------
    /// `twin(twin(h)) != h`, or the twins disagree on their edge.
    #[error("invariant: halfedge {halfedge} is not paired with its twin")]
    TwinMismatch { halfedge: HalfedgeId },
    /// `next(prev(h)) != h` or `prev(next(h)) != h`.
    #[error("invariant: next/prev links around halfedge {halfedge} are inconsistent")]
    LinkMismatch { halfedge: HalfedgeId },
    /// The rotation of a node does not close over exactly its degree.
    #[error("invariant: rotation of node {node} visits {found} halfedges, expected {expected}")]
    RotationBroken {
        node: NodeId,
        expected: usize,
        found: usize,
    },
    /// A face loop does not close, or visits a half-edge of another face.
    #[error("invariant: boundary loop of face {face} is broken at halfedge {halfedge}")]
    FaceLoopBroken { face: FaceId, halfedge: HalfedgeId },
    /// The half-edge map does not hold exactly two halves per edge.
    #[error("invariant: {halfedges} halfedges for {edges} edges")]
    HalfedgeCountMismatch { halfedges: usize, edges: usize },
    /// An id registry disagrees with the live entities of its kind.
    #[error("invariant: {kind} registry counts {issued} issued ids, graph holds {live}")]
    RegistryMismatch {
        kind: &'static str,
        issued: usize,
        live: usize,
    },
    /// A live entity's id is not issued by its registry.
    #[error("invariant: {kind} {id} is live but its id is not issued")]
    UnissuedId { kind: &'static str, id: u32 },
    /// An entity references another entity that is not live.
    #[error("invariant: dangling reference: {0}")]
    DanglingReference(String),
}
