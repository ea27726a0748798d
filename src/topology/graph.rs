//! The DCEL aggregate: owns every node, half-edge, edge and face by handle.
//!
//! [`Graph`] is the single entry point for mutation. Lifecycle operations
//! allocate ids through the per-kind [`IdRegistry`], create entities through
//! the [`Items`] allocator and delegate all pointer surgery to
//! [`attach`](Graph::attach), [`detach`](Graph::detach) and
//! [`reconnect`](Graph::reconnect).
//!
//! # Error tiers
//! - Violated preconditions (id collisions, faces with fewer than three
//!   corners, loop edges through [`add_face`](Graph::add_face)) panic.
//! - Topology refusals return [`DcelError`] and leave the structure
//!   consistent. `add_face` is *not* transactional: edges it created before a
//!   later refusal stay in the graph.
//! - Corruption detected mid-surgery panics.
//!
//! # Example
//! ```rust
//! use planar_dcel::prelude::*;
//!
//! let mut g = Graph::new();
//! let f = g.add_face(FaceId(0), &[NodeId(0), NodeId(1), NodeId(2)]).unwrap();
//! assert_eq!(g.node_count(), 3);
//! assert_eq!(g.edge_count(), 3);
//! assert_eq!(g.halfedges_around(f).unwrap().count(), 3);
//! ```

use hashbrown::HashMap;
use itertools::Itertools;

use crate::dcel_error::DcelError;
use crate::topology::_debug_invariants::debug_invariants;
use crate::topology::entity::{
    BaseItems, EdgeEntity, FaceEntity, HalfedgeEntity, Items, NodeEntity,
};
use crate::topology::handle::{EdgeId, FaceId, HalfedgeId, NodeId, Side};
use crate::topology::registry::IdRegistry;

/// Iterator over live ids of one entity kind, in unspecified order.
pub type Ids<'a, K, V> = std::iter::Copied<hashbrown::hash_map::Keys<'a, K, V>>;

/// A doubly-connected edge list over entities allocated by `I`.
pub struct Graph<I: Items = BaseItems> {
    pub(crate) items: I,
    pub(crate) nodes: HashMap<NodeId, I::Node>,
    pub(crate) halfedges: HashMap<HalfedgeId, I::Halfedge>,
    pub(crate) edges: HashMap<EdgeId, I::Edge>,
    pub(crate) faces: HashMap<FaceId, I::Face>,
    pub(crate) node_ids: IdRegistry<NodeId>,
    pub(crate) edge_ids: IdRegistry<EdgeId>,
    pub(crate) face_ids: IdRegistry<FaceId>,
}

impl<I: Items + Default> Default for Graph<I> {
    fn default() -> Self {
        Self::with_items(I::default())
    }
}

impl Graph<BaseItems> {
    /// Creates an empty graph of payload-free entities.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I> Clone for Graph<I>
where
    I: Items + Clone,
    I::Node: Clone,
    I::Halfedge: Clone,
    I::Edge: Clone,
    I::Face: Clone,
{
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            nodes: self.nodes.clone(),
            halfedges: self.halfedges.clone(),
            edges: self.edges.clone(),
            faces: self.faces.clone(),
            node_ids: self.node_ids.clone(),
            edge_ids: self.edge_ids.clone(),
            face_ids: self.face_ids.clone(),
        }
    }
}

impl<I: Items> std::fmt::Debug for Graph<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl<I: Items> Graph<I> {
    /// Creates an empty graph that allocates its entities through `items`.
    pub fn with_items(items: I) -> Self {
        Self {
            items,
            nodes: HashMap::new(),
            halfedges: HashMap::new(),
            edges: HashMap::new(),
            faces: HashMap::new(),
            node_ids: IdRegistry::new(),
            edge_ids: IdRegistry::new(),
            face_ids: IdRegistry::new(),
        }
    }

    /// The allocator entities are created with.
    pub fn items(&self) -> &I {
        &self.items
    }

    // ---------------------------------------------------------------------
    // Counts, membership, listings
    // ---------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
    /// Always twice the edge count.
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    pub fn has_node(&self, n: NodeId) -> bool {
        self.nodes.contains_key(&n)
    }
    pub fn has_edge(&self, e: EdgeId) -> bool {
        self.edges.contains_key(&e)
    }
    pub fn has_face(&self, f: FaceId) -> bool {
        self.faces.contains_key(&f)
    }

    pub fn nodes(&self) -> Ids<'_, NodeId, I::Node> {
        self.nodes.keys().copied()
    }
    pub fn edges(&self) -> Ids<'_, EdgeId, I::Edge> {
        self.edges.keys().copied()
    }
    pub fn faces(&self) -> Ids<'_, FaceId, I::Face> {
        self.faces.keys().copied()
    }

    // ---------------------------------------------------------------------
    // Entity access
    // ---------------------------------------------------------------------

    pub fn node(&self, n: NodeId) -> Option<&I::Node> {
        self.nodes.get(&n)
    }
    /// Mutable access for payload updates. Link fields must be left alone.
    pub fn node_mut(&mut self, n: NodeId) -> Option<&mut I::Node> {
        self.nodes.get_mut(&n)
    }
    pub fn edge(&self, e: EdgeId) -> Option<&I::Edge> {
        self.edges.get(&e)
    }
    /// Mutable access for payload updates. Link fields must be left alone.
    pub fn edge_mut(&mut self, e: EdgeId) -> Option<&mut I::Edge> {
        self.edges.get_mut(&e)
    }
    pub fn face(&self, f: FaceId) -> Option<&I::Face> {
        self.faces.get(&f)
    }
    /// Mutable access for payload updates. Link fields must be left alone.
    pub fn face_mut(&mut self, f: FaceId) -> Option<&mut I::Face> {
        self.faces.get_mut(&f)
    }
    pub fn halfedge_entity(&self, h: HalfedgeId) -> Option<&I::Halfedge> {
        self.halfedges.get(&h)
    }
    /// Mutable access for payload updates. Link fields must be left alone.
    pub fn halfedge_entity_mut(&mut self, h: HalfedgeId) -> Option<&mut I::Halfedge> {
        self.halfedges.get_mut(&h)
    }

    /// Origin node of `h`.
    pub fn origin(&self, h: HalfedgeId) -> Option<NodeId> {
        self.halfedges.get(&h).and_then(|he| he.from())
    }

    /// Destination node of `h` (the origin of its twin).
    pub fn dest(&self, h: HalfedgeId) -> Option<NodeId> {
        self.halfedges
            .get(&h)
            .and_then(|he| self.halfedges.get(&he.twin()))
            .and_then(|tw| tw.from())
    }

    /// The two halves of `e`, `(from -> to, to -> from)`.
    pub fn edge_halfedges(&self, e: EdgeId) -> Option<(HalfedgeId, HalfedgeId)> {
        self.edges.get(&e).map(|edge| edge.halfedges())
    }

    /// The `(from, to)` endpoints of `e`: the origins of its two halves.
    pub fn edge_endpoints(&self, e: EdgeId) -> Option<(NodeId, NodeId)> {
        let (h1, h2) = self.edge_halfedges(e)?;
        Some((self.origin(h1)?, self.origin(h2)?))
    }

    // ---------------------------------------------------------------------
    // Identifier issuance
    // ---------------------------------------------------------------------

    /// The id the next implicitly created node would get. Nothing is
    /// reserved: the id becomes live only once a node is added with it.
    pub fn new_node_id(&self) -> NodeId {
        self.node_ids.peek()
    }
    pub fn new_edge_id(&self) -> EdgeId {
        self.edge_ids.peek()
    }
    pub fn new_face_id(&self) -> FaceId {
        self.face_ids.peek()
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    /// Adds an isolated node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if a node with `id` already exists.
    pub fn add_node(&mut self, id: NodeId) -> NodeId {
        if self.has_node(id) {
            panic!("dcel: node ID collision: {id}");
        }
        self.node_ids.claim(id);
        let node = self.items.new_node(id);
        self.nodes.insert(id, node);
        log::debug!("dcel: added node {id}");
        debug_invariants!(self);
        id
    }

    /// Adds an isolated node under a freshly issued id.
    pub fn new_node(&mut self) -> NodeId {
        let id = self.node_ids.new_id();
        let node = self.items.new_node(id);
        self.nodes.insert(id, node);
        log::debug!("dcel: added node {id}");
        debug_invariants!(self);
        id
    }

    /// Removes `n` together with every incident edge (and, through them,
    /// every incident face). Returns the released entity, or `None` if `n`
    /// was not in the graph.
    pub fn remove_node(&mut self, n: NodeId) -> Option<I::Node> {
        if !self.has_node(n) {
            return None;
        }
        let incident: Vec<EdgeId> = self.halfedges_from(n).map(|h| h.edge()).collect();
        for e in incident {
            self.remove_edge(e);
        }
        let mut node = self.nodes.remove(&n)?;
        node.set_halfedge(None);
        self.node_ids.release(n);
        log::debug!("dcel: removed node {n}");
        debug_invariants!(self);
        Some(node)
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    /// Returns the half-edge `x -> y`, creating the edge (and any missing
    /// endpoint) if the nodes are not yet adjacent.
    ///
    /// # Panics
    ///
    /// Panics if `x == y`.
    pub(crate) fn add_edge(&mut self, x: NodeId, y: NodeId) -> Result<HalfedgeId, DcelError> {
        if x == y {
            panic!("dcel: trying to add a loop edge at node {x}");
        }
        if let Some(h) = self.halfedge(x, y) {
            return Ok(h);
        }
        for n in [x, y] {
            if !self.has_node(n) {
                self.add_node(n);
            }
        }
        let id = self.edge_ids.new_id();
        self.insert_edge(id, x, y)
    }

    /// Adds edge `id` between two existing nodes, returning its `from -> to`
    /// half-edge. Unlike faces, edges are added transactionally: on error the
    /// graph is unchanged.
    pub fn set_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId) -> Result<HalfedgeId, DcelError> {
        if self.has_edge(id) {
            return Err(DcelError::EdgeIdCollision(id));
        }
        if from == to {
            return Err(DcelError::LoopEdge(from));
        }
        for n in [from, to] {
            if !self.has_node(n) {
                return Err(DcelError::NodeNotPresent(n));
            }
        }
        self.edge_ids.claim(id);
        let h = self.insert_edge(id, from, to)?;
        debug_invariants!(self);
        Ok(h)
    }

    /// Creates the twin pair of `id` and attaches both halves. The id must
    /// already be issued; it is released again on failure.
    fn insert_edge(&mut self, id: EdgeId, x: NodeId, y: NodeId) -> Result<HalfedgeId, DcelError> {
        let h1 = HalfedgeId::of(id, Side::Forward);
        let h2 = HalfedgeId::of(id, Side::Backward);
        for (h, twin) in [(h1, h2), (h2, h1)] {
            let mut he = self.items.new_halfedge();
            he.set_twin(twin);
            he.set_edge(id);
            he.set_next(twin);
            he.set_prev(twin);
            he.set_face(None);
            self.halfedges.insert(h, he);
        }

        if let Err(err) = self.attach(h1, x) {
            self.discard_pair(h1, h2, id);
            return Err(err);
        }
        if let Err(err) = self.attach(h2, y) {
            self.detach(h1);
            self.discard_pair(h1, h2, id);
            return Err(err);
        }

        let mut edge = self.items.new_edge(id);
        edge.set_halfedges(h1, h2);
        self.edges.insert(id, edge);
        log::debug!("dcel: added edge {id} ({x} -> {y})");
        Ok(h1)
    }

    fn discard_pair(&mut self, h1: HalfedgeId, h2: HalfedgeId, id: EdgeId) {
        self.halfedges.remove(&h1);
        self.halfedges.remove(&h2);
        self.edge_ids.release(id);
    }

    /// Removes `e` and the faces on either side of it. Both end nodes stay in
    /// the graph. Returns the released entity, or `None` if `e` was absent.
    pub fn remove_edge(&mut self, e: EdgeId) -> Option<I::Edge> {
        let (h1, h2) = self.edge_halfedges(e)?;
        for h in [h1, h2] {
            if let Some(f) = self.face_of(h) {
                self.remove_face(f);
            }
        }
        self.detach(h1);
        self.detach(h2);

        self.halfedges.remove(&h1);
        self.halfedges.remove(&h2);
        let mut edge = self.edges.remove(&e)?;
        edge.set_halfedges(HalfedgeId::UNLINKED, HalfedgeId::UNLINKED);
        self.edge_ids.release(e);
        log::debug!("dcel: removed edge {e}");
        debug_invariants!(self);
        Some(edge)
    }

    // ---------------------------------------------------------------------
    // Faces
    // ---------------------------------------------------------------------

    /// Adds face `id` bounded by the cycle `nodes[0] -> nodes[1] -> ... ->
    /// nodes[0]`, creating missing nodes and edges on the way.
    ///
    /// Refused with [`DcelError::NonDistinctNodes`] before anything changes
    /// when a node repeats. Later refusals (a boundary half-edge already
    /// bounds a face, a node is enclosed, the rotation does not let the face
    /// close) leave any edges created so far in the graph.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three nodes are given or face `id` exists.
    pub fn add_face(&mut self, id: FaceId, nodes: &[NodeId]) -> Result<FaceId, DcelError> {
        if nodes.len() < 3 {
            panic!("dcel: cannot add face {id} from only {} nodes", nodes.len());
        }
        if self.has_face(id) {
            panic!("dcel: face ID collision: {id}");
        }
        if !nodes.iter().all_unique() {
            return Err(DcelError::NonDistinctNodes { face: id });
        }

        let edges_before = self.edges.len();
        let result = self.close_face(id, nodes);
        if let Err(err) = &result {
            let created = self.edges.len() - edges_before;
            if created > 0 {
                log::warn!("dcel: face {id} refused after creating {created} edges, which remain: {err}");
            }
        }
        debug_invariants!(self);
        result
    }

    /// [`add_face`](Self::add_face) under a freshly issued face id.
    pub fn add_face_auto(&mut self, nodes: &[NodeId]) -> Result<FaceId, DcelError> {
        let id = self.new_face_id();
        self.add_face(id, nodes)
    }

    fn close_face(&mut self, id: FaceId, nodes: &[NodeId]) -> Result<FaceId, DcelError> {
        let mut boundary = Vec::with_capacity(nodes.len());
        for (&x, &y) in nodes.iter().circular_tuple_windows() {
            let h = self.add_edge(x, y)?;
            if self.face_of(h).is_some() {
                return Err(DcelError::HalfedgeAlreadyFaced { face: id, from: x, to: y });
            }
            boundary.push(h);
        }
        self.bind_face(id, &boundary)
    }

    /// Adds face `id` bounded by existing half-edges, which must chain
    /// head-to-tail and all be free.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three half-edges are given or face `id` exists.
    pub fn set_face(&mut self, id: FaceId, halfedges: &[HalfedgeId]) -> Result<FaceId, DcelError> {
        if halfedges.len() < 3 {
            panic!(
                "dcel: cannot set a face {id} from only {} halfedges",
                halfedges.len()
            );
        }
        if self.has_face(id) {
            panic!("dcel: face ID collision: {id}");
        }
        for &h in halfedges {
            if !self.halfedges.contains_key(&h) {
                return Err(DcelError::MissingHalfedge(h));
            }
        }
        for (&a, &b) in halfedges.iter().circular_tuple_windows() {
            if self.dest(a) != self.origin(b) {
                return Err(DcelError::NotAChain { face: id });
            }
        }
        for &h in halfedges {
            if self.face_of(h).is_some() {
                return Err(DcelError::HalfedgeAlreadyFaced {
                    face: id,
                    from: self.origin_of(h),
                    to: self.origin_of(self.twin_of(h)),
                });
            }
        }
        let result = self.bind_face(id, halfedges);
        debug_invariants!(self);
        result
    }

    /// Threads `boundary` into one `next` loop and stamps it with face `id`.
    fn bind_face(&mut self, id: FaceId, boundary: &[HalfedgeId]) -> Result<FaceId, DcelError> {
        for (&a, &b) in boundary.iter().circular_tuple_windows() {
            self.reconnect(a, b)?;
        }

        self.face_ids.claim(id);
        let mut face = self.items.new_face(id);
        face.set_halfedge(Some(boundary[0]));
        self.faces.insert(id, face);
        for &h in boundary {
            self.he_mut(h).set_face(Some(id));
        }
        log::debug!("dcel: added face {id} with {} sides", boundary.len());
        Ok(id)
    }

    /// Releases face `f`: its boundary half-edges become free but stay in the
    /// graph. Returns the released entity, or `None` if `f` was absent.
    pub fn remove_face(&mut self, f: FaceId) -> Option<I::Face> {
        let mut face = self.faces.remove(&f)?;
        if let Some(start) = face.halfedge() {
            let boundary: Vec<HalfedgeId> = self.face_loop(start).collect();
            for h in boundary {
                self.he_mut(h).set_face(None);
            }
        }
        face.set_halfedge(None);
        self.face_ids.release(f);
        log::debug!("dcel: removed face {f}");
        debug_invariants!(self);
        Some(face)
    }

    // ---------------------------------------------------------------------
    // Internal link access. A missing entity here means the structure is
    // corrupt, so these panic.
    // ---------------------------------------------------------------------

    pub(crate) fn he(&self, h: HalfedgeId) -> &I::Halfedge {
        self.halfedges
            .get(&h)
            .unwrap_or_else(|| panic!("dcel: dangling halfedge {h}"))
    }

    pub(crate) fn he_mut(&mut self, h: HalfedgeId) -> &mut I::Halfedge {
        self.halfedges
            .get_mut(&h)
            .unwrap_or_else(|| panic!("dcel: dangling halfedge {h}"))
    }

    pub(crate) fn node_entity(&self, n: NodeId) -> &I::Node {
        self.nodes
            .get(&n)
            .unwrap_or_else(|| panic!("dcel: dangling node {n}"))
    }

    pub(crate) fn node_entity_mut(&mut self, n: NodeId) -> &mut I::Node {
        self.nodes
            .get_mut(&n)
            .unwrap_or_else(|| panic!("dcel: dangling node {n}"))
    }

    #[inline]
    pub(crate) fn twin_of(&self, h: HalfedgeId) -> HalfedgeId {
        self.he(h).twin()
    }
    #[inline]
    pub(crate) fn next_of(&self, h: HalfedgeId) -> HalfedgeId {
        self.he(h).next()
    }
    #[inline]
    pub(crate) fn prev_of(&self, h: HalfedgeId) -> HalfedgeId {
        self.he(h).prev()
    }
    #[inline]
    pub(crate) fn face_of(&self, h: HalfedgeId) -> Option<FaceId> {
        self.he(h).face()
    }
    #[inline]
    pub(crate) fn origin_of(&self, h: HalfedgeId) -> NodeId {
        self.he(h)
            .from()
            .unwrap_or_else(|| panic!("dcel: halfedge {h} is not attached to a node"))
    }

    /// `a.next = b`, `b.prev = a`.
    #[inline]
    pub(crate) fn link(&mut self, a: HalfedgeId, b: HalfedgeId) {
        self.he_mut(a).set_next(b);
        self.he_mut(b).set_prev(a);
    }
}
