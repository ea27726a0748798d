//! Structural validation of a [`Graph`].
//!
//! [`validate_graph`] re-derives every link invariant from scratch by walking
//! the entity maps, so it is O(size of the graph) and meant for tests, debug
//! builds and callers who mutate entities through the `_mut` accessors.

use crate::dcel_error::DcelError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::entity::{EdgeEntity, FaceEntity, HalfedgeEntity, Items, NodeEntity};
use crate::topology::graph::Graph;
use crate::topology::handle::{FaceId, HalfedgeId, NodeId};
use crate::topology::registry::{IdRegistry, RegistryId};

/// Toggles for the individual graph checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Twins are mutual, share their edge, and match the edge record.
    pub check_twins: bool,
    /// `next`/`prev` are mutual, chain head-to-tail and keep the face.
    pub check_links: bool,
    /// Every rotation closes over exactly the node's outgoing half-edges.
    pub check_rotations: bool,
    /// Every face loop closes and only visits half-edges of that face.
    pub check_face_loops: bool,
    /// Id registries agree with the live entities.
    pub check_registries: bool,
    /// What to do with a detected violation.
    pub on_violation: ViolationHandling,
}

impl ValidationOptions {
    /// Enable all graph checks, failing on the first violation.
    pub fn all() -> Self {
        Self {
            check_twins: true,
            check_links: true,
            check_rotations: true,
            check_face_loops: true,
            check_registries: true,
            on_violation: ViolationHandling::Error,
        }
    }
}

/// Behavior for a detected violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViolationHandling {
    /// Skip reporting.
    Ignore,
    /// Log a warning and keep checking.
    Warn,
    /// Return the violation as an error.
    #[default]
    Error,
}

impl ViolationHandling {
    fn report(self, err: DcelError) -> Result<(), DcelError> {
        match self {
            ViolationHandling::Ignore => Ok(()),
            ViolationHandling::Warn => {
                log::warn!("dcel: {err}");
                Ok(())
            }
            ViolationHandling::Error => Err(err),
        }
    }
}

/// Validate `graph` against the enabled checks.
///
/// Dangling references (a link to an entity that is not live) are always
/// reported, since the remaining checks cannot walk past them.
pub fn validate_graph<I: Items>(
    graph: &Graph<I>,
    options: ValidationOptions,
) -> Result<(), DcelError> {
    let handling = options.on_violation;

    for (&h, he) in &graph.halfedges {
        for link in [he.twin(), he.next(), he.prev()] {
            if !graph.halfedges.contains_key(&link) {
                handling.report(DcelError::DanglingReference(format!(
                    "halfedge {h} links to missing halfedge {link}"
                )))?;
                return Ok(());
            }
        }
        match he.from() {
            Some(n) if graph.nodes.contains_key(&n) => {}
            Some(n) => {
                handling.report(DcelError::DanglingReference(format!(
                    "halfedge {h} leaves missing node {n}"
                )))?;
                return Ok(());
            }
            None => {
                handling.report(DcelError::DanglingReference(format!(
                    "halfedge {h} is not attached to a node"
                )))?;
                return Ok(());
            }
        }
        if let Some(f) = he.face() {
            if !graph.faces.contains_key(&f) {
                handling.report(DcelError::DanglingReference(format!(
                    "halfedge {h} bounds missing face {f}"
                )))?;
            }
        }
    }
    for (&n, node) in &graph.nodes {
        if let Some(h) = node.halfedge() {
            if graph.halfedges.get(&h).and_then(|he| he.from()) != Some(n) {
                handling.report(DcelError::DanglingReference(format!(
                    "node {n} references halfedge {h} that does not leave it"
                )))?;
                return Ok(());
            }
        }
    }

    if options.check_twins {
        check_twins(graph, handling)?;
    }
    if options.check_links {
        check_links(graph, handling)?;
    }
    if options.check_rotations {
        check_rotations(graph, handling)?;
    }
    if options.check_face_loops {
        check_face_loops(graph, handling)?;
    }
    if options.check_registries {
        check_registry(&graph.node_ids, graph.nodes.keys().copied(), handling)?;
        check_registry(&graph.edge_ids, graph.edges.keys().copied(), handling)?;
        check_registry(&graph.face_ids, graph.faces.keys().copied(), handling)?;
    }
    Ok(())
}

fn check_twins<I: Items>(graph: &Graph<I>, handling: ViolationHandling) -> Result<(), DcelError> {
    if graph.halfedges.len() != 2 * graph.edges.len() {
        handling.report(DcelError::HalfedgeCountMismatch {
            halfedges: graph.halfedges.len(),
            edges: graph.edges.len(),
        })?;
    }
    for (&h, he) in &graph.halfedges {
        let twin = he.twin();
        let back = graph.halfedges[&twin].twin();
        if back != h || twin != h.twin() || graph.halfedges[&twin].edge() != he.edge() {
            handling.report(DcelError::TwinMismatch { halfedge: h })?;
        }
        if he.edge() != h.edge() {
            handling.report(DcelError::TwinMismatch { halfedge: h })?;
        }
    }
    for (&e, edge) in &graph.edges {
        let (h1, h2) = edge.halfedges();
        if h1.edge() != e || h2 != h1.twin() {
            handling.report(DcelError::TwinMismatch { halfedge: h1 })?;
            continue;
        }
        for h in [h1, h2] {
            if !graph.halfedges.contains_key(&h) {
                handling.report(DcelError::DanglingReference(format!(
                    "edge {e} references missing halfedge {h}"
                )))?;
            }
        }
    }
    Ok(())
}

fn check_links<I: Items>(graph: &Graph<I>, handling: ViolationHandling) -> Result<(), DcelError> {
    for (&h, he) in &graph.halfedges {
        let next = &graph.halfedges[&he.next()];
        let prev = &graph.halfedges[&he.prev()];
        if next.prev() != h || prev.next() != h {
            handling.report(DcelError::LinkMismatch { halfedge: h })?;
            continue;
        }
        // next(h) starts where h ends, on the same side of the same face.
        let dest = graph.halfedges[&he.twin()].from();
        if next.from() != dest || next.face() != he.face() {
            handling.report(DcelError::LinkMismatch { halfedge: h })?;
        }
    }
    Ok(())
}

fn check_rotations<I: Items>(graph: &Graph<I>, handling: ViolationHandling) -> Result<(), DcelError> {
    let mut degree: hashbrown::HashMap<NodeId, usize> = hashbrown::HashMap::new();
    for he in graph.halfedges.values() {
        if let Some(n) = he.from() {
            *degree.entry(n).or_insert(0) += 1;
        }
    }

    for (&n, node) in &graph.nodes {
        let expected = degree.get(&n).copied().unwrap_or(0);
        let Some(start) = node.halfedge() else {
            if expected != 0 {
                handling.report(DcelError::RotationBroken { node: n, expected, found: 0 })?;
            }
            continue;
        };

        let mut found = 0usize;
        let mut h = start;
        loop {
            if graph.halfedges[&h].from() != Some(n) {
                break;
            }
            found += 1;
            let twin = graph.halfedges[&h].twin();
            h = graph.halfedges[&twin].next();
            if h == start || found > expected {
                break;
            }
        }
        if h != start || found != expected {
            handling.report(DcelError::RotationBroken { node: n, expected, found })?;
        }
    }
    Ok(())
}

fn check_face_loops<I: Items>(graph: &Graph<I>, handling: ViolationHandling) -> Result<(), DcelError> {
    let mut sides: hashbrown::HashMap<FaceId, usize> = hashbrown::HashMap::new();
    for he in graph.halfedges.values() {
        if let Some(f) = he.face() {
            *sides.entry(f).or_insert(0) += 1;
        }
    }

    for (&f, face) in &graph.faces {
        let expected = sides.get(&f).copied().unwrap_or(0);
        let Some(start) = face.halfedge() else {
            handling.report(DcelError::DanglingReference(format!("face {f} has no boundary")))?;
            continue;
        };
        let Some(first) = graph.halfedges.get(&start) else {
            handling.report(DcelError::DanglingReference(format!(
                "face {f} references missing halfedge {start}"
            )))?;
            continue;
        };
        if first.face() != Some(f) {
            handling.report(DcelError::FaceLoopBroken { face: f, halfedge: start })?;
            continue;
        }

        let mut walked = 0usize;
        let mut h: HalfedgeId = start;
        let broken = loop {
            let he = &graph.halfedges[&h];
            if he.face() != Some(f) {
                break Some(h);
            }
            walked += 1;
            h = he.next();
            if h == start {
                break None;
            }
            if walked > expected {
                break Some(h);
            }
        };
        match broken {
            Some(at) => handling.report(DcelError::FaceLoopBroken { face: f, halfedge: at })?,
            None if walked != expected || walked < 3 => {
                handling.report(DcelError::FaceLoopBroken { face: f, halfedge: start })?
            }
            None => {}
        }
    }
    Ok(())
}

fn check_registry<K>(
    registry: &IdRegistry<K>,
    live: impl ExactSizeIterator<Item = K>,
    handling: ViolationHandling,
) -> Result<(), DcelError>
where
    K: RegistryId,
{
    if registry.live() != live.len() {
        handling.report(DcelError::RegistryMismatch {
            kind: K::KIND,
            issued: registry.live(),
            live: live.len(),
        })?;
    }
    for id in live {
        if !registry.is_issued(id) {
            handling.report(DcelError::UnissuedId {
                kind: K::KIND,
                id: id.raw(),
            })?;
        }
    }
    Ok(())
}

impl<I: Items> DebugInvariants for Graph<I> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Graph invalid");
    }

    fn validate_invariants(&self) -> Result<(), DcelError> {
        validate_graph(self, ValidationOptions::all())
    }
}
