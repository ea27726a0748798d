//! Half-edge surgery: splicing twin pairs into and out of node rotations and
//! re-threading face loops.
//!
//! All three primitives rewrite `next`/`prev` links in place. Each leaves the
//! rotations and loops consistent on return, whether it succeeds or refuses.
//! `attach` and `reconnect` refuse (with a [`DcelError`]) before touching any
//! link, so a refusal never needs undoing.

use crate::dcel_error::DcelError;
use crate::topology::entity::{HalfedgeEntity, Items, NodeEntity};
use crate::topology::graph::Graph;
use crate::topology::handle::{HalfedgeId, NodeId};
use crate::topology::traversal::Rotation;

impl<I: Items> Graph<I> {
    /// Inserts `h` (already twin-linked) as an outgoing half-edge of `u`.
    ///
    /// An isolated `u` gets `h` as its only rotation entry. Otherwise `h` is
    /// spliced in right before the first free outgoing half-edge found by
    /// walking the rotation from `u`'s reference half-edge.
    pub(crate) fn attach(&mut self, h: HalfedgeId, u: NodeId) -> Result<(), DcelError> {
        let twin = self.twin_of(h);

        let Some(start) = self.node_entity(u).halfedge() else {
            self.he_mut(h).set_from(Some(u));
            self.node_entity_mut(u).set_halfedge(Some(h));
            self.link(twin, h);
            log::trace!("dcel: attached {h} as the only halfedge of node {u}");
            return Ok(());
        };

        let out = Rotation::new(self, Some(start))
            .find(|&o| self.face_of(o).is_none())
            .ok_or(DcelError::NoFreeHalfedge { node: u })?;

        self.he_mut(h).set_from(Some(u));
        let inn = self.prev_of(out);
        self.link(inn, h);
        self.link(twin, out);
        log::trace!("dcel: attached {h} to node {u} before {out}");
        Ok(())
    }

    /// Removes `h` from its origin's rotation and collapses the twin pair
    /// onto itself on this side.
    ///
    /// # Panics
    ///
    /// Panics if `h` still has a face (callers must release faces first) or
    /// if the node's replacement reference half-edge is not free.
    pub(crate) fn detach(&mut self, h: HalfedgeId) {
        if self.face_of(h).is_some() {
            panic!("dcel: face not removed before detaching halfedge {h}");
        }
        let twin = self.twin_of(h);
        let out = self.next_of(twin);
        let inn = self.prev_of(h);
        let from = self.origin_of(h);

        if self.node_entity(from).halfedge() == Some(h) {
            if out == h {
                self.node_entity_mut(from).set_halfedge(None);
            } else {
                if self.face_of(out).is_some() {
                    panic!("dcel: outgoing halfedge {out} of node {from} is not free");
                }
                self.node_entity_mut(from).set_halfedge(Some(out));
            }
        }
        self.link(inn, out);

        self.he_mut(h).set_from(None);
        self.link(twin, h);
        log::trace!("dcel: detached {h} from node {from}");
    }

    /// Makes `out` follow `inn` around the face they are about to bound.
    /// `inn` must end where `out` starts.
    ///
    /// The incoming half-edges at the shared node between `twin(out)` and
    /// `inn` are searched for a free one, `b`; the gap `inn..out` currently
    /// occupies in the rotation is handed over to `b`.
    pub(crate) fn reconnect(&mut self, inn: HalfedgeId, out: HalfedgeId) -> Result<(), DcelError> {
        if self.next_of(inn) == out {
            if self.prev_of(out) != inn {
                panic!(
                    "dcel: halfedges around node {} are inconsistently connected",
                    self.origin_of(out)
                );
            }
            return Ok(());
        }

        let mut b = None;
        let mut iter = self.twin_of(out);
        let mut steps = 0usize;
        loop {
            if self.face_of(iter).is_none() {
                b = Some(iter);
                break;
            }
            iter = self.twin_of(self.next_of(iter));
            if iter == inn {
                break;
            }
            steps += 1;
            if steps > self.halfedges.len() {
                panic!(
                    "dcel: rotation around node {} does not close",
                    self.origin_of(out)
                );
            }
        }
        let Some(b) = b else {
            return Err(DcelError::ReconnectFailed {
                node: self.origin_of(out),
            });
        };

        let in_next = self.next_of(inn);
        let out_prev = self.prev_of(out);
        let b_next = self.next_of(b);

        self.link(inn, out);
        self.link(b, in_next);
        self.link(out_prev, b_next);
        log::trace!("dcel: reconnected {inn} -> {out} via {b}");
        Ok(())
    }
}
