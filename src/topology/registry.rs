//! Identifier registry: issues and reclaims per-kind entity ids.
//!
//! Ids below the monotonic counter `next` are either live or parked in a pool
//! of recycled ids. The pool is stored as disjoint half-open ranges so that
//! claiming a far-away id (e.g. `add_node(1_000_000)` on an empty graph) does
//! not materialize every skipped id.

use std::collections::BTreeMap;

use crate::topology::handle::{EdgeId, FaceId, NodeId};

/// Handle types that a [`IdRegistry`] can issue.
pub trait RegistryId: Copy + std::fmt::Debug {
    /// Human-readable entity kind, used in capacity panics.
    const KIND: &'static str;
    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

macro_rules! registry_id {
    ($name:ident, $kind:literal) => {
        impl RegistryId for $name {
            const KIND: &'static str = $kind;
            #[inline]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }
            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

registry_id!(NodeId, "node");
registry_id!(EdgeId, "edge");
registry_id!(FaceId, "face");

/// Per-kind id allocator with a recycled-id pool.
#[derive(Clone, Debug)]
pub struct IdRegistry<K> {
    /// Every id `>= next` is unused.
    next: u32,
    /// Recycled ids below `next`, as `start -> end` (exclusive) ranges.
    free: BTreeMap<u32, u32>,
    /// Number of ids currently issued.
    live: usize,
    /// Ids must stay strictly below this bound.
    limit: u32,
    _kind: std::marker::PhantomData<K>,
}

impl<K: RegistryId> Default for IdRegistry<K> {
    fn default() -> Self {
        Self::with_limit(u32::MAX)
    }
}

impl<K: RegistryId> IdRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose ids stay below `limit`.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            next: 0,
            free: BTreeMap::new(),
            live: 0,
            limit,
            _kind: std::marker::PhantomData,
        }
    }

    /// Number of ids currently issued.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Returns the smallest unused id, preferring recycled ids over extending
    /// the counter.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted. A graph of that size cannot be
    /// held in memory, so this is not a recoverable condition.
    pub fn new_id(&mut self) -> K {
        if let Some((start, end)) = self.free.pop_first() {
            if start + 1 < end {
                self.free.insert(start + 1, end);
            }
            self.live += 1;
            return K::from_raw(start);
        }
        if self.next >= self.limit {
            panic!("dcel: graph too large, no free {} ID", K::KIND);
        }
        let id = self.next;
        self.next += 1;
        self.live += 1;
        K::from_raw(id)
    }

    /// The id [`new_id`](Self::new_id) would return, without issuing it.
    pub fn peek(&self) -> K {
        if let Some((&start, _)) = self.free.first_key_value() {
            return K::from_raw(start);
        }
        if self.next >= self.limit {
            panic!("dcel: graph too large, no free {} ID", K::KIND);
        }
        K::from_raw(self.next)
    }

    /// Whether `id` is currently issued.
    pub fn is_issued(&self, id: K) -> bool {
        let raw = id.raw();
        raw < self.next && self.free_range_containing(raw).is_none()
    }

    /// Registers a caller-chosen id. Returns `false` (and changes nothing) if
    /// the id is already issued.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the id space.
    pub fn claim(&mut self, id: K) -> bool {
        let raw = id.raw();
        if raw >= self.limit {
            panic!("dcel: {} ID {} exceeds the id space", K::KIND, raw);
        }
        if raw >= self.next {
            if raw > self.next {
                self.free.insert(self.next, raw);
            }
            self.next = raw + 1;
            self.live += 1;
            return true;
        }
        let Some((start, end)) = self.free_range_containing(raw) else {
            return false;
        };
        self.free.remove(&start);
        if start < raw {
            self.free.insert(start, raw);
        }
        if raw + 1 < end {
            self.free.insert(raw + 1, end);
        }
        self.live += 1;
        true
    }

    /// Returns `id` to the pool. If it was the highest issued id the counter
    /// shrinks instead, swallowing any recycled range that ends at it.
    /// Releasing an id that is not issued is a no-op.
    pub fn release(&mut self, id: K) {
        let raw = id.raw();
        if !self.is_issued(id) {
            return;
        }
        self.live -= 1;

        let pred = self
            .free
            .range(..raw)
            .next_back()
            .map(|(&s, &e)| (s, e))
            .filter(|&(_, e)| e == raw);

        if raw + 1 == self.next {
            self.next = raw;
            if let Some((s, _)) = pred {
                self.free.remove(&s);
                self.next = s;
            }
            return;
        }

        let mut start = raw;
        let mut end = raw + 1;
        if let Some((s, _)) = pred {
            self.free.remove(&s);
            start = s;
        }
        if let Some(succ_end) = self.free.remove(&(raw + 1)) {
            end = succ_end;
        }
        self.free.insert(start, end);
    }

    fn free_range_containing(&self, raw: u32) -> Option<(u32, u32)> {
        self.free
            .range(..=raw)
            .next_back()
            .map(|(&s, &e)| (s, e))
            .filter(|&(_, e)| raw < e)
    }
}
