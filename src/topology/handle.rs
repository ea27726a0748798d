//! Strong, zero-cost handles for DCEL entities
//!
//! Every node, edge and face is addressed by a small non-negative integer that
//! is unique within its kind while the entity is live and is recycled after
//! removal. Half-edges are addressed through their owning edge: edge `e` owns
//! the half-edges `2e` and `2e + 1`, so a half-edge handle never outlives the
//! edge id it was derived from.
//!
//! All handles are `repr(transparent)` over their raw integer, ordered and
//! hashable so they can key maps and sets, and serde-enabled so callers can
//! embed them in their own state.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident($raw:ty)) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(pub $raw);

        impl $name {
            /// Returns the raw integer behind this handle.
            #[inline]
            pub const fn get(self) -> $raw {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$raw> for $name {
            #[inline]
            fn from(raw: $raw) -> Self {
                $name(raw)
            }
        }
    };
}

handle!(
    /// Identifies a node.
    NodeId(u32)
);
handle!(
    /// Identifies an undirected edge.
    EdgeId(u32)
);
handle!(
    /// Identifies a face.
    FaceId(u32)
);
handle!(
    /// Identifies one oriented half of an edge.
    HalfedgeId(u64)
);

/// Which of the two halves of an edge a [`HalfedgeId`] denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The half leaving the edge's `from` node.
    Forward,
    /// The half leaving the edge's `to` node.
    Backward,
}

impl HalfedgeId {
    /// Placeholder for links that have not been wired yet. Never refers to a
    /// live half-edge.
    pub const UNLINKED: Self = HalfedgeId(u64::MAX);

    /// The half-edge of `edge` on the given side.
    #[inline]
    pub const fn of(edge: EdgeId, side: Side) -> Self {
        let base = (edge.0 as u64) << 1;
        match side {
            Side::Forward => HalfedgeId(base),
            Side::Backward => HalfedgeId(base | 1),
        }
    }

    /// The edge this half-edge belongs to.
    #[inline]
    pub const fn edge(self) -> EdgeId {
        EdgeId((self.0 >> 1) as u32)
    }

    /// Which half of its edge this is.
    #[inline]
    pub const fn side(self) -> Side {
        if self.0 & 1 == 0 {
            Side::Forward
        } else {
            Side::Backward
        }
    }

    /// The handle of the oppositely oriented half of the same edge.
    #[inline]
    pub const fn twin(self) -> Self {
        HalfedgeId(self.0 ^ 1)
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // repr(transparent) must keep handles as small as their raw integers.
    assert_eq_size!(NodeId, u32);
    assert_eq_size!(EdgeId, u32);
    assert_eq_size!(FaceId, u32);
    assert_eq_size!(HalfedgeId, u64);
}
