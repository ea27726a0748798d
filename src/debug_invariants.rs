//! Invariant checking shared by the graph and its tests.
//!
//! [`Graph`](crate::topology::Graph) implements [`DebugInvariants`] on top of
//! [`validate_graph`](crate::topology::validation::validate_graph) with every
//! check enabled; public mutations re-run it in debug builds.

use crate::dcel_error::DcelError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), DcelError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
