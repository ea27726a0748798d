/// Re-validates a graph after a public mutation. Fires in debug builds and
/// whenever `strict-invariants` or `check-invariants` is enabled; compiles to
/// a no-op otherwise.
#[cfg(any(
    debug_assertions,
    feature = "strict-invariants",
    feature = "check-invariants"
))]
macro_rules! debug_invariants {
    ($s:expr) => {
        $crate::debug_invariants::DebugInvariants::debug_assert_invariants(&*$s)
    };
}

#[cfg(not(any(
    debug_assertions,
    feature = "strict-invariants",
    feature = "check-invariants"
)))]
macro_rules! debug_invariants {
    ($s:expr) => {
        ()
    };
}

pub(crate) use debug_invariants;
