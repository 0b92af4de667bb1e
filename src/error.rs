//! Error taxonomy.
//!
//! Only the two fatal, programmer-error kinds get a real error type:
//! `MisuseInvariantViolation` and `CapacityInvariantViolation`. Everything
//! else in the crate's public contract — invalid input, not-found queries —
//! is conveyed through `Option`/`bool` return values and never allocates an
//! error value; those are "retry me" conditions, not "the store is
//! corrupted" conditions.

use std::fmt;

/// A fatal contract breach: a bug in this crate, not a caller mistake.
///
/// These are never returned from the public API in ordinary operation —
/// they exist so that [`Node::check_invariants`](crate::node::Node::check_invariants)
/// and the handful of internal `debug_assert!`-guarded paths have a typed
/// value to report if they ever fire. A caller that gets one back should
/// treat the table as corrupted and stop using it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrieInvariantError {
    /// A child slot held something other than `{Node, Leaf, Fringe}`, or a
    /// bitset/array length mismatch was observed.
    MisuseInvariantViolation,
    /// Descent exceeded the address family's maximum depth (16 octets for
    /// IPv6, 4 for IPv4).
    CapacityInvariantViolation,
}

impl fmt::Display for TrieInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieInvariantError::MisuseInvariantViolation => write!(
                f,
                "trie invariant violation: a sparse-array/bitset mismatch \
                 or an unreachable child-slot state was observed; the \
                 table must be considered corrupted"
            ),
            TrieInvariantError::CapacityInvariantViolation => write!(
                f,
                "trie invariant violation: descent exceeded the address \
                 family's maximum depth"
            ),
        }
    }
}

impl std::error::Error for TrieInvariantError {}

/// Abort the process on a fatal invariant violation: this is a bug, never
/// a recoverable condition, so there is no `Result` to propagate.
#[cold]
#[inline(never)]
pub(crate) fn fatal(err: TrieInvariantError) -> ! {
    panic!("{err}");
}
