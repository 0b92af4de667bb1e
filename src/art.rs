//! ART index arithmetic for one 8-bit stride.
//!
//! One level of the trie consumes exactly one octet. Within that level,
//! every prefix of length `0..=7` bits over the octet is given a unique
//! "base index" in `[1, 255]` by laying the prefixes of a stride out as a
//! complete binary tree (the classic ART/`bart` trick): index `1` is the
//! `/0` default route for the octet, and index `i` has children `2i` and
//! `2i+1`. A full 8-bit octet match (`bits == 8`, i.e. a host route) does
//! not fit in that tree — it gets its own index space, `[256, 511]`,
//! mapping octet `o` directly to `256 + o`.
//!
//! That single numbering is what makes longest-prefix-match inside a node
//! O(1): the ancestors of any index `q` (its covering, shorter-prefix
//! routes) are exactly the values visited by repeatedly right-shifting `q`
//! by one bit until it reaches zero. A node's prefix membership bitset
//! intersected with the precomputed set of `q`'s ancestors, keeping the
//! highest bit, *is* the longest match.

use crate::bitset::Bitset256;
use crate::error::{fatal, TrieInvariantError};
use std::sync::LazyLock;

/// Host-route indices start here; `[1, 255]` is the non-host prefix index
/// space described above.
pub const HOST_IDX_BASE: u16 = 256;

/// Map `(octet, bits)` to its base index.
///
/// `bits` must be in `0..=8`. For `bits == 8` this returns a host-route
/// index in `[256, 511]`; for `bits < 8` a prefix index in `[1, 255]`.
#[inline]
pub fn pfx_to_idx(octet: u8, bits: u8) -> u16 {
    debug_assert!(bits <= 8);
    if bits == 8 {
        return HOST_IDX_BASE + octet as u16;
    }
    (1u16 << bits) + (octet as u16 >> (8 - bits))
}

/// Map an octet to its host-route index (equivalent to `pfx_to_idx(octet,
/// 8)`, kept as a separate name because it's the hot path for `contains`
/// and `lookup`).
#[inline]
pub fn octet_to_idx(octet: u8) -> u16 {
    HOST_IDX_BASE + octet as u16
}

/// Inverse of [`pfx_to_idx`]: recover `(octet, bits)` from a base index.
///
/// Aborts the process via [`crate::error::fatal`] if `idx == 0`, which is
/// never a valid base index — every caller reaches this function only with
/// indices it itself populated via `pfx_to_idx`/`octet_to_idx`, so seeing a
/// zero here means the node's own bitset/array invariant has already broken.
#[inline]
pub fn idx_to_pfx(idx: u16) -> (u8, u8) {
    if idx >= HOST_IDX_BASE {
        return ((idx - HOST_IDX_BASE) as u8, 8);
    }
    if idx == 0 {
        fatal(TrieInvariantError::MisuseInvariantViolation);
    }
    let bits = 15 - (idx.leading_zeros() as u8);
    let octet = ((idx as u32) << (8 - bits)) as u8;
    (octet, bits)
}

/// Walk the ancestor chain of `q` (inclusive of `q` itself when `q` is a
/// non-host index), from most to least specific, ending at `1`.
///
/// This is the one recurrence the whole ART scheme rests on: a host index
/// `256+o` first steps to its containing `/7` prefix index (`(256+o)>>1`),
/// after which both index families share the exact same "keep halving"
/// walk up to the stride's default route at index `1`.
fn ancestor_chain(mut q: u16) -> impl Iterator<Item = u16> {
    if q >= HOST_IDX_BASE {
        q >>= 1;
    }
    std::iter::successors(Some(q).filter(|&q| q >= 1), |&q| {
        if q > 1 {
            Some(q >> 1)
        } else {
            None
        }
    })
}

const LOOKUP_TBL_LEN: usize = 512;

/// `LOOKUP_TBL[q]` is the set of prefix indices (`[1, 255]`) that are
/// ancestors of `q` — intersect this with a node's prefix bitset and take
/// the highest set bit to get the longest match for `q` within that node,
/// in one bitwise AND.
static LOOKUP_TBL: LazyLock<Vec<Bitset256>> = LazyLock::new(|| {
    let mut tbl = vec![Bitset256::new(); LOOKUP_TBL_LEN];
    for q in 1..LOOKUP_TBL_LEN as u16 {
        let set = &mut tbl[q as usize];
        for a in ancestor_chain(q) {
            set.set(a);
        }
    }
    tbl
});

/// The ancestor bitset for `idx` (see [`LOOKUP_TBL`]).
#[inline]
pub fn lookup_tbl(idx: u16) -> &'static Bitset256 {
    &LOOKUP_TBL[idx as usize]
}

/// The set of indices "covered by" a base index: every prefix index and
/// every host-route index that is more specific than (a descendant of) a
/// given index, split into the two index families since they're tested
/// against two different bitsets (a node's prefix bitset and its children
/// bitset respectively).
#[derive(Clone, Copy, Debug, Default)]
pub struct Allotment {
    /// Descendant prefix indices, `[1, 255]`.
    pub prefixes: Bitset256,
    /// Descendant host-route indices, stored with the `256` bias removed
    /// so they line up with a children table's `[0, 255]` octet keys.
    pub hosts: Bitset256,
}

/// The allotment of a non-host prefix index `q` (`[1, 255]`).
static ALLOT_TBL: LazyLock<Vec<Allotment>> = LazyLock::new(|| {
    let mut tbl = vec![Allotment::default(); HOST_IDX_BASE as usize];
    for d in 1..HOST_IDX_BASE {
        for a in ancestor_chain(d) {
            tbl[a as usize].prefixes.set(d);
        }
    }
    for o in 0u16..256 {
        // A host route `o` descends from prefix index `q` iff `q` is one
        // of the ancestors visited on the way from `256+o` down to `1`.
        for a in ancestor_chain(HOST_IDX_BASE + o) {
            tbl[a as usize].hosts.set(o);
        }
    }
    tbl
});

/// The allotment (covered descendants) of base index `idx`.
///
/// For a host-route index the allotment is trivial — a host route is
/// already maximally specific for this stride, so it covers nothing but
/// itself, and it has no descendant children (there is no finer-grained
/// octet below a full octet match).
pub fn allotment(idx: u16) -> Allotment {
    if idx >= HOST_IDX_BASE {
        let mut a = Allotment::default();
        a.hosts.set(idx - HOST_IDX_BASE);
        return a;
    }
    ALLOT_TBL[idx as usize]
}
