//! The trie node: a prefix table and a children table over one octet of
//! address space, plus the two path-compression terminal kinds (leaf and
//! fringe) that let a sparsely populated subtree avoid materializing a
//! chain of near-empty nodes.

use crate::af::AddressFamily;
use crate::array::Array256;
use crate::art;
use crate::bitset::Bitset256;
use crate::prefix::Prefix;
use std::sync::Arc;

/// A path-compressed terminal that carries its prefix explicitly.
///
/// Stored when a prefix ends before the node that would naturally hold it
/// — rather than walking
/// every remaining octet down to an almost-empty node, the descent stops
/// early and remembers the prefix it was carrying.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "AF: serde::Serialize + serde::de::DeserializeOwned, \
                   V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Leaf<AF: AddressFamily, V> {
    pub prefix: Prefix<AF>,
    pub value: V,
}

/// A path-compressed terminal whose prefix is *not* stored explicitly —
/// it's implied by the leaf's position in the tree: `bits = (depth+1)*8`,
/// octets = the walked path followed by the child's octet. Used exactly
/// when a prefix both ends one level below the deepest materialized node
/// and lands on a stride (octet) boundary — see [`is_fringe`].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Fringe<V> {
    pub value: V,
}

/// `true` if a prefix ending at `(depth, bits)` should be stored as a
/// fringe rather than a leaf: the prefix ends exactly one octet below
/// `depth` (`depth + 1 == last_octet_depth`) and lands on an octet
/// boundary there (`last_bits == 0`, i.e. the *next* octet is the
/// trailing, fully-significant one... equivalently this octet's remainder
/// is a whole number of trailing 8-bit groups).
///
/// Concretely: a fringe occurs when descent is one level short of the
/// depth the prefix "really" belongs at, and the remaining bits exactly
/// fill that next octet (so there's nothing left over to store
/// explicitly — the position alone pins down the prefix).
#[inline]
pub fn is_fringe(depth: u8, bits: u8) -> bool {
    bits > 0 && bits % 8 == 0 && bits / 8 == depth + 1
}

/// A child slot: either a deeper node, or one of the two compressed
/// terminal kinds.
///
/// The node case holds an [`Arc`] rather than a `Box`. That's what gives
/// the persistent (copy-on-write) table operations in
/// [`crate::table::Table`] their structural sharing for free: cloning a
/// `Table` bumps refcounts instead of copying the tree, and the first
/// write beneath a shared node clones only that node via
/// `Arc::make_mut`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "AF: serde::Serialize + serde::de::DeserializeOwned, \
                   V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub enum Child<AF: AddressFamily, V> {
    Node(Arc<Node<AF, V>>),
    Leaf(Leaf<AF, V>),
    Fringe(Fringe<V>),
}

impl<AF: AddressFamily, V: Clone> Clone for Child<AF, V> {
    fn clone(&self) -> Self {
        match self {
            Child::Node(n) => Child::Node(n.clone()),
            Child::Leaf(l) => Child::Leaf(l.clone()),
            Child::Fringe(f) => Child::Fringe(f.clone()),
        }
    }
}

impl<AF: AddressFamily, V: std::fmt::Debug> std::fmt::Debug for Child<AF, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Child::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Child::Leaf(l) => f.debug_tuple("Leaf").field(l).finish(),
            Child::Fringe(fr) => f.debug_tuple("Fringe").field(fr).finish(),
        }
    }
}

/// One level of the trie: a stride's worth of prefixes plus a stride's
/// worth of children, both popcount-compressed sparse arrays.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "AF: serde::Serialize + serde::de::DeserializeOwned, \
                   V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Node<AF: AddressFamily, V> {
    pub(crate) prefixes: Array256<V>,
    pub(crate) children: Array256<Child<AF, V>>,
}

/// Outcome of a node-level prefix insert, distinguishing a true insert
/// from an update so the trie can keep `size` accurate.
pub enum PrefixInsert<V> {
    New,
    Updated(V),
}

impl<AF: AddressFamily, V> Default for Node<AF, V> {
    fn default() -> Self {
        Node {
            prefixes: Array256::new(),
            children: Array256::new(),
        }
    }
}

impl<AF: AddressFamily, V> Node<AF, V> {
    pub fn new() -> Self {
        Node::default()
    }

    /// A root node that pre-reserves room for `capacity` prefixes and the
    /// same number of children, per [`crate::config::TableConfig`]. Only
    /// meaningful at the root — deeper nodes are always created empty.
    pub fn with_capacity(capacity: usize) -> Self {
        Node {
            prefixes: Array256::with_capacity(capacity),
            children: Array256::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.children.is_empty()
    }

    #[inline]
    pub fn prefixes_bitset(&self) -> &Bitset256 {
        self.prefixes.bitset()
    }

    #[inline]
    pub fn children_bitset(&self) -> &Bitset256 {
        self.children.bitset()
    }

    /// Insert a value at base index `idx`. Returns whether an existing
    /// entry was overwritten.
    pub fn insert_prefix(&mut self, idx: u16, value: V) -> PrefixInsert<V> {
        match self.prefixes.insert(idx, value) {
            Some(old) => PrefixInsert::Updated(old),
            None => PrefixInsert::New,
        }
    }

    pub fn delete_prefix(&mut self, idx: u16) -> Option<V> {
        self.prefixes.remove(idx)
    }

    pub fn get_prefix(&self, idx: u16) -> Option<&V> {
        self.prefixes.get(idx)
    }

    pub fn get_prefix_mut(&mut self, idx: u16) -> Option<&mut V> {
        self.prefixes.get_mut(idx)
    }

    /// Does any stored route in this node cover `idx` (itself or an
    /// ancestor)? A cheap existence check, without recovering which
    /// ancestor matched — used by `contains`/`overlaps_prefix` descent.
    pub fn covers_idx(&self, idx: u16) -> bool {
        self.prefixes_bitset().intersects(art::lookup_tbl(idx))
    }

    /// The longest-prefix match for `idx` within this node alone: the
    /// highest-numbered ancestor of `idx` (inclusive) present in the
    /// prefix table, i.e. the most specific locally-stored route that
    /// still covers `idx`.
    pub fn lpm(&self, idx: u16) -> Option<(u16, &V)> {
        let candidates = self.prefixes_bitset().intersection(art::lookup_tbl(idx));
        let top = candidates.last_set()?;
        self.prefixes.get(top).map(|v| (top, v))
    }

    pub fn insert_child(&mut self, octet: u8, child: Child<AF, V>) -> Option<Child<AF, V>> {
        self.children.insert(octet as u16, child)
    }

    pub fn delete_child(&mut self, octet: u8) -> Option<Child<AF, V>> {
        self.children.remove(octet as u16)
    }

    pub fn get_child(&self, octet: u8) -> Option<&Child<AF, V>> {
        self.children.get(octet as u16)
    }

    pub fn get_child_mut(&mut self, octet: u8) -> Option<&mut Child<AF, V>> {
        self.children.get_mut(octet as u16)
    }

    /// Ascending iteration of populated prefix indices.
    pub fn prefix_indices(&self) -> impl Iterator<Item = u16> + '_ {
        self.prefixes.keys()
    }

    /// Ascending iteration of populated child octets.
    pub fn child_octets(&self) -> impl Iterator<Item = u8> + '_ {
        self.children.keys().map(|k| k as u8)
    }

    pub fn prefixes_iter(&self) -> impl Iterator<Item = (u16, &V)> {
        self.prefixes.iter()
    }

    pub fn children_iter(&self) -> impl Iterator<Item = (u8, &Child<AF, V>)> {
        self.children.iter().map(|(k, v)| (k as u8, v))
    }
}

impl<AF: AddressFamily, V> Node<AF, V>
where
    AF: AddressFamily,
{
    /// Structural invariant check: both sparse
    /// containers are internally consistent, and there is no reachable
    /// empty node below this one.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_at(0)
    }

    /// Recursive worker for [`Self::check_invariants`], tracking how many
    /// strides deep the walk has gone.
    ///
    /// A real tree can never be deeper than `AF::MAX_DEPTH` strides — every
    /// `Child::Node` was reached by consuming one more octet than its
    /// parent, and there are only `MAX_DEPTH` octets in `AF` to consume.
    /// Seeing otherwise means the tree was built past the address family's
    /// width, which [`crate::error::TrieInvariantError::CapacityInvariantViolation`]
    /// exists to name; unlike the bool-returning checks above it, there is
    /// no sensible "invalid but inert" table to hand back here, so this
    /// aborts immediately via [`crate::error::fatal`].
    fn check_invariants_at(&self, depth: u8) -> bool {
        if depth >= AF::MAX_DEPTH {
            crate::error::fatal(crate::error::TrieInvariantError::CapacityInvariantViolation);
        }
        if !self.prefixes.invariant_holds() || !self.children.invariant_holds() {
            return false;
        }
        for (_, child) in self.children_iter() {
            if let Child::Node(n) = child {
                if n.is_empty() {
                    return false;
                }
                if !n.check_invariants_at(depth + 1) {
                    return false;
                }
            }
        }
        true
    }
}

impl<AF: AddressFamily, V: Clone> Node<AF, V> {
    /// Deep-clone this subtree, using `value_clone` to copy each stored
    /// value (`Clone::clone` for an owned deep copy, or a caller-supplied
    /// closure — e.g. wrapping in a fresh `Arc` vs. sharing one — for
    /// anything more specialized).
    pub fn deep_clone_with<F>(&self, value_clone: &F) -> Node<AF, V>
    where
        F: Fn(&V) -> V,
    {
        let mut out = Node::default();
        for (idx, v) in self.prefixes_iter() {
            out.prefixes.insert(idx, value_clone(v));
        }
        for (octet, child) in self.children_iter() {
            let cloned = match child {
                Child::Node(n) => Child::Node(Arc::new(n.deep_clone_with(value_clone))),
                Child::Leaf(l) => Child::Leaf(Leaf {
                    prefix: l.prefix,
                    value: value_clone(&l.value),
                }),
                Child::Fringe(fr) => Child::Fringe(Fringe {
                    value: value_clone(&fr.value),
                }),
            };
            out.children.insert(octet as u16, cloned);
        }
        out
    }
}

impl<AF: AddressFamily, V: PartialEq> Node<AF, V> {
    /// Structural equality: identical bitsets, identical values,
    /// pointwise-equal children.
    pub fn structurally_equal(&self, other: &Node<AF, V>) -> bool {
        if self.prefixes_bitset() != other.prefixes_bitset() {
            return false;
        }
        if self.children_bitset() != other.children_bitset() {
            return false;
        }
        for (idx, v) in self.prefixes_iter() {
            match other.get_prefix(idx) {
                Some(ov) if ov == v => {}
                _ => return false,
            }
        }
        for (octet, child) in self.children_iter() {
            let Some(other_child) = other.get_child(octet) else {
                return false;
            };
            let eq = match (child, other_child) {
                (Child::Node(a), Child::Node(b)) => a.structurally_equal(b),
                (Child::Leaf(a), Child::Leaf(b)) => {
                    a.prefix == b.prefix && a.value == b.value
                }
                (Child::Fringe(a), Child::Fringe(b)) => a.value == b.value,
                _ => false,
            };
            if !eq {
                return false;
            }
        }
        true
    }
}
