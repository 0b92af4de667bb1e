//! The table façade: the public, two-family entry point that owns
//! `root4`/`root6` and drives both sides of [`crate::trie`] with the same
//! generic engine code.
//!
//! [`Table<V>`] is the value-carrying flavour. The prefix-only flavour is
//! [`PrefixSet`], a thin alias over `Table<()>` — there is no separate code
//! path, just the metadata type parameterized down to a unit payload.

use crate::config::TableConfig;
use crate::dump::DumpListNode;
use crate::node::Node;
use crate::prefix::Prefix;
use crate::trie;
use log::trace;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// An in-memory routing table keyed by IPv4 and IPv6 CIDR prefixes.
///
/// Holds one trie root per address family (`root4`, `root6`) plus their
/// independent sizes. Every mutating method canonicalizes its
/// input prefix and silently no-ops on an invalid one; every query method returns `None`/`false` rather than
/// erroring on a miss.
///
/// Child slots share subtrees via `Arc` (see [`crate::node::Child`]), so
/// `Table` itself derives a cheap, shallow [`Clone`] — cloning bumps
/// refcounts rather than copying the tree, and the first write beneath a
/// shared node clones only that node (`Arc::make_mut`). That single
/// mechanism is what the `*_persist` methods below are built on.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Table<V> {
    root4: Node<Ipv4Addr, V>,
    root6: Node<Ipv6Addr, V>,
    size4: usize,
    size6: usize,
}

/// The prefix-only variant: a [`Table`] whose value is `()`.
///
/// Every `Table<()>` method is available unchanged; `PrefixSet` exists
/// only so call sites that never care about a value don't have to spell
/// out `Table<()>` themselves.
pub type PrefixSet = Table<()>;

impl<V> Default for Table<V> {
    fn default() -> Self {
        Table {
            root4: Node::new(),
            root6: Node::new(),
            size4: 0,
            size6: 0,
        }
    }
}

impl<V> Table<V> {
    /// An empty table with no pre-reserved capacity.
    pub fn new() -> Self {
        Table::default()
    }

    /// An empty table that pre-reserves root storage per `config`.
    pub fn with_config(config: TableConfig) -> Self {
        Table {
            root4: Node::with_capacity(config.v4_capacity_hint),
            root6: Node::with_capacity(config.v6_capacity_hint),
            size4: 0,
            size6: 0,
        }
    }

    /// Number of distinct canonical prefixes stored, both families.
    pub fn size(&self) -> usize {
        self.size4 + self.size6
    }

    pub fn size4(&self) -> usize {
        self.size4
    }

    pub fn size6(&self) -> usize {
        self.size6
    }

    /// Structural non-degeneracy check: both
    /// bitset/array pairs are in lockstep and no reachable internal node
    /// is empty, on both roots. Never consulted on a hot path — for
    /// debug assertions and tests only.
    pub fn check_invariants(&self) -> bool {
        self.root4.check_invariants() && self.root6.check_invariants()
    }
}

// --------------------------------------------------------------- insert

impl<V: Clone> Table<V> {
    /// Insert or update `pfx` with `value`. Returns whether an entry for
    /// this exact canonical prefix already existed. A no-op (and
    /// returns `false`) if `pfx`'s length exceeds its family's width.
    pub fn insert(&mut self, pfx: &inetnum::addr::Prefix, value: V) -> bool {
        match pfx.addr() {
            IpAddr::V4(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => {
                    let existed = trie::install(&mut self.root4, p, value, 0);
                    if !existed {
                        self.size4 += 1;
                    }
                    existed
                }
                None => false,
            },
            IpAddr::V6(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => {
                    let existed = trie::install(&mut self.root6, p, value, 0);
                    if !existed {
                        self.size6 += 1;
                    }
                    existed
                }
                None => false,
            },
        }
    }

    /// Copy-on-write sibling of [`Table::insert`]: returns a new table
    /// with `pfx` inserted/updated and whether it already existed,
    /// leaving `self` untouched.
    pub fn insert_persist(&self, pfx: &inetnum::addr::Prefix, value: V) -> (Table<V>, bool) {
        let mut next = self.clone();
        let existed = next.insert(pfx, value);
        (next, existed)
    }

    /// `InsertPersist` without the existed flag — an upsert that only
    /// cares about the resulting table.
    pub fn update_persist(&self, pfx: &inetnum::addr::Prefix, value: V) -> Table<V> {
        self.insert_persist(pfx, value).0
    }
}

// --------------------------------------------------------------- delete

impl<V: Clone> Table<V> {
    /// Remove `pfx`, purging/compressing the descent path. Returns
    /// the removed value, if any; a no-op returning `None` for an absent
    /// or invalid prefix.
    pub fn delete(&mut self, pfx: &inetnum::addr::Prefix) -> Option<V> {
        match pfx.addr() {
            IpAddr::V4(addr) => {
                let p = Prefix::new(addr, pfx.len())?;
                let removed = trie::delete(&mut self.root4, p, 0);
                if removed.is_some() {
                    self.size4 -= 1;
                }
                removed
            }
            IpAddr::V6(addr) => {
                let p = Prefix::new(addr, pfx.len())?;
                let removed = trie::delete(&mut self.root6, p, 0);
                if removed.is_some() {
                    self.size6 -= 1;
                }
                removed
            }
        }
    }

    /// Copy-on-write sibling of [`Table::delete`].
    pub fn delete_persist(&self, pfx: &inetnum::addr::Prefix) -> (Table<V>, Option<V>) {
        let mut next = self.clone();
        let removed = next.delete(pfx);
        (next, removed)
    }
}

// ----------------------------------------------------------------- get

impl<V> Table<V> {
    /// Exact match: the value stored for `pfx` itself, not a covering
    /// supernet.
    pub fn get(&self, pfx: &inetnum::addr::Prefix) -> Option<&V> {
        match pfx.addr() {
            IpAddr::V4(addr) => trie::get(&self.root4, Prefix::new(addr, pfx.len())?),
            IpAddr::V6(addr) => trie::get(&self.root6, Prefix::new(addr, pfx.len())?),
        }
    }

    /// Any stored prefix covering `addr`. No backtracking and no
    /// value lookup — use [`Table::lookup`] for the covering value.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(a) => trie::contains(&self.root4, a),
            IpAddr::V6(a) => trie::contains(&self.root6, a),
        }
    }

    /// Longest-prefix match by address: the value of the most
    /// specific stored prefix covering `addr`.
    pub fn lookup(&self, addr: IpAddr) -> Option<&V> {
        match addr {
            IpAddr::V4(a) => trie::lookup(&self.root4, a),
            IpAddr::V6(a) => trie::lookup(&self.root6, a),
        }
    }

    /// Longest-prefix match by prefix, `<= pfx`: the value only.
    pub fn lookup_prefix(&self, pfx: &inetnum::addr::Prefix) -> Option<&V> {
        self.lookup_prefix_lpm(pfx).map(|(_, v)| v)
    }

    /// As [`Table::lookup_prefix`], additionally returning the matched
    /// LPM prefix.
    pub fn lookup_prefix_lpm(
        &self,
        pfx: &inetnum::addr::Prefix,
    ) -> Option<(inetnum::addr::Prefix, &V)> {
        match pfx.addr() {
            IpAddr::V4(addr) => {
                let p = Prefix::new(addr, pfx.len())?;
                trie::lookup_prefix_lpm(&self.root4, p).map(|(m, v)| (m.to_public(), v))
            }
            IpAddr::V6(addr) => {
                let p = Prefix::new(addr, pfx.len())?;
                trie::lookup_prefix_lpm(&self.root6, p).map(|(m, v)| (m.to_public(), v))
            }
        }
    }
}

// -------------------------------------------------------------- modify

impl<V: Default + Clone> Table<V> {
    /// Combined upsert/delete: `f` is invoked exactly once with
    /// `(current_value_or_default, exists)` and returns `(new_value,
    /// delete_flag)`. The table then performs exactly one of no-op,
    /// delete, insert, or update, depending on `exists` and `delete_flag`.
    /// A no-op (the callback is still invoked) for an invalid prefix.
    pub fn modify<F>(&mut self, pfx: &inetnum::addr::Prefix, f: F)
    where
        F: FnOnce(V, bool) -> (V, bool),
    {
        let current = self.get(pfx).cloned();
        let exists = current.is_some();
        let (new_value, del) = f(current.unwrap_or_default(), exists);
        match (exists, del) {
            (false, true) => {}
            (true, true) => {
                self.delete(pfx);
            }
            (false, false) => {
                self.insert(pfx, new_value);
            }
            (true, false) => {
                self.insert(pfx, new_value);
            }
        }
    }

    /// Copy-on-write sibling of [`Table::modify`].
    pub fn modify_persist<F>(&self, pfx: &inetnum::addr::Prefix, f: F) -> Table<V>
    where
        F: FnOnce(V, bool) -> (V, bool),
    {
        let mut next = self.clone();
        next.modify(pfx, f);
        next
    }
}

// -------------------------------------------------------------- overlaps

impl<V> Table<V> {
    /// `true` if any stored prefix overlaps `pfx`.
    pub fn overlaps_prefix(&self, pfx: &inetnum::addr::Prefix) -> bool {
        match pfx.addr() {
            IpAddr::V4(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::overlaps_prefix(&self.root4, p),
                None => false,
            },
            IpAddr::V6(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::overlaps_prefix(&self.root6, p),
                None => false,
            },
        }
    }

    /// `true` if `self` and `other` share any overlapping prefix, in
    /// either address family. `other`'s value type need not match
    /// `self`'s — overlap is a question about stored keys, not values.
    pub fn overlaps<W>(&self, other: &Table<W>) -> bool {
        self.overlaps4(other) || self.overlaps6(other)
    }

    /// IPv4-only overlap test.
    pub fn overlaps4<W>(&self, other: &Table<W>) -> bool {
        trie::overlaps(&self.root4, &other.root4)
    }

    /// IPv6-only overlap test.
    pub fn overlaps6<W>(&self, other: &Table<W>) -> bool {
        trie::overlaps(&self.root6, &other.root6)
    }
}

// ---------------------------------------------------------- sub/supernets

impl<V> Table<V> {
    /// Every stored prefix covering `pfx`, most specific first.
    pub fn supernets(&self, pfx: &inetnum::addr::Prefix) -> Vec<(inetnum::addr::Prefix, &V)> {
        match pfx.addr() {
            IpAddr::V4(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::supernets(&self.root4, p)
                    .into_iter()
                    .map(|(p, v)| (p.to_public(), v))
                    .collect(),
                None => Vec::new(),
            },
            IpAddr::V6(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::supernets(&self.root6, p)
                    .into_iter()
                    .map(|(p, v)| (p.to_public(), v))
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    /// Every stored prefix fully contained in `pfx`, ascending CIDR order
    ///.
    pub fn subnets(&self, pfx: &inetnum::addr::Prefix) -> Vec<(inetnum::addr::Prefix, &V)> {
        match pfx.addr() {
            IpAddr::V4(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::subnets(&self.root4, p)
                    .into_iter()
                    .map(|(p, v)| (p.to_public(), v))
                    .collect(),
                None => Vec::new(),
            },
            IpAddr::V6(addr) => match Prefix::new(addr, pfx.len()) {
                Some(p) => trie::subnets(&self.root6, p)
                    .into_iter()
                    .map(|(p, v)| (p.to_public(), v))
                    .collect(),
                None => Vec::new(),
            },
        }
    }
}

// ----------------------------------------------------------------- union

impl<V: Clone> Table<V> {
    /// Mutable union: merge every entry of `other`
    /// into `self`, overwriting `self`'s value on collision. Returns the
    /// number of prefixes that already existed in `self` (the union size
    /// is `self.size() + other.size() - duplicates` note on
    /// union size accounting).
    pub fn union(&mut self, other: &Table<V>) -> usize {
        let dup4 = trie::union_into(&mut self.root4, &other.root4, Ipv4Addr::UNSPECIFIED, 0);
        let dup6 = trie::union_into(&mut self.root6, &other.root6, Ipv6Addr::UNSPECIFIED, 0);
        self.size4 += other.size4 - dup4;
        self.size6 += other.size6 - dup6;
        trace!(
            "union merged {} v4 / {} v6 entries, {} / {} duplicates",
            other.size4, other.size6, dup4, dup6
        );
        dup4 + dup6
    }

    /// Copy-on-write sibling of [`Table::union`]: clones `self` (cheap — see the type-level
    /// doc), then mutates only the clone, cloning exactly the nodes the
    /// donor's entries touch along the way.
    pub fn union_persist(&self, other: &Table<V>) -> Table<V> {
        let mut next = self.clone();
        next.union(other);
        next
    }
}

// -------------------------------------------------------------- iteration

impl<V> Table<V> {
    /// Every IPv4 `(prefix, value)`, unspecified order.
    pub fn all4(&self) -> Vec<(Prefix<Ipv4Addr>, &V)> {
        trie::all(&self.root4)
    }

    /// Every IPv6 `(prefix, value)`, unspecified order.
    pub fn all6(&self) -> Vec<(Prefix<Ipv6Addr>, &V)> {
        trie::all(&self.root6)
    }

    /// Every `(prefix, value)` across both families, unspecified order,
    /// converted to the public, family-erased prefix type.
    pub fn all(&self) -> Vec<(inetnum::addr::Prefix, &V)> {
        self.all4()
            .into_iter()
            .map(|(p, v)| (p.to_public(), v))
            .chain(self.all6().into_iter().map(|(p, v)| (p.to_public(), v)))
            .collect()
    }

    /// IPv4 entries in ascending canonical CIDR order.
    pub fn all_sorted4(&self) -> Vec<(Prefix<Ipv4Addr>, &V)> {
        trie::all_sorted(&self.root4)
    }

    /// IPv6 entries in ascending canonical CIDR order.
    pub fn all_sorted6(&self) -> Vec<(Prefix<Ipv6Addr>, &V)> {
        trie::all_sorted(&self.root6)
    }

    /// Both families, each in ascending canonical CIDR order, IPv4 first.
    pub fn all_sorted(&self) -> Vec<(inetnum::addr::Prefix, &V)> {
        self.all_sorted4()
            .into_iter()
            .map(|(p, v)| (p.to_public(), v))
            .chain(
                self.all_sorted6()
                    .into_iter()
                    .map(|(p, v)| (p.to_public(), v)),
            )
            .collect()
    }

    /// Visit every IPv4 `(prefix, value)`, stopping as soon as `visit`
    /// returns `false`. Returns `true` iff
    /// every entry was visited.
    pub fn for_each4(&self, visit: impl FnMut(Prefix<Ipv4Addr>, &V) -> bool) -> bool {
        trie::all_while(&self.root4, visit)
    }

    /// As [`Table::for_each4`], for the IPv6 side.
    pub fn for_each6(&self, visit: impl FnMut(Prefix<Ipv6Addr>, &V) -> bool) -> bool {
        trie::all_while(&self.root6, visit)
    }
}

// ------------------------------------------------------------- clone/equal

impl<V: Clone> Table<V> {
    /// A fully independent deep copy: every value is duplicated via
    /// `value_clone` rather than shared through the `Arc`-backed node
    /// structure. Ordinary [`Clone`]
    /// (shallow, `Arc`-sharing) already gives full mutation isolation
    /// between the two tables — see `DESIGN.md` — so reach for this only
    /// when `V` itself carries shared/interior-mutable state that must
    /// not be aliased between the copies.
    pub fn deep_clone_with<F>(&self, value_clone: F) -> Table<V>
    where
        F: Fn(&V) -> V,
    {
        Table {
            root4: self.root4.deep_clone_with(&value_clone),
            root6: self.root6.deep_clone_with(&value_clone),
            size4: self.size4,
            size6: self.size6,
        }
    }

    /// [`Table::deep_clone_with`] using `V`'s own [`Clone`] impl.
    pub fn deep_clone(&self) -> Table<V> {
        self.deep_clone_with(|v| v.clone())
    }
}

impl<V: PartialEq> Table<V> {
    /// Structural equality: same sizes, and
    /// recursively identical bitsets/values/children on both roots.
    pub fn equal(&self, other: &Table<V>) -> bool {
        self.size4 == other.size4
            && self.size6 == other.size6
            && self.root4.structurally_equal(&other.root4)
            && self.root6.structurally_equal(&other.root6)
    }
}

// ---------------------------------------------------------------- dump

impl<V: Clone> Table<V> {
    /// A post-order `(cidr, value, subnets)` snapshot of the IPv4 side
    ///.
    pub fn dump4(&self) -> Vec<DumpListNode<Ipv4Addr, V>> {
        let entries: Vec<(Prefix<Ipv4Addr>, V)> = self
            .all_sorted4()
            .into_iter()
            .map(|(p, v)| (p, v.clone()))
            .collect();
        DumpListNode::build(&entries)
    }

    /// As [`Table::dump4`], for the IPv6 side.
    pub fn dump6(&self) -> Vec<DumpListNode<Ipv6Addr, V>> {
        let entries: Vec<(Prefix<Ipv6Addr>, V)> = self
            .all_sorted6()
            .into_iter()
            .map(|(p, v)| (p, v.clone()))
            .collect();
        DumpListNode::build(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pfx(s: &str, bits: u8) -> inetnum::addr::Prefix {
        inetnum::addr::Prefix::new(s.parse().unwrap(), bits).unwrap()
    }

    // S1: IPv4 LPM + containment.
    #[test]
    fn s1_ipv4_lpm_and_containment() {
        let mut t: Table<&'static str> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), "A");
        t.insert(&pfx("10.0.0.0", 24), "B");
        t.insert(&pfx("10.0.1.0", 24), "C");
        t.insert(&pfx("192.168.0.0", 16), "D");

        assert_eq!(t.lookup("10.0.0.5".parse().unwrap()), Some(&"B"));
        assert_eq!(t.lookup("10.0.2.5".parse().unwrap()), Some(&"A"));
        assert_eq!(t.lookup("172.16.0.1".parse().unwrap()), None);
        assert!(t.contains("10.0.0.5".parse().unwrap()));
        assert!(!t.contains("8.8.8.8".parse().unwrap()));
    }

    // S2: IPv6 default route + fringe.
    #[test]
    fn s2_ipv6_default_and_fringe() {
        let mut t: Table<&'static str> = Table::new();
        t.insert(&pfx("::", 0), "root");
        t.insert(&pfx("2001:db8::", 32), "doc");
        t.insert(&pfx("fe80::", 10), "ll");

        assert_eq!(t.lookup("2001:db8::1".parse().unwrap()), Some(&"doc"));
        assert_eq!(t.lookup("::1".parse().unwrap()), Some(&"root"));
        assert_eq!(
            t.lookup_prefix(&pfx("2001:db8:dead::", 48)),
            Some(&"doc")
        );
        let (lpm_pfx, v) = t.lookup_prefix_lpm(&pfx("2001:db8:dead::", 48)).unwrap();
        assert_eq!(lpm_pfx, pfx("2001:db8::", 32));
        assert_eq!(v, &"doc");
    }

    // S3: delete + compress.
    #[test]
    fn s3_delete_and_compress() {
        let mut t: Table<&'static str> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), "A");
        t.insert(&pfx("10.0.0.0", 9), "B");
        assert_eq!(t.delete(&pfx("10.0.0.0", 9)), Some("B"));
        assert_eq!(t.size(), 1);
        assert_eq!(t.get(&pfx("10.0.0.0", 8)), Some(&"A"));
        assert!(t.check_invariants());
    }

    // S4: overlaps, both directions.
    #[test]
    fn s4_overlaps_bidirectional() {
        let mut t: Table<()> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), ());
        let mut u: Table<()> = Table::new();
        u.insert(&pfx("10.1.2.0", 24), ());
        assert!(t.overlaps_prefix(&pfx("10.1.2.0", 24)));
        assert!(t.overlaps(&u));
        assert!(u.overlaps(&t));

        let mut disjoint: Table<()> = Table::new();
        disjoint.insert(&pfx("11.0.0.0", 8), ());
        assert!(!t.overlaps(&disjoint));
        assert!(!disjoint.overlaps(&t));
    }

    // S5: union semantics.
    #[test]
    fn s5_union_semantics() {
        let mut t: Table<&'static str> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), "x");
        let mut u: Table<&'static str> = Table::new();
        u.insert(&pfx("10.0.0.0", 8), "y");
        u.insert(&pfx("10.0.0.0", 24), "z");

        t.union(&u);
        assert_eq!(t.get(&pfx("10.0.0.0", 8)), Some(&"y"));
        assert_eq!(t.get(&pfx("10.0.0.0", 24)), Some(&"z"));
        assert_eq!(t.size(), 2);
    }

    // S6: persistent isolation with value cloning.
    #[derive(Clone, Debug, PartialEq)]
    struct Val {
        data: i32,
    }

    #[test]
    fn s6_persistent_isolation() {
        let mut t: Table<Val> = Table::new();
        let p = pfx("10.0.0.0", 24);
        t.insert(&p, Val { data: 1 });
        let t2 = t.update_persist(&p, Val { data: 2 });

        assert_eq!(t.get(&p), Some(&Val { data: 1 }));
        assert_eq!(t2.get(&p), Some(&Val { data: 2 }));
    }

    // S7: subnets ordering.
    #[test]
    fn s7_subnets_ordering() {
        let mut t: Table<()> = Table::new();
        for (a, b) in [
            ("10.0.0.0", 8),
            ("10.0.0.0", 24),
            ("10.0.1.0", 24),
            ("10.128.0.0", 9),
        ] {
            t.insert(&pfx(a, b), ());
        }
        let subnets = t.subnets(&pfx("10.0.0.0", 8));
        let got: Vec<(String, u8)> = subnets
            .iter()
            .map(|(p, _)| (p.addr().to_string(), p.len()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("10.0.0.0".to_string(), 8),
                ("10.0.0.0".to_string(), 24),
                ("10.0.1.0".to_string(), 24),
                ("10.128.0.0".to_string(), 9),
            ]
        );
    }

    #[test]
    fn modify_covers_all_four_quadrants() {
        let mut t: Table<i32> = Table::new();
        let p = pfx("192.0.2.0", 24);

        // !exists, !del -> insert
        t.modify(&p, |_old, exists| {
            assert!(!exists);
            (7, false)
        });
        assert_eq!(t.get(&p), Some(&7));

        // exists, !del -> update
        t.modify(&p, |old, exists| {
            assert!(exists);
            (old + 1, false)
        });
        assert_eq!(t.get(&p), Some(&8));

        // exists, del -> delete
        t.modify(&p, |_old, exists| {
            assert!(exists);
            (0, true)
        });
        assert_eq!(t.get(&p), None);

        // !exists, del -> no-op
        t.modify(&p, |_old, exists| {
            assert!(!exists);
            (0, true)
        });
        assert_eq!(t.get(&p), None);
        assert_eq!(t.size(), 0);
    }

    #[test]
    fn clone_round_trip_and_isolation() {
        let mut t: Table<i32> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), 1);
        let cloned = t.clone();
        assert!(cloned.equal(&t));
        t.insert(&pfx("10.0.0.0", 9), 2);
        assert!(!cloned.equal(&t));
        assert_eq!(cloned.size(), 1);
    }

    #[test]
    fn deep_clone_gives_independent_values() {
        let mut t: Table<Vec<i32>> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), vec![1, 2, 3]);
        let deep = t.deep_clone();
        assert!(deep.equal(&t));
        assert_ne!(
            t.get(&pfx("10.0.0.0", 8)).unwrap().as_ptr(),
            deep.get(&pfx("10.0.0.0", 8)).unwrap().as_ptr()
        );
    }

    #[test]
    fn all_sorted_interleaves_both_families() {
        let mut t: Table<()> = Table::new();
        t.insert(&pfx("10.0.0.0", 8), ());
        t.insert(&pfx("2001:db8::", 32), ());
        let all = t.all_sorted();
        assert_eq!(all.len(), 2);
        assert!(all[0].0.addr().is_ipv4());
        assert!(all[1].0.addr().is_ipv6());
    }

    #[test]
    fn for_each_stops_early() {
        let mut t: Table<i32> = Table::new();
        for (i, octet) in (0u8..10).enumerate() {
            t.insert(&pfx(&format!("10.0.0.{octet}"), 32), i as i32);
        }
        let mut seen = 0;
        let completed = t.for_each4(|_, _| {
            seen += 1;
            seen < 3
        });
        assert!(!completed);
        assert_eq!(seen, 3);
    }

    #[test]
    fn prefix_set_alias_uses_unit_value() {
        let mut s: PrefixSet = Table::new();
        s.insert(&pfx("10.0.0.0", 8), ());
        assert!(s.contains("10.0.0.1".parse().unwrap()));
    }
}
