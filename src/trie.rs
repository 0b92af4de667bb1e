//! The trie engine: free functions over a single address family's root
//! [`Node`], implementing insert, delete, lookup, overlap, and subnet/
//! supernet enumeration. These are generic over `AF` and operate on a bare
//! node rather than a
//! [`crate::table::Table`] so that the table façade (which owns two roots,
//! one per family) can drive both sides with the same code.
//!
//! Mutating operations take `&mut Node<AF, V>` and descend through
//! `Arc::make_mut` at `Child::Node` boundaries, so the clone-on-write
//! behaviour lives entirely here rather than being special-cased by
//! `Table`'s persistent methods — see `DESIGN.md`.

use crate::af::AddressFamily;
use crate::art;
use crate::bitset::Bitset256;
use crate::node::{is_fringe, Child, Fringe, Leaf, Node, PrefixInsert};
use crate::prefix::Prefix;
use log::trace;
use std::sync::Arc;

/// Rebuild a canonical address from `path`'s first `depth` octets plus an
/// explicit trailing octet, giving a prefix of `depth*8 + tail_bits` bits.
///
/// Every stored prefix below a given node shares that node's leading
/// octets (that's what "depth" means in this trie), so any address that
/// reached the node — typically the one just deleted, or the one being
/// queried — is a valid `path` for reconstructing a *different* prefix
/// that lives at or under the same node. `tail_octet` is expected to
/// already be masked to its significant bits (as `art::idx_to_pfx`
/// returns, and as a full octet trivially is).
pub(crate) fn reconstruct_prefix<AF: AddressFamily>(
    path: AF,
    depth: u8,
    tail_octet: u8,
    tail_bits: u8,
) -> Prefix<AF> {
    let mut octets = [0u8; 16];
    for (i, slot) in octets.iter_mut().enumerate().take(depth as usize) {
        *slot = path.octet(i as u8);
    }
    octets[depth as usize] = tail_octet;
    let addr = AF::from_octets(&octets[..AF::MAX_DEPTH as usize]);
    Prefix::new_unchecked(addr, depth * 8 + tail_bits)
}

/// The prefix implied by a fringe reached at `depth` while walking `path`
/// (bits = `(depth+1)*8`, octets = `path`'s first `depth+1` octets).
fn fringe_prefix<AF: AddressFamily>(path: AF, depth: u8) -> Prefix<AF> {
    reconstruct_prefix(path, depth, path.octet(depth), 8)
}

// ---------------------------------------------------------------- insert

/// Install `(pfx, value)` starting at `depth` in `cur`. Returns whether an
/// existing entry was overwritten.
pub(crate) fn install<AF: AddressFamily, V: Clone>(
    cur: &mut Node<AF, V>,
    pfx: Prefix<AF>,
    value: V,
    depth: u8,
) -> bool {
    let octet = pfx.addr().octet(depth);
    if depth == pfx.last_octet_depth() {
        let idx = art::pfx_to_idx(octet, pfx.last_bits());
        return matches!(cur.insert_prefix(idx, value), PrefixInsert::Updated(_));
    }
    match cur.delete_child(octet) {
        None => {
            let child = if is_fringe(depth, pfx.bits()) {
                Child::Fringe(Fringe { value })
            } else {
                Child::Leaf(Leaf { prefix: pfx, value })
            };
            cur.insert_child(octet, child);
            false
        }
        Some(Child::Node(mut arc)) => {
            let existed = install(Arc::make_mut(&mut arc), pfx, value, depth + 1);
            cur.insert_child(octet, Child::Node(arc));
            existed
        }
        Some(Child::Leaf(l)) => {
            if l.prefix == pfx {
                cur.insert_child(octet, Child::Leaf(Leaf { prefix: pfx, value }));
                true
            } else {
                trace!("push down leaf {:?} at depth {depth} to make room for {:?}", l.prefix, pfx);
                let mut new_node = Node::new();
                install(&mut new_node, l.prefix, l.value, depth + 1);
                install(&mut new_node, pfx, value, depth + 1);
                cur.insert_child(octet, Child::Node(Arc::new(new_node)));
                false
            }
        }
        Some(Child::Fringe(fr)) => {
            if is_fringe(depth, pfx.bits()) {
                cur.insert_child(octet, Child::Fringe(Fringe { value }));
                true
            } else {
                trace!("push down fringe at depth {depth} to make room for {:?}", pfx);
                let mut new_node = Node::new();
                // A displaced fringe becomes the new node's default route.
                new_node.insert_prefix(1, fr.value);
                install(&mut new_node, pfx, value, depth + 1);
                cur.insert_child(octet, Child::Node(Arc::new(new_node)));
                false
            }
        }
    }
}

// ---------------------------------------------------------------- delete

enum Compressed<AF: AddressFamily, V> {
    /// The node has nothing left; the parent should drop the slot.
    Empty,
    /// The node degenerated to a single leaf/prefix; replace the slot.
    Promote(Child<AF, V>),
    /// The node is still non-degenerate; keep it as-is.
    Keep,
}

/// Purge-and-compress a node after a removal beneath it.
fn compress<AF: AddressFamily, V: Clone>(
    node: &mut Node<AF, V>,
    depth: u8,
    path: AF,
) -> Compressed<AF, V> {
    if node.is_empty() {
        trace!("purge empty node at depth {depth}");
        return Compressed::Empty;
    }
    if node.children.len() == 1 && node.prefixes.is_empty() {
        let octet = node.child_octets().next().expect("len==1");
        if matches!(node.get_child(octet), Some(Child::Leaf(_))) {
            let child = node.delete_child(octet).expect("just observed present");
            trace!("compress node at depth {depth} to its sole leaf child");
            return Compressed::Promote(child);
        }
    }
    if node.prefixes.len() == 1 && node.children.is_empty() {
        let idx = node.prefix_indices().next().expect("len==1");
        let value = node.delete_prefix(idx).expect("just observed present");
        let (tail_octet, tail_bits) = art::idx_to_pfx(idx);
        let prefix = reconstruct_prefix(path, depth, tail_octet, tail_bits);
        trace!("compress node at depth {depth} to its sole prefix {:?}", prefix);
        return Compressed::Promote(Child::Leaf(Leaf { prefix, value }));
    }
    Compressed::Keep
}

/// Remove `pfx` starting at `depth` in `cur`, purging/compressing the
/// descent path on the way back up. Returns the removed value, if any.
pub(crate) fn delete<AF: AddressFamily, V: Clone>(
    cur: &mut Node<AF, V>,
    pfx: Prefix<AF>,
    depth: u8,
) -> Option<V> {
    let octet = pfx.addr().octet(depth);
    if depth == pfx.last_octet_depth() {
        let idx = art::pfx_to_idx(octet, pfx.last_bits());
        return cur.delete_prefix(idx);
    }
    match cur.get_child(octet) {
        None => return None,
        Some(Child::Leaf(l)) => {
            if l.prefix != pfx {
                return None;
            }
        }
        Some(Child::Fringe(_)) => {
            if !is_fringe(depth, pfx.bits()) {
                return None;
            }
        }
        Some(Child::Node(_)) => {}
    }
    match cur.delete_child(octet).expect("just observed present") {
        Child::Leaf(l) => Some(l.value),
        Child::Fringe(fr) => Some(fr.value),
        Child::Node(mut arc) => {
            let removed = delete(Arc::make_mut(&mut arc), pfx, depth + 1);
            if removed.is_some() {
                match compress(Arc::make_mut(&mut arc), depth + 1, pfx.addr()) {
                    Compressed::Empty => {}
                    Compressed::Promote(child) => cur.insert_child(octet, child),
                    Compressed::Keep => {
                        cur.insert_child(octet, Child::Node(arc));
                    }
                }
            } else {
                cur.insert_child(octet, Child::Node(arc));
            }
            removed
        }
    }
}

// ------------------------------------------------------------------- get

/// Exact match.
pub(crate) fn get<'n, AF: AddressFamily, V>(
    mut cur: &'n Node<AF, V>,
    pfx: Prefix<AF>,
) -> Option<&'n V> {
    let mut depth = 0u8;
    loop {
        let octet = pfx.addr().octet(depth);
        if depth == pfx.last_octet_depth() {
            let idx = art::pfx_to_idx(octet, pfx.last_bits());
            return cur.get_prefix(idx);
        }
        match cur.get_child(octet)? {
            Child::Node(n) => {
                cur = n;
                depth += 1;
            }
            Child::Leaf(l) => return (l.prefix == pfx).then_some(&l.value),
            Child::Fringe(fr) => return is_fringe(depth, pfx.bits()).then_some(&fr.value),
        }
    }
}

// -------------------------------------------------------- contains/lookup

/// Any covering prefix? No backtracking.
pub(crate) fn contains<AF: AddressFamily, V>(mut cur: &Node<AF, V>, addr: AF) -> bool {
    let mut depth = 0u8;
    loop {
        let octet = addr.octet(depth);
        if cur.covers_idx(art::octet_to_idx(octet)) {
            return true;
        }
        match cur.get_child(octet) {
            None => return false,
            Some(Child::Node(n)) => {
                cur = n;
                depth += 1;
            }
            Some(Child::Leaf(l)) => return l.prefix.contains_addr(&addr),
            Some(Child::Fringe(_)) => return true,
        }
    }
}

/// LPM by address: the value of the most specific stored prefix
/// covering `addr`, tracking the best match seen on the way down.
pub(crate) fn lookup<'n, AF: AddressFamily, V>(root: &'n Node<AF, V>, addr: AF) -> Option<&'n V> {
    lookup_from(root, addr, 0)
}

fn lookup_from<'n, AF: AddressFamily, V>(
    cur: &'n Node<AF, V>,
    addr: AF,
    depth: u8,
) -> Option<&'n V> {
    let octet = addr.octet(depth);
    let mut best = cur.lpm(art::octet_to_idx(octet)).map(|(_, v)| v);
    match cur.get_child(octet) {
        None => {}
        Some(Child::Node(n)) => {
            if let Some(v) = lookup_from(n, addr, depth + 1) {
                best = Some(v);
            }
        }
        Some(Child::Leaf(l)) => {
            if l.prefix.contains_addr(&addr) {
                best = Some(&l.value);
            }
        }
        Some(Child::Fringe(fr)) => best = Some(&fr.value),
    }
    best
}

// ---------------------------------------------------------- lookup_prefix

/// LPM by prefix (`<= pfx`), returning the matched prefix and value
///. `lookup_prefix`'s value-only variant just discards the prefix.
pub(crate) fn lookup_prefix_lpm<'n, AF: AddressFamily, V>(
    root: &'n Node<AF, V>,
    pfx: Prefix<AF>,
) -> Option<(Prefix<AF>, &'n V)> {
    let last_depth = pfx.last_octet_depth();
    let mut stack: Vec<(u8, &'n Node<AF, V>)> = Vec::with_capacity(AF::MAX_DEPTH as usize);
    let mut cur = root;
    let mut depth = 0u8;
    loop {
        stack.push((depth, cur));
        if depth == last_depth {
            break;
        }
        let octet = pfx.addr().octet(depth);
        match cur.get_child(octet) {
            None => break,
            Some(Child::Node(n)) => {
                cur = n;
                depth += 1;
            }
            Some(Child::Leaf(l)) => {
                if l.prefix.bits() <= pfx.bits() && l.prefix.covers(&pfx) {
                    return Some((l.prefix, &l.value));
                }
                break;
            }
            Some(Child::Fringe(fr)) => {
                let implicit_bits = (depth + 1) * 8;
                if implicit_bits <= pfx.bits() {
                    return Some((fringe_prefix(pfx.addr(), depth), &fr.value));
                }
                break;
            }
        }
    }
    while let Some((d, node)) = stack.pop() {
        let idx = if d == last_depth {
            art::pfx_to_idx(pfx.addr().octet(d), pfx.last_bits())
        } else {
            art::octet_to_idx(pfx.addr().octet(d))
        };
        if let Some((top_idx, v)) = node.lpm(idx) {
            let (tail_octet, tail_bits) = art::idx_to_pfx(top_idx);
            return Some((reconstruct_prefix(pfx.addr(), d, tail_octet, tail_bits), v));
        }
    }
    None
}

// ------------------------------------------------------ supernets/subnets

/// Every stored prefix covering `pfx`, most specific first.
pub(crate) fn supernets<'n, AF: AddressFamily, V>(
    root: &'n Node<AF, V>,
    pfx: Prefix<AF>,
) -> Vec<(Prefix<AF>, &'n V)> {
    let last_depth = pfx.last_octet_depth();
    let mut stack: Vec<(u8, &'n Node<AF, V>)> = Vec::with_capacity(AF::MAX_DEPTH as usize);
    let mut cur = root;
    let mut depth = 0u8;
    let mut early: Option<(Prefix<AF>, &'n V)> = None;
    loop {
        stack.push((depth, cur));
        if depth == last_depth {
            break;
        }
        let octet = pfx.addr().octet(depth);
        match cur.get_child(octet) {
            None => break,
            Some(Child::Node(n)) => {
                cur = n;
                depth += 1;
            }
            Some(Child::Leaf(l)) => {
                if l.prefix.bits() <= pfx.bits() && l.prefix.covers(&pfx) {
                    early = Some((l.prefix, &l.value));
                }
                break;
            }
            Some(Child::Fringe(fr)) => {
                let implicit_bits = (depth + 1) * 8;
                if implicit_bits <= pfx.bits() {
                    early = Some((fringe_prefix(pfx.addr(), depth), &fr.value));
                }
                break;
            }
        }
    }
    let mut out = Vec::new();
    if let Some(hit) = early {
        out.push(hit);
    }
    while let Some((d, node)) = stack.pop() {
        let idx = if d == last_depth {
            art::pfx_to_idx(pfx.addr().octet(d), pfx.last_bits())
        } else {
            art::octet_to_idx(pfx.addr().octet(d))
        };
        let candidates = node.prefixes_bitset().intersection(art::lookup_tbl(idx));
        let mut top = candidates.last_set();
        while let Some(i) = top {
            if let Some(v) = node.get_prefix(i) {
                let (tail_octet, tail_bits) = art::idx_to_pfx(i);
                out.push((reconstruct_prefix(pfx.addr(), d, tail_octet, tail_bits), v));
            }
            top = if i == 0 {
                None
            } else {
                let below = {
                    let mut b = Bitset256::new();
                    for j in candidates.iter() {
                        if j < i {
                            b.set(j);
                        }
                    }
                    b
                };
                below.last_set()
            };
        }
    }
    out
}

/// Every stored prefix fully contained in `pfx`, in ascending CIDR order
///.
pub(crate) fn subnets<'n, AF: AddressFamily, V>(
    root: &'n Node<AF, V>,
    pfx: Prefix<AF>,
) -> Vec<(Prefix<AF>, &'n V)> {
    let mut out = Vec::new();
    subnets_walk(root, pfx, 0, &mut out);
    out
}

fn subnets_walk<'n, AF: AddressFamily, V>(
    node: &'n Node<AF, V>,
    pfx: Prefix<AF>,
    depth: u8,
    out: &mut Vec<(Prefix<AF>, &'n V)>,
) {
    let last_depth = pfx.last_octet_depth();
    if depth < last_depth {
        let octet = pfx.addr().octet(depth);
        match node.get_child(octet) {
            None => {}
            Some(Child::Node(n)) => subnets_walk(n, pfx, depth + 1, out),
            Some(Child::Leaf(l)) => {
                if pfx.covers(&l.prefix) {
                    out.push((l.prefix, &l.value));
                }
            }
            Some(Child::Fringe(fr)) => {
                let implicit = fringe_prefix(pfx.addr(), depth);
                if pfx.covers(&implicit) {
                    out.push((implicit, &fr.value));
                }
            }
        }
        return;
    }
    // depth == last_depth: pfx's own index at this node is the allotment root.
    let octet = pfx.addr().octet(depth);
    let idx = art::pfx_to_idx(octet, pfx.last_bits());
    let allot = art::allotment(idx);
    emit_allotment_sorted(node, pfx.addr(), depth, &allot, out);
}

/// Emit, in ascending CIDR order, every prefix entry of `node` whose index
/// lies in `allot`'s prefix set and every child whose octet lies in
/// `allot`'s host range — interleaved so ancestor prefixes appear before
/// the more specific entries beneath them, matching canonical CIDR sort.
fn emit_allotment_sorted<'n, AF: AddressFamily, V>(
    node: &'n Node<AF, V>,
    path: AF,
    depth: u8,
    allot: &art::Allotment,
    out: &mut Vec<(Prefix<AF>, &'n V)>,
) {
    // Collect covered prefix entries, sorted by (octet, bits) i.e. by
    // increasing base index is NOT quite CIDR order (index order groups by
    // bit-length first); sort explicitly by the decoded (octet, bits).
    let mut pfx_entries: Vec<(u8, u8, u16)> = node
        .prefixes_bitset()
        .intersection(&allot.prefixes)
        .iter()
        .map(|idx| {
            let (o, b) = art::idx_to_pfx(idx);
            (o, b, idx)
        })
        .collect();
    pfx_entries.sort_by_key(|&(o, b, _)| (o, b));

    let mut child_octets: Vec<u8> = node
        .children_bitset()
        .intersection(&allot.hosts)
        .iter()
        .map(|o| o as u8)
        .collect();
    child_octets.sort_unstable();

    let mut pi = 0usize;
    let mut ci = 0usize;
    while pi < pfx_entries.len() || ci < child_octets.len() {
        let next_is_prefix = match (pfx_entries.get(pi), child_octets.get(ci)) {
            (Some(&(o, _, _)), Some(&co)) => o <= co,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => unreachable!(),
        };
        if next_is_prefix {
            let (o, b, idx) = pfx_entries[pi];
            pi += 1;
            if let Some(v) = node.get_prefix(idx) {
                out.push((reconstruct_prefix(path, depth, o, b), v));
            }
        } else {
            let octet = child_octets[ci];
            ci += 1;
            match node.get_child(octet) {
                Some(Child::Node(n)) => {
                    let child_allot = art::allotment(1); // whole stride of the child node
                    emit_allotment_sorted(n, path, depth + 1, &child_allot, out);
                }
                Some(Child::Leaf(l)) => out.push((l.prefix, &l.value)),
                Some(Child::Fringe(fr)) => {
                    out.push((fringe_prefix(path, depth), &fr.value));
                }
                None => {}
            }
        }
    }
}

// ---------------------------------------------------------------- overlaps

/// `overlaps_prefix`.
pub(crate) fn overlaps_prefix<AF: AddressFamily, V>(mut cur: &Node<AF, V>, pfx: Prefix<AF>) -> bool {
    let last_depth = pfx.last_octet_depth();
    let mut depth = 0u8;
    loop {
        let octet = pfx.addr().octet(depth);
        if depth == last_depth {
            let idx = art::pfx_to_idx(octet, pfx.last_bits());
            if cur.covers_idx(idx) {
                return true;
            }
            let allot = art::allotment(idx);
            if cur.prefixes_bitset().intersects(&allot.prefixes) {
                return true;
            }
            if cur.children_bitset().intersects(&allot.hosts) {
                return true;
            }
            return false;
        }
        if cur.covers_idx(art::octet_to_idx(octet)) {
            return true;
        }
        match cur.get_child(octet) {
            None => return false,
            Some(Child::Node(n)) => {
                cur = n;
                depth += 1;
            }
            Some(Child::Leaf(l)) => return l.prefix.overlaps(&pfx),
            Some(Child::Fringe(_)) => return fringe_prefix(pfx.addr(), depth).overlaps(&pfx),
        }
    }
}

/// `overlaps`: do any two stored prefixes across the two tables
/// overlap?
pub(crate) fn overlaps<AF: AddressFamily, V, W>(a: &Node<AF, V>, b: &Node<AF, W>) -> bool {
    // 1. route-vs-route: any prefix in `a` covers or is covered by any
    //    prefix in `b`. Covering and covered-by are symmetric in the
    //    union of indices, so iterate the smaller side's indices and test
    //    against the other's bitset via LPM-test in both directions.
    for idx in a.prefix_indices() {
        if b.covers_idx(idx) || b.prefixes_bitset().intersects(&art::allotment(idx).prefixes) {
            return true;
        }
    }
    for idx in b.prefix_indices() {
        if a.covers_idx(idx) {
            return true;
        }
    }
    // 2. route-vs-child: a prefix in one side covers a child octet of the
    //    other, and vice versa.
    for idx in a.prefix_indices() {
        if b.children_bitset().intersects(&art::allotment(idx).hosts) {
            return true;
        }
    }
    for idx in b.prefix_indices() {
        if a.children_bitset().intersects(&art::allotment(idx).hosts) {
            return true;
        }
    }
    // 3. child-vs-child at matching octets.
    for octet in a.child_octets() {
        let Some(bc) = b.get_child(octet) else {
            continue;
        };
        let ac = a.get_child(octet).expect("octet came from a's own keys");
        if overlaps_children(ac, bc) {
            return true;
        }
    }
    false
}

fn overlaps_children<AF: AddressFamily, V, W>(a: &Child<AF, V>, b: &Child<AF, W>) -> bool {
    // Both sides are known to share this octet already — a fringe is a
    // full host route at this position, so any sibling reachable under the
    // same octet is by definition within it.
    match (a, b) {
        (Child::Node(an), Child::Node(bn)) => overlaps(an, bn),
        (Child::Node(an), Child::Leaf(bl)) => overlaps_prefix(an, bl.prefix),
        (Child::Leaf(al), Child::Node(bn)) => overlaps_prefix(bn, al.prefix),
        (Child::Leaf(al), Child::Leaf(bl)) => al.prefix.overlaps(&bl.prefix),
        _ => true,
    }
}

// ------------------------------------------------------------------ union

/// Mutable union: merge every entry of `donor` into `receiver`. `path` is
/// the address built from the walk so far (its first `depth` octets are
/// significant) — needed to reconstruct the implicit prefix of any fringe
/// the donor carries. Returns the number of prefixes that already existed
/// in `receiver` (so the caller can correct `size += donor.size -
/// duplicates`).
pub(crate) fn union_into<AF: AddressFamily, V: Clone>(
    receiver: &mut Node<AF, V>,
    donor: &Node<AF, V>,
    path: AF,
    depth: u8,
) -> usize {
    let mut duplicates = 0usize;
    for (idx, v) in donor.prefixes_iter() {
        if matches!(
            receiver.insert_prefix(idx, v.clone()),
            PrefixInsert::Updated(_)
        ) {
            duplicates += 1;
        }
    }
    for (octet, donor_child) in donor.children_iter() {
        let child_path = with_octet(path, depth, octet);
        match receiver.delete_child(octet) {
            None => {
                receiver.insert_child(octet, donor_child.clone());
            }
            Some(Child::Node(mut recv_arc)) => {
                duplicates += union_into_child(
                    Arc::make_mut(&mut recv_arc),
                    donor_child,
                    child_path,
                    depth + 1,
                );
                receiver.insert_child(octet, Child::Node(recv_arc));
            }
            Some(Child::Leaf(recv_leaf)) => {
                let mut new_node = Node::new();
                install(&mut new_node, recv_leaf.prefix, recv_leaf.value, depth + 1);
                duplicates += union_into_child(&mut new_node, donor_child, child_path, depth + 1);
                receiver.insert_child(octet, Child::Node(Arc::new(new_node)));
            }
            Some(Child::Fringe(recv_fr)) => {
                let mut new_node = Node::new();
                new_node.insert_prefix(1, recv_fr.value);
                duplicates += union_into_child(&mut new_node, donor_child, child_path, depth + 1);
                receiver.insert_child(octet, Child::Node(Arc::new(new_node)));
            }
        }
    }
    duplicates
}

/// Merge a single donor child into `new_node`, which sits at `depth` and
/// has already absorbed whatever the receiver's own displaced entry was.
/// `path`'s first `depth` octets lead to `new_node`.
fn union_into_child<AF: AddressFamily, V: Clone>(
    new_node: &mut Node<AF, V>,
    donor_child: &Child<AF, V>,
    path: AF,
    depth: u8,
) -> usize {
    match donor_child {
        Child::Node(n) => union_into(new_node, n, path, depth),
        Child::Leaf(l) => install(new_node, l.prefix, l.value.clone(), depth) as usize,
        Child::Fringe(fr) => {
            let fpfx = fringe_prefix(path, depth - 1);
            install(new_node, fpfx, fr.value.clone(), depth) as usize
        }
    }
}

// --------------------------------------------------------------- iteration

/// Every `(prefix, value)` stored beneath `root`, in unspecified order.
///
/// Built atop [`all_while`] with a consumer that never asks to stop — see
/// that function for the cooperatively-cancellable lazy variant.
pub(crate) fn all<'n, AF: AddressFamily, V>(root: &'n Node<AF, V>) -> Vec<(Prefix<AF>, &'n V)> {
    let mut out = Vec::new();
    all_while(root, |pfx, v| {
        out.push((pfx, v));
        true
    });
    out
}

/// Visit every `(prefix, value)` stored beneath `root`, in unspecified
/// order, calling `visit` for each. Stops as soon as `visit` returns
/// `false`; returns `true` if every entry was visited without an early
/// stop.
pub(crate) fn all_while<AF: AddressFamily, V>(
    root: &Node<AF, V>,
    mut visit: impl FnMut(Prefix<AF>, &V) -> bool,
) -> bool {
    all_walk(
        root,
        AF::from_octets(&[0u8; 16][..AF::MAX_DEPTH as usize]),
        0,
        &mut visit,
    )
}

fn all_walk<AF: AddressFamily, V>(
    node: &Node<AF, V>,
    path: AF,
    depth: u8,
    visit: &mut impl FnMut(Prefix<AF>, &V) -> bool,
) -> bool {
    for (idx, v) in node.prefixes_iter() {
        let (tail_octet, tail_bits) = art::idx_to_pfx(idx);
        if !visit(reconstruct_prefix(path, depth, tail_octet, tail_bits), v) {
            return false;
        }
    }
    for (octet, child) in node.children_iter() {
        let child_path = with_octet(path, depth, octet);
        let keep_going = match child {
            Child::Node(n) => all_walk(n, child_path, depth + 1, visit),
            Child::Leaf(l) => visit(l.prefix, &l.value),
            Child::Fringe(fr) => visit(fringe_prefix(child_path, depth), &fr.value),
        };
        if !keep_going {
            return false;
        }
    }
    true
}

/// Every `(prefix, value)` in canonical ascending CIDR order.
pub(crate) fn all_sorted<'n, AF: AddressFamily, V>(
    root: &'n Node<AF, V>,
) -> Vec<(Prefix<AF>, &'n V)> {
    let mut out = Vec::new();
    let zero = AF::from_octets(&[0u8; 16][..AF::MAX_DEPTH as usize]);
    emit_allotment_sorted(root, zero, 0, &art::allotment(1), &mut out);
    out
}

fn with_octet<AF: AddressFamily>(path: AF, depth: u8, octet: u8) -> AF {
    let mut octets = [0u8; 16];
    for i in 0..depth as usize {
        octets[i] = path.octet(i as u8);
    }
    octets[depth as usize] = octet;
    AF::from_octets(&octets[..AF::MAX_DEPTH as usize])
}

// --------------------------------------------------------------- equality

/// Structural equality, recursively. Delegates to
/// [`Node::structurally_equal`].
pub(crate) fn equal<AF: AddressFamily, V: PartialEq>(a: &Node<AF, V>, b: &Node<AF, V>) -> bool {
    a.structurally_equal(b)
}
