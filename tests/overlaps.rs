mod common;

use cidr_trie::Table;
use common::{init, pfx};

#[test]
fn overlaps_prefix_bidirectional() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), ());

    let mut u: Table<()> = Table::new();
    u.insert(&pfx("10.1.2.0", 24), ());

    assert!(t.overlaps_prefix(&pfx("10.1.2.0", 24)));
    assert!(t.overlaps(&u));
    assert!(u.overlaps(&t));
}

#[test]
fn disjoint_tables_do_not_overlap() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), ());
    let mut u: Table<()> = Table::new();
    u.insert(&pfx("11.0.0.0", 8), ());

    assert!(!t.overlaps_prefix(&pfx("11.0.0.0", 8)));
    assert!(!t.overlaps(&u));
    assert!(!u.overlaps(&t));
}

#[test]
fn a_supernet_overlaps_every_subnet_of_the_other_table() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 16), ());

    let mut u: Table<()> = Table::new();
    u.insert(&pfx("10.0.0.0", 8), ());

    assert!(t.overlaps(&u));
    assert!(u.overlaps(&t));
}

#[test]
fn overlaps_is_family_scoped() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), ());
    let mut u: Table<()> = Table::new();
    u.insert(&pfx("2001:db8::", 32), ());

    assert!(!t.overlaps(&u));
    assert!(!t.overlaps4(&u));
    assert!(!t.overlaps6(&u));
}

#[test]
fn overlaps_with_touching_but_distinct_networks_is_false() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 25), ());
    let mut u: Table<()> = Table::new();
    u.insert(&pfx("10.0.0.128", 25), ());

    assert!(!t.overlaps(&u));
    assert!(!t.overlaps_prefix(&pfx("10.0.0.128", 25)));
}

#[test]
fn overlaps_descends_through_deep_leaves_and_fringes() {
    init();
    let mut t: Table<()> = Table::new();
    // A /28 leaf buried several octets down...
    t.insert(&pfx("203.0.113.16", 28), ());
    let mut u: Table<()> = Table::new();
    // ...overlapped by a fringe-aligned /24 on the other side.
    u.insert(&pfx("203.0.113.0", 24), ());

    assert!(t.overlaps(&u));
    assert!(u.overlaps(&t));
}
