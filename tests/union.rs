mod common;

use cidr_trie::Table;
use common::{init, pfx};

#[test]
fn union_overwrites_on_collision_and_merges_new_entries() {
    init();
    let mut t: Table<&'static str> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), "x");

    let mut u: Table<&'static str> = Table::new();
    u.insert(&pfx("10.0.0.0", 8), "y");
    u.insert(&pfx("10.0.0.0", 24), "z");

    let dups = t.union(&u);
    assert_eq!(dups, 1);
    assert_eq!(t.get(&pfx("10.0.0.0", 8)), Some(&"y"));
    assert_eq!(t.get(&pfx("10.0.0.0", 24)), Some(&"z"));
    assert_eq!(t.size(), 2);
}

#[test]
fn union_size_accounts_for_duplicates_across_both_families() {
    init();
    let mut t: Table<i32> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), 1);
    t.insert(&pfx("2001:db8::", 32), 1);

    let mut u: Table<i32> = Table::new();
    u.insert(&pfx("10.0.0.0", 8), 2); // duplicate of t's v4 entry
    u.insert(&pfx("192.0.2.0", 24), 3); // new v4 entry
    u.insert(&pfx("fe80::", 10), 4); // new v6 entry

    let before = t.size();
    t.union(&u);
    assert_eq!(t.size(), before + u.size() - 1);
    assert_eq!(t.size4(), 2);
    assert_eq!(t.size6(), 2);
}

#[test]
fn union_with_empty_table_is_a_no_op() {
    init();
    let mut t: Table<i32> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), 1);
    let empty: Table<i32> = Table::new();
    let dups = t.union(&empty);
    assert_eq!(dups, 0);
    assert_eq!(t.size(), 1);
}

#[test]
fn union_pushes_down_receivers_leaf_when_donor_is_deeper() {
    init();
    let mut t: Table<i32> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), 1); // stored as a leaf/fringe near the root

    let mut u: Table<i32> = Table::new();
    u.insert(&pfx("10.0.0.0", 24), 2);
    u.insert(&pfx("10.0.1.0", 24), 3);

    t.union(&u);
    assert_eq!(t.get(&pfx("10.0.0.0", 8)), Some(&1));
    assert_eq!(t.get(&pfx("10.0.0.0", 24)), Some(&2));
    assert_eq!(t.get(&pfx("10.0.1.0", 24)), Some(&3));
    assert!(t.check_invariants());
}
