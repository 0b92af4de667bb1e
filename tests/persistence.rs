mod common;

use cidr_trie::Table;
use common::{init, pfx};

#[derive(Clone, Debug, PartialEq)]
struct Val {
    data: i32,
}

#[test]
fn insert_persist_leaves_the_original_untouched() {
    init();
    let mut t: Table<Val> = Table::new();
    let p = pfx("10.0.0.0", 24);
    t.insert(&p, Val { data: 1 });

    let (t2, existed) = t.insert_persist(&p, Val { data: 2 });
    assert!(existed);
    assert_eq!(t.get(&p), Some(&Val { data: 1 }));
    assert_eq!(t2.get(&p), Some(&Val { data: 2 }));

    // Mutating t2 further must not perturb t.
    let mut t2 = t2;
    t2.insert(&pfx("10.0.1.0", 24), Val { data: 99 });
    assert_eq!(t.get(&pfx("10.0.1.0", 24)), None);
    assert_eq!(t2.get(&pfx("10.0.1.0", 24)), Some(&Val { data: 99 }));
}

#[test]
fn delete_persist_leaves_the_original_populated() {
    init();
    let mut t: Table<i32> = Table::new();
    let p = pfx("192.0.2.0", 24);
    t.insert(&p, 7);

    let (t2, removed) = t.delete_persist(&p);
    assert_eq!(removed, Some(7));
    assert_eq!(t.get(&p), Some(&7));
    assert_eq!(t2.get(&p), None);
    assert_eq!(t.size(), 1);
    assert_eq!(t2.size(), 0);
}

#[test]
fn modify_persist_applies_only_to_the_new_table() {
    init();
    let mut t: Table<i32> = Table::new();
    let p = pfx("198.51.100.0", 24);
    t.insert(&p, 5);

    let t2 = t.modify_persist(&p, |old, exists| {
        assert!(exists);
        (old * 2, false)
    });
    assert_eq!(t.get(&p), Some(&5));
    assert_eq!(t2.get(&p), Some(&10));
}

#[test]
fn union_persist_shares_untouched_subtrees() {
    init();
    let mut t: Table<i32> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), 1);
    t.insert(&pfx("172.16.0.0", 12), 2);

    let mut u: Table<i32> = Table::new();
    u.insert(&pfx("10.0.0.0", 8), 100);

    let merged = t.union_persist(&u);
    assert_eq!(t.get(&pfx("10.0.0.0", 8)), Some(&1));
    assert_eq!(merged.get(&pfx("10.0.0.0", 8)), Some(&100));
    // The untouched subnet is still reachable, unaffected by the merge.
    assert_eq!(merged.get(&pfx("172.16.0.0", 12)), Some(&2));
    assert_eq!(t.get(&pfx("172.16.0.0", 12)), Some(&2));
}

#[test]
fn repeated_persistent_inserts_build_an_independent_chain() {
    init();
    let t0: Table<i32> = Table::new();
    let (t1, _) = t0.insert_persist(&pfx("10.0.0.0", 8), 1);
    let (t2, _) = t1.insert_persist(&pfx("10.0.0.0", 9), 2);
    let (t3, _) = t2.insert_persist(&pfx("10.0.0.0", 9), 3);

    assert_eq!(t0.size(), 0);
    assert_eq!(t1.size(), 1);
    assert_eq!(t2.size(), 2);
    assert_eq!(t3.size(), 2);
    assert_eq!(t2.get(&pfx("10.0.0.0", 9)), Some(&2));
    assert_eq!(t3.get(&pfx("10.0.0.0", 9)), Some(&3));
}
