mod common;

use cidr_trie::Table;
use common::{init, pfx};

#[test]
fn subnets_ordering() {
    init();
    let mut t: Table<()> = Table::new();
    for (a, b) in [
        ("10.0.0.0", 8),
        ("10.0.0.0", 24),
        ("10.0.1.0", 24),
        ("10.128.0.0", 9),
    ] {
        t.insert(&pfx(a, b), ());
    }
    let got: Vec<(String, u8)> = t
        .subnets(&pfx("10.0.0.0", 8))
        .into_iter()
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
fn supernets_most_specific_first() {
    init();
    let mut t: Table<&'static str> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), "a8");
    t.insert(&pfx("10.0.0.0", 16), "a16");
    t.insert(&pfx("10.0.0.0", 24), "a24");

    let got: Vec<&str> = t
        .supernets(&pfx("10.0.0.128", 25))
        .into_iter()
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(got, vec!["a24", "a16", "a8"]);
}

#[test]
fn supernets_of_an_unrelated_prefix_is_empty() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 8), ());
    assert!(t.supernets(&pfx("192.0.2.0", 24)).is_empty());
}

#[test]
fn subnets_of_a_leaf_prefix_is_just_itself() {
    init();
    let mut t: Table<&'static str> = Table::new();
    t.insert(&pfx("203.0.113.0", 24), "v");
    let got = t.subnets(&pfx("203.0.113.0", 24));
    assert_eq!(got, vec![(pfx("203.0.113.0", 24), &"v")]);
}

#[test]
fn subnets_excludes_siblings_outside_the_query_prefix() {
    init();
    let mut t: Table<()> = Table::new();
    t.insert(&pfx("10.0.0.0", 24), ());
    t.insert(&pfx("10.0.1.0", 24), ());
    let got = t.subnets(&pfx("10.0.0.0", 24));
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].0, pfx("10.0.0.0", 24));
}

#[test]
fn supernets_includes_fringe_and_leaf_ancestors() {
    init();
    let mut t: Table<&'static str> = Table::new();
    t.insert(&pfx("2001:db8::", 32), "doc");
    t.insert(&pfx("2001:db8:dead::", 48), "dead");

    let got: Vec<&str> = t
        .supernets(&pfx("2001:db8:dead:beef::", 64))
        .into_iter()
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(got, vec!["dead", "doc"]);
}
