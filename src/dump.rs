//! A debug/dump tree view: a snapshot of a table's contents as an
//! ordinary owned tree, useful for `Debug`-formatting, diffing two tables
//! by eye, or handing to a test assertion without borrowing the table.
//!
//! Formatting is left to the `Display` impl below rather than folded into
//! the trie walk itself, so a caller can build the tree once and render it
//! however it likes.

use crate::af::AddressFamily;
use crate::prefix::Prefix;
use std::fmt;

/// One entry of a dumped table: a stored prefix, its value, and the
/// dumped subnets directly and indirectly beneath it.
///
/// "Subnets" here follows the same containment relation as
/// [`crate::table::Table::subnets`] — every other stored prefix contained
/// in `cidr`, not just the immediate trie children, so a `DumpListNode`'s
/// `subnets` vector is the complete subtree rather than one stride.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "AF: serde::Serialize + serde::de::DeserializeOwned, \
                   V: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct DumpListNode<AF: AddressFamily, V> {
    pub cidr: Prefix<AF>,
    pub value: V,
    pub subnets: Vec<DumpListNode<AF, V>>,
}

impl<AF: AddressFamily, V: Clone> DumpListNode<AF, V> {
    /// Build the dump tree for every top-level entry of `all_sorted`,
    /// nesting each prefix's subnets underneath it.
    pub(crate) fn build(entries: &[(Prefix<AF>, V)]) -> Vec<DumpListNode<AF, V>> {
        let mut roots = Vec::new();
        let mut stack: Vec<DumpListNode<AF, V>> = Vec::new();
        for (cidr, value) in entries {
            let node = DumpListNode {
                cidr: *cidr,
                value: value.clone(),
                subnets: Vec::new(),
            };
            while let Some(top) = stack.last() {
                if top.cidr.covers(cidr) {
                    break;
                }
                let done = stack.pop().expect("just peeked");
                match stack.last_mut() {
                    Some(parent) => parent.subnets.push(done),
                    None => roots.push(done),
                }
            }
            stack.push(node);
        }
        while let Some(done) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.subnets.push(done),
                None => roots.push(done),
            }
        }
        roots
    }
}

impl<AF: AddressFamily, V: fmt::Display> fmt::Display for DumpListNode<AF, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node<AF: AddressFamily, V: fmt::Display>(
            node: &DumpListNode<AF, V>,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            writeln!(f, "{}{} -> {}", "  ".repeat(depth), node.cidr, node.value)?;
            for child in &node.subnets {
                write_node(child, f, depth + 1)?;
            }
            Ok(())
        }
        write_node(self, f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn pfx(s: &str, bits: u8) -> Prefix<Ipv4Addr> {
        Prefix::new(s.parse().unwrap(), bits).unwrap()
    }

    #[test]
    fn nests_subnets_under_their_supernet() {
        let entries = vec![
            (pfx("10.0.0.0", 8), "a"),
            (pfx("10.0.0.0", 16), "b"),
            (pfx("10.1.0.0", 16), "c"),
            (pfx("192.0.2.0", 24), "d"),
        ];
        let roots = DumpListNode::build(&entries);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].cidr, pfx("10.0.0.0", 8));
        assert_eq!(roots[0].subnets.len(), 2);
        assert_eq!(roots[1].cidr, pfx("192.0.2.0", 24));
    }
}
