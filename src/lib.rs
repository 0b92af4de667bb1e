//! An in-memory, longest-prefix-match routing table for IPv4 and IPv6 CIDR
//! prefixes, keyed by a multibit (8-bit stride) trie with an ART-style
//! per-level index, path compression, and copy-on-write persistence.
//!
//! The entry point is [`Table`] (and its unit-valued alias [`PrefixSet`]):
//! construct one with [`Table::new`], insert/delete/look up prefixes, and
//! query containment, overlap, and sub/supernet relationships.

#![allow(clippy::type_complexity)]

pub mod af;
pub mod art;
pub mod array;
pub mod bitset;
pub mod config;
pub mod dump;
pub mod error;
pub mod node;
pub mod prefix;
pub mod table;
mod trie;

pub use af::AddressFamily;
pub use config::TableConfig;
pub use dump::DumpListNode;
pub use error::TrieInvariantError;
pub use prefix::Prefix;
pub use table::{PrefixSet, Table};
