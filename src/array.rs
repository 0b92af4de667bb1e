//! [`Array256`]: a sparse, rank-ordered map from an 8-bit key to a value.
//!
//! Every prefix table and every children table in a [`crate::node::Node`]
//! is one of these. The representation is the textbook popcount-compressed
//! array also used by ART and HAMT-style structures: a 256-bit membership
//! set, plus a `Vec` holding exactly the present values, packed in
//! ascending key order. Looking a key up is "is the bit set, and if so,
//! how many bits are set before it" — one `test` plus one `rank`.

use crate::bitset::Bitset256;

/// A sparse map keyed by a `u16` restricted to `[0, width)`, backed by a
/// [`Bitset256`] membership set and a densely packed value vector.
///
/// `width` is fixed per use site (256 for children tables, 256 again for
/// the prefix table, which is keyed `1..=255` and simply never populates
/// index 0) — the bitset itself is always 256 bits wide, `width` only
/// bounds which indices callers are expected to use.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "T: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Array256<T> {
    bitset: Bitset256,
    values: Vec<T>,
}

impl<T> Array256<T> {
    /// A new, empty array.
    pub fn new() -> Self {
        Array256 {
            bitset: Bitset256::new(),
            values: Vec::new(),
        }
    }

    /// A new, empty array that pre-reserves room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Array256 {
            bitset: Bitset256::new(),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of populated entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Is `key` populated?
    #[inline]
    pub fn contains_key(&self, key: u16) -> bool {
        self.bitset.test(key)
    }

    /// The membership set of populated keys.
    #[inline]
    pub fn bitset(&self) -> &Bitset256 {
        &self.bitset
    }

    /// Look up `key`.
    #[inline]
    pub fn get(&self, key: u16) -> Option<&T> {
        if !self.bitset.test(key) {
            return None;
        }
        self.values.get(self.bitset.rank(key))
    }

    /// Look up `key` mutably.
    #[inline]
    pub fn get_mut(&mut self, key: u16) -> Option<&mut T> {
        if !self.bitset.test(key) {
            return None;
        }
        let rank = self.bitset.rank(key);
        self.values.get_mut(rank)
    }

    /// Insert `value` at `key`. Returns the previous value, if any, in
    /// which case the set remains the same size (an update in place).
    pub fn insert(&mut self, key: u16, value: T) -> Option<T> {
        let rank = self.bitset.rank(key);
        if self.bitset.test(key) {
            Some(std::mem::replace(&mut self.values[rank], value))
        } else {
            self.bitset.set(key);
            self.values.insert(rank, value);
            None
        }
    }

    /// Remove and return the value at `key`, if present.
    pub fn remove(&mut self, key: u16) -> Option<T> {
        if !self.bitset.test(key) {
            return None;
        }
        let rank = self.bitset.rank(key);
        self.bitset.clear(key);
        Some(self.values.remove(rank))
    }

    /// Iterate `(key, &value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &T)> {
        self.bitset.iter().zip(self.values.iter())
    }

    /// Iterate `(key, &mut value)` pairs in ascending key order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u16, &mut T)> {
        self.bitset.iter().zip(self.values.iter_mut())
    }

    /// Iterate populated keys only, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u16> + '_ {
        self.bitset.iter()
    }

    /// Check that the bitset/vector invariant holds. Used by debug assertions and by the crate's own
    /// structural-invariant tests; never called on a hot path.
    pub fn invariant_holds(&self) -> bool {
        self.bitset.count() == self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove_roundtrip() {
        let mut a: Array256<&'static str> = Array256::new();
        assert_eq!(a.insert(10, "ten"), None);
        assert_eq!(a.insert(5, "five"), None);
        assert_eq!(a.insert(200, "two-hundred"), None);
        assert_eq!(a.get(10), Some(&"ten"));
        assert_eq!(a.get(7), None);
        assert_eq!(a.insert(10, "TEN"), Some("ten"));
        assert_eq!(a.len(), 3);
        assert!(a.invariant_holds());

        let keys: Vec<u16> = a.keys().collect();
        assert_eq!(keys, vec![5, 10, 200]);

        assert_eq!(a.remove(5), Some("five"));
        assert_eq!(a.len(), 2);
        assert!(a.invariant_holds());
        assert_eq!(a.remove(5), None);
    }

    #[test]
    fn iteration_order_matches_keys() {
        let mut a: Array256<i32> = Array256::new();
        for k in [50u16, 3, 255, 1, 128] {
            a.insert(k, k as i32);
        }
        let pairs: Vec<(u16, i32)> = a.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            pairs,
            vec![(1, 1), (3, 3), (50, 50), (128, 128), (255, 255)]
        );
    }
}
