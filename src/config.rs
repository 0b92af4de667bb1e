//! Construction-time configuration.
//!
//! A narrow, non-semantic knob surface for
//! [`crate::table::Table::with_config`]. Nothing here changes trie
//! semantics — only how eagerly the root nodes pre-reserve storage.

/// Construction-time knobs for a [`crate::table::Table`].
///
/// `Default` gives a table that reserves nothing up front, matching
/// `Table::new`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableConfig {
    /// Initial-capacity hint for the IPv4 root's prefix/children vectors.
    pub v4_capacity_hint: usize,
    /// Initial-capacity hint for the IPv6 root's prefix/children vectors.
    pub v6_capacity_hint: usize,
}

impl TableConfig {
    /// A config with no capacity hints — identical in effect to `Table::new`.
    pub fn new() -> Self {
        TableConfig::default()
    }

    /// Set the IPv4 root's capacity hint.
    pub fn with_v4_capacity_hint(mut self, hint: usize) -> Self {
        self.v4_capacity_hint = hint;
        self
    }

    /// Set the IPv6 root's capacity hint.
    pub fn with_v6_capacity_hint(mut self, hint: usize) -> Self {
        self.v6_capacity_hint = hint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_hints() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.v4_capacity_hint, 0);
        assert_eq!(cfg.v6_capacity_hint, 0);
    }

    #[test]
    fn builder_sets_hints() {
        let cfg = TableConfig::new()
            .with_v4_capacity_hint(1_000_000)
            .with_v6_capacity_hint(10_000);
        assert_eq!(cfg.v4_capacity_hint, 1_000_000);
        assert_eq!(cfg.v6_capacity_hint, 10_000);
    }
}
