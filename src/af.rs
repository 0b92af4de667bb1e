//! Address family abstraction.
//!
//! The trie walks an address one octet (8 bits) at a time regardless of
//! whether the address is 4 or 16 octets wide. [`AddressFamily`] is the
//! narrow capability the engine needs from an address type to do that: how
//! many octets it has, and how to get at octet `depth`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A concrete IP address family usable as the trie's address type.
///
/// There are exactly two implementations, [`Ipv4Addr`] and [`Ipv6Addr`],
/// selecting the `root4`/`root6` side of a [`crate::table::Table`]. Unlike
/// the upstream store this crate is descended from, addresses are walked as
/// plain byte slices rather than as opaque integers: a routing trie only
/// ever needs one octet at a time, so there is no need to keep a 32- or
/// 128-bit integer around and shift it.
pub trait AddressFamily:
    Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
    /// Number of octets in an address of this family (4 or 16).
    const MAX_DEPTH: u8;

    /// Short name used in `Debug`/error output ("IPv4" / "IPv6").
    const NAME: &'static str;

    /// The octet at position `depth` (`0`-based, `depth < MAX_DEPTH`).
    fn octet(&self, depth: u8) -> u8;

    /// Build an address from its big-endian octets.
    ///
    /// `octets.len()` must equal `MAX_DEPTH`; only the trie's own
    /// canonicalization code calls this, always with a correctly sized
    /// slice, so this is allowed to be a plain indexing operation rather
    /// than a fallible conversion.
    fn from_octets(octets: &[u8]) -> Self;

    /// Zero out every bit at position `>= bits`, leaving a canonical
    /// network address for a prefix of length `bits`.
    fn mask(&self, bits: u8) -> Self;

    /// Convert to a `std::net::IpAddr` for display and for interop with
    /// [`inetnum::addr::Prefix`].
    fn into_ip_addr(self) -> IpAddr;

    /// `true` if `other` is within `self`'s prefix of length `bits`, i.e.
    /// the two addresses agree on their leading `bits` bits.
    fn covers(&self, bits: u8, other: &Self) -> bool {
        if bits == 0 {
            return true;
        }
        let full_octets = (bits / 8) as usize;
        for i in 0..full_octets {
            if self.octet(i as u8) != other.octet(i as u8) {
                return false;
            }
        }
        let rem = bits % 8;
        if rem == 0 {
            return true;
        }
        let shift = 8 - rem;
        (self.octet(full_octets as u8) >> shift)
            == (other.octet(full_octets as u8) >> shift)
    }
}

impl AddressFamily for Ipv4Addr {
    const MAX_DEPTH: u8 = 4;
    const NAME: &'static str = "IPv4";

    fn octet(&self, depth: u8) -> u8 {
        self.octets()[depth as usize]
    }

    fn from_octets(octets: &[u8]) -> Self {
        Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3])
    }

    fn mask(&self, bits: u8) -> Self {
        if bits >= 32 {
            return *self;
        }
        let bits32 = u32::from(*self);
        let masked = if bits == 0 {
            0
        } else {
            bits32 & (u32::MAX << (32 - bits))
        };
        Ipv4Addr::from(masked)
    }

    fn into_ip_addr(self) -> IpAddr {
        IpAddr::V4(self)
    }
}

impl AddressFamily for Ipv6Addr {
    const MAX_DEPTH: u8 = 16;
    const NAME: &'static str = "IPv6";

    fn octet(&self, depth: u8) -> u8 {
        self.octets()[depth as usize]
    }

    fn from_octets(octets: &[u8]) -> Self {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(octets);
        Ipv6Addr::from(buf)
    }

    fn mask(&self, bits: u8) -> Self {
        if bits >= 128 {
            return *self;
        }
        let bits128 = u128::from(*self);
        let masked = if bits == 0 {
            0
        } else {
            bits128 & (u128::MAX << (128 - bits))
        };
        Ipv6Addr::from(masked)
    }

    fn into_ip_addr(self) -> IpAddr {
        IpAddr::V6(self)
    }
}

/// `true` if `addr` looks like an IPv4-mapped IPv6 address (`::ffff:0:0/96`).
///
/// The engine never consults this itself — unmapping is the caller's job —
/// it's exposed for callers that want to validate their own input before
/// inserting into the IPv6 side.
pub fn is_v4_mapped(addr: &Ipv6Addr) -> bool {
    let o = addr.octets();
    o[..10] == [0u8; 10] && o[10..12] == [0xff, 0xff]
}
