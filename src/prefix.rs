//! The canonical, address-family-generic CIDR prefix type the trie
//! operates on internally, plus conversions to and from the public-facing
//! [`inetnum::addr::Prefix`].

use crate::af::AddressFamily;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A canonical `(addr, bits)` pair.
///
/// "Canonical" means every bit at position `>= bits` is zero — see
/// [`Prefix::new`]. The trie never stores a non-canonical prefix; callers
/// that build one by hand (rather than going through `new`) are
/// responsible for upholding that invariant themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "AF: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Prefix<AF: AddressFamily> {
    addr: AF,
    bits: u8,
}

impl<AF: AddressFamily> Prefix<AF> {
    /// Build a canonical prefix, masking off any host bits in `addr`.
    ///
    /// Returns `None` if `bits` exceeds the address family's width — the
    /// invalid-prefix case, which callers turn into a silent no-op on
    /// mutating operations.
    pub fn new(addr: AF, bits: u8) -> Option<Self> {
        if bits > AF::MAX_DEPTH * 8 {
            return None;
        }
        Some(Prefix {
            addr: addr.mask(bits),
            bits,
        })
    }

    /// Build a prefix without validating or masking. Used internally once
    /// a caller has already established both invariants (e.g.
    /// reconstructing a prefix from a walked trie path, which is masked by
    /// construction).
    pub(crate) fn new_unchecked(addr: AF, bits: u8) -> Self {
        Prefix { addr, bits }
    }

    #[inline]
    pub fn addr(&self) -> AF {
        self.addr
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// `floor((bits - 1) / 8)`, the depth (octet index) at which this
    /// prefix's trailing, possibly partial, octet is installed into a
    /// node's prefix table. Undefined (returns 0) for `bits == 0`; callers
    /// special-case the default route separately since it is installed at
    /// depth 0 regardless.
    #[inline]
    pub fn last_octet_depth(&self) -> u8 {
        if self.bits == 0 {
            0
        } else {
            (self.bits - 1) / 8
        }
    }

    /// `bits - last_octet_depth*8 ∈ [1, 8]`, the number of significant
    /// bits within the trailing octet (`8` for `bits == 0` is never
    /// consulted — the default route is installed at prefix index `1`
    /// directly).
    #[inline]
    pub fn last_bits(&self) -> u8 {
        if self.bits == 0 {
            0
        } else {
            self.bits - self.last_octet_depth() * 8
        }
    }

    /// `true` if this prefix's length lands exactly on an octet boundary
    /// (`bits` is a multiple of 8, and not the root `/0`).
    #[inline]
    pub fn is_octet_aligned(&self) -> bool {
        self.bits > 0 && self.bits % 8 == 0
    }

    /// `true` if `self` covers `other`, i.e. `other` is contained within
    /// `self` (`self.bits <= other.bits` and they agree on `self.bits`
    /// leading bits).
    pub fn covers(&self, other: &Prefix<AF>) -> bool {
        self.bits <= other.bits && self.addr.covers(self.bits, &other.addr)
    }

    /// `true` if `self` contains the address `addr`.
    pub fn contains_addr(&self, addr: &AF) -> bool {
        self.addr.covers(self.bits, addr)
    }

    /// `true` if `self` and `other` overlap: either contains the other's
    /// network address up to the shorter length.
    pub fn overlaps(&self, other: &Prefix<AF>) -> bool {
        let shorter = self.bits.min(other.bits);
        self.addr.covers(shorter, &other.addr)
    }
}

impl<AF: AddressFamily> fmt::Debug for Prefix<AF> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr.into_ip_addr(), self.bits)
    }
}

impl<AF: AddressFamily> fmt::Display for Prefix<AF> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr.into_ip_addr(), self.bits)
    }
}

/// Conversion from the public [`inetnum::addr::Prefix`] to our internal,
/// address-family-specific representation. Returns `None` if the public
/// prefix's family does not match `AF` (e.g. handing an IPv6 prefix to the
/// IPv4 side of a [`crate::table::Table`]).
impl Prefix<Ipv4Addr> {
    pub fn from_public(pfx: &inetnum::addr::Prefix) -> Option<Self> {
        match pfx.addr() {
            std::net::IpAddr::V4(addr) => Prefix::new(addr, pfx.len()),
            std::net::IpAddr::V6(_) => None,
        }
    }

    pub fn to_public(self) -> inetnum::addr::Prefix {
        inetnum::addr::Prefix::new(self.addr.into_ip_addr(), self.bits)
            .expect("canonical internal prefix is always a valid public prefix")
    }
}

impl Prefix<Ipv6Addr> {
    pub fn from_public(pfx: &inetnum::addr::Prefix) -> Option<Self> {
        match pfx.addr() {
            std::net::IpAddr::V6(addr) => Prefix::new(addr, pfx.len()),
            std::net::IpAddr::V4(_) => None,
        }
    }

    pub fn to_public(self) -> inetnum::addr::Prefix {
        inetnum::addr::Prefix::new(self.addr.into_ip_addr(), self.bits)
            .expect("canonical internal prefix is always a valid public prefix")
    }
}
