//! Wire byte order for record length fields.
//!
//! Length fields are stored big-endian (network order) so an archive written
//! on one host decodes identically on any other. The conversions below work
//! on explicit byte arrays; nothing reinterprets integer storage.

/// Width in bytes of a length field on the wire.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Converts a host-order integer to wire order.
///
/// Identity on big-endian hosts, byte reversal on little-endian hosts.
///
/// # Examples
///
/// ```
/// use xorpack_core::format::wire::{host_to_wire, wire_to_host};
///
/// let n = 0x0102_0304_0506_0708_u64;
/// assert_eq!(wire_to_host(host_to_wire(n)), n);
/// assert_eq!(host_to_wire(n).to_ne_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[inline]
#[must_use]
pub const fn host_to_wire(value: u64) -> u64 {
    value.to_be()
}

/// Converts a wire-order integer back to host order.
#[inline]
#[must_use]
pub const fn wire_to_host(value: u64) -> u64 {
    u64::from_be(value)
}

/// Serializes a length field into its wire bytes.
///
/// # Examples
///
/// ```
/// use xorpack_core::format::wire::encode_u64;
///
/// assert_eq!(encode_u64(5), [0, 0, 0, 0, 0, 0, 0, 5]);
/// ```
#[inline]
#[must_use]
pub const fn encode_u64(value: u64) -> [u8; LENGTH_FIELD_SIZE] {
    value.to_be_bytes()
}

/// Parses a length field from its wire bytes.
#[inline]
#[must_use]
pub const fn decode_u64(bytes: [u8; LENGTH_FIELD_SIZE]) -> u64 {
    u64::from_be_bytes(bytes)
}
