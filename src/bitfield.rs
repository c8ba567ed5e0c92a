//! Bitfield codec
//!
//! Mask construction, field extraction, read-modify-write composition and
//! nibble-grouped binary rendering for 16-bit PHY registers.
//!
//! Bit indices may go up to 31 (the Clause-22 descriptor bound), so masks are
//! built as `u32`. Register bits above 15 therefore read as zero and any
//! write to them is dropped when the result is narrowed back to 16 bits.

use core::fmt;

use crate::regstr::BitRange;

/// Highest bit index a mask can cover
pub const MAX_BIT: u8 = 31;

/// Mask with bits `[low, high]` set
///
/// # Panics
///
/// Defined for `low <= high <= 31`. A `high` above 31 overflows the shift;
/// an inverted range trips a debug assertion.
pub const fn mask_for(high: u8, low: u8) -> u32 {
    debug_assert!(low <= high && high <= MAX_BIT);
    (u32::MAX >> (MAX_BIT - high)) & (u32::MAX << low)
}

/// Extract the field `[low, high]` of `value`, right-aligned
///
/// # Panics
///
/// Same precondition as [`mask_for`]: `low <= high <= 31`.
pub const fn extract_field(value: u16, high: u8, low: u8) -> u16 {
    ((value as u32 & mask_for(high, low)) >> low) as u16
}

/// Replace the field `[low, high]` of `old` with the low bits of `new`
///
/// Bits of `new` that do not fit the field width are silently dropped; bits
/// of `old` outside the field are kept.
///
/// # Panics
///
/// Same precondition as [`mask_for`]: `low <= high <= 31`.
pub const fn compose_write(old: u16, new: u16, high: u8, low: u8) -> u16 {
    let mask = mask_for(high, low);
    ((old as u32 & !mask) | (((new as u32) << low) & mask)) as u16
}

// =============================================================================
// Binary Rendering
// =============================================================================

/// Longest rendering: 32 digits and 7 group separators
const BINARY_CAPACITY: usize = 39;

/// Binary rendering of a bit range, produced fresh per call
///
/// Holds ASCII `'0'`/`'1'` digits, most significant first, with a space
/// after every fourth digit counted from the low end of the range.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BinaryString {
    buf: [u8; BINARY_CAPACITY],
    len: usize,
}

impl BinaryString {
    const fn empty() -> Self {
        Self {
            buf: [0; BINARY_CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// The rendered text
    pub fn as_str(&self) -> &str {
        // Only ASCII digits and spaces are ever pushed
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

impl fmt::Display for BinaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BinaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Render bits `high` down to `low` of `value` in nibble groups
///
/// Grouping is anchored to `low`, so the leading group may be short:
/// `[13, 5]` of `0x5a5a` renders as `"0 1101 0010"`.
///
/// # Panics
///
/// Defined for `low <= high <= 31`; a `high` above 31 overflows the shift.
pub fn render_binary(value: u16, high: u8, low: u8) -> BinaryString {
    let value = value as u32;
    let mut out = BinaryString::empty();

    for bit in (low..=high).rev() {
        out.push(if value & (1 << bit) != 0 { b'1' } else { b'0' });
        if bit != low && (bit - low) % 4 == 0 {
            out.push(b' ');
        }
    }

    out
}

impl BitRange {
    /// Mask of this range
    pub const fn mask(&self) -> u32 {
        mask_for(self.high, self.low)
    }

    /// Extract this range from `value`
    pub const fn extract(&self, value: u16) -> u16 {
        extract_field(value, self.high, self.low)
    }

    /// Replace this range of `old` with `new`
    pub const fn compose(&self, old: u16, new: u16) -> u16 {
        compose_write(old, new, self.high, self.low)
    }

    /// Render this range of `value`
    pub fn render(&self, value: u16) -> BinaryString {
        render_binary(value, self.high, self.low)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
