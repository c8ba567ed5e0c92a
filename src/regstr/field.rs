//! Bounded numeric field parsing
//!
//! Every descriptor field (and the write data value) goes through
//! [`parse_field`]: the token must be one unsigned integer, consumed
//! completely, and must fall inside the field's inclusive bounds.

use crate::error::{Field, ParseError, ParseResult};

/// Radix value requesting prefix auto-detection (`0x` hex, `0` octal, else decimal)
pub const AUTO_RADIX: u32 = 0;

const MIN_RADIX: u32 = 2;
const MAX_RADIX: u32 = 36;

/// Parse `token` as an unsigned integer in `radix` bounded by `[min, max]`
///
/// With [`AUTO_RADIX`] the radix follows the conventional prefix. Radix 16
/// also accepts an optional `0x`/`0X` prefix. Signs, whitespace and trailing
/// characters are rejected.
///
/// # Errors
///
/// [`ParseError::InvalidField`] for empty or non-numeric tokens and for a
/// `radix` that is neither [`AUTO_RADIX`] nor within `2..=36`,
/// [`ParseError::OutOfRange`] when the value (or an overflow) exceeds the bounds.
pub fn parse_field(token: &str, radix: u32, min: u32, max: u32, field: Field) -> ParseResult<u32> {
    if radix != AUTO_RADIX && !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(ParseError::InvalidField(field));
    }

    let (digits, radix) = split_radix(token, radix);

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidField(field));
    }

    let out_of_range = ParseError::OutOfRange { field, min, max };

    // Only overflow is left once every digit is known valid
    let value = u32::from_str_radix(digits, radix).map_err(|_| out_of_range)?;
    if value < min || value > max {
        return Err(out_of_range);
    }

    Ok(value)
}

/// Strip the radix prefix and resolve auto-detection
fn split_radix(token: &str, radix: u32) -> (&str, u32) {
    let hex = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"));

    match (radix, hex) {
        (AUTO_RADIX | 16, Some(rest)) => (rest, 16),
        (AUTO_RADIX, None) if token.len() > 1 && token.starts_with('0') => (&token[1..], 8),
        (AUTO_RADIX, None) => (token, 10),
        _ => (token, radix),
    }
}
