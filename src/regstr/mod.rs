//! Register descriptor strings (`REGSTR`)
//!
//! A descriptor names one PHY register and, optionally, a bitfield inside it.
//! Two grammars exist, one per addressing convention:
//!
//! | Clause | Grammar | Example |
//! |--------|---------|---------|
//! | 22 | `PHY.REG[_PAGE][.BIT_H[:BIT_L]]` | `1f.2_3.13:4` |
//! | 45 | `PHY.DEV_REG[.BIT_H[:BIT_L]]` | `10.1_0002.5` |
//!
//! `PHY`, `DEV` and the Clause-45 `REG` are hexadecimal; the Clause-22 `REG`,
//! `PAGE` and the bit indices are decimal. `BIT_L` defaults to `BIT_H`.
//!
//! # Bit index bounds
//!
//! Clause-22 bit indices are accepted up to 31, Clause-45 ones up to 15.
//! Both grammars target 16-bit registers; the wider Clause-22 bound is kept
//! as-is and bits above 15 simply read as zero.
//!
//! Both grammars reject `BIT_H < BIT_L` with
//! [`ParseError::InvertedBitRange`](crate::error::ParseError::InvertedBitRange).

mod c22;
mod c45;
mod descriptor;
mod field;

pub use c22::parse_c22;
pub use c45::parse_c45;
pub use descriptor::{Address, BitRange, Clause, Operation, RegisterDescriptor, Request};
pub use field::{AUTO_RADIX, parse_field};

use crate::error::{Field, ParseError, ParseResult};

/// Split `text` at the first of `separators`
///
/// Returns the token before the separator, the separator itself and the
/// remainder after it. Without a separator the whole text is the token.
fn take_until<'a>(text: &'a str, separators: &[char]) -> (&'a str, Option<char>, &'a str) {
    match text.char_indices().find(|(_, c)| separators.contains(c)) {
        Some((i, sep)) => (&text[..i], Some(sep), &text[i + sep.len_utf8()..]),
        None => (text, None, ""),
    }
}

/// Parse the `BIT_H[:BIT_L]` tail, both indices bounded by `max_bit`
fn parse_bits(text: &str, max_bit: u32) -> ParseResult<BitRange> {
    let (high_tok, sep, rest) = take_until(text, &[':']);

    let high = parse_field(high_tok, 10, 0, max_bit, Field::BitHigh)? as u8;
    if sep.is_none() {
        return Ok(BitRange::new(high, high));
    }

    // BIT_L runs to the end of the string
    let low = parse_field(rest, 10, 0, max_bit, Field::BitLow)? as u8;
    if high < low {
        return Err(ParseError::InvertedBitRange);
    }

    Ok(BitRange::new(high, low))
}

/// Parse a data value (any conventional radix, 16-bit)
///
/// # Errors
///
/// [`ParseError::InvalidField`] or [`ParseError::OutOfRange`] for [`Field::Data`].
pub fn parse_data(text: &str) -> ParseResult<u16> {
    parse_field(text, AUTO_RADIX, 0, 0xffff, Field::Data).map(|v| v as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_until_splits_on_first_separator() {
        assert_eq!(take_until("2_3.13", &['_', '.']), ("2", Some('_'), "3.13"));
        assert_eq!(take_until("2.13", &['_', '.']), ("2", Some('.'), "13"));
        assert_eq!(take_until("13", &[':']), ("13", None, ""));
        assert_eq!(take_until("", &[':']), ("", None, ""));
    }

    #[test]
    fn bits_default_low_to_high() {
        assert_eq!(parse_bits("5", 15), Ok(BitRange::new(5, 5)));
        assert_eq!(parse_bits("13:4", 31), Ok(BitRange::new(13, 4)));
    }

    #[test]
    fn bits_reject_inverted_range() {
        assert_eq!(parse_bits("4:13", 31), Err(ParseError::InvertedBitRange));
    }

    #[test]
    fn bits_low_consumes_rest() {
        assert_eq!(
            parse_bits("13:4:1", 31),
            Err(ParseError::InvalidField(Field::BitLow))
        );
        assert_eq!(parse_bits("13:", 31), Err(ParseError::InvalidField(Field::BitLow)));
    }

    #[test]
    fn data_accepts_any_radix() {
        assert_eq!(parse_data("0x20b"), Ok(0x20b));
        assert_eq!(parse_data("65535"), Ok(0xffff));
        assert_eq!(
            parse_data("0x10000"),
            Err(ParseError::OutOfRange {
                field: Field::Data,
                min: 0,
                max: 0xffff
            })
        );
    }
}
