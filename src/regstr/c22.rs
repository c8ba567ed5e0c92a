//! Clause-22 descriptor grammar: `PHY.REG[_PAGE][.BIT_H[:BIT_L]]`

use super::{Address, RegisterDescriptor, parse_bits, parse_field, take_until};
use crate::error::{Field, ParseError, ParseResult};
use crate::hal::mdio::MAX_PHY_ADDR;

/// Highest Clause-22 register number
pub const MAX_REG: u32 = 31;

/// Highest page number
pub const MAX_PAGE: u32 = 255;

/// Highest accepted bit index
pub const MAX_BIT: u32 = 31;

/// Parse a Clause-22 register descriptor
///
/// # Errors
///
/// The first field error encountered, e.g. [`ParseError::MissingField`] when
/// the `.` after the PHY address is absent.
pub fn parse_c22(text: &str) -> ParseResult<RegisterDescriptor> {
    let (phy_tok, sep, rest) = take_until(text, &['.']);
    if sep.is_none() {
        return Err(ParseError::MissingField(Field::Register));
    }
    let phy = parse_field(phy_tok, 16, 0, MAX_PHY_ADDR as u32, Field::PhyAddress)? as u8;

    let (reg_tok, mut sep, mut rest) = take_until(rest, &['_', '.']);
    let reg = parse_field(reg_tok, 10, 0, MAX_REG, Field::Register)? as u8;

    let mut page = None;
    if sep == Some('_') {
        let (page_tok, page_sep, page_rest) = take_until(rest, &['.']);
        page = Some(parse_field(page_tok, 10, 0, MAX_PAGE, Field::Page)? as u8);
        sep = page_sep;
        rest = page_rest;
    }

    let bits = match sep {
        Some(_) => Some(parse_bits(rest, MAX_BIT)?),
        None => None,
    };

    Ok(RegisterDescriptor {
        address: Address::Clause22 { phy, reg, page },
        bits,
    })
}
