//! Clause-45 descriptor grammar: `PHY.DEV_REG[.BIT_H[:BIT_L]]`

use super::{Address, RegisterDescriptor, parse_bits, parse_field, take_until};
use crate::error::{Field, ParseError, ParseResult};
use crate::hal::mdio::{MAX_DEV_ADDR, MAX_PHY_ADDR};

/// Highest MMD device address
pub const MAX_DEV: u32 = MAX_DEV_ADDR as u32;

/// Highest Clause-45 register number
pub const MAX_REG: u32 = 0xffff;

/// Highest accepted bit index
pub const MAX_BIT: u32 = 15;

/// Parse a Clause-45 register descriptor
///
/// # Errors
///
/// The first field error encountered. A missing `.` reports the device
/// address as missing, a missing `_` the register.
pub fn parse_c45(text: &str) -> ParseResult<RegisterDescriptor> {
    let (phy_tok, sep, rest) = take_until(text, &['.']);
    if sep.is_none() {
        return Err(ParseError::MissingField(Field::DeviceAddress));
    }
    let phy = parse_field(phy_tok, 16, 0, MAX_PHY_ADDR as u32, Field::PhyAddress)? as u8;

    let (dev_tok, sep, rest) = take_until(rest, &['_']);
    if sep.is_none() {
        return Err(ParseError::MissingField(Field::Register));
    }
    let dev = parse_field(dev_tok, 16, 0, MAX_DEV, Field::DeviceAddress)? as u8;

    let (reg_tok, sep, rest) = take_until(rest, &['.']);
    let reg = parse_field(reg_tok, 16, 0, MAX_REG, Field::Register)? as u16;

    let bits = match sep {
        Some(_) => Some(parse_bits(rest, MAX_BIT)?),
        None => None,
    };

    Ok(RegisterDescriptor {
        address: Address::Clause45 { phy, dev, reg },
        bits,
    })
}
