//! Register read and read-modify-write commands
//!
//! Each command is a short, strictly ordered sequence of bus transactions:
//!
//! 1. page select (Clause 22 with a page only)
//! 2. register read (reads, and writes that target a bitfield)
//! 3. register write (writes)
//!
//! The first failing transaction aborts the command. Nothing is retried and
//! nothing is rolled back, so a failure after the page select leaves the PHY
//! on the selected page.

use core::fmt;

use crate::bitfield::BinaryString;
use crate::error::Result;
use crate::hal::mdio::{MdioBus, phy_reg};
use crate::regstr::{BitRange, Operation, RegisterDescriptor, Request};

// =============================================================================
// Configuration
// =============================================================================

/// Access configuration
///
/// ```ignore
/// let config = AccessConfig::new().with_page_select_register(31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessConfig {
    /// Register that receives the page number before a paged access
    pub page_select_reg: u16,
}

impl AccessConfig {
    /// Default configuration (page select at register 22)
    pub const fn new() -> Self {
        Self {
            page_select_reg: phy_reg::PAGE_SELECT,
        }
    }

    /// Use a different page-select register
    #[must_use]
    pub const fn with_page_select_register(mut self, reg: u16) -> Self {
        self.page_select_reg = reg;
        self
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Value read from a register, restricted to the requested bitfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterValue {
    /// Full 16-bit register content
    pub raw: u16,
    /// Requested bitfield, `None` for the whole register
    pub bits: Option<BitRange>,
}

impl RegisterValue {
    /// Field value (right-aligned) or the full register
    pub const fn value(&self) -> u16 {
        match self.bits {
            Some(bits) => bits.extract(self.raw),
            None => self.raw,
        }
    }

    /// Binary rendering of the field, or of bits 15..0
    pub fn binary(&self) -> BinaryString {
        self.bits.unwrap_or(BitRange::FULL).render(self.raw)
    }
}

/// Renders the `<hex> "<binary>"` output line (without newline)
impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x} \"{}\"", self.value(), self.binary())
    }
}

/// Result of a completed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Register content before the write (bitfield writes only)
    pub previous: Option<u16>,
    /// Full register value written
    pub written: u16,
}

/// Result of [`execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A read completed
    Read(RegisterValue),
    /// A write completed
    Write(WriteOutcome),
}

// =============================================================================
// Commands
// =============================================================================

/// Write the page number ahead of a paged Clause-22 access
fn select_page<M: MdioBus>(
    mdio: &mut M,
    desc: &RegisterDescriptor,
    config: &AccessConfig,
) -> Result<bool> {
    let Some(page) = desc.address.page() else {
        return Ok(false);
    };

    let phy_id = desc.address.phy_id();
    #[cfg(feature = "log")]
    log::debug!("{desc}: select page {page} via reg {:#x}", config.page_select_reg);
    mdio.write(phy_id, config.page_select_reg, u16::from(page))?;
    Ok(true)
}

/// Warn that a command died after the page select went through
fn note_partial<T>(result: Result<T>, desc: &RegisterDescriptor, paged: bool) -> Result<T> {
    #[cfg(feature = "log")]
    if let (true, Err(e)) = (paged, &result) {
        log::warn!("{desc}: aborted after page select, PHY left on page: {e}");
    }
    #[cfg(not(feature = "log"))]
    let _ = (desc, paged);
    result
}

/// Read a register (or bitfield) described by `desc`
///
/// # Errors
///
/// The transport error of the first failing transaction.
pub fn read_register<M: MdioBus>(
    mdio: &mut M,
    desc: &RegisterDescriptor,
    config: &AccessConfig,
) -> Result<RegisterValue> {
    let paged = select_page(mdio, desc, config)?;

    let phy_id = desc.address.phy_id();
    let reg = desc.address.reg();
    let raw = note_partial(mdio.read(phy_id, reg), desc, paged)?;

    #[cfg(feature = "log")]
    log::debug!("{desc}: read {phy_id:x}.{reg:x} = {raw:#06x}");

    Ok(RegisterValue {
        raw,
        bits: desc.bits,
    })
}

/// Write `value` to the register (or bitfield) described by `desc`
///
/// A bitfield write reads the register first and only replaces the bits of
/// the field; higher bits of `value` that do not fit are dropped.
///
/// # Errors
///
/// The transport error of the first failing transaction; later
/// transactions are not attempted.
pub fn write_register<M: MdioBus>(
    mdio: &mut M,
    desc: &RegisterDescriptor,
    value: u16,
    config: &AccessConfig,
) -> Result<WriteOutcome> {
    let paged = select_page(mdio, desc, config)?;

    let phy_id = desc.address.phy_id();
    let reg = desc.address.reg();

    let (previous, written) = match desc.bits {
        Some(bits) => {
            let old = note_partial(mdio.read(phy_id, reg), desc, paged)?;
            (Some(old), bits.compose(old, value))
        }
        None => (None, value),
    };

    note_partial(mdio.write(phy_id, reg, written), desc, paged)?;

    #[cfg(feature = "log")]
    match previous {
        Some(old) => log::debug!("{desc}: write {phy_id:x}.{reg:x} {old:#06x} -> {written:#06x}"),
        None => log::debug!("{desc}: write {phy_id:x}.{reg:x} = {written:#06x}"),
    }

    Ok(WriteOutcome { previous, written })
}

/// Run one request
///
/// # Errors
///
/// See [`read_register`] and [`write_register`].
pub fn execute<M: MdioBus>(mdio: &mut M, request: &Request, config: &AccessConfig) -> Result<Outcome> {
    match request.op {
        Operation::Read => read_register(mdio, &request.descriptor, config).map(Outcome::Read),
        Operation::Write(value) => {
            write_register(mdio, &request.descriptor, value, config).map(Outcome::Write)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;
    use crate::error::{Access, Error, TransportError};
    use crate::hal::mdio::c45_phy_id;
    use crate::regstr::{parse_c22, parse_c45};
    use crate::testing::{BusOp, MockMdioBus};

    fn config() -> AccessConfig {
        AccessConfig::new()
    }

    #[test]
    fn default_page_select_register() {
        assert_eq!(AccessConfig::default().page_select_reg, 22);
        assert_eq!(config().with_page_select_register(31).page_select_reg, 31);
    }

    #[test]
    fn bitfield_write_then_read() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(1, 16, 0xfa5a);
        let desc = parse_c22("1.16.12:8").unwrap();

        let outcome = write_register(&mut mdio, &desc, 0x20b, &config()).unwrap();
        assert_eq!(
            outcome,
            WriteOutcome {
                previous: Some(0xfa5a),
                written: 0xeb5a
            }
        );

        let value = read_register(&mut mdio, &desc, &config()).unwrap();
        assert_eq!(value.value(), 0x0b);
        assert_eq!(value.raw, 0xeb5a);
        assert_eq!(value.to_string(), "b \"0 1011\"");
    }

    #[test]
    fn full_read_renders_whole_register() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(0, 1, 0x5a5a);
        let desc = parse_c22("0.1").unwrap();

        let value = read_register(&mut mdio, &desc, &config()).unwrap();
        assert_eq!(value.to_string(), "5a5a \"0101 1010 0101 1010\"");
        assert!(mdio.writes().is_empty());
    }

    #[test]
    fn full_write_skips_read() {
        let mut mdio = MockMdioBus::new();
        let desc = parse_c22("2.0").unwrap();

        let outcome = write_register(&mut mdio, &desc, 0x8000, &config()).unwrap();
        assert_eq!(outcome.previous, None);
        assert_eq!(mdio.ops(), [BusOp::Write {
            phy_id: 2,
            reg: 0,
            value: 0x8000
        }]);
    }

    #[test]
    fn page_select_precedes_access() {
        let mut mdio = MockMdioBus::new();
        let desc = parse_c22("1f.2_3.13:4").unwrap();

        write_register(&mut mdio, &desc, 0x3f, &config()).unwrap();
        assert_eq!(mdio.ops(), [
            BusOp::Write {
                phy_id: 31,
                reg: 22,
                value: 3
            },
            BusOp::Read { phy_id: 31, reg: 2 },
            BusOp::Write {
                phy_id: 31,
                reg: 2,
                value: 0x3f0
            },
        ]);
    }

    #[test]
    fn page_select_register_is_configurable() {
        let mut mdio = MockMdioBus::new();
        let desc = parse_c22("1.2_5").unwrap();
        let config = AccessConfig::new().with_page_select_register(31);

        read_register(&mut mdio, &desc, &config).unwrap();
        assert_eq!(mdio.writes(), [(1, 31, 5)]);
    }

    #[test]
    fn clause45_uses_combined_phy_id() {
        let mut mdio = MockMdioBus::new();
        let phy_id = c45_phy_id(0x10, 1);
        mdio.set_register(phy_id, 0x0002, 0x0020);
        let desc = parse_c45("10.1_0002.5").unwrap();

        let value = read_register(&mut mdio, &desc, &config()).unwrap();
        assert_eq!(value.to_string(), "1 \"1\"");
        assert_eq!(mdio.ops(), [BusOp::Read { phy_id, reg: 2 }]);
    }

    #[test]
    fn page_select_failure_stops_command() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_from(0);
        let desc = parse_c22("1.2_3.4").unwrap();

        let err = write_register(&mut mdio, &desc, 1, &config()).unwrap_err();
        assert_eq!(
            err,
            Error::Transport(TransportError::Access {
                access: Access::Write { value: 3 },
                phy_id: 1,
                reg: 22,
                os_code: crate::testing::MOCK_OS_CODE,
            })
        );
        assert_eq!(mdio.ops().len(), 1);
    }

    #[test]
    fn read_failure_skips_write() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(1, 2, 0xffff);
        mdio.fail_from(1);
        let desc = parse_c22("1.2_3.4").unwrap();

        let err = write_register(&mut mdio, &desc, 0, &config()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        // Page select went through, no write after the failed read
        assert_eq!(mdio.ops().len(), 2);
        assert_eq!(mdio.get_register(1, 22), Some(3));
        assert_eq!(mdio.get_register(1, 2), Some(0xffff));
    }

    #[test]
    fn execute_dispatches_on_operation() {
        let mut mdio = MockMdioBus::new();
        let descriptor = parse_c22("4.9").unwrap();

        let write = Request {
            descriptor,
            op: Operation::Write(0x0300),
        };
        assert!(matches!(
            execute(&mut mdio, &write, &config()).unwrap(),
            Outcome::Write(WriteOutcome {
                previous: None,
                written: 0x0300
            })
        ));

        let read = Request {
            descriptor,
            op: Operation::Read,
        };
        match execute(&mut mdio, &read, &config()).unwrap() {
            Outcome::Read(value) => assert_eq!(value.raw, 0x0300),
            Outcome::Write(_) => panic!("Expected Outcome::Read"),
        }
    }
}
