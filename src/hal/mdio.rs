//! MDIO (Management Data Input/Output) bus abstraction
//!
//! The register tool never drives MDC/MDIO itself. It goes through
//! [`MdioBus`], which a backend implements on top of whatever access path it
//! has: a kernel ioctl (see [`super::linux`]), a MAC's SMI engine, or a
//! simulated register file in tests.

use crate::error::Result;

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY/port address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid MMD device address (5-bit field)
pub const MAX_DEV_ADDR: u8 = 31;

/// Flag marking a PHY id as a Clause-45 (port, device) pair
pub const PHY_ID_C45: u16 = 0x8000;

/// Port address field of a Clause-45 PHY id
pub const PHY_ID_PRTAD_MASK: u16 = 0x03e0;

/// Device address field of a Clause-45 PHY id
pub const PHY_ID_DEVAD_MASK: u16 = 0x001f;

/// Combine a Clause-45 port and device address into one bus PHY id
///
/// Matches the Linux `mdio_phy_id_c45()` encoding: C45 flag, port in bits
/// 9:5, device in bits 4:0.
pub const fn c45_phy_id(prtad: u8, devad: u8) -> u16 {
    PHY_ID_C45
        | (((prtad as u16) << 5) & PHY_ID_PRTAD_MASK)
        | (devad as u16 & PHY_ID_DEVAD_MASK)
}

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO register access
///
/// `phy_id` is either a plain Clause-22 PHY address or a combined Clause-45
/// id from [`c45_phy_id`]. Each call is exactly one bus transaction; backends
/// must not retry on their own.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_id: u16, reg: u16) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_id: u16, reg: u16, value: u16) -> Result<()>;
}

impl<M: MdioBus + ?Sized> MdioBus for &mut M {
    fn read(&mut self, phy_id: u16, reg: u16) -> Result<u16> {
        (**self).read(phy_id, reg)
    }

    fn write(&mut self, phy_id: u16, reg: u16, value: u16) -> Result<()> {
        (**self).write(phy_id, reg, value)
    }
}

// =============================================================================
// PHY Register Definitions
// =============================================================================

/// Clause-22 registers the tool touches on its own
pub mod phy_reg {
    /// Page select register written before a paged access
    ///
    /// Vendor-specific in IEEE 802.3 terms, but 22 (0x16) is where Marvell,
    /// Realtek and most paged PHYs place it.
    pub const PAGE_SELECT: u16 = 22;
}

// =============================================================================
// Unit Tests
// =============================================================================
