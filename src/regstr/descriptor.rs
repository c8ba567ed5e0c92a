//! Parsed register descriptor types

use core::fmt;

use crate::error::ParseResult;
use crate::hal::mdio::c45_phy_id;

/// Register addressing convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Clause {
    /// IEEE 802.3 Clause 22: 32 registers per PHY, optionally paged
    C22,
    /// IEEE 802.3 Clause 45: 65536 registers per MMD device
    C45,
}

impl Clause {
    /// Match the command line keyword (`c22` / `c45`)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "c22" => Some(Clause::C22),
            "c45" => Some(Clause::C45),
            _ => None,
        }
    }
}

/// Register address, tagged by addressing convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// Clause-22 register, with the page to select first (if any)
    Clause22 {
        /// PHY address (0-31)
        phy: u8,
        /// Register number (0-31)
        reg: u8,
        /// Page written to the page-select register before the access
        page: Option<u8>,
    },
    /// Clause-45 register
    Clause45 {
        /// Port address (0-31)
        phy: u8,
        /// MMD device address (0-31)
        dev: u8,
        /// Register number (0-65535)
        reg: u16,
    },
}

impl Address {
    /// Addressing convention of this address
    pub const fn clause(&self) -> Clause {
        match self {
            Address::Clause22 { .. } => Clause::C22,
            Address::Clause45 { .. } => Clause::C45,
        }
    }

    /// PHY id as presented on the bus
    ///
    /// Clause-45 ids combine port and device with the C45 flag set.
    pub const fn phy_id(&self) -> u16 {
        match *self {
            Address::Clause22 { phy, .. } => phy as u16,
            Address::Clause45 { phy, dev, .. } => c45_phy_id(phy, dev),
        }
    }

    /// Register number as presented on the bus
    pub const fn reg(&self) -> u16 {
        match *self {
            Address::Clause22 { reg, .. } => reg as u16,
            Address::Clause45 { reg, .. } => reg,
        }
    }

    /// Page to select before the access (Clause 22 only)
    pub const fn page(&self) -> Option<u8> {
        match *self {
            Address::Clause22 { page, .. } => page,
            Address::Clause45 { .. } => None,
        }
    }
}

/// Inclusive bit range `[high, low]` inside a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitRange {
    /// Most significant bit of the field
    pub high: u8,
    /// Least significant bit of the field
    pub low: u8,
}

impl BitRange {
    /// The whole 16-bit register
    pub const FULL: Self = Self { high: 15, low: 0 };

    /// Create a range; callers guarantee `low <= high <= 31`
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Number of bits covered
    pub const fn width(&self) -> u8 {
        self.high - self.low + 1
    }
}

/// Fully validated register descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDescriptor {
    /// Register address
    pub address: Address,
    /// Targeted bitfield, `None` for the whole register
    pub bits: Option<BitRange>,
}

impl RegisterDescriptor {
    /// Parse `text` with the grammar of `clause`
    ///
    /// # Errors
    ///
    /// The first field error encountered.
    pub fn parse(clause: Clause, text: &str) -> ParseResult<Self> {
        match clause {
            Clause::C22 => super::parse_c22(text),
            Clause::C45 => super::parse_c45(text),
        }
    }
}

impl fmt::Display for RegisterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            Address::Clause22 { phy, reg, page } => {
                write!(f, "{phy:x}.{reg}")?;
                if let Some(page) = page {
                    write!(f, "_{page}")?;
                }
            }
            Address::Clause45 { phy, dev, reg } => write!(f, "{phy:x}.{dev:x}_{reg:x}")?,
        }
        if let Some(bits) = self.bits {
            write!(f, ".{}:{}", bits.high, bits.low)?;
        }
        Ok(())
    }
}

/// Requested access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Read and print the register or field
    Read,
    /// Write the value to the register or field
    Write(u16),
}

/// One command: where to go and what to do there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Target register
    pub descriptor: RegisterDescriptor,
    /// Read or write
    pub op: Operation,
}
