//! Hardware Abstraction Layer
//!
//! # Modules
//!
//! - [`mdio`]: the [`MdioBus`] access trait, Clause-45 PHY id encoding and
//!   the registers the tool touches itself
//! - [`linux`]: `SIOCGMIIREG`/`SIOCSMIIREG` transport (`std`, Linux only)

pub mod mdio;

#[cfg(all(feature = "std", target_os = "linux"))]
pub mod linux;

pub use mdio::{MdioBus, c45_phy_id, phy_reg};
