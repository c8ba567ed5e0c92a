//! MDIO register tool
//!
//! Reads and writes Ethernet PHY management registers in IEEE 802.3
//! Clause-22 or Clause-45 addressing, down to single bitfields.
//!
//! # Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Descriptors** ([`regstr`]): parse `REGSTR` text into a validated
//!    [`RegisterDescriptor`]
//! 2. **Bitfields** ([`bitfield`]): masks, read-modify-write composition and
//!    grouped binary rendering
//! 3. **Commands** ([`command`]): page select, read, read-modify-write over an
//!    [`MdioBus`]
//! 4. **HAL** ([`hal`]): the [`MdioBus`] trait and, on Linux, the
//!    `SIOCxMIIREG` transport
//! 5. **CLI** ([`cli`]): argument shape checks for the `mdio` binary
//!
//! Layers 1-3 are `no_std` and allocation free; bring your own [`MdioBus`]
//! to use them on a target.
//!
//! # Features
//!
//! - `std` (default): Linux transport, logging, the `mdio` binary
//! - `log`: per-transaction `debug` records through the `log` facade
//! - `defmt`: `defmt::Format` for error and descriptor types
//!
//! # Example
//!
//! ```ignore
//! use mdio_tool::{AccessConfig, SiocMdio, parse_c22, write_register};
//!
//! let mut mdio = SiocMdio::open("eth0")?;
//!
//! // Bits 12:8 of register 16, page 2, PHY 0x1f
//! let desc = parse_c22("1f.16_2.12:8")?;
//! write_register(&mut mdio, &desc, 0x0b, &AccessConfig::new())?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::std_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::module_name_repetitions
)]

#[cfg(feature = "std")]
extern crate std;

// =============================================================================
// Modules
// =============================================================================

pub mod bitfield;
pub mod cli;
pub mod command;
pub mod error;
pub mod hal;
pub mod regstr;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use bitfield::{BinaryString, compose_write, extract_field, mask_for, render_binary};
pub use cli::{Diagnostic, Invocation, USAGE, parse_args};
pub use command::{
    AccessConfig, Outcome, RegisterValue, WriteOutcome, execute, read_register, write_register,
};
pub use error::{
    Access, Error, Field, ParseError, ParseResult, Result, TransportError, UsageError,
};
pub use hal::mdio::{MdioBus, c45_phy_id};
pub use regstr::{
    Address, BitRange, Clause, Operation, RegisterDescriptor, Request, parse_c22, parse_c45,
    parse_data, parse_field,
};

#[cfg(all(feature = "std", target_os = "linux"))]
pub use hal::linux::SiocMdio;
