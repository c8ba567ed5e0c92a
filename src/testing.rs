//! Testing utilities and mock implementations
//!
//! A simulated MDIO bus for exercising the dispatcher on the host.
//!
//! Only available when running `cargo test`.

// The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use crate::error::{Access, Result, TransportError};
use crate::hal::mdio::MdioBus;

/// One bus transaction as seen by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Read { phy_id: u16, reg: u16 },
    Write { phy_id: u16, reg: u16, value: u16 },
}

/// Mock MDIO bus for testing register access without hardware
///
/// Unset registers read as zero. Accesses can be made to fail from the
/// n-th transaction on with [`MockMdioBus::fail_from`].
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_register(1, 0x10, 0xfa5a);
///
/// let desc = parse_c22("1.16.12:8").unwrap();
/// write_register(&mut mdio, &desc, 0x20b, &AccessConfig::new()).unwrap();
/// assert_eq!(mdio.get_register(1, 0x10), Some(0xeb5a));
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_id, reg) -> value
    registers: RefCell<HashMap<(u16, u16), u16>>,
    /// Every transaction, in order, including failed ones
    log: RefCell<Vec<BusOp>>,
    /// Index of the first transaction that fails
    fail_from: RefCell<Option<usize>>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_id: u16, reg: u16, value: u16) {
        self.registers.borrow_mut().insert((phy_id, reg), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_id: u16, reg: u16) -> Option<u16> {
        self.registers.borrow().get(&(phy_id, reg)).copied()
    }

    /// All transactions made so far
    pub fn ops(&self) -> Vec<BusOp> {
        self.log.borrow().clone()
    }

    /// Reads made so far
    pub fn reads(&self) -> Vec<BusOp> {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, BusOp::Read { .. }))
            .collect()
    }

    /// Writes made so far
    pub fn writes(&self) -> Vec<(u16, u16, u16)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                BusOp::Write { phy_id, reg, value } => Some((phy_id, reg, value)),
                BusOp::Read { .. } => None,
            })
            .collect()
    }

    /// Fail every transaction from index `n` (0-based) on
    pub fn fail_from(&self, n: usize) {
        *self.fail_from.borrow_mut() = Some(n);
    }

    /// Record `op` and report whether it must fail
    fn record(&self, op: BusOp) -> bool {
        let mut log = self.log.borrow_mut();
        let index = log.len();
        log.push(op);
        self.fail_from.borrow().is_some_and(|n| index >= n)
    }
}

/// errno the mock reports (EIO)
pub const MOCK_OS_CODE: i32 = 5;

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_id: u16, reg: u16) -> Result<u16> {
        if self.record(BusOp::Read { phy_id, reg }) {
            return Err(TransportError::Access {
                access: Access::Read,
                phy_id,
                reg,
                os_code: MOCK_OS_CODE,
            }
            .into());
        }

        Ok(self.get_register(phy_id, reg).unwrap_or(0))
    }

    fn write(&mut self, phy_id: u16, reg: u16, value: u16) -> Result<()> {
        if self.record(BusOp::Write { phy_id, reg, value }) {
            return Err(TransportError::Access {
                access: Access::Write { value },
                phy_id,
                reg,
                os_code: MOCK_OS_CODE,
            }
            .into());
        }

        self.set_register(phy_id, reg, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_register_reads_zero() {
        let mut mdio = MockMdioBus::new();
        assert_eq!(mdio.read(1, 2).unwrap(), 0);
        assert_eq!(mdio.reads(), [BusOp::Read { phy_id: 1, reg: 2 }]);
    }

    #[test]
    fn write_updates_register() {
        let mut mdio = MockMdioBus::new();
        mdio.write(3, 4, 0xbeef).unwrap();
        assert_eq!(mdio.get_register(3, 4), Some(0xbeef));
        assert_eq!(mdio.writes(), [(3, 4, 0xbeef)]);
    }

    #[test]
    fn injected_failure_leaves_registers_untouched() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_from(1);
        mdio.write(0, 0, 1).unwrap();
        assert!(mdio.write(0, 0, 2).is_err());
        assert_eq!(mdio.get_register(0, 0), Some(1));
        assert_eq!(mdio.ops().len(), 2);
    }
}
