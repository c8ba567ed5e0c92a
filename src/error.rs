//! Error types for MDIO register access
//!
//! Errors are organized by the stage that raises them:
//! - [`UsageError`]: malformed command line (wrong argument count or keyword)
//! - [`ParseError`]: register descriptor or data value rejected
//! - [`TransportError`]: the MDIO transport could not be opened or accessed
//!
//! The unified [`Error`] enum wraps all stage errors and maps each to the
//! exit status reported by the `mdio` binary.

use core::fmt;

// =============================================================================
// Usage Errors
// =============================================================================

/// Command line shape errors
///
/// Raised before any descriptor parsing takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsageError {
    /// Fewer than the four mandatory arguments
    MissingArguments,
    /// First argument is neither `c22` nor `c45`
    UnknownClause,
    /// Second argument is neither `read` nor `write`
    UnknownOperation,
    /// `write` without a DATA argument
    MissingData,
    /// Arguments left over after the command was complete
    UnexpectedArgument,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UsageError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UsageError::MissingArguments => "missing arguments",
            UsageError::UnknownClause => "addressing mode must be c22 or c45",
            UsageError::UnknownOperation => "operation must be read or write",
            UsageError::MissingData => "write requires a DATA argument",
            UsageError::UnexpectedArgument => "unexpected trailing argument",
        }
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Named fields of a register descriptor (plus the write data value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// PHY (port) address
    PhyAddress,
    /// Clause-45 MMD device address
    DeviceAddress,
    /// Register number
    Register,
    /// Clause-22 page
    Page,
    /// High bit of the bitfield
    BitHigh,
    /// Low bit of the bitfield
    BitLow,
    /// Value to write
    Data,
}

impl Field {
    /// Returns the field name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::PhyAddress => "phy address",
            Field::DeviceAddress => "device address",
            Field::Register => "register",
            Field::Page => "page",
            Field::BitHigh => "bit_h",
            Field::BitLow => "bit_l",
            Field::Data => "data",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register descriptor and data value errors
///
/// Parsing stops at the first of these; nothing is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// A separator was absent, so the field after it is missing
    MissingField(Field),
    /// Empty, non-numeric or partially numeric token
    InvalidField(Field),
    /// Value outside the field's inclusive bounds
    OutOfRange {
        /// Offending field
        field: Field,
        /// Lowest accepted value
        min: u32,
        /// Highest accepted value
        max: u32,
    },
    /// `bit_h` is lower than `bit_l`
    InvertedBitRange,
}

impl ParseError {
    /// Returns the field the error refers to, if any
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            ParseError::MissingField(field)
            | ParseError::InvalidField(field)
            | ParseError::OutOfRange { field, .. } => Some(*field),
            ParseError::InvertedBitRange => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingField(field) => write!(f, "regstr: missing {field}"),
            ParseError::InvalidField(field) => write!(f, "regstr: invalid {field}"),
            ParseError::OutOfRange { field, min, max } => {
                write!(f, "regstr: {field}: out of range [{min:x}, {max:x}]")
            }
            ParseError::InvertedBitRange => f.write_str("regstr: bit_h is lower than bit_l"),
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Direction of a failed register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Register read
    Read,
    /// Register write of the carried value
    Write {
        /// Value that was being written
        value: u16,
    },
}

/// MDIO transport errors
///
/// `os_code` is the raw OS error number reported by the backend (0 when the
/// backend has none, e.g. a simulated bus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The transport handle could not be acquired
    Open {
        /// Raw OS error number
        os_code: i32,
    },
    /// Device name is empty, too long or contains a NUL byte
    InvalidDevice,
    /// A register read or write failed
    Access {
        /// Read or write (with value)
        access: Access,
        /// Bus PHY id (Clause-45 ids carry the 0x8000 flag)
        phy_id: u16,
        /// Register number
        reg: u16,
        /// Raw OS error number
        os_code: i32,
    },
}

impl TransportError {
    /// Returns true if the handle was never acquired
    #[must_use]
    pub const fn is_open_failure(&self) -> bool {
        matches!(self, TransportError::Open { .. } | TransportError::InvalidDevice)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Open { os_code } => {
                f.write_str("socket: ")?;
                write_os_error(f, *os_code)
            }
            TransportError::InvalidDevice => f.write_str("invalid device name"),
            TransportError::Access {
                access: Access::Read,
                phy_id,
                reg,
                os_code,
            } => {
                write!(f, "siocgmiireg {phy_id:x}.{reg:x}: ")?;
                write_os_error(f, *os_code)
            }
            TransportError::Access {
                access: Access::Write { value },
                phy_id,
                reg,
                os_code,
            } => {
                write!(f, "siocsmiireg {phy_id:x}.{reg:x} {value:x}: ")?;
                write_os_error(f, *os_code)
            }
        }
    }
}

#[cfg(feature = "std")]
fn write_os_error(f: &mut fmt::Formatter<'_>, os_code: i32) -> fmt::Result {
    write!(f, "{}", std::io::Error::from_raw_os_error(os_code))
}

#[cfg(not(feature = "std"))]
fn write_os_error(f: &mut fmt::Formatter<'_>, os_code: i32) -> fmt::Result {
    write!(f, "os error {os_code}")
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all stage errors for unified error handling.
///
/// ```ignore
/// match result {
///     Err(Error::Parse(ParseError::InvertedBitRange)) => { /* ... */ }
///     Err(Error::Transport(TransportError::Open { .. })) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Command line error
    Usage(UsageError),
    /// Descriptor or data error
    Parse(ParseError),
    /// Transport error
    Transport(TransportError),
}

impl Error {
    /// Process exit status for this error
    ///
    /// 1 for usage and parse errors, 2 when the transport could not be
    /// opened, 3 when a register access failed.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::Parse(_) => 1,
            Error::Transport(e) if e.is_open_failure() => 2,
            Error::Transport(_) => 3,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(e) => write!(f, "usage: {e}"),
            Error::Parse(e) => fmt::Display::fmt(e, f),
            Error::Transport(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl From<UsageError> for Error {
    fn from(e: UsageError) -> Self {
        Error::Usage(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl core::error::Error for Error {}

/// Result type alias for MDIO tool operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for descriptor parsing
pub type ParseResult<T> = core::result::Result<T, ParseError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn usage_error_as_str_non_empty() {
        let variants = [
            UsageError::MissingArguments,
            UsageError::UnknownClause,
            UsageError::UnknownOperation,
            UsageError::MissingData,
            UsageError::UnexpectedArgument,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "UsageError::{variant:?} has empty string");
        }
    }

    #[test]
    fn parse_error_names_the_field() {
        let err = ParseError::InvalidField(Field::BitHigh);
        assert_eq!(format!("{err}"), "regstr: invalid bit_h");
        assert_eq!(err.field(), Some(Field::BitHigh));
        assert_eq!(ParseError::InvertedBitRange.field(), None);
    }

    #[test]
    fn out_of_range_prints_hex_bounds() {
        let err = ParseError::OutOfRange {
            field: Field::PhyAddress,
            min: 0,
            max: 0x1f,
        };
        assert_eq!(format!("{err}"), "regstr: phy address: out of range [0, 1f]");
    }

    #[test]
    fn access_error_identifies_address() {
        let err = TransportError::Access {
            access: Access::Write { value: 0xeb5a },
            phy_id: 0x1f,
            reg: 0x10,
            os_code: 5,
        };
        let display = format!("{err}");
        assert!(display.starts_with("siocsmiireg 1f.10 eb5a: "));
    }

    #[test]
    fn exit_codes_by_tier() {
        assert_eq!(Error::from(UsageError::MissingData).exit_code(), 1);
        assert_eq!(Error::from(ParseError::InvertedBitRange).exit_code(), 1);
        assert_eq!(Error::from(TransportError::Open { os_code: 1 }).exit_code(), 2);
        assert_eq!(Error::from(TransportError::InvalidDevice).exit_code(), 2);
        let access = TransportError::Access {
            access: Access::Read,
            phy_id: 0,
            reg: 1,
            os_code: 19,
        };
        assert_eq!(Error::from(access).exit_code(), 3);
    }

    #[test]
    fn error_from_parse_error() {
        let err: Error = ParseError::MissingField(Field::Register).into();

        match err {
            Error::Parse(e) => assert_eq!(e, ParseError::MissingField(Field::Register)),
            _ => panic!("Expected Error::Parse"),
        }
    }

    #[test]
    fn usage_error_display_prefixed() {
        let display = format!("{}", Error::Usage(UsageError::UnknownClause));
        assert!(display.starts_with("usage: "));
        assert!(display.contains("c22"));
    }
}
