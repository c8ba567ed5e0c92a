//! Command line façade
//!
//! `mdio (c22|c45) (read|write) DEVICE REGSTR [DATA]`
//!
//! This module only checks the shape of the command line and turns it into a
//! [`Request`]; descriptor grammar lives in [`crate::regstr`], bus access in
//! [`crate::command`].

use core::fmt;

use crate::error::{Error, Result, UsageError};
use crate::regstr::{Clause, Operation, RegisterDescriptor, Request, parse_data};

/// Usage text printed on `--help` and after usage or parse errors
pub const USAGE: &str = "\
Usage:
  mdio (c22|c45) read DEVICE REGSTR
  mdio (c22|c45) write DEVICE REGSTR DATA
where
  c22: REGSTR: phy.reg[_page][.bit_h[:bit_l]]
  c45: REGSTR: phy.dev_reg[.bit_h[:bit_l]]
  phy, dev and the c45 reg are hex; the c22 reg, page and bits are decimal
  DATA: 16-bit value, 0x prefix for hex, leading 0 for octal
";

/// What the command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Print usage and exit successfully
    Help,
    /// Access a register through `device`
    Run {
        /// Network interface whose MDIO bus is used
        device: &'a str,
        /// Parsed request
        request: Request,
    },
}

/// Parse the arguments following the program name
///
/// The DATA value is parsed before the descriptor, so a bad value is
/// reported even when the descriptor is also malformed.
///
/// # Errors
///
/// [`UsageError`] for a malformed command line, the first
/// [`ParseError`](crate::error::ParseError) for a bad descriptor or value.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation<'_>> {
    let first = args.first().map(|arg| arg.as_ref());
    if matches!(first, Some("-h" | "--help" | "help")) {
        return Ok(Invocation::Help);
    }

    let [clause, op, device, regstr, rest @ ..] = args else {
        return Err(UsageError::MissingArguments.into());
    };

    let clause = Clause::from_keyword(clause.as_ref()).ok_or(UsageError::UnknownClause)?;

    let op = match (op.as_ref(), rest) {
        ("read", []) => Operation::Read,
        ("write", [data]) => Operation::Write(parse_data(data.as_ref())?),
        ("write", []) => return Err(UsageError::MissingData.into()),
        ("read" | "write", _) => return Err(UsageError::UnexpectedArgument.into()),
        _ => return Err(UsageError::UnknownOperation.into()),
    };

    let descriptor = RegisterDescriptor::parse(clause, regstr.as_ref())?;

    Ok(Invocation::Run {
        device: device.as_ref(),
        request: Request { descriptor, op },
    })
}

/// Error line as reported by the `mdio` binary
///
/// Transport errors name the interface they happened on
/// (`eth0: siocgmiireg 1f.2: ...`); usage and parse errors are printed as-is.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    error: &'a Error,
    device: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Pair `error` with the interface in use, if the command got that far
    pub const fn new(error: &'a Error, device: Option<&'a str>) -> Self {
        Self { error, device }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.device, self.error) {
            (Some(device), Error::Transport(e)) => write!(f, "{device}: {e}"),
            _ => fmt::Display::fmt(self.error, f),
        }
    }
}
