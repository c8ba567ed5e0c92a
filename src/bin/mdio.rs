//! `mdio` - read and write Ethernet PHY registers from Linux user space.
//!
//! # Usage
//!
//! ```ignore
//! mdio c22 read eth0 1.0
//! mdio c22 write eth0 1f.16_2.12:8 0x1f
//! mdio c45 read eth0 0.1_0002.15:4
//! ```
//!
//! # Exit status
//!
//! - 0: success
//! - 1: usage or descriptor error
//! - 2: the interface's MDIO transport could not be opened
//! - 3: a register access failed
//!
//! Set `RUST_LOG=debug` to trace every bus transaction on stderr.

use std::{env, process};

#[cfg(target_os = "linux")]
use mdio_tool::{
    AccessConfig, Diagnostic, Error, Invocation, Outcome, Request, SiocMdio, USAGE, execute,
    parse_args,
};

#[cfg(target_os = "linux")]
fn main() {
    init_logger();

    let args: Vec<String> = env::args().skip(1).collect();
    let (device, request) = match parse_args(&args) {
        Ok(Invocation::Run { device, request }) => (device, request),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            return;
        }
        Err(err) => exit_with(&err, None),
    };

    if let Err(err) = run(device, &request) {
        exit_with(&err, Some(device));
    }
}

#[cfg(target_os = "linux")]
fn exit_with(err: &Error, device: Option<&str>) -> ! {
    eprintln!("mdio: {}", Diagnostic::new(err, device));
    if matches!(err, Error::Usage(_) | Error::Parse(_)) {
        eprint!("{USAGE}");
    }
    process::exit(err.exit_code())
}

#[cfg(target_os = "linux")]
fn run(device: &str, request: &Request) -> Result<(), Error> {
    let mut mdio = SiocMdio::open(device)?;
    log::debug!("{}: {:?} {}", mdio.ifname(), request.op, request.descriptor);

    // `mdio` is dropped (socket closed) on every return path
    if let Outcome::Read(value) = execute(&mut mdio, request, &AccessConfig::new())? {
        println!("{value}");
    }

    Ok(())
}

#[cfg(target_os = "linux")]
fn init_logger() {
    let logger = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .without_timestamps()
        .env();

    if let Err(err) = logger.init() {
        eprintln!("mdio: logger: {err}");
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    let _ = env::args();
    eprintln!("mdio: only Linux MII ioctls are supported");
    process::exit(2);
}
