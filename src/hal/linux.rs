//! Linux MDIO transport
//!
//! Uses the MII ioctls (`SIOCGMIIREG` / `SIOCSMIIREG`) on a datagram socket.
//! The kernel routes each request to the MDIO bus of the named network
//! interface; Clause-45 PHY ids (see [`c45_phy_id`](super::mdio::c45_phy_id))
//! are passed through unchanged, drivers that support Clause 45 decode them.
//!
//! The socket is owned by an [`OwnedFd`], so it is closed whenever the
//! [`SiocMdio`] is dropped, on success and error paths alike.

use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use crate::error::{Access, Result, TransportError};
use crate::hal::mdio::MdioBus;

/// Read an MII register
const SIOCGMIIREG: u32 = 0x8948;
/// Write an MII register
const SIOCSMIIREG: u32 = 0x8949;

/// `struct ifreq` with the `struct mii_ioctl_data` member of its union
///
/// The trailing padding brings the union to the kernel's 24 bytes.
#[repr(C)]
struct MiiIfreq {
    ifr_name: [libc::c_char; libc::IFNAMSIZ],
    phy_id: u16,
    reg_num: u16,
    val_in: u16,
    val_out: u16,
    _pad: [u8; 16],
}

/// MDIO access through a network interface's MII ioctls
#[derive(Debug)]
pub struct SiocMdio {
    fd: OwnedFd,
    ifname: [u8; libc::IFNAMSIZ],
    ifname_len: usize,
}

impl SiocMdio {
    /// Open a control socket for interface `ifname`
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidDevice`] if the name is empty, longer than
    /// `IFNAMSIZ - 1` bytes or contains a NUL byte;
    /// [`TransportError::Open`] if the socket cannot be created.
    pub fn open(ifname: &str) -> Result<Self> {
        let (ifname, ifname_len) = encode_ifname(ifname)?;

        // SAFETY: plain socket(2) call, no pointers involved
        let raw = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if raw < 0 {
            return Err(TransportError::Open {
                os_code: last_os_code(),
            }
            .into());
        }

        // SAFETY: `raw` is a freshly created descriptor owned by nobody else
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        Ok(Self {
            fd,
            ifname,
            ifname_len,
        })
    }

    /// Interface name this handle addresses
    pub fn ifname(&self) -> &str {
        // Built from a &str, so always valid UTF-8
        core::str::from_utf8(&self.ifname[..self.ifname_len]).unwrap_or_default()
    }

    fn request(&self, phy_id: u16, reg: u16, value: u16) -> MiiIfreq {
        let mut ifr_name = [0; libc::IFNAMSIZ];
        for (dst, &src) in ifr_name.iter_mut().zip(&self.ifname) {
            *dst = src as libc::c_char;
        }

        MiiIfreq {
            ifr_name,
            phy_id,
            reg_num: reg,
            val_in: value,
            val_out: 0,
            _pad: [0; 16],
        }
    }

    fn ioctl(&self, request: u32, req: &mut MiiIfreq) -> io::Result<()> {
        // SAFETY: `req` is a valid, initialized ifreq-sized buffer that lives
        // for the duration of the call; the kernel only touches its bytes
        let rc = unsafe { libc::ioctl(self.fd.as_raw_fd(), request as _, req as *mut MiiIfreq) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl MdioBus for SiocMdio {
    fn read(&mut self, phy_id: u16, reg: u16) -> Result<u16> {
        let mut req = self.request(phy_id, reg, 0);
        self.ioctl(SIOCGMIIREG, &mut req).map_err(|e| TransportError::Access {
            access: Access::Read,
            phy_id,
            reg,
            os_code: e.raw_os_error().unwrap_or(0),
        })?;

        log::trace!("{}: siocgmiireg {phy_id:x}.{reg:x} -> {:#06x}", self.ifname(), req.val_out);
        Ok(req.val_out)
    }

    fn write(&mut self, phy_id: u16, reg: u16, value: u16) -> Result<()> {
        let mut req = self.request(phy_id, reg, value);
        self.ioctl(SIOCSMIIREG, &mut req).map_err(|e| TransportError::Access {
            access: Access::Write { value },
            phy_id,
            reg,
            os_code: e.raw_os_error().unwrap_or(0),
        })?;

        log::trace!("{}: siocsmiireg {phy_id:x}.{reg:x} <- {value:#06x}", self.ifname());
        Ok(())
    }
}

/// NUL-padded interface name and its length
fn encode_ifname(name: &str) -> Result<([u8; libc::IFNAMSIZ], usize)> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() >= libc::IFNAMSIZ || bytes.contains(&0) {
        return Err(TransportError::InvalidDevice.into());
    }

    let mut out = [0; libc::IFNAMSIZ];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok((out, bytes.len()))
}

fn last_os_code() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn ifreq_matches_kernel_layout() {
        assert_eq!(core::mem::size_of::<MiiIfreq>(), libc::IFNAMSIZ + 24);
        assert_eq!(core::mem::offset_of!(MiiIfreq, phy_id), libc::IFNAMSIZ);
        assert_eq!(core::mem::offset_of!(MiiIfreq, val_out), libc::IFNAMSIZ + 6);
    }

    #[test]
    fn ifname_is_nul_terminated() {
        let (name, len) = encode_ifname("eth0").unwrap();
        assert_eq!(len, 4);
        assert_eq!(name[..5], *b"eth0\0");
    }

    #[test]
    fn ifname_limits() {
        let too_long = "a".repeat(libc::IFNAMSIZ);
        for name in ["", too_long.as_str(), "et\0h0"] {
            assert_eq!(
                encode_ifname(name),
                Err(Error::Transport(TransportError::InvalidDevice)),
                "name {name:?}"
            );
        }
        assert!(encode_ifname(&"a".repeat(libc::IFNAMSIZ - 1)).is_ok());
    }
}
