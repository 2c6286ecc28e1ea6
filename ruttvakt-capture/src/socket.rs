//! The kernel routing-notification endpoint as an explicit resource.

use std::io;
use std::sync::atomic::{AtomicI32, Ordering};

use tracing::debug;

const CLOSED_FD: i32 = -1;

/// Raw routing socket with an idempotent close.
///
/// Both the shutdown path and the final cleanup path may close the
/// socket; the descriptor is swapped out atomically so only the first
/// close reaches the kernel.
pub struct RouteSocket {
    fd: AtomicI32,
}

impl RouteSocket {
    /// Opens the raw routing-protocol socket. Read-only usage: the
    /// kernel pushes a copy of every routing notification to each open
    /// route socket.
    pub fn open() -> io::Result<Self> {
        // SAFETY: plain syscall, no pointers involved.
        let fd = unsafe { libc::socket(libc::AF_ROUTE, libc::SOCK_RAW, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        debug!(fd, "route socket opened");
        Ok(Self {
            fd: AtomicI32::new(fd),
        })
    }

    /// Waits up to `timeout_ms` for the socket to become readable.
    /// `Ok(false)` means the timeout elapsed; an interrupted wait counts
    /// as a timeout so the caller re-checks its stop flag.
    pub fn poll_readable(&self, timeout_ms: i32) -> io::Result<bool> {
        let fd = self.fd.load(Ordering::Acquire);
        if fd == CLOSED_FD {
            return Err(io::ErrorKind::NotConnected.into());
        }
        let mut pollfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: pollfd is a valid single-element array for the call.
        let ready = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(ready > 0)
    }

    /// Reads one datagram into `buf`, returning the byte count.
    pub fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        let fd = self.fd.load(Ordering::Acquire);
        if fd == CLOSED_FD {
            return Err(io::ErrorKind::NotConnected.into());
        }
        // SAFETY: buf is valid for buf.len() writable bytes.
        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }

    /// Closes the socket. Safe to call any number of times.
    pub fn close(&self) {
        let fd = self.fd.swap(CLOSED_FD, Ordering::AcqRel);
        if fd != CLOSED_FD {
            debug!(fd, "route socket closed");
            // SAFETY: fd came from socket() and has not been closed yet.
            unsafe { libc::close(fd) };
        }
    }

    pub fn is_closed(&self) -> bool {
        self.fd.load(Ordering::Acquire) == CLOSED_FD
    }
}

impl Drop for RouteSocket {
    fn drop(&mut self) {
        self.close();
    }
}
