//! Blocking read loop over the routing socket.
//!
//! Runs until the socket fails or the stop flag is set. The loop wakes
//! from its poll at a bounded interval to re-check the flag, so a stop
//! request never waits on kernel traffic.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, trace};

use crate::socket::RouteSocket;

/// Upper bound on how long one poll cycle may sleep before the stop flag
/// is re-checked.
const POLL_INTERVAL_MS: i32 = 1000;

/// Reads datagrams and hands each one to `callback` as a borrowed slice.
///
/// The callback must copy what it keeps: the scratch buffer is
/// overwritten by the next read.
pub fn run<F>(socket: &RouteSocket, read_buffer_size: usize, stopping: &AtomicBool, mut callback: F)
where
    F: FnMut(&[u8]),
{
    let mut buf = vec![0u8; read_buffer_size];

    loop {
        if stopping.load(Ordering::Acquire) {
            info!("read loop stopping");
            break;
        }

        match socket.poll_readable(POLL_INTERVAL_MS) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                report_read_end(stopping, &err);
                break;
            }
        }

        match socket.read(&mut buf) {
            Ok(0) => continue,
            Ok(n) => {
                trace!(bytes = n, "routing datagram received");
                callback(&buf[..n]);
            }
            Err(err) => {
                report_read_end(stopping, &err);
                break;
            }
        }
    }
}

/// A read failure during shutdown is the expected effect of closing the
/// socket; anywhere else it is a device error. The stop flag is what
/// tells them apart.
fn report_read_end(stopping: &AtomicBool, err: &io::Error) {
    if stopping.load(Ordering::Acquire) {
        info!("route socket closed, read loop exiting");
    } else {
        error!(error = %err, "route socket read failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn stop_flag_terminates_the_loop() {
        let socket = match RouteSocket::open() {
            Ok(socket) => Arc::new(socket),
            Err(err) => {
                eprintln!("route socket unavailable, skipping: {err}");
                return;
            }
        };
        let stopping = Arc::new(AtomicBool::new(false));
        let seen = Arc::new(AtomicUsize::new(0));

        let reader = {
            let socket = Arc::clone(&socket);
            let stopping = Arc::clone(&stopping);
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                run(&socket, 2048, &stopping, |datagram| {
                    seen.fetch_add(datagram.len(), Ordering::Relaxed);
                });
            })
        };

        std::thread::sleep(Duration::from_millis(100));
        stopping.store(true, Ordering::Release);
        socket.close();

        // One poll interval bounds how long the loop can take to notice.
        reader.join().unwrap();
    }

    #[test]
    fn closed_socket_ends_the_loop_without_stop_flag() {
        let socket = match RouteSocket::open() {
            Ok(socket) => socket,
            Err(err) => {
                eprintln!("route socket unavailable, skipping: {err}");
                return;
            }
        };
        socket.close();
        let stopping = AtomicBool::new(false);
        // poll_readable fails immediately on the closed descriptor.
        run(&socket, 2048, &stopping, |_| {});
    }
}
