use std::net::{Ipv4Addr, TcpListener};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::LazyLock;

// test binaries run concurrently, so each process starts from its own window
static NEXT_PORT: LazyLock<AtomicU16> = LazyLock::new(||
    AtomicU16::new(20000 + (std::process::id() % 2000) as u16 * 16)
);

/// A port that was free a moment ago. Not reserved: the daemon binds it
/// after this returns.
pub fn next_port() -> u16 {
    loop {
        let port = NEXT_PORT.fetch_add(1, Ordering::Relaxed);
        if TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok() {
            return port
        }
    }
}
