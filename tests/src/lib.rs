//! End-to-end checks that drive the real TCP dialer against loopback sockets.

#[cfg(test)]
mod reachability;
#[cfg(test)]
mod utils;
