use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::probe::{Dialer, ProbeFailure, ProbeOutcome};

/// Dials `host:port` addresses over TCP.
///
/// The timeout covers name resolution and the handshake together. A successful
/// stream is dropped immediately, which closes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, addr: &str, connect_timeout: Duration) -> ProbeOutcome {
        match timeout(connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                trace!(%addr, local = ?stream.local_addr().ok(), "handshake completed");
                drop(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(ProbeFailure::from(e)),
            Err(_elapsed) => Err(ProbeFailure::TimedOut),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
