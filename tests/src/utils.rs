use std::net::SocketAddr;

use tokio::net::TcpListener;

/// A loopback port with a listener behind it, kept open for as long as this lives.
pub struct OpenPort {
    _listener: TcpListener,
    pub addr: SocketAddr,
}

impl OpenPort {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        Self {
            _listener: listener,
            addr,
        }
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

/// A loopback address nothing listens on: bound once to get a free port, then released.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    addr.to_string()
}
