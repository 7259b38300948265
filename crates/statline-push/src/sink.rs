//! Transport boundary of the push protocol.
//!
//! The flush path hands fully-encoded datagrams to a [`MetricSink`]; the
//! sink owns delivery and nothing else. The production sink is UDP
//! fire-and-forget; tests substitute an in-memory sink.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::OnceCell;

use statline_core::{Result, StatlineError};

/// Delivery of one encoded datagram to the collector.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn send(&self, datagram: Bytes) -> Result<()>;
}

/// UDP sink (the push protocol's "udp" transport).
///
/// The socket is bound lazily on the first send so that construction never
/// touches the network; the target is re-resolved per send, which keeps the
/// sink oblivious to collector restarts and DNS changes.
pub struct UdpSink {
    target: String,
    socket: OnceCell<UdpSocket>,
}

impl UdpSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            socket: OnceCell::new(),
        }
    }

    async fn socket(&self) -> Result<&UdpSocket> {
        self.socket
            .get_or_try_init(|| async {
                UdpSocket::bind("0.0.0.0:0")
                    .await
                    .map_err(|e| StatlineError::Transport(format!("udp bind: {e}")))
            })
            .await
    }
}

#[async_trait]
impl MetricSink for UdpSink {
    async fn send(&self, datagram: Bytes) -> Result<()> {
        let socket = self.socket().await?;
        socket
            .send_to(&datagram, self.target.as_str())
            .await
            .map_err(|e| StatlineError::Transport(format!("udp send to {}: {e}", self.target)))?;
        Ok(())
    }
}
