//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Byte stream transports

use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, trace};

/// Largest read buffer [`StreamTransport`] allocates for a single chunk
pub const MAX_READ_SIZE: usize = 64 * 1024;

/// Outcome of a single bounded read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkRead {
    /// Bytes received from the peer, never empty
    Data(Bytes),
    /// Nothing arrived before the read timeout
    Timeout,
    /// The peer closed its side of the stream
    Eof,
}

/// Byte stream consumed by [`TelnetClient`](crate::TelnetClient)
///
/// Implementations must be cancel safe in `read_chunk`: dropping the returned
/// future must not lose bytes that were already received.
#[async_trait]
pub trait Transport: Send {
    /// Reads at most `max_bytes`, waiting no longer than `timeout`.
    ///
    /// Implementations may return fewer bytes than asked for and may cap
    /// `max_bytes` to a buffer size of their own.
    async fn read_chunk(&mut self, max_bytes: usize, timeout: Duration) -> ClientResult<ChunkRead>;

    /// Writes all of `bytes` and flushes before returning.
    async fn write_all(&mut self, bytes: &[u8]) -> ClientResult<()>;

    /// Shuts the stream down. Closing twice is a no-op.
    async fn close(&mut self) -> ClientResult<()>;

    /// True once [`Transport::close`] has been called
    fn is_closed(&self) -> bool;
}

/// [`Transport`] over any tokio byte stream
///
/// ```
/// use asynctelnet_client::{ChunkRead, StreamTransport, Transport};
/// use std::time::Duration;
/// use tokio::io::AsyncWriteExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (local, mut remote) = tokio::io::duplex(64);
/// let mut transport = StreamTransport::new(local);
/// remote.write_all(b"hi").await?;
/// let chunk = transport.read_chunk(100, Duration::from_millis(50)).await?;
/// assert_eq!(chunk, ChunkRead::Data("hi".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StreamTransport<S> {
    stream: Option<S>,
}

/// [`StreamTransport`] over a TCP connection
pub type TcpTransport = StreamTransport<TcpStream>;

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps an established stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Underlying stream, `None` once closed
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    fn stream_mut(&mut self) -> ClientResult<&mut S> {
        self.stream.as_mut().ok_or(ClientError::TransportClosed)
    }
}

impl StreamTransport<TcpStream> {
    /// Opens a TCP connection, failing after `timeout`.
    ///
    /// A `port` of 0 selects the default Telnet port.
    #[instrument(skip(timeout))]
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> ClientResult<Self> {
        let port = if port == 0 {
            asynctelnet_telnetcodec::consts::TELNET_PORT
        } else {
            port
        };
        let address = format!("{}:{}", host, port);
        debug!("Connecting to {}", address);

        let connected = tokio::time::timeout(timeout, TcpStream::connect(&address)).await;
        let stream = match connected {
            Ok(Ok(stream)) => stream,
            Ok(Err(error)) => return Err(ClientError::from_connect(&address, timeout, error)),
            Err(_) => return Err(ClientError::ConnectionTimeout { address, timeout }),
        };
        stream.set_nodelay(true)?;

        info!(peer_addr = ?stream.peer_addr().ok(), "Connected to {}", address);
        Ok(Self::new(stream))
    }

    /// Address of the peer, `None` once closed
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref().and_then(|stream| stream.peer_addr().ok())
    }
}

#[async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_chunk(&mut self, max_bytes: usize, timeout: Duration) -> ClientResult<ChunkRead> {
        let stream = self.stream_mut()?;
        let mut buffer = vec![0u8; max_bytes.clamp(1, MAX_READ_SIZE)];
        match tokio::time::timeout(timeout, stream.read(&mut buffer)).await {
            Err(_) => Ok(ChunkRead::Timeout),
            Ok(Ok(0)) => {
                trace!("Stream reached EOF");
                Ok(ChunkRead::Eof)
            }
            Ok(Ok(count)) => {
                buffer.truncate(count);
                trace!(bytes = count, "Read chunk");
                Ok(ChunkRead::Data(Bytes::from(buffer)))
            }
            Ok(Err(error)) => Err(error.into()),
        }
    }

    async fn write_all(&mut self, bytes: &[u8]) -> ClientResult<()> {
        let stream = self.stream_mut()?;
        stream.write_all(bytes).await?;
        stream.flush().await?;
        trace!(bytes = bytes.len(), "Wrote and flushed");
        Ok(())
    }

    async fn close(&mut self) -> ClientResult<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown().await?;
            info!("Connection closed");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_read_data_and_eof() {
        let (local, mut remote) = duplex(64);
        let mut transport = StreamTransport::new(local);

        remote.write_all(b"abcdef").await.unwrap();
        let chunk = transport.read_chunk(4, Duration::from_secs(1)).await.unwrap();
        assert_eq!(chunk, ChunkRead::Data(Bytes::from_static(b"abcd")));
        let chunk = transport.read_chunk(4, Duration::from_secs(1)).await.unwrap();
        assert_eq!(chunk, ChunkRead::Data(Bytes::from_static(b"ef")));

        drop(remote);
        let chunk = transport.read_chunk(4, Duration::from_secs(1)).await.unwrap();
        assert_eq!(chunk, ChunkRead::Eof);
    }

    #[tokio::test]
    async fn test_read_size_is_capped() {
        let (local, mut remote) = duplex(64);
        let mut transport = StreamTransport::new(local);
        remote.write_all(b"big ask").await.unwrap();

        let chunk = transport
            .read_chunk(usize::MAX, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(chunk, ChunkRead::Data(Bytes::from_static(b"big ask")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_timeout() {
        let (local, _remote) = duplex(64);
        let mut transport = StreamTransport::new(local);
        let chunk = transport
            .read_chunk(100, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(chunk, ChunkRead::Timeout);
    }

    #[tokio::test]
    async fn test_write_flushes() {
        let (local, mut remote) = duplex(64);
        let mut transport = StreamTransport::new(local);
        transport.write_all(b"ping").await.unwrap();

        let mut buffer = [0u8; 4];
        remote.read_exact(&mut buffer).await.unwrap();
        assert_eq!(&buffer, b"ping");
    }

    #[tokio::test]
    async fn test_operations_after_close() {
        let (local, _remote) = duplex(64);
        let mut transport = StreamTransport::new(local);
        assert!(!transport.is_closed());

        transport.close().await.unwrap();
        assert!(transport.is_closed());
        assert!(transport.get_ref().is_none());
        transport.close().await.unwrap();

        let read = transport.read_chunk(10, Duration::from_millis(10)).await;
        assert!(matches!(read, Err(ClientError::TransportClosed)));
        let write = transport.write_all(b"late").await;
        assert!(matches!(write, Err(ClientError::TransportClosed)));
    }

    #[tokio::test]
    async fn test_tcp_connect_refused() {
        // Bind then drop to get a port with no listener.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = TcpTransport::connect("127.0.0.1", port, Duration::from_secs(5)).await;
        let error = result.unwrap_err();
        assert!(error.is_connect_failure(), "unexpected error: {error}");
    }

    #[tokio::test]
    async fn test_tcp_connect_and_exchange() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"welcome").await.unwrap();
            let mut buffer = [0u8; 3];
            socket.read_exact(&mut buffer).await.unwrap();
            buffer
        });

        let mut transport = TcpTransport::connect("127.0.0.1", port, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(transport.peer_addr().is_some());
        let chunk = transport.read_chunk(100, Duration::from_secs(5)).await.unwrap();
        assert_eq!(chunk, ChunkRead::Data(Bytes::from_static(b"welcome")));
        transport.write_all(b"bye").await.unwrap();
        assert_eq!(&server.await.unwrap(), b"bye");
        transport.close().await.unwrap();
        assert!(transport.peer_addr().is_none());
    }
}
