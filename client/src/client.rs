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

//! Telnet client engine

use crate::{ChunkRead, ClientConfig, ClientResult, TcpTransport, Transport};
use asynctelnet_telnetcodec::{
    EOR_PROBE, EorNegotiation, Framer, Mode, NegotiationState, TelnetWriter,
    contains_end_of_record,
};
use bytes::{Bytes, BytesMut};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, trace};

/// Data returned by a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResponse {
    /// Filtered bytes
    Bytes(Bytes),
    /// Filtered bytes decoded as UTF-8, invalid sequences replaced
    Text(String),
}

impl ReadResponse {
    /// Consume the response, returning the raw filtered bytes
    pub fn into_bytes(self) -> Bytes {
        match self {
            ReadResponse::Bytes(bytes) => bytes,
            ReadResponse::Text(text) => Bytes::from(text),
        }
    }

    /// Consume the response, decoding it as text if it is not already
    pub fn into_text(self) -> String {
        match self {
            ReadResponse::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            ReadResponse::Text(text) => text,
        }
    }

    /// Borrow the response as bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ReadResponse::Bytes(bytes) => bytes,
            ReadResponse::Text(text) => text.as_bytes(),
        }
    }

    /// Check if nothing was received
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Why an accumulation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadExit {
    EndOfRecord,
    Budget,
    Eof,
}

/// Telnet client bound to a single connection
///
/// The client strips Telnet commands from everything it reads and escapes
/// everything it writes. In [`Mode::Smart`] it also offers End of Record and
/// returns from a read as soon as a record boundary arrives instead of waiting
/// for the budget to run out. This applies whenever the peer has not refused
/// End of Record, including the first read while the state is still
/// [`NegotiationState::Unknown`].
///
/// Dropping the client releases the transport without a shutdown. Call
/// [`TelnetClient::close`] to flush and shut the connection down cleanly.
///
/// # Example
///
/// ```no_run
/// use asynctelnet_client::{ClientConfig, Mode, TelnetClient};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("bbs.example.net", 23).with_mode(Mode::Smart);
/// let mut client = TelnetClient::connect(config).await?;
///
/// let banner = client.read_text(Duration::from_secs(2)).await?;
/// println!("{}", banner);
/// client.write(b"guest\r\n").await?;
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TelnetClient<T: Transport = TcpTransport> {
    config: ClientConfig,
    transport: T,
    framer: Framer,
    negotiation: EorNegotiation,
}

impl TelnetClient<TcpTransport> {
    /// Connect to the host and port named by `config`.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let transport =
            TcpTransport::connect(&config.host, config.effective_port(), config.timeout).await?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> TelnetClient<T> {
    /// Build a client over an already established transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            framer: Framer::new(config.escape_policy),
            negotiation: EorNegotiation::new(),
            transport,
            config,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the connection mode
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Get the End of Record negotiation state for this connection
    pub fn negotiation_state(&self) -> NegotiationState {
        self.negotiation.classify()
    }

    /// Check if the connection has been closed
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write `payload`, escaping IAC bytes and appending the mode's trailer.
    ///
    /// Returns once the bytes have been flushed to the transport.
    pub async fn write(&mut self, payload: &[u8]) -> ClientResult<()> {
        let writer = TelnetWriter::new(self.config.mode, self.negotiation.classify());
        let wire = writer.prepare(payload);
        trace!(payload = payload.len(), wire = wire.len(), "Writing");
        self.transport.write_all(&wire).await
    }

    /// Read until the peer goes quiet, a record boundary arrives, or `overall`
    /// runs out.
    ///
    /// Telnet commands are removed from the result. Running out of budget is
    /// not an error; whatever was received so far is returned.
    pub async fn read_until_quiescence(
        &mut self,
        overall: Duration,
        decode_as_text: bool,
    ) -> ClientResult<ReadResponse> {
        let data = self.accumulate(overall).await?;
        if decode_as_text {
            Ok(ReadResponse::Text(String::from_utf8_lossy(&data).into_owned()))
        } else {
            Ok(ReadResponse::Bytes(data))
        }
    }

    /// Read filtered bytes, see [`TelnetClient::read_until_quiescence`].
    pub async fn read_bytes(&mut self, overall: Duration) -> ClientResult<Bytes> {
        self.accumulate(overall).await
    }

    /// Read filtered text, see [`TelnetClient::read_until_quiescence`].
    pub async fn read_text(&mut self, overall: Duration) -> ClientResult<String> {
        let data = self.accumulate(overall).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Read until the peer closes or goes quiet.
    ///
    /// In fast mode the budget is a single sub-read interval, otherwise it is
    /// the configured timeout.
    pub async fn read_until_eof(&mut self, fast_mode: bool) -> ClientResult<Bytes> {
        let overall = if fast_mode {
            self.config.sub_read_timeout
        } else {
            self.config.timeout
        };
        self.accumulate(overall).await
    }

    /// Read a single unfiltered chunk of at most `max_bytes`.
    ///
    /// [`StreamTransport`](crate::StreamTransport) caps a single read at
    /// [`MAX_READ_SIZE`](crate::MAX_READ_SIZE) bytes.
    ///
    /// The chunk still updates the negotiation state. Returns empty bytes if
    /// nothing arrives within the configured timeout or the peer has closed.
    pub async fn read_raw(&mut self, max_bytes: usize) -> ClientResult<Bytes> {
        match self
            .transport
            .read_chunk(max_bytes, self.config.timeout)
            .await?
        {
            ChunkRead::Data(raw) => {
                self.negotiation.observe(&raw);
                Ok(raw)
            }
            ChunkRead::Timeout | ChunkRead::Eof => Ok(Bytes::new()),
        }
    }

    /// Close the connection. Closing twice is a no-op.
    pub async fn close(&mut self) -> ClientResult<()> {
        self.transport.close().await
    }

    #[instrument(level = "debug", skip(self), fields(mode = ?self.config.mode))]
    async fn accumulate(&mut self, overall: Duration) -> ClientResult<Bytes> {
        // A budget too large to represent never runs out.
        let deadline = Instant::now().checked_add(overall);
        let smart = self.config.mode.is_smart();

        if smart && self.negotiation.classify() == NegotiationState::Unknown {
            debug!("Offering End of Record");
            self.transport.write_all(&EOR_PROBE).await?;
        }

        let mut response = BytesMut::with_capacity(self.config.read_chunk_size.min(crate::MAX_READ_SIZE));
        let exit = loop {
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break ReadExit::Budget;
                    }
                    self.config.sub_read_timeout.min(deadline - now)
                }
                None => self.config.sub_read_timeout,
            };

            match self
                .transport
                .read_chunk(self.config.read_chunk_size, slice)
                .await?
            {
                ChunkRead::Timeout => continue,
                ChunkRead::Eof if smart => {
                    // Keep polling until the budget runs out.
                    tokio::time::sleep(slice).await;
                }
                ChunkRead::Eof => break ReadExit::Eof,
                ChunkRead::Data(raw) => {
                    self.negotiation.observe(&raw);
                    self.framer.filter_into(&raw, &mut response);
                    trace!(raw = raw.len(), total = response.len(), "Accumulated chunk");
                    if smart
                        && self.negotiation.classify() != NegotiationState::Unsupported
                        && contains_end_of_record(&raw)
                    {
                        break ReadExit::EndOfRecord;
                    }
                }
            }
        };

        self.negotiation.promote_if_unresolved();
        debug!(
            reason = ?exit,
            bytes = response.len(),
            negotiation = %self.negotiation.classify(),
            "Read complete"
        );
        Ok(response.freeze())
    }
}
