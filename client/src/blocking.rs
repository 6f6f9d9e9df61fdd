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

//! Blocking client for callers without an async runtime

use crate::{
    ClientConfig, ClientError, ClientResult, ReadResponse, TcpTransport, TelnetClient, Transport,
};
use asynctelnet_telnetcodec::NegotiationState;
use bytes::Bytes;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

/// Blocking wrapper around [`TelnetClient`]
///
/// Each instance owns a single-threaded runtime for as long as it lives, so
/// the connection and its timers stay registered with the same reactor across
/// calls. Must not be used from inside another tokio runtime.
///
/// Dropping the client releases the connection without a shutdown; use
/// [`BlockingTelnetClient::shutdown`] or [`BlockingTelnetClient::close`] to
/// end the session cleanly.
///
/// # Example
///
/// ```no_run
/// use asynctelnet_client::{BlockingTelnetClient, ClientConfig};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), asynctelnet_client::ClientError> {
/// let mut client = BlockingTelnetClient::connect(ClientConfig::new("localhost", 2323))?;
/// let banner = client.read_text(Duration::from_secs(1))?;
/// print!("{}", banner);
/// client.write(b"quit\r\n")?;
/// client.shutdown()
/// # }
/// ```
#[derive(Debug)]
pub struct BlockingTelnetClient<T: Transport = TcpTransport> {
    // Dropped before the runtime it is registered with.
    client: TelnetClient<T>,
    runtime: Runtime,
}

fn runtime() -> ClientResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ClientError::Runtime)
}

impl BlockingTelnetClient<TcpTransport> {
    /// Connect to the host and port named by `config`.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let runtime = runtime()?;
        let client = runtime.block_on(TelnetClient::connect(config))?;
        Ok(Self { client, runtime })
    }
}

impl<T: Transport> BlockingTelnetClient<T> {
    /// Wrap an established transport.
    ///
    /// The transport must not be tied to another runtime's reactor; use
    /// [`BlockingTelnetClient::connect`] for TCP.
    pub fn with_transport(transport: T, config: ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            client: TelnetClient::with_transport(transport, config),
            runtime: runtime()?,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Get the End of Record negotiation state for this connection
    pub fn negotiation_state(&self) -> NegotiationState {
        self.client.negotiation_state()
    }

    /// Check if the connection has been closed
    pub fn is_closed(&self) -> bool {
        self.client.is_closed()
    }

    /// See [`TelnetClient::write`].
    pub fn write(&mut self, payload: &[u8]) -> ClientResult<()> {
        self.runtime.block_on(self.client.write(payload))
    }

    /// See [`TelnetClient::read_until_quiescence`].
    pub fn read_until_quiescence(
        &mut self,
        overall: Duration,
        decode_as_text: bool,
    ) -> ClientResult<ReadResponse> {
        self.runtime
            .block_on(self.client.read_until_quiescence(overall, decode_as_text))
    }

    /// See [`TelnetClient::read_bytes`].
    pub fn read_bytes(&mut self, overall: Duration) -> ClientResult<Bytes> {
        self.runtime.block_on(self.client.read_bytes(overall))
    }

    /// See [`TelnetClient::read_text`].
    pub fn read_text(&mut self, overall: Duration) -> ClientResult<String> {
        self.runtime.block_on(self.client.read_text(overall))
    }

    /// See [`TelnetClient::read_until_eof`].
    pub fn read_until_eof(&mut self, fast_mode: bool) -> ClientResult<Bytes> {
        self.runtime.block_on(self.client.read_until_eof(fast_mode))
    }

    /// See [`TelnetClient::read_raw`].
    pub fn read_raw(&mut self, max_bytes: usize) -> ClientResult<Bytes> {
        self.runtime.block_on(self.client.read_raw(max_bytes))
    }

    /// Close the connection, keeping the runtime alive.
    pub fn close(&mut self) -> ClientResult<()> {
        self.runtime.block_on(self.client.close())
    }

    /// Close the connection and release the runtime.
    pub fn shutdown(mut self) -> ClientResult<()> {
        self.close()
    }
}
