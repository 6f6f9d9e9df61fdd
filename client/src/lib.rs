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

//! # AsyncTelnet Client
//!
//! Telnet client for scripting line oriented servers. Reads strip Telnet
//! commands and return once the server goes quiet, and writes escape IAC bytes.
//!
//! ## Features
//!
//! - **Quiescence Reads** - Collects output until the read budget runs out or the peer closes
//! - **End of Record** - In [`Mode::Smart`], offers EOR and returns as soon as a record ends
//! - **Pluggable Transport** - Any tokio byte stream through [`StreamTransport`]
//! - **Blocking API** - [`BlockingTelnetClient`] for synchronous callers
//!
//! ## Quick Start
//!
//! ```no_run
//! use asynctelnet_client::{ClientConfig, Mode, TelnetClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("localhost", 2323).with_mode(Mode::Smart);
//!     let mut client = TelnetClient::connect(config).await?;
//!
//!     let login = client.read_text(Duration::from_secs(2)).await?;
//!     print!("{}", login);
//!     client.write(b"admin\r\n").await?;
//!
//!     let response = client.read_until_quiescence(Duration::from_secs(2), true).await?;
//!     print!("{}", response.into_text());
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

mod blocking;
mod client;
mod config;
mod error;
mod transport;

pub use blocking::BlockingTelnetClient;
pub use client::{ReadResponse, TelnetClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::{ChunkRead, MAX_READ_SIZE, StreamTransport, TcpTransport, Transport};

// Re-export types from asynctelnet_telnetcodec
pub use asynctelnet_telnetcodec::{EscapePolicy, Mode, NegotiationState};
