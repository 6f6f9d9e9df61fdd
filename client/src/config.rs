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

//! Client configuration

use asynctelnet_telnetcodec::{EscapePolicy, Mode, consts};
use std::time::Duration;

/// Telnet client configuration
///
/// # Example
///
/// ```
/// use asynctelnet_client::{ClientConfig, Mode};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("example.com", 23)
///     .with_timeout(Duration::from_secs(5))
///     .with_mode(Mode::Smart);
/// assert_eq!(config.address(), "example.com:23");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port, 0 selects the default Telnet port
    pub port: u16,

    /// Connect timeout and default budget for a whole read
    pub timeout: Duration,

    /// Timeout for each individual read from the transport
    pub sub_read_timeout: Duration,

    /// Maximum bytes requested per transport read
    pub read_chunk_size: usize,

    /// Plain or EOR-aware operation
    pub mode: Mode,

    /// How escaped `IAC IAC` pairs in incoming data are handled
    pub escape_policy: EscapePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: consts::TELNET_PORT,
            timeout: Duration::from_secs(30),
            sub_read_timeout: Duration::from_millis(100),
            read_chunk_size: 100,
            mode: Mode::Plain,
            escape_policy: EscapePolicy::Literal,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connect timeout and default read budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-read poll interval
    pub fn with_sub_read_timeout(mut self, timeout: Duration) -> Self {
        self.sub_read_timeout = timeout;
        self
    }

    /// Set the maximum bytes per transport read
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    /// Set the connection mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the escape policy used when filtering incoming data
    pub fn with_escape_policy(mut self, policy: EscapePolicy) -> Self {
        self.escape_policy = policy;
        self
    }

    /// Port to dial, substituting the default Telnet port for 0
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 {
            consts::TELNET_PORT
        } else {
            self.port
        }
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.effective_port())
    }
}
