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

//! Client error types

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Client result type
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The peer actively refused the connection
    #[error("Connection to {address} refused")]
    ConnectionRefused {
        /// Address that was dialed
        address: String,
    },

    /// The connection was not established within the connect timeout
    #[error("Timeout connecting to {address} after {timeout:?}")]
    ConnectionTimeout {
        /// Address that was dialed
        address: String,
        /// Timeout that expired
        timeout: Duration,
    },

    /// Any other failure while establishing the connection
    #[error("Error connecting to {address}: {source}")]
    Connect {
        /// Address that was dialed
        address: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Operation attempted on a transport that has been closed
    #[error("Transport closed")]
    TransportClosed,

    /// I/O error on an established transport
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The blocking client could not start its runtime
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl ClientError {
    /// Classifies an error raised while dialing `address`.
    pub(crate) fn from_connect(address: &str, timeout: Duration, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => ClientError::ConnectionRefused {
                address: address.to_string(),
            },
            io::ErrorKind::TimedOut => ClientError::ConnectionTimeout {
                address: address.to_string(),
                timeout,
            },
            _ => ClientError::Connect {
                address: address.to_string(),
                source: error,
            },
        }
    }

    /// Check if the error happened while establishing the connection
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectionRefused { .. }
                | ClientError::ConnectionTimeout { .. }
                | ClientError::Connect { .. }
        )
    }

    /// Check if the connection is unusable after this error
    pub fn is_closed(&self) -> bool {
        match self {
            ClientError::TransportClosed => true,
            ClientError::Io(error) => matches!(
                error.kind(),
                io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::NotConnected
            ),
            _ => false,
        }
    }
}
