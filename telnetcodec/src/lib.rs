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

//! # AsyncTelnet Telnet Codec
//!
//! Synchronous, I/O free building blocks for a Telnet client that only cares about
//! the application data a server sends back, plus optional End of Record (EOR)
//! framing to know when a response is complete.
//!
//! ## Core Components
//!
//! ### [`Framer`]
//!
//! Strips Telnet commands (negotiation verbs, subnegotiations, EOR markers) from
//! a raw chunk and returns the remaining application data.
//!
//! ### [`EorNegotiation`]
//!
//! Records whether the peer refused the EOR option. Fed with raw, unfiltered
//! chunks.
//!
//! ### [`TelnetWriter`]
//!
//! Escapes outgoing data and, in [`Mode::Smart`], appends either an EOR probe or
//! an EOR marker depending on the [`NegotiationState`].
//!
//! ## Usage Example
//!
//! ```rust
//! use asynctelnet_telnetcodec::{
//!     EorNegotiation, Framer, Mode, NegotiationState, TelnetWriter, contains_end_of_record,
//! };
//!
//! let mut negotiation = EorNegotiation::new();
//! let writer = TelnetWriter::new(Mode::Smart, negotiation.classify());
//! let outgoing = writer.prepare(b"status\r\n");
//! assert_eq!(&outgoing[..], b"status\r\n\xff\xfb\x19");
//!
//! let raw = b"\xff\xfd\x19ready\xff\xef";
//! negotiation.observe(raw);
//! let data = Framer::default().filter(raw);
//! assert_eq!(&data[..], b"ready");
//! assert!(contains_end_of_record(raw));
//! assert_eq!(negotiation.classify(), NegotiationState::Unknown);
//! ```
//!
//! ## Limitations
//!
//! Chunks are filtered independently. A command or subnegotiation split across
//! two chunks is not reassembled; its bytes are dropped.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 885: Telnet End of Record Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub mod consts;
mod framer;
mod mode;
mod negotiation;
mod writer;

pub use self::framer::{EscapePolicy, Framer, contains_end_of_record, filter};
pub use self::mode::Mode;
pub use self::negotiation::{EorNegotiation, NegotiationState};
pub use self::writer::{EOR_MARKER, EOR_PROBE, TelnetWriter, escape};
