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

use crate::{Mode, NegotiationState, consts};
use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

/// `IAC WILL EOR`, offering End of Record framing to the peer.
pub const EOR_PROBE: [u8; 3] = [consts::IAC, consts::WILL, consts::option::EOR];

/// `IAC EOR`, marking the end of a record.
pub const EOR_MARKER: [u8; 2] = [consts::IAC, consts::EOR];

/// Prepares outgoing application data for the wire.
///
/// Every 0xFF in the payload is doubled so the peer never reads data as a
/// command. In [`Mode::Smart`] a trailer follows the payload, chosen from the
/// negotiation state at the time the writer was built:
///
/// | state         | trailer         |
/// |---------------|-----------------|
/// | `Unknown`     | `IAC WILL EOR`  |
/// | `Supported`   | `IAC EOR`       |
/// | `Unsupported` | none            |
///
/// # Example
/// ```
/// use asynctelnet_telnetcodec::{Mode, NegotiationState, TelnetWriter};
///
/// let writer = TelnetWriter::new(Mode::Plain, NegotiationState::Unknown);
/// assert_eq!(&writer.prepare(b"end\xff")[..], b"end\xff\xff");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TelnetWriter {
    mode: Mode,
    state: NegotiationState,
}

impl TelnetWriter {
    /// Creates a writer for the given mode and negotiation state.
    pub fn new(mode: Mode, state: NegotiationState) -> TelnetWriter {
        TelnetWriter { mode, state }
    }

    /// Escapes `payload` and appends the record trailer, if any.
    pub fn prepare(&self, payload: &[u8]) -> BytesMut {
        let mut dst = BytesMut::new();
        self.prepare_into(payload, &mut dst);
        dst
    }

    /// Same as [`TelnetWriter::prepare`], appending to `dst`.
    pub fn prepare_into(&self, payload: &[u8], dst: &mut BytesMut) {
        escape_into(payload, dst);
        if let Some(trailer) = self.trailer() {
            dst.put_slice(trailer);
        }
    }

    /// Bytes appended after the payload.
    pub fn trailer(&self) -> Option<&'static [u8]> {
        match (self.mode, self.state) {
            (Mode::Smart, NegotiationState::Unknown) => Some(&EOR_PROBE),
            (Mode::Smart, NegotiationState::Supported) => Some(&EOR_MARKER),
            (Mode::Smart, NegotiationState::Unsupported) | (Mode::Plain, _) => None,
        }
    }
}

impl Encoder<&[u8]> for TelnetWriter {
    type Error = std::io::Error;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.prepare_into(item, dst);
        Ok(())
    }
}

/// Doubles every 0xFF in `payload`.
pub fn escape(payload: &[u8]) -> BytesMut {
    let mut dst = BytesMut::new();
    escape_into(payload, &mut dst);
    dst
}

fn escape_into(payload: &[u8], dst: &mut BytesMut) {
    let escapes = payload.iter().filter(|&&byte| byte == consts::IAC).count();
    dst.reserve(payload.len() + escapes + EOR_PROBE.len());
    for chunk in payload.split_inclusive(|&byte| byte == consts::IAC) {
        dst.put_slice(chunk);
        if chunk.last() == Some(&consts::IAC) {
            dst.put_u8(consts::IAC);
        }
    }
}
