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

use crate::consts;
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// Selects how the [`Framer`] treats an escaped `IAC IAC` pair.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EscapePolicy {
    /// `IAC IAC` yields one literal 0xFF data byte and consumes two bytes.
    #[default]
    Literal,
    /// `IAC IAC` is dropped together with the byte that follows it, consuming
    /// three bytes. Matches older clients that handled the escape like a
    /// negotiation verb.
    Legacy,
}

/// Removes Telnet commands from a raw chunk, leaving only application data.
///
/// The framer works on one chunk at a time and keeps no state between calls.
/// Commands are recognized as follows:
///
/// - `IAC WILL|WONT|DO|DONT <option>` is removed.
/// - `IAC SB ... IAC SE` is removed. When the chunk ends before `IAC SE`, the
///   rest of the chunk is discarded and the output stops right before `IAC SB`.
/// - `IAC IAC` is handled according to the configured [`EscapePolicy`].
/// - `IAC EOR` and every other two byte command is removed.
/// - A command cut off by the end of the chunk is removed.
///
/// Malformed input never produces an error, the affected bytes are dropped.
///
/// # Example
/// ```
/// use asynctelnet_telnetcodec::Framer;
///
/// let framer = Framer::default();
/// let filtered = framer.filter(b"hello\xff\xfb\x01world");
/// assert_eq!(&filtered[..], b"helloworld");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Framer {
    policy: EscapePolicy,
}

impl Framer {
    /// Creates a framer using the given escape policy.
    pub fn new(policy: EscapePolicy) -> Framer {
        Framer { policy }
    }

    /// Escape policy in use
    pub fn policy(&self) -> EscapePolicy {
        self.policy
    }

    /// Filters `chunk` into a freshly allocated buffer.
    pub fn filter(&self, chunk: &[u8]) -> BytesMut {
        let mut output = BytesMut::with_capacity(chunk.len());
        self.filter_into(chunk, &mut output);
        output
    }

    /// Filters `chunk`, appending the application data to `dst`.
    pub fn filter_into(&self, chunk: &[u8], dst: &mut BytesMut) {
        dst.reserve(chunk.len());
        let mut index = 0;
        while index < chunk.len() {
            if chunk[index] != consts::IAC {
                let end = chunk[index..]
                    .iter()
                    .position(|&byte| byte == consts::IAC)
                    .map_or(chunk.len(), |offset| index + offset);
                dst.put_slice(&chunk[index..end]);
                index = end;
                continue;
            }

            let Some(&command) = chunk.get(index + 1) else {
                trace!("Dropping trailing IAC at end of chunk");
                break;
            };

            match command {
                consts::WILL | consts::WONT | consts::DO | consts::DONT => {
                    if index + 2 >= chunk.len() {
                        trace!("Dropping negotiation {:#X} without option byte", command);
                        break;
                    }
                    index += 3;
                }
                consts::IAC => match self.policy {
                    EscapePolicy::Literal => {
                        dst.put_u8(consts::IAC);
                        index += 2;
                    }
                    EscapePolicy::Legacy => {
                        index += 3;
                    }
                },
                consts::SB => match subnegotiation_end(chunk, index + 2) {
                    Some(next) => index = next,
                    None => {
                        trace!(
                            dropped = chunk.len() - index,
                            "Unterminated subnegotiation, discarding rest of chunk"
                        );
                        break;
                    }
                },
                _ => {
                    index += 2;
                }
            }
        }
    }
}

/// Filters `chunk` with the default [`EscapePolicy`].
pub fn filter(chunk: &[u8]) -> BytesMut {
    Framer::default().filter(chunk)
}

/// Returns true when the raw, unfiltered chunk carries an `IAC EOR` marker.
///
/// Escaped `IAC IAC` pairs and negotiation verbs are stepped over, so data
/// bytes never masquerade as a record boundary.
pub fn contains_end_of_record(raw: &[u8]) -> bool {
    let mut index = 0;
    while index + 1 < raw.len() {
        if raw[index] != consts::IAC {
            index += 1;
            continue;
        }
        match raw[index + 1] {
            consts::EOR => return true,
            command if consts::is_verb(command) => index += 3,
            _ => index += 2,
        }
    }
    false
}

/// Position just past the `IAC SE` closing a subnegotiation, scanning from
/// `start`. `IAC IAC` inside the block is a single escaped data byte.
fn subnegotiation_end(chunk: &[u8], start: usize) -> Option<usize> {
    let mut index = start;
    while index + 1 < chunk.len() {
        if chunk[index] == consts::IAC {
            match chunk[index + 1] {
                consts::SE => return Some(index + 2),
                consts::IAC => {
                    index += 2;
                    continue;
                }
                _ => {}
            }
        }
        index += 1;
    }
    None
}
