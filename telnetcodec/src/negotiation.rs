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
use std::fmt::Formatter;
use tracing::debug;

///
/// Whether the remote peer accepts End of Record framing.
///
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NegotiationState {
    /// Nothing has been learned about the peer yet
    #[default]
    Unknown,
    /// The peer accepted, or did not object to, End of Record framing
    Supported,
    /// The peer refused End of Record framing
    Unsupported,
}

impl NegotiationState {
    /// True once the state can no longer change.
    pub fn is_resolved(self) -> bool {
        self != NegotiationState::Unknown
    }
}

impl std::fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NegotiationState::Unknown => write!(f, "Unknown"),
            NegotiationState::Supported => write!(f, "Supported"),
            NegotiationState::Unsupported => write!(f, "Unsupported"),
        }
    }
}

///
/// Tracks End of Record support for a single connection.
///
/// The tracker starts out [`NegotiationState::Unknown`] and moves at most once:
/// to [`NegotiationState::Unsupported`] when the peer answers with `WONT EOR` or
/// `DONT EOR`, or to [`NegotiationState::Supported`] when a whole read cycle
/// finishes without such an answer. Raw chunks must be observed before they are
/// filtered, since filtering strips the evidence.
///
/// # Example
/// ```
/// use asynctelnet_telnetcodec::{EorNegotiation, NegotiationState};
///
/// let mut tracker = EorNegotiation::new();
/// tracker.observe(b"\xff\xfc\x19");
/// assert_eq!(tracker.classify(), NegotiationState::Unsupported);
/// tracker.promote_if_unresolved();
/// assert_eq!(tracker.classify(), NegotiationState::Unsupported);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EorNegotiation {
    state: NegotiationState,
}

impl EorNegotiation {
    /// Creates a tracker in the `Unknown` state.
    pub fn new() -> EorNegotiation {
        EorNegotiation::default()
    }

    /// Inspects an unfiltered chunk for a refusal of the EOR option.
    pub fn observe(&mut self, raw: &[u8]) {
        if self.state != NegotiationState::Unknown {
            return;
        }
        if is_refusal(raw) {
            debug!("Peer refused End of Record");
            self.state = NegotiationState::Unsupported;
        }
    }

    /// Current state
    pub fn classify(&self) -> NegotiationState {
        self.state
    }

    /// Treats a completed read cycle without refusal as acceptance.
    pub fn promote_if_unresolved(&mut self) {
        if self.state == NegotiationState::Unknown {
            debug!("No End of Record refusal observed, assuming support");
            self.state = NegotiationState::Supported;
        }
    }
}

fn is_refusal(raw: &[u8]) -> bool {
    raw.windows(2).any(|pair| {
        matches!(pair, [consts::WONT | consts::DONT, consts::option::EOR])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DO, DONT, IAC, WILL, WONT, option};
    use tracing_test::traced_test;

    #[test]
    fn starts_unknown() {
        let tracker = EorNegotiation::new();
        assert_eq!(tracker.classify(), NegotiationState::Unknown);
        assert!(!tracker.classify().is_resolved());
    }

    #[test]
    fn wont_eor_is_refusal() {
        let mut tracker = EorNegotiation::new();
        tracker.observe(&[b'x', IAC, WONT, option::EOR, b'y']);
        assert_eq!(tracker.classify(), NegotiationState::Unsupported);
    }

    #[test]
    fn dont_eor_is_refusal() {
        let mut tracker = EorNegotiation::new();
        tracker.observe(&[IAC, DONT, option::EOR]);
        assert_eq!(tracker.classify(), NegotiationState::Unsupported);
    }

    #[test]
    fn other_options_ignored() {
        let mut tracker = EorNegotiation::new();
        tracker.observe(&[IAC, WONT, option::ECHO, IAC, DO, option::EOR, IAC, WILL, option::EOR]);
        assert_eq!(tracker.classify(), NegotiationState::Unknown);
    }

    #[test]
    fn promotion_only_from_unknown() {
        let mut tracker = EorNegotiation::new();
        tracker.promote_if_unresolved();
        assert_eq!(tracker.classify(), NegotiationState::Supported);

        tracker.observe(&[IAC, WONT, option::EOR]);
        assert_eq!(tracker.classify(), NegotiationState::Supported);
    }

    #[test]
    fn unsupported_is_sticky() {
        let mut tracker = EorNegotiation::new();
        tracker.observe(&[IAC, WONT, option::EOR]);
        tracker.promote_if_unresolved();
        tracker.observe(b"plain text");
        assert_eq!(tracker.classify(), NegotiationState::Unsupported);
    }

    #[test]
    #[traced_test]
    fn transitions_are_logged() {
        let mut tracker = EorNegotiation::new();
        tracker.observe(&[IAC, DONT, option::EOR]);
        assert!(logs_contain("Peer refused End of Record"));
    }

    #[test]
    fn display() {
        assert_eq!(NegotiationState::Supported.to_string(), "Supported");
        assert_eq!(format!("{}", NegotiationState::Unknown), "Unknown");
    }
}
