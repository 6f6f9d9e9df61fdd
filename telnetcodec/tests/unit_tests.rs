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

//! Property tests for the framer and writer

use asynctelnet_telnetcodec::{
    EOR_MARKER, EOR_PROBE, EscapePolicy, Framer, Mode, NegotiationState, TelnetWriter, consts,
    escape, filter,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn data_without_iac() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..consts::IAC, 0..256)
}

fn verb() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(consts::WILL),
        Just(consts::WONT),
        Just(consts::DO),
        Just(consts::DONT),
    ]
}

proptest! {
    #[test]
    fn escape_then_filter_restores_iac_free_payload(payload in data_without_iac()) {
        prop_assert_eq!(&filter(&escape(&payload))[..], &payload[..]);
    }

    #[test]
    fn escape_then_filter_restores_any_payload_with_literal_policy(
        payload in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let framer = Framer::new(EscapePolicy::Literal);
        prop_assert_eq!(&framer.filter(&escape(&payload))[..], &payload[..]);
    }

    #[test]
    fn negotiation_command_is_cut_out(
        head in data_without_iac(),
        tail in data_without_iac(),
        verb in verb(),
        option in any::<u8>(),
    ) {
        let mut chunk = head.clone();
        chunk.extend_from_slice(&[consts::IAC, verb, option]);
        chunk.extend_from_slice(&tail);

        let mut expected = head;
        expected.extend_from_slice(&tail);
        prop_assert_eq!(&filter(&chunk)[..], &expected[..]);
    }

    #[test]
    fn terminated_subnegotiation_is_cut_out(
        head in data_without_iac(),
        body in data_without_iac(),
        tail in data_without_iac(),
    ) {
        let mut chunk = head.clone();
        chunk.extend_from_slice(&[consts::IAC, consts::SB]);
        chunk.extend_from_slice(&body);
        chunk.extend_from_slice(&[consts::IAC, consts::SE]);
        chunk.extend_from_slice(&tail);

        let mut expected = head;
        expected.extend_from_slice(&tail);
        prop_assert_eq!(&filter(&chunk)[..], &expected[..]);
    }

    #[test]
    fn unterminated_subnegotiation_truncates_before_sb(
        head in data_without_iac(),
        rest in data_without_iac(),
    ) {
        let mut chunk = head.clone();
        chunk.extend_from_slice(&[consts::IAC, consts::SB]);
        chunk.extend_from_slice(&rest);
        prop_assert_eq!(&filter(&chunk)[..], &head[..]);
    }

    #[test]
    fn filter_never_panics(chunk in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Framer::new(EscapePolicy::Literal).filter(&chunk);
        let _ = Framer::new(EscapePolicy::Legacy).filter(&chunk);
    }

    #[test]
    fn escaped_payload_has_no_lone_iac(payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let escaped = escape(&payload);
        let singles = escaped.iter().filter(|&&byte| byte == consts::IAC).count();
        prop_assert_eq!(singles % 2, 0);
        prop_assert_eq!(escaped.len(), payload.len() + singles / 2);
    }
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn writer_trailers() {
    let probe: &[u8] = &EOR_PROBE;
    let marker: &[u8] = &EOR_MARKER;
    assert_eq!(probe, &[consts::IAC, consts::WILL, consts::option::EOR]);
    assert_eq!(marker, &[consts::IAC, consts::EOR]);

    let cases = [
        (Mode::Plain, NegotiationState::Unknown, None),
        (Mode::Plain, NegotiationState::Supported, None),
        (Mode::Smart, NegotiationState::Unknown, Some(probe)),
        (Mode::Smart, NegotiationState::Supported, Some(marker)),
        (Mode::Smart, NegotiationState::Unsupported, None),
    ];
    for (mode, state, expected) in cases {
        assert_eq!(TelnetWriter::new(mode, state).trailer(), expected, "{mode:?}/{state:?}");
    }
}

#[test]
fn writer_escapes_trailing_iac() {
    let writer = TelnetWriter::new(Mode::Plain, NegotiationState::Unknown);
    assert_eq!(&writer.prepare(b"end\xff")[..], b"end\xff\xff");
}

// ============================================================================
// Framer Tests
// ============================================================================

#[test]
fn framer_default_policy_is_literal() {
    assert_eq!(Framer::default().policy(), EscapePolicy::Literal);
}

#[test]
fn framer_scenario_will_option() {
    assert_eq!(&filter(b"hello\xff\xfb\x01world")[..], b"helloworld");
}

#[test]
fn framer_legacy_policy_drops_following_byte() {
    let framer = Framer::new(EscapePolicy::Legacy);
    assert_eq!(&framer.filter(b"a\xff\xffbc")[..], b"ac");
}
