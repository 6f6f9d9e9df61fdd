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

//! Telnet command bytes ([RFC854](https://tools.ietf.org/html/rfc854))

/// Interpret As Command
pub const IAC: u8 = 255;
/// Demand the remote side stop using an option
pub const DONT: u8 = 254;
/// Request the remote side use an option
pub const DO: u8 = 253;
/// Refuse to use an option
pub const WONT: u8 = 252;
/// Offer to use an option
pub const WILL: u8 = 251;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Go Ahead
pub const GA: u8 = 249;
/// Erase Line
pub const EL: u8 = 248;
/// Erase Character
pub const EC: u8 = 247;
/// Are You There
pub const AYT: u8 = 246;
/// Abort Output
pub const AO: u8 = 245;
/// Interrupt Process
pub const IP: u8 = 244;
/// Break
pub const BRK: u8 = 243;
/// Data Mark
pub const DM: u8 = 242;
/// No Operation
pub const NOP: u8 = 241;
/// Subnegotiation End
pub const SE: u8 = 240;
/// End of Record ([RFC885](https://tools.ietf.org/html/rfc885))
pub const EOR: u8 = 239;

/// Default Telnet port
pub const TELNET_PORT: u16 = 23;

/// Telnet option codes
pub mod option {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    pub const BINARY: u8 = 0;
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    pub const EOR: u8 = 25;
}

/// Returns true for the four option negotiation verbs.
#[inline]
pub const fn is_verb(byte: u8) -> bool {
    matches!(byte, WILL | WONT | DO | DONT)
}
