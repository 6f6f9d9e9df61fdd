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

///
/// Connection mode, fixed when a connection is created.
///
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Plain byte stream. No End of Record negotiation, reads stop on EOF.
    #[default]
    Plain,
    /// Probes the peer for End of Record support and stops reading at a
    /// record boundary once support is established.
    Smart,
}

impl Mode {
    /// True for [`Mode::Smart`]
    pub fn is_smart(self) -> bool {
        self == Mode::Smart
    }
}
