// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account (NNID) data blocks served by `act:u`.

/// Persistent and transferable IDs of the linked account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountData {
    pub persistent_id: u32,
    pub transferable_id: u64,
}

/// Textual account fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountString {
    Nnid,
    Country,
    TimeZone,
}

impl AccountString {
    /// Buffer size of the field, terminator included.
    pub const fn buffer_len(&self) -> usize {
        match self {
            Self::Nnid => 0x11,
            Self::Country => 0x03,
            Self::TimeZone => 0x41,
        }
    }
}
