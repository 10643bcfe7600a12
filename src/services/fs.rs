// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Sd,
    Nand,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageInfo {
    pub free: u64,
    pub total: u64,
}

/// Card identification register of an SD or eMMC device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cid(pub [u8; 16]);

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Ctr,
    Twl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSlotStatus {
    Empty,
    Inserted(CardType),
}

impl fmt::Display for CardSlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("not inserted"),
            Self::Inserted(CardType::Ctr) => f.write_str("inserted (CTR)"),
            Self::Inserted(CardType::Twl) => f.write_str("inserted (TWL)"),
        }
    }
}
