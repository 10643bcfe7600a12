// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

/// MCU firmware version as reported by `mcu::HWC`.
///
/// The major part is stored offset by `0x10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McuFirmware {
    pub high: u8,
    pub low: u8,
}

impl McuFirmware {
    pub const fn major(&self) -> u8 {
        self.high.wrapping_sub(0x10)
    }

    pub const fn minor(&self) -> u8 {
        self.low
    }
}

impl fmt::Display for McuFirmware {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}
