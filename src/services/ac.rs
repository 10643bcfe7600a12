// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stored Wi-Fi connection profiles, as exposed by `ac:i` and the `cfg` slot blocks.

use core::fmt;

/// Capacity of the SSID buffer, terminator included.
pub const SSID_BUFFER_LEN: usize = 0x20;
/// Capacity of the passphrase buffer, terminator included.
pub const PASSPHRASE_BUFFER_LEN: usize = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiSlot(u8);

impl WifiSlot {
    pub const COUNT: usize = 3;
    pub const ALL: [WifiSlot; Self::COUNT] = [WifiSlot(0), WifiSlot(1), WifiSlot(2)];

    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Slot number as shown in the system settings.
    pub const fn number(&self) -> u8 {
        self.0 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SecurityMode {
    Open,
    Wep40Bit,
    Wep104Bit,
    Wep128Bit,
    WpaTkip,
    Wpa2Tkip,
    WpaAes,
    Wpa2Aes,
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "Open",
            Self::Wep40Bit => "WEP 40-bit",
            Self::Wep104Bit => "WEP 104-bit",
            Self::Wep128Bit => "WEP 128-bit",
            Self::WpaTkip => "WPA TKIP",
            Self::Wpa2Tkip => "WPA2 TKIP",
            Self::WpaAes => "WPA AES",
            Self::Wpa2Aes => "WPA2 AES",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// The part of a slot's `cfg` block the viewer cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WifiSlotConfig {
    pub set: bool,
    pub mac: MacAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_numbered_from_one() {
        let numbers = WifiSlot::ALL.map(|slot| slot.number());

        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn mac_renders_as_colon_separated_hex() {
        let mac = MacAddress([0x40, 0xd2, 0x8a, 0x0f, 0x01, 0xbe]);

        assert_eq!(alloc::format!("{mac}"), "40:D2:8A:0F:01:BE");
    }
}
