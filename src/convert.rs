// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw sensor readings to human units.

use core::fmt;

const WIFI_BAR_PERCENT: f64 = 33.333_333_333_3;
const VOLUME_STEP_PERCENT: f64 = 1.587_301_587_3;

/// Battery voltage register to volts. The register spans 0-5 V in 256 steps.
pub fn voltage_to_volts(raw: u32) -> f64 {
    5.0 * (f64::from(raw) / 256.0)
}

/// Wi-Fi signal bars (0-3) to percent.
pub fn bars_to_percent(bars: u8) -> f64 {
    f64::from(bars) * WIFI_BAR_PERCENT
}

/// Volume slider position (0-63) to percent.
pub fn volume_to_percent(raw: u8) -> f64 {
    f64::from(raw) * VOLUME_STEP_PERCENT
}

/// 3D depth slider position (0.0-1.0) to percent.
pub fn slider_to_percent(raw: f32) -> f64 {
    f64::from(raw) * 100.0
}

/// Byte count rendered with a binary unit, e.g. `29.71 GB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

        let mut size = self.0 as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }

        match unit {
            0 => write!(f, "{} {}", self.0, UNITS[0]),
            _ => write!(f, "{size:.2} {}", UNITS[unit]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::format;

    const EPSILON: f64 = 1e-6;

    macro_rules! conversions {
        ($($name:ident: $f:ident($raw:expr) => $expected:expr),* $(,)?) => {
            $(
                #[test]
                fn $name() {
                    let got = $f($raw);
                    assert!((got - $expected).abs() < EPSILON, "{} -> {got}", $raw);
                }
            )*
        };
    }

    conversions! {
        voltage_zero: voltage_to_volts(0) => 0.0,
        voltage_mid: voltage_to_volts(128) => 2.5,
        voltage_typical: voltage_to_volts(213) => 4.16015625,
        bars_zero: bars_to_percent(0) => 0.0,
        bars_one: bars_to_percent(1) => 33.3333333333,
        bars_full: bars_to_percent(3) => 100.0,
        volume_zero: volume_to_percent(0) => 0.0,
        volume_full: volume_to_percent(63) => 100.0,
        slider_zero: slider_to_percent(0.0) => 0.0,
        slider_half: slider_to_percent(0.5) => 50.0,
    }

    #[test]
    fn exact_endpoints() {
        assert_eq!(voltage_to_volts(0), 0.0);
        assert_eq!(voltage_to_volts(256), 5.0);
        assert_eq!(slider_to_percent(1.0), 100.0);
        assert_eq!(format!("{:.0}", bars_to_percent(3)), "100");
        assert_eq!(format!("{:.0}", volume_to_percent(63)), "100");
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(format!("{}", ByteSize(0)), "0 B");
        assert_eq!(format!("{}", ByteSize(1023)), "1023 B");
        assert_eq!(format!("{}", ByteSize(1536)), "1.50 KB");
        assert_eq!(format!("{}", ByteSize(1_073_741_824)), "1.00 GB");
        assert_eq!(format!("{}", ByteSize(31_902_400_512)), "29.71 GB");
    }
}
