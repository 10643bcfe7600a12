// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDimensions {
    pub width: u16,
    pub height: u16,
}

/// Width and height of the 8x8 glyph cells used by the text consoles.
const GLYPH_SIZE: u16 = 8;

impl Screen {
    /// Framebuffer dimensions. The panels are mounted rotated, so `height` is the visible width.
    pub const fn dimensions(&self) -> ScreenDimensions {
        match self {
            Self::Top => ScreenDimensions {
                width: 240,
                height: 400,
            },
            Self::Bottom => ScreenDimensions {
                width: 240,
                height: 320,
            },
        }
    }

    /// Text grid as `(columns, rows)`.
    pub const fn console_size(&self) -> (usize, usize) {
        let dim = self.dimensions();
        (
            (dim.height / GLYPH_SIZE) as usize,
            (dim.width / GLYPH_SIZE) as usize,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenType {
    Tn,
    Ips,
    Unknown,
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Tn => "TN",
            Self::Ips => "IPS",
            Self::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTypes {
    pub top: ScreenType,
    pub bottom: ScreenType,
}

impl fmt::Display for ScreenTypes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "upper: {} lower: {}", self.top, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consoles_fit_8x8_glyphs() {
        assert_eq!(Screen::Top.console_size(), (50, 30));
        assert_eq!(Screen::Bottom.console_size(), (40, 30));
    }
}
