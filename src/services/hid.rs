// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use core::ops::{BitAnd, BitOr, Not};

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyPad(u32);

#[doc(hidden)]
macro_rules! _keypad_key {
    ($($konst: ident = $index: expr),* $(,)?) => {
        $(pub const $konst: Self = Self(1 << $index);)*
    };
}

impl KeyPad {
    pub const NONE: Self = Self(0);

    _keypad_key! {
        A = 0,
        B = 1,
        SELECT = 2,
        START = 3,
        DRIGHT = 4,
        DLEFT = 5,
        DUP = 6,
        DDOWN = 7,
        R = 8,
        L = 9,
        X = 10,
        Y = 11,
        ZL = 14,
        ZR = 15,
        TOUCH = 20,
        CSTICK_RIGHT = 24,
        CSTICK_LEFT = 25,
        CSTICK_UP = 26,
        CSTICK_DOWN = 27,
        CPAD_RIGHT = 28,
        CPAD_LEFT = 29,
        CPAD_UP = 30,
        CPAD_DOWN = 31,
    }

    /// D-pad or circle pad.
    pub const UP: Self = Self::DUP.union(Self::CPAD_UP);
    pub const LEFT: Self = Self::DLEFT.union(Self::CPAD_LEFT);
    pub const RIGHT: Self = Self::DRIGHT.union(Self::CPAD_RIGHT);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Inputs that end the live view.
///
/// SELECT, L and the D-pad's down direction are not part of it.
pub const ANY_KEY: KeyPad = KeyPad::TOUCH
    .union(KeyPad::A)
    .union(KeyPad::B)
    .union(KeyPad::X)
    .union(KeyPad::Y)
    .union(KeyPad::START)
    .union(KeyPad::R)
    .union(KeyPad::UP)
    .union(KeyPad::CPAD_DOWN)
    .union(KeyPad::LEFT)
    .union(KeyPad::RIGHT)
    .union(KeyPad::ZL)
    .union(KeyPad::ZR)
    .union(KeyPad::CSTICK_UP)
    .union(KeyPad::CSTICK_DOWN)
    .union(KeyPad::CSTICK_LEFT)
    .union(KeyPad::CSTICK_RIGHT);

impl BitOr for KeyPad {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for KeyPad {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for KeyPad {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

struct DebugLiteral(&'static str);

impl fmt::Debug for DebugLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for KeyPad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: [(KeyPad, &str); 23] = [
            (KeyPad::A, "A"),
            (KeyPad::B, "B"),
            (KeyPad::SELECT, "SELECT"),
            (KeyPad::START, "START"),
            (KeyPad::DRIGHT, "DRIGHT"),
            (KeyPad::DLEFT, "DLEFT"),
            (KeyPad::DUP, "DUP"),
            (KeyPad::DDOWN, "DDOWN"),
            (KeyPad::R, "R"),
            (KeyPad::L, "L"),
            (KeyPad::X, "X"),
            (KeyPad::Y, "Y"),
            (KeyPad::ZL, "ZL"),
            (KeyPad::ZR, "ZR"),
            (KeyPad::TOUCH, "TOUCH"),
            (KeyPad::CSTICK_RIGHT, "CSTICK_RIGHT"),
            (KeyPad::CSTICK_LEFT, "CSTICK_LEFT"),
            (KeyPad::CSTICK_UP, "CSTICK_UP"),
            (KeyPad::CSTICK_DOWN, "CSTICK_DOWN"),
            (KeyPad::CPAD_RIGHT, "CPAD_RIGHT"),
            (KeyPad::CPAD_LEFT, "CPAD_LEFT"),
            (KeyPad::CPAD_UP, "CPAD_UP"),
            (KeyPad::CPAD_DOWN, "CPAD_DOWN"),
        ];

        let mut keys = f.debug_set();
        for (key, name) in NAMES {
            if self.contains(key) {
                keys.entry(&DebugLiteral(name));
            }
        }

        keys.finish()
    }
}

/// Tracks pad samples across frames to tell held keys from newly pressed ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    previous: KeyPad,
    current: KeyPad,
}

impl InputState {
    /// Seeds the state with the keys held at boot, so they do not count as presses later.
    pub const fn with_held(held: KeyPad) -> Self {
        Self {
            previous: held,
            current: held,
        }
    }

    pub fn update(&mut self, sample: KeyPad) {
        self.previous = self.current;
        self.current = sample;
    }

    pub const fn held(&self) -> KeyPad {
        self.current
    }

    /// Keys that went from released to pressed with the last sample.
    pub fn down(&self) -> KeyPad {
        self.current & !self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_key_matches_exit_buttons() {
        for key in [
            KeyPad::A,
            KeyPad::TOUCH,
            KeyPad::DUP,
            KeyPad::CPAD_UP,
            KeyPad::CPAD_DOWN,
            KeyPad::DLEFT,
            KeyPad::CSTICK_RIGHT,
            KeyPad::ZR,
        ] {
            assert!(ANY_KEY.intersects(key), "{key:?}");
        }
    }

    #[test]
    fn any_key_ignores_select_l_and_dpad_down() {
        for key in [KeyPad::SELECT, KeyPad::L, KeyPad::DDOWN] {
            assert!(!ANY_KEY.intersects(key), "{key:?}");
        }
    }

    #[test]
    fn down_is_edge_triggered() {
        let mut input = InputState::default();

        input.update(KeyPad::A);
        assert_eq!(input.down(), KeyPad::A);

        input.update(KeyPad::A);
        assert!(input.down().is_empty());
        assert_eq!(input.held(), KeyPad::A);

        input.update(KeyPad::NONE);
        assert!(input.down().is_empty());

        input.update(KeyPad::A | KeyPad::B);
        assert_eq!(input.down(), KeyPad::A | KeyPad::B);
    }

    #[test]
    fn keys_held_at_boot_are_not_presses() {
        let mut input = InputState::with_held(KeyPad::SELECT | KeyPad::R);

        input.update(KeyPad::SELECT | KeyPad::R);
        assert!(input.down().is_empty());
    }

    #[test]
    fn debug_lists_pressed_keys() {
        let pad = KeyPad::START | KeyPad::CPAD_LEFT;

        assert_eq!(alloc::format!("{pad:?}"), "{START, CPAD_LEFT}");
    }
}
