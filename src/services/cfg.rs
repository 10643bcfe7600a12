// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Region {
    Japan,
    America,
    Europe,
    Australia,
    China,
    Korea,
    Taiwan,
}

impl Region {
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Japan => "JPN",
            Self::America => "USA",
            Self::Europe => "EUR",
            Self::Australia => "AUS",
            Self::China => "CHN",
            Self::Korea => "KOR",
            Self::Taiwan => "TWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SystemModel {
    Ctr,
    Spr,
    Ktr,
    Ftr,
    Red,
    Jan,
}

impl SystemModel {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ctr => "Old 3DS",
            Self::Spr => "Old 3DS XL",
            Self::Ktr => "New 3DS",
            Self::Ftr => "Old 2DS",
            Self::Red => "New 3DS XL",
            Self::Jan => "New 2DS XL",
        }
    }

    /// Hardware product code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ctr => "CTR",
            Self::Spr => "SPR",
            Self::Ktr => "KTR",
            Self::Ftr => "FTR",
            Self::Red => "RED",
            Self::Jan => "JAN",
        }
    }

    /// Models with the faster CPU mode and extra L2 cache.
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::Ktr | Self::Red | Self::Jan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Language {
    Japanese,
    English,
    French,
    German,
    Italian,
    Spanish,
    SimplifiedChinese,
    Korean,
    Dutch,
    Portuguese,
    Russian,
    TraditionalChinese,
}

impl Language {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Japanese => "Japanese",
            Self::English => "English",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Spanish => "Spanish",
            Self::SimplifiedChinese => "Simplified Chinese",
            Self::Korean => "Korean",
            Self::Dutch => "Dutch",
            Self::Portuguese => "Portuguese",
            Self::Russian => "Russian",
            Self::TraditionalChinese => "Traditional Chinese",
        }
    }
}

/// Local friend code seed, shown as ten hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FriendCodeSeed(pub u64);

impl fmt::Display for FriendCodeSeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:010X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_new_models_are_new() {
        let new: [SystemModel; 3] = [SystemModel::Ktr, SystemModel::Red, SystemModel::Jan];
        let old: [SystemModel; 3] = [SystemModel::Ctr, SystemModel::Spr, SystemModel::Ftr];

        assert!(new.iter().all(SystemModel::is_new));
        assert!(!old.iter().any(SystemModel::is_new));
    }

    #[test]
    fn friend_code_seed_is_zero_padded_hex() {
        assert_eq!(alloc::format!("{}", FriendCodeSeed(0x3_dead_beef)), "03DEADBEEF");
    }
}
