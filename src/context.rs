// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

use crate::os::reslimit::CpuTimeLimit;
use crate::services::hid::{KeyPad, ANY_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// CPU time limit applied while the viewer runs. Keeps the system watchdog from throttling.
    pub cpu_time_quota: CpuTimeLimit,
    /// Scratch memory handed to the socket service.
    pub soc_buffer_size: usize,
    /// Holding this at boot hides identifying fields.
    pub hide_key: KeyPad,
    /// A fresh press of any of these leaves the live view.
    pub exit_keys: KeyPad,
}

impl Config {
    pub const DEFAULT: Config = Config {
        cpu_time_quota: CpuTimeLimit::percent(30),
        soc_buffer_size: 0x10000,
        hide_key: KeyPad::SELECT,
        exit_keys: ANY_KEY,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    /// Everything is shown as read.
    Show,
    /// Identifying fields are replaced by placeholders, for screenshots.
    Hide,
}

/// What a hidden field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Numeric identifiers.
    Zero,
    /// Textual identifiers.
    Absent,
    /// Secrets.
    Blank,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Zero => "0",
            Self::Absent => "(none)",
            Self::Blank => "",
        })
    }
}

/// A field value as it may be rendered under the active [`Privacy`] mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redacted<T> {
    Shown(T),
    Hidden(Placeholder),
}

impl<T: fmt::Display> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Shown(value) => fmt::Display::fmt(value, f),
            Self::Hidden(placeholder) => fmt::Display::fmt(placeholder, f),
        }
    }
}

/// Settings fixed at startup and passed to every stage of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub config: Config,
    privacy: Privacy,
}

impl Context {
    pub const fn new(config: Config, privacy: Privacy) -> Self {
        Self { config, privacy }
    }

    pub fn from_boot_keys(config: Config, held: KeyPad) -> Self {
        let privacy = if held.contains(config.hide_key) {
            Privacy::Hide
        } else {
            Privacy::Show
        };

        Self::new(config, privacy)
    }

    pub const fn privacy(&self) -> Privacy {
        self.privacy
    }

    /// Passes `value` through unless identifying fields are hidden.
    pub fn identifying<T>(&self, value: T, placeholder: Placeholder) -> Redacted<T> {
        match self.privacy {
            Privacy::Show => Redacted::Shown(value),
            Privacy::Hide => Redacted::Hidden(placeholder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::format;

    #[test]
    fn select_held_at_boot_hides() {
        let hide = Context::from_boot_keys(Config::DEFAULT, KeyPad::SELECT | KeyPad::L);
        let show = Context::from_boot_keys(Config::DEFAULT, KeyPad::L);

        assert_eq!(hide.privacy(), Privacy::Hide);
        assert_eq!(show.privacy(), Privacy::Show);
    }

    #[test]
    fn hidden_fields_render_placeholders() {
        let ctx = Context::new(Config::DEFAULT, Privacy::Hide);

        assert_eq!(format!("{}", ctx.identifying(1234u32, Placeholder::Zero)), "0");
        assert_eq!(format!("{}", ctx.identifying("nnid", Placeholder::Absent)), "(none)");
        assert_eq!(format!("{}", ctx.identifying("hunter2", Placeholder::Blank)), "");
    }

    #[test]
    fn shown_fields_render_verbatim() {
        let ctx = Context::new(Config::DEFAULT, Privacy::Show);

        assert_eq!(format!("{}", ctx.identifying(1234u32, Placeholder::Zero)), "1234");
        assert_eq!(format!("{:>6}", ctx.identifying("ab", Placeholder::Absent)), "    ab");
    }
}
