// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod ac;
pub mod act;
pub mod cfg;
pub mod fs;
pub mod gsp;
pub mod hid;
pub mod mcuhwc;
pub mod ptm;

use crate::result::Module;

/// A system service the viewer holds a session with while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Gfx,
    Aci,
    Act,
    AmApp,
    Am,
    Cfg,
    Dsp,
    McuHwc,
    Ptm,
    Soc,
}

impl ServiceKind {
    /// Services in the order they are acquired. Release happens in reverse.
    pub const ACQUISITION_ORDER: [ServiceKind; 10] = [
        ServiceKind::Gfx,
        ServiceKind::Aci,
        ServiceKind::Act,
        ServiceKind::AmApp,
        ServiceKind::Am,
        ServiceKind::Cfg,
        ServiceKind::Dsp,
        ServiceKind::McuHwc,
        ServiceKind::Ptm,
        ServiceKind::Soc,
    ];

    pub const fn service_name(&self) -> &'static str {
        match self {
            Self::Gfx => "gsp::Gpu",
            Self::Aci => "ac:i",
            Self::Act => "act:u",
            Self::AmApp => "am:app",
            Self::Am => "am:u",
            Self::Cfg => "cfg:u",
            Self::Dsp => "dsp::DSP",
            Self::McuHwc => "mcu::HWC",
            Self::Ptm => "ptm:u",
            Self::Soc => "soc:U",
        }
    }

    pub const fn module(&self) -> Module {
        match self {
            Self::Gfx => Module::Gsp,
            Self::Aci => Module::Ac,
            Self::Act => Module::Act,
            Self::AmApp | Self::Am => Module::Am,
            Self::Cfg => Module::Config,
            Self::Dsp => Module::Dsp,
            Self::McuHwc => Module::Mcu,
            Self::Ptm => Module::Ptm,
            Self::Soc => Module::Soc,
        }
    }
}

/// Cuts `s` down to what fits a NUL-terminated buffer of `buffer_len` bytes.
pub(crate) fn clamp_to_buffer(s: &str, buffer_len: usize) -> &str {
    let max = buffer_len.saturating_sub(1);
    if s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}
