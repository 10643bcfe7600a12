// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Share of the system core's time the application may claim, in percent.
///
/// Reading the limit before any was ever set yields [`CpuTimeLimit::UNSET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimeLimit(u32);

impl CpuTimeLimit {
    pub const UNSET: Self = Self(u32::MAX);

    pub const fn percent(percent: u32) -> Self {
        Self(percent)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn is_set(&self) -> bool {
        self.0 != Self::UNSET.0
    }
}
