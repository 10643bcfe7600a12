// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

pub mod reslimit;

/// Version triple as stored in the shared configuration memory page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KernelVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

impl KernelVersion {
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}-{}", self.major, self.minor, self.revision)
    }
}

/// Which component's version triple to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    Kernel,
    Firm,
}

/// Which system (NVer/CVer) version string to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemVersion {
    Current,
    Initial,
}
