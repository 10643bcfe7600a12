// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result codes as reported by the system services.
//!
//! Every platform call reports success or failure as a packed 32 bit value:
//!
//! ```text
//!  31     27 26    21 20  18 17      10 9          0
//! [ level  ][summary][    ][  module   ][description]
//! ```
//!
//! A value of `0` is success. Everything else is an [`ErrorCode`].

use core::fmt;
use core::num::NonZeroU32;

use num_enum::TryFromPrimitive;

pub type Result<T> = core::result::Result<T, ErrorCode>;

#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
#[must_use = "error codes indicate failure that must be dealt with"]
pub struct ErrorCode(NonZeroU32);

impl ErrorCode {
    pub const fn new(level: Level, summary: Summary, module: Module, description: u32) -> Self {
        let level = level as u32;
        let summary = summary as u32;
        let module = module as u8 as u32;
        let ec = level << 27 | summary << 21 | module << 10 | (description & 0b11_1111_1111);

        match NonZeroU32::new(ec) {
            Some(ec) => Self(ec),
            None => panic!("Cannot construct an ErrorCode that is a success in disguise"),
        }
    }

    /// The service backing `module` was never acquired or has already been released.
    pub const fn not_initialized(module: Module) -> Self {
        Self::new(
            Level::Usage,
            Summary::InvalidState,
            module,
            CommonDescription::NotInitialized as u32,
        )
    }

    /// The queried record does not exist (unconfigured slot, missing account block, ...).
    pub const fn not_found(module: Module) -> Self {
        Self::new(
            Level::Permanent,
            Summary::NotFound,
            module,
            CommonDescription::NotFound as u32,
        )
    }

    pub const fn out_of_resource(module: Module) -> Self {
        Self::new(
            Level::Fatal,
            Summary::OutOfResource,
            module,
            CommonDescription::OutOfMemory as u32,
        )
    }
}

pub trait ResultValue {
    fn value(&self) -> u32;

    fn level(&self) -> core::result::Result<Level, u32> {
        Level::try_from_primitive((self.value() >> 27) & 0b1_1111).map_err(|e| e.number)
    }

    fn summary(&self) -> core::result::Result<Summary, u32> {
        Summary::try_from_primitive((self.value() >> 21) & 0b11_1111).map_err(|e| e.number)
    }

    fn module(&self) -> core::result::Result<Module, u8> {
        Module::try_from_primitive(((self.value() >> 10) & 0b1111_1111) as u8)
            .map_err(|e| e.number)
    }

    fn description(&self) -> core::result::Result<CommonDescription, u32> {
        CommonDescription::try_from_primitive(self.value() & 0b11_1111_1111).map_err(|e| e.number)
    }
}

impl ResultValue for ErrorCode {
    fn value(&self) -> u32 {
        self.0.into()
    }
}

macro_rules! result_value_dbg_fmt {
    ($rv_type: ty) => {
        impl fmt::Debug for $rv_type {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.debug_struct(stringify!($rv_type))
                    .field("value", &format_args!("{:#010x}", self.value()))
                    .field("level", result_value_dbg_fmt!(@ match self.level()))
                    .field("module", result_value_dbg_fmt!(@ match self.module()))
                    .field("summary", result_value_dbg_fmt!(@ match self.summary()))
                    .field("description", result_value_dbg_fmt!(@ match self.description()))
                    .finish()
            }
        }
    };
    (@ match $field:expr) => {
        match $field {
            Ok(ref known) => known as &dyn fmt::Debug,
            Err(ref unknown) => unknown as &dyn fmt::Debug,
        }
    };
}

result_value_dbg_fmt!(ErrorCode);

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.module(), self.description()) {
            (Ok(module), Ok(description)) => {
                write!(f, "{module:?}: {description:?} ({:#010x})", self.value())
            }
            (Ok(module), Err(_)) => write!(f, "{module:?}: error {:#010x}", self.value()),
            _ => write!(f, "error {:#010x}", self.value()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum Level {
    Success = 0,
    Info = 1,
    Status = 25,
    Temporary,
    Permanent,
    Usage,
    Reinitialize,
    Reset,
    Fatal,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum Summary {
    Success = 0,
    Nop,
    WouldBlock,
    OutOfResource,
    NotFound,
    InvalidState,
    NotSupported,
    InvalidArgument,
    WrongArgument,
    Canceled,
    StatusChanged,
    Internal,
    InvalidResultValue = 63,
}

/// The subset of result modules reported by the services this crate talks to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Module {
    Common = 0,
    Kernel = 1,
    Os = 6,
    Gsp = 10,
    Codec = 14,
    Fs = 17,
    Hid = 19,
    Srv = 25,
    Soc = 28,
    Am = 32,
    Ac = 39,
    Dsp = 41,
    Applet = 51,
    Ptm = 53,
    Config = 64,
    Mcu = 72,
    Act = 83,
    Application = 254,
    Invalid = 255,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum CommonDescription {
    Success = 0,
    InvalidSection = 1000,
    TooLarge = 1001,
    NotAuthorized = 1002,
    AlreadyDone = 1003,
    InvalidSize = 1004,
    InvalidEnumValue = 1005,
    InvalidCombination = 1006,
    NoData = 1007,
    Busy = 1008,
    MisalignedAddress = 1009,
    MisalignedSize = 1010,
    OutOfMemory = 1011,
    NotImplemented = 1012,
    InvalidAddress = 1013,
    InvalidPointer = 1014,
    InvalidHandle = 1015,
    NotInitialized = 1016,
    AlreadyInitialized = 1017,
    NotFound = 1018,
    CancelRequested = 1019,
    AlreadyExists = 1020,
    OutOfRange = 1021,
    Timeout = 1022,
    InvalidResultValue = 1023,
}
