// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The system services the viewer reads from.
//!
//! Every call reports failure through [`Result`]. Queries must be idempotent and cheap enough
//! to run once per frame. Strings are returned owned, and never exceed the buffer size
//! documented next to the query (terminator excluded).

use alloc::string::String;

use crate::console::Consoles;
use crate::heap::PageAlignedBuffer;
use crate::os::reslimit::CpuTimeLimit;
use crate::os::{KernelVersion, SystemVersion, VersionSource};
use crate::result::Result;
use crate::services::ac::{MacAddress, SecurityMode, WifiSlot, WifiSlotConfig};
use crate::services::act::{AccountData, AccountString};
use crate::services::cfg::{FriendCodeSeed, Language, Region, SystemModel};
use crate::services::fs::{CardSlotStatus, Cid, MediaType, StorageInfo};
use crate::services::gsp::{Screen, ScreenTypes};
use crate::services::hid::KeyPad;
use crate::services::mcuhwc::McuFirmware;
use crate::services::ptm::{AdapterState, ChargeState};
use crate::services::ServiceKind;

pub trait Platform {
    // Service sessions

    /// Opens a session with `service`. [`ServiceKind::Soc`] goes through [`Platform::acquire_soc`].
    fn acquire(&mut self, service: ServiceKind) -> Result<()>;

    /// Opens the socket service, backed by `buffer` until it is released.
    fn acquire_soc(&mut self, buffer: &mut PageAlignedBuffer) -> Result<()>;

    fn release(&mut self, service: ServiceKind) -> Result<()>;

    fn cpu_time_limit(&mut self) -> Result<CpuTimeLimit>;

    fn set_cpu_time_limit(&mut self, limit: CpuTimeLimit) -> Result<()>;

    /// Toggles the high clock rate and L2 cache of the newer models.
    fn set_speedup(&mut self, enable: bool) -> Result<()>;

    // Input and display

    /// Raw state of all keys at the time of the call.
    fn read_pad(&mut self) -> Result<KeyPad>;

    /// Blocks until the next vertical blank of the top screen.
    fn wait_vblank(&mut self) -> Result<()>;

    /// Flushes both consoles and swaps the front and back buffers.
    fn present(&mut self, consoles: &Consoles) -> Result<()>;

    // Storage, titles and network

    fn storage(&self, media: MediaType) -> Result<StorageInfo>;

    fn title_count(&self, media: MediaType) -> Result<u32>;

    /// Local IP address as text. Buffer size 128.
    fn hostname(&self) -> Result<String>;

    // Account

    fn principal_id(&self) -> Result<u32>;

    fn account_data(&self) -> Result<AccountData>;

    /// Buffer size given by [`AccountString::buffer_len`].
    fn account_string(&self, field: AccountString) -> Result<String>;

    // Wi-Fi slots

    /// Makes `slot` the target of the following `wifi_*` queries. Fails for unconfigured slots.
    fn load_wifi_slot(&mut self, slot: WifiSlot) -> Result<()>;

    /// Buffer size [`SSID_BUFFER_LEN`](crate::services::ac::SSID_BUFFER_LEN).
    fn wifi_ssid(&self) -> Result<String>;

    /// Buffer size [`PASSPHRASE_BUFFER_LEN`](crate::services::ac::PASSPHRASE_BUFFER_LEN).
    fn wifi_passphrase(&self) -> Result<String>;

    fn wifi_security_mode(&self) -> Result<SecurityMode>;

    fn wifi_slot_config(&self, slot: WifiSlot) -> Result<WifiSlotConfig>;

    // Firmware and system identity

    fn kernel_version(&self, source: VersionSource) -> Result<KernelVersion>;

    /// E.g. `11.17.0-50E`. Buffer size 32.
    fn system_version(&self, which: SystemVersion) -> Result<String>;

    fn system_model(&self) -> Result<SystemModel>;

    fn region(&self) -> Result<Region>;

    fn language(&self) -> Result<Language>;

    fn screen_types(&self) -> Result<ScreenTypes>;

    fn device_id(&self) -> Result<u32>;

    fn soap_id(&self) -> Result<u64>;

    fn local_friend_code_seed(&self) -> Result<FriendCodeSeed>;

    fn nand_local_friend_code_seed(&self) -> Result<FriendCodeSeed>;

    fn mac_address(&self) -> Result<MacAddress>;

    /// Buffer size 16.
    fn serial_number(&self) -> Result<String>;

    fn sdmc_cid(&self) -> Result<Cid>;

    fn nand_cid(&self) -> Result<Cid>;

    // Volatile readings

    /// Charge in percent.
    fn battery_level(&self) -> Result<u8>;

    fn battery_charge_state(&self) -> Result<ChargeState>;

    /// Raw voltage register, see [`voltage_to_volts`](crate::convert::voltage_to_volts).
    fn battery_voltage(&self) -> Result<u8>;

    fn adapter_state(&self) -> Result<AdapterState>;

    fn mcu_firmware(&self) -> Result<McuFirmware>;

    fn brightness(&self, screen: Screen) -> Result<u8>;

    /// Signal bars, 0-3.
    fn wifi_strength(&self) -> Result<u8>;

    /// Volume slider position, 0-63.
    fn volume(&self) -> Result<u8>;

    /// 3D slider position, 0.0-1.0.
    fn slider_3d(&self) -> Result<f32>;

    fn card_slot(&self) -> Result<CardSlotStatus>;
}
