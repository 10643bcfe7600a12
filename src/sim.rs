// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-memory [`Platform`] with a fixed system profile, scripted input and fault injection.
//!
//! Queries fail with a `NotInitialized` error while the backing service is not acquired, the
//! same way the real services refuse requests on a closed session.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::console::Consoles;
use crate::heap::PageAlignedBuffer;
use crate::os::reslimit::CpuTimeLimit;
use crate::os::{KernelVersion, SystemVersion, VersionSource};
use crate::platform::Platform;
use crate::result::{CommonDescription, ErrorCode, Level, Module, Result, Summary};
use crate::services::ac::{MacAddress, SecurityMode, WifiSlot, WifiSlotConfig};
use crate::services::act::{AccountData, AccountString};
use crate::services::cfg::{FriendCodeSeed, Language, Region, SystemModel};
use crate::services::fs::{CardSlotStatus, CardType, Cid, MediaType, StorageInfo};
use crate::services::gsp::{Screen, ScreenType, ScreenTypes};
use crate::services::hid::KeyPad;
use crate::services::mcuhwc::McuFirmware;
use crate::services::ptm::{AdapterState, ChargeState};
use crate::services::ServiceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimAccount {
    pub principal_id: u32,
    pub data: AccountData,
    pub nnid: String,
    pub country: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimWifiSlot {
    pub ssid: String,
    pub passphrase: String,
    pub security: SecurityMode,
    pub mac: MacAddress,
}

/// Everything that stays fixed while the viewer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProfile {
    pub model: SystemModel,
    pub region: Region,
    pub language: Language,
    pub screens: ScreenTypes,
    pub kernel: KernelVersion,
    pub firm: KernelVersion,
    pub system_version: String,
    pub initial_system_version: String,
    pub device_id: u32,
    pub soap_id: u64,
    pub local_friend_code_seed: FriendCodeSeed,
    pub nand_local_friend_code_seed: FriendCodeSeed,
    pub mac: MacAddress,
    pub serial_number: String,
    pub sdmc_cid: Cid,
    pub nand_cid: Cid,
    pub sd: StorageInfo,
    pub nand: StorageInfo,
    pub sd_titles: u32,
    pub nand_titles: u32,
    pub hostname: String,
    pub account: Option<SimAccount>,
    pub wifi: [Option<SimWifiSlot>; WifiSlot::COUNT],
    pub cpu_time_limit: CpuTimeLimit,
}

impl SystemProfile {
    /// A European New 3DS XL with a linked account and two stored networks.
    pub fn new_3ds_xl() -> Self {
        Self {
            model: SystemModel::Red,
            region: Region::Europe,
            language: Language::German,
            screens: ScreenTypes {
                top: ScreenType::Ips,
                bottom: ScreenType::Tn,
            },
            kernel: KernelVersion::new(2, 56, 0),
            firm: KernelVersion::new(2, 56, 0),
            system_version: "11.17.0-50E".into(),
            initial_system_version: "9.0.0-20E".into(),
            device_id: 0x1c3a_77e1,
            soap_id: 0x0000_0004_a1b2_c3d4,
            local_friend_code_seed: FriendCodeSeed(0x03_0f1e_2d3c),
            nand_local_friend_code_seed: FriendCodeSeed(0x03_0f1e_2d3c),
            mac: MacAddress([0x40, 0xd2, 0x8a, 0x0f, 0x01, 0xbe]),
            serial_number: "QEH10475852".into(),
            sdmc_cid: Cid([
                0x03, 0x53, 0x44, 0x53, 0x43, 0x33, 0x32, 0x47, 0x80, 0x7a, 0x1b, 0x8c, 0x3d,
                0x01, 0x13, 0x00,
            ]),
            nand_cid: Cid([
                0x15, 0x01, 0x00, 0x4d, 0x41, 0x47, 0x32, 0x47, 0x43, 0x00, 0x1f, 0x2e, 0x3d,
                0x4c, 0x5b, 0x00,
            ]),
            sd: StorageInfo {
                free: 21_474_836_480,
                total: 31_902_400_512,
            },
            nand: StorageInfo {
                free: 754_974_720,
                total: 1_006_632_960,
            },
            sd_titles: 87,
            nand_titles: 142,
            hostname: "192.168.0.23".into(),
            account: Some(SimAccount {
                principal_id: 1_234_567_890,
                data: AccountData {
                    persistent_id: 0x8000_0031,
                    transferable_id: 0x5b2c_9a1d_0e3f_7788,
                },
                nnid: "fluffy_bunny".into(),
                country: "DE".into(),
                time_zone: "Europe/Berlin".into(),
            }),
            wifi: [
                Some(SimWifiSlot {
                    ssid: "Heimnetz".into(),
                    passphrase: "correct horse battery".into(),
                    security: SecurityMode::Wpa2Aes,
                    mac: MacAddress([0x40, 0xd2, 0x8a, 0x0f, 0x01, 0xbe]),
                }),
                None,
                Some(SimWifiSlot {
                    ssid: "Cafe Guest".into(),
                    passphrase: String::new(),
                    security: SecurityMode::Open,
                    mac: MacAddress([0x40, 0xd2, 0x8a, 0x0f, 0x01, 0xbe]),
                }),
            ],
            cpu_time_limit: CpuTimeLimit::percent(80),
        }
    }
}

/// Readings that may change from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    pub battery_level: u8,
    pub charge_state: ChargeState,
    pub battery_voltage: u8,
    pub adapter: AdapterState,
    pub mcu_firmware: McuFirmware,
    pub brightness: u8,
    pub wifi_strength: u8,
    pub volume: u8,
    pub slider_3d: f32,
    pub card_slot: CardSlotStatus,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            battery_level: 87,
            charge_state: ChargeState::NotCharging,
            battery_voltage: 208,
            adapter: AdapterState::Disconnected,
            mcu_firmware: McuFirmware {
                high: 0x12,
                low: 38,
            },
            brightness: 3,
            wifi_strength: 2,
            volume: 42,
            slider_3d: 0.0,
            card_slot: CardSlotStatus::Inserted(CardType::Ctr),
        }
    }
}

/// Calls that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    CpuTimeLimit,
    SetCpuTimeLimit,
    Speedup,
    ReadPad,
    WaitVBlank,
    Present,
    Storage,
    TitleCount,
    Hostname,
    PrincipalId,
    AccountData,
    AccountString(AccountString),
    LoadWifiSlot(u8),
    WifiSsid,
    WifiPassphrase,
    WifiSecurityMode,
    WifiSlotConfig,
    KernelVersion,
    SystemVersion,
    SystemModel,
    Region,
    Language,
    ScreenTypes,
    DeviceId,
    SoapId,
    LocalFriendCodeSeed,
    NandLocalFriendCodeSeed,
    MacAddress,
    SerialNumber,
    SdmcCid,
    NandCid,
    BatteryLevel,
    ChargeState,
    BatteryVoltage,
    AdapterState,
    McuFirmware,
    Brightness,
    WifiStrength,
    Volume,
    Slider3d,
    CardSlot,
}

/// State changes the simulator observed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Acquired(ServiceKind),
    Released(ServiceKind),
    CpuTimeLimit(CpuTimeLimit),
    Speedup(bool),
}

#[derive(Debug)]
pub struct SimPlatform {
    pub profile: SystemProfile,
    pub sensors: Sensors,
    pad_script: VecDeque<KeyPad>,
    last_pad: KeyPad,
    failing: Vec<Query>,
    failing_acquire: Option<ServiceKind>,
    open: Vec<ServiceKind>,
    soc_buffer_size: Option<usize>,
    journal: Vec<Event>,
    cpu_time_limit: CpuTimeLimit,
    speedup: bool,
    loaded_slot: Option<WifiSlot>,
    vblanks: u64,
    frames: Vec<Consoles>,
    keep_frames: usize,
}

impl SimPlatform {
    pub fn new(profile: SystemProfile) -> Self {
        let cpu_time_limit = profile.cpu_time_limit;

        Self {
            profile,
            sensors: Sensors::default(),
            pad_script: VecDeque::new(),
            last_pad: KeyPad::NONE,
            failing: Vec::new(),
            failing_acquire: None,
            open: Vec::new(),
            soc_buffer_size: None,
            journal: Vec::new(),
            cpu_time_limit,
            speedup: false,
            loaded_slot: None,
            vblanks: 0,
            frames: Vec::new(),
            keep_frames: 2,
        }
    }

    /// Queues raw pad samples, one per [`Platform::read_pad`] call.
    /// Once the script runs out, the last sample stays held.
    pub fn script_pad<I: IntoIterator<Item = KeyPad>>(&mut self, samples: I) -> &mut Self {
        self.pad_script.extend(samples);
        self
    }

    pub fn fail(&mut self, query: Query) -> &mut Self {
        if !self.failing.contains(&query) {
            self.failing.push(query);
        }
        self
    }

    pub fn recover(&mut self, query: Query) -> &mut Self {
        self.failing.retain(|q| *q != query);
        self
    }

    pub fn fail_acquire(&mut self, service: ServiceKind) -> &mut Self {
        self.failing_acquire = Some(service);
        self
    }

    pub fn journal(&self) -> &[Event] {
        &self.journal
    }

    pub fn open_services(&self) -> &[ServiceKind] {
        &self.open
    }

    pub fn soc_buffer_size(&self) -> Option<usize> {
        self.soc_buffer_size
    }

    pub fn current_cpu_time_limit(&self) -> CpuTimeLimit {
        self.cpu_time_limit
    }

    pub fn speedup_enabled(&self) -> bool {
        self.speedup
    }

    pub fn vblanks(&self) -> u64 {
        self.vblanks
    }

    /// The most recently presented frames, oldest first.
    pub fn presented(&self) -> &[Consoles] {
        &self.frames
    }

    fn query(&self, query: Query, service: Option<ServiceKind>) -> Result<()> {
        if let Some(service) = service {
            if !self.open.contains(&service) {
                return Err(ErrorCode::not_initialized(service.module()));
            }
        }

        if self.failing.contains(&query) {
            trace!("Injected failure for {query:?}");
            let module = service.map_or(Module::Application, |s| s.module());
            return Err(ErrorCode::not_found(module));
        }

        Ok(())
    }

    fn open_session(&mut self, service: ServiceKind) -> Result<()> {
        if self.failing_acquire == Some(service) {
            return Err(ErrorCode::out_of_resource(service.module()));
        }

        self.open.push(service);
        self.journal.push(Event::Acquired(service));
        Ok(())
    }

    fn slot(&self) -> Result<&SimWifiSlot> {
        self.loaded_slot
            .and_then(|slot| self.profile.wifi[slot.index() as usize].as_ref())
            .ok_or(ErrorCode::not_found(Module::Ac))
    }
}

impl Platform for SimPlatform {
    fn acquire(&mut self, service: ServiceKind) -> Result<()> {
        self.open_session(service)
    }

    fn acquire_soc(&mut self, buffer: &mut PageAlignedBuffer) -> Result<()> {
        if !buffer.is_page_aligned() {
            return Err(ErrorCode::new(
                Level::Usage,
                Summary::InvalidArgument,
                Module::Soc,
                CommonDescription::MisalignedAddress as u32,
            ));
        }

        self.open_session(ServiceKind::Soc)?;
        self.soc_buffer_size = Some(buffer.size());
        Ok(())
    }

    fn release(&mut self, service: ServiceKind) -> Result<()> {
        let index = self
            .open
            .iter()
            .position(|s| *s == service)
            .ok_or(ErrorCode::not_initialized(service.module()))?;

        self.open.remove(index);
        if service == ServiceKind::Soc {
            self.soc_buffer_size = None;
        }
        self.journal.push(Event::Released(service));
        Ok(())
    }

    fn cpu_time_limit(&mut self) -> Result<CpuTimeLimit> {
        self.query(Query::CpuTimeLimit, None)?;
        Ok(self.cpu_time_limit)
    }

    fn set_cpu_time_limit(&mut self, limit: CpuTimeLimit) -> Result<()> {
        self.query(Query::SetCpuTimeLimit, None)?;
        self.cpu_time_limit = limit;
        self.journal.push(Event::CpuTimeLimit(limit));
        Ok(())
    }

    fn set_speedup(&mut self, enable: bool) -> Result<()> {
        self.query(Query::Speedup, None)?;
        self.speedup = enable;
        self.journal.push(Event::Speedup(enable));
        Ok(())
    }

    fn read_pad(&mut self) -> Result<KeyPad> {
        self.query(Query::ReadPad, None)?;
        if let Some(pad) = self.pad_script.pop_front() {
            self.last_pad = pad;
        }
        Ok(self.last_pad)
    }

    fn wait_vblank(&mut self) -> Result<()> {
        self.query(Query::WaitVBlank, Some(ServiceKind::Gfx))?;
        self.vblanks += 1;
        Ok(())
    }

    fn present(&mut self, consoles: &Consoles) -> Result<()> {
        self.query(Query::Present, Some(ServiceKind::Gfx))?;
        if self.frames.len() == self.keep_frames {
            self.frames.remove(0);
        }
        self.frames.push(consoles.clone());
        Ok(())
    }

    fn storage(&self, media: MediaType) -> Result<StorageInfo> {
        self.query(Query::Storage, None)?;
        Ok(match media {
            MediaType::Sd => self.profile.sd,
            MediaType::Nand => self.profile.nand,
        })
    }

    fn title_count(&self, media: MediaType) -> Result<u32> {
        self.query(Query::TitleCount, Some(ServiceKind::Am))?;
        Ok(match media {
            MediaType::Sd => self.profile.sd_titles,
            MediaType::Nand => self.profile.nand_titles,
        })
    }

    fn hostname(&self) -> Result<String> {
        self.query(Query::Hostname, Some(ServiceKind::Soc))?;
        Ok(self.profile.hostname.clone())
    }

    fn principal_id(&self) -> Result<u32> {
        self.query(Query::PrincipalId, Some(ServiceKind::Act))?;
        Ok(self.profile.account.as_ref().map_or(0, |a| a.principal_id))
    }

    fn account_data(&self) -> Result<AccountData> {
        self.query(Query::AccountData, Some(ServiceKind::Act))?;
        self.profile
            .account
            .as_ref()
            .map(|a| a.data)
            .ok_or(ErrorCode::not_found(Module::Act))
    }

    fn account_string(&self, field: AccountString) -> Result<String> {
        self.query(Query::AccountString(field), Some(ServiceKind::Act))?;
        let account = self
            .profile
            .account
            .as_ref()
            .ok_or(ErrorCode::not_found(Module::Act))?;

        Ok(match field {
            AccountString::Nnid => account.nnid.clone(),
            AccountString::Country => account.country.clone(),
            AccountString::TimeZone => account.time_zone.clone(),
        })
    }

    fn load_wifi_slot(&mut self, slot: WifiSlot) -> Result<()> {
        self.query(Query::LoadWifiSlot(slot.index()), Some(ServiceKind::Aci))?;
        if self.profile.wifi[slot.index() as usize].is_none() {
            self.loaded_slot = None;
            return Err(ErrorCode::not_found(Module::Ac));
        }

        self.loaded_slot = Some(slot);
        Ok(())
    }

    fn wifi_ssid(&self) -> Result<String> {
        self.query(Query::WifiSsid, Some(ServiceKind::Aci))?;
        Ok(self.slot()?.ssid.clone())
    }

    fn wifi_passphrase(&self) -> Result<String> {
        self.query(Query::WifiPassphrase, Some(ServiceKind::Aci))?;
        Ok(self.slot()?.passphrase.clone())
    }

    fn wifi_security_mode(&self) -> Result<SecurityMode> {
        self.query(Query::WifiSecurityMode, Some(ServiceKind::Aci))?;
        Ok(self.slot()?.security)
    }

    fn wifi_slot_config(&self, slot: WifiSlot) -> Result<WifiSlotConfig> {
        self.query(Query::WifiSlotConfig, Some(ServiceKind::Cfg))?;
        Ok(match &self.profile.wifi[slot.index() as usize] {
            Some(stored) => WifiSlotConfig {
                set: true,
                mac: stored.mac,
            },
            None => WifiSlotConfig::default(),
        })
    }

    fn kernel_version(&self, source: VersionSource) -> Result<KernelVersion> {
        self.query(Query::KernelVersion, None)?;
        Ok(match source {
            VersionSource::Kernel => self.profile.kernel,
            VersionSource::Firm => self.profile.firm,
        })
    }

    fn system_version(&self, which: SystemVersion) -> Result<String> {
        self.query(Query::SystemVersion, None)?;
        Ok(match which {
            SystemVersion::Current => self.profile.system_version.clone(),
            SystemVersion::Initial => self.profile.initial_system_version.clone(),
        })
    }

    fn system_model(&self) -> Result<SystemModel> {
        self.query(Query::SystemModel, Some(ServiceKind::Cfg))?;
        Ok(self.profile.model)
    }

    fn region(&self) -> Result<Region> {
        self.query(Query::Region, Some(ServiceKind::Cfg))?;
        Ok(self.profile.region)
    }

    fn language(&self) -> Result<Language> {
        self.query(Query::Language, Some(ServiceKind::Cfg))?;
        Ok(self.profile.language)
    }

    fn screen_types(&self) -> Result<ScreenTypes> {
        self.query(Query::ScreenTypes, Some(ServiceKind::Gfx))?;
        Ok(self.profile.screens)
    }

    fn device_id(&self) -> Result<u32> {
        self.query(Query::DeviceId, None)?;
        Ok(self.profile.device_id)
    }

    fn soap_id(&self) -> Result<u64> {
        self.query(Query::SoapId, Some(ServiceKind::Am))?;
        Ok(self.profile.soap_id)
    }

    fn local_friend_code_seed(&self) -> Result<FriendCodeSeed> {
        self.query(Query::LocalFriendCodeSeed, Some(ServiceKind::Cfg))?;
        Ok(self.profile.local_friend_code_seed)
    }

    fn nand_local_friend_code_seed(&self) -> Result<FriendCodeSeed> {
        self.query(Query::NandLocalFriendCodeSeed, None)?;
        Ok(self.profile.nand_local_friend_code_seed)
    }

    fn mac_address(&self) -> Result<MacAddress> {
        self.query(Query::MacAddress, Some(ServiceKind::Cfg))?;
        Ok(self.profile.mac)
    }

    fn serial_number(&self) -> Result<String> {
        self.query(Query::SerialNumber, Some(ServiceKind::Cfg))?;
        Ok(self.profile.serial_number.clone())
    }

    fn sdmc_cid(&self) -> Result<Cid> {
        self.query(Query::SdmcCid, None)?;
        Ok(self.profile.sdmc_cid)
    }

    fn nand_cid(&self) -> Result<Cid> {
        self.query(Query::NandCid, None)?;
        Ok(self.profile.nand_cid)
    }

    fn battery_level(&self) -> Result<u8> {
        self.query(Query::BatteryLevel, Some(ServiceKind::McuHwc))?;
        Ok(self.sensors.battery_level)
    }

    fn battery_charge_state(&self) -> Result<ChargeState> {
        self.query(Query::ChargeState, Some(ServiceKind::Ptm))?;
        Ok(self.sensors.charge_state)
    }

    fn battery_voltage(&self) -> Result<u8> {
        self.query(Query::BatteryVoltage, Some(ServiceKind::McuHwc))?;
        Ok(self.sensors.battery_voltage)
    }

    fn adapter_state(&self) -> Result<AdapterState> {
        self.query(Query::AdapterState, Some(ServiceKind::Ptm))?;
        Ok(self.sensors.adapter)
    }

    fn mcu_firmware(&self) -> Result<McuFirmware> {
        self.query(Query::McuFirmware, Some(ServiceKind::McuHwc))?;
        Ok(self.sensors.mcu_firmware)
    }

    fn brightness(&self, _screen: Screen) -> Result<u8> {
        self.query(Query::Brightness, Some(ServiceKind::Gfx))?;
        Ok(self.sensors.brightness)
    }

    fn wifi_strength(&self) -> Result<u8> {
        self.query(Query::WifiStrength, None)?;
        Ok(self.sensors.wifi_strength)
    }

    fn volume(&self) -> Result<u8> {
        self.query(Query::Volume, None)?;
        Ok(self.sensors.volume)
    }

    fn slider_3d(&self) -> Result<f32> {
        self.query(Query::Slider3d, None)?;
        Ok(self.sensors.slider_3d)
    }

    fn card_slot(&self) -> Result<CardSlotStatus> {
        self.query(Query::CardSlot, None)?;
        Ok(self.sensors.card_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;

    #[test]
    fn queries_need_an_open_service() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());

        assert_matches!(sim.battery_level(), Err(_));
        sim.acquire(ServiceKind::McuHwc).unwrap();
        assert_eq!(sim.battery_level(), Ok(87));
    }

    #[test]
    fn injected_failures_can_be_lifted() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.fail(Query::Volume);

        assert_matches!(sim.volume(), Err(_));
        sim.recover(Query::Volume);
        assert_eq!(sim.volume(), Ok(42));
    }

    #[test]
    fn pad_script_holds_last_sample() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.script_pad([KeyPad::SELECT, KeyPad::A]);

        assert_eq!(sim.read_pad(), Ok(KeyPad::SELECT));
        assert_eq!(sim.read_pad(), Ok(KeyPad::A));
        assert_eq!(sim.read_pad(), Ok(KeyPad::A));
    }

    #[test]
    fn unconfigured_slot_does_not_load() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.acquire(ServiceKind::Aci).unwrap();

        assert_matches!(sim.load_wifi_slot(WifiSlot::ALL[1]), Err(_));
        assert_matches!(sim.wifi_ssid(), Err(_));
        sim.load_wifi_slot(WifiSlot::ALL[2]).unwrap();
        assert_eq!(sim.wifi_ssid().as_deref(), Ok("Cafe Guest"));
    }

    #[test]
    fn releasing_unknown_service_fails() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());

        assert_matches!(sim.release(ServiceKind::Ptm), Err(_));
        assert!(sim.journal().is_empty());
    }
}
