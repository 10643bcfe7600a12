// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service sessions and system settings held for the lifetime of the viewer.
//!
//! [`Session::open`] acquires every service in [`ServiceKind::ACQUISITION_ORDER`], turns on the
//! speed-up mode of newer models and lowers the CPU time limit. Dropping the session undoes all
//! of it in reverse, including after a failed `open` or an error further down.

use alloc::vec::Vec;

use log::{debug, error, info, warn};

use crate::context::Config;
use crate::heap::PageAlignedBuffer;
use crate::os::reslimit::CpuTimeLimit;
use crate::platform::Platform;
use crate::result::{ErrorCode, Module, Result};
use crate::services::ServiceKind;

pub struct Session<'p, P: Platform> {
    platform: &'p mut P,
    acquired: Vec<ServiceKind>,
    soc_buffer: Option<PageAlignedBuffer>,
    original_cpu_time_limit: CpuTimeLimit,
    speedup: bool,
}

impl<'p, P: Platform> Session<'p, P> {
    pub fn open(platform: &'p mut P, config: &Config) -> Result<Self> {
        let mut session = Self {
            platform,
            acquired: Vec::with_capacity(ServiceKind::ACQUISITION_ORDER.len()),
            soc_buffer: None,
            original_cpu_time_limit: CpuTimeLimit::UNSET,
            speedup: false,
        };

        for service in ServiceKind::ACQUISITION_ORDER {
            session.acquire(service, config).map_err(|ec| {
                error!("Failed to acquire `{}`: {ec}", service.service_name());
                ec
            })?;
        }

        session.speedup = session.enable_speedup();
        session.original_cpu_time_limit = session.override_cpu_time_limit(config.cpu_time_quota);

        info!("All services initialized");
        Ok(session)
    }

    fn acquire(&mut self, service: ServiceKind, config: &Config) -> Result<()> {
        debug!("Acquiring `{}`...", service.service_name());

        match service {
            ServiceKind::Soc => {
                let mut buffer = PageAlignedBuffer::allocate(config.soc_buffer_size)
                    .map_err(|err| {
                        error!("Socket buffer of {:#x} bytes: {err}", config.soc_buffer_size);
                        ErrorCode::out_of_resource(Module::Soc)
                    })?;
                self.platform.acquire_soc(&mut buffer)?;
                self.soc_buffer = Some(buffer);
            }
            service => self.platform.acquire(service)?,
        }

        self.acquired.push(service);
        Ok(())
    }

    fn enable_speedup(&mut self) -> bool {
        match self.platform.system_model() {
            Ok(model) if model.is_new() => {}
            Ok(_) => return false,
            Err(ec) => {
                warn!("Could not determine system model, leaving clock speed alone: {ec}");
                return false;
            }
        }

        match self.platform.set_speedup(true) {
            Ok(()) => {
                debug!("Enabled speed-up mode");
                true
            }
            Err(ec) => {
                warn!("Failed to enable speed-up mode: {ec}");
                false
            }
        }
    }

    /// Applies `quota` and returns the limit that was in place before.
    fn override_cpu_time_limit(&mut self, quota: CpuTimeLimit) -> CpuTimeLimit {
        let original = match self.platform.cpu_time_limit() {
            Ok(limit) => limit,
            Err(ec) => {
                warn!("Failed to read CPU time limit: {ec}");
                return CpuTimeLimit::UNSET;
            }
        };

        if let Err(ec) = self.platform.set_cpu_time_limit(quota) {
            warn!("Failed to set CPU time limit to {}%: {ec}", quota.raw());
        }

        debug!("CPU time limit {:?} -> {:?}", original, quota);
        original
    }

    pub fn platform(&mut self) -> &mut P {
        self.platform
    }

    pub fn original_cpu_time_limit(&self) -> CpuTimeLimit {
        self.original_cpu_time_limit
    }

    pub fn speedup_enabled(&self) -> bool {
        self.speedup
    }

    pub fn acquired(&self) -> &[ServiceKind] {
        &self.acquired
    }
}

impl<P: Platform> Drop for Session<'_, P> {
    fn drop(&mut self) {
        if self.original_cpu_time_limit.is_set() {
            if let Err(ec) = self
                .platform
                .set_cpu_time_limit(self.original_cpu_time_limit)
            {
                error!("Failed to restore CPU time limit: {ec}");
            }
        }

        if self.speedup {
            if let Err(ec) = self.platform.set_speedup(false) {
                warn!("Failed to disable speed-up mode: {ec}");
            }
        }

        while let Some(service) = self.acquired.pop() {
            debug!("Releasing `{}`...", service.service_name());
            if let Err(ec) = self.platform.release(service) {
                warn!("Failed to release `{}`: {ec}", service.service_name());
            }

            if service == ServiceKind::Soc {
                self.soc_buffer = None;
            }
        }

        info!("All services released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec;

    use assert_matches::assert_matches;

    use crate::result::ResultValue;
    use crate::services::cfg::SystemModel;
    use crate::sim::{Event, Query, SimPlatform, SystemProfile};

    fn releases(journal: &[Event]) -> Vec<ServiceKind> {
        journal
            .iter()
            .filter_map(|e| match e {
                Event::Released(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn open_then_drop_restores_everything() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());

        {
            let session = Session::open(&mut sim, &Config::DEFAULT).unwrap();
            assert_eq!(session.acquired(), &ServiceKind::ACQUISITION_ORDER);
            assert_eq!(session.original_cpu_time_limit(), CpuTimeLimit::percent(80));
            assert!(session.speedup_enabled());
        }

        assert!(sim.open_services().is_empty());
        assert_eq!(sim.current_cpu_time_limit(), CpuTimeLimit::percent(80));
        assert!(!sim.speedup_enabled());
        assert_eq!(sim.soc_buffer_size(), None);

        let mut reversed = ServiceKind::ACQUISITION_ORDER;
        reversed.reverse();
        assert_eq!(releases(sim.journal()), reversed);
    }

    #[test]
    fn settings_are_applied_while_open() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        let mut session = Session::open(&mut sim, &Config::DEFAULT).unwrap();

        let sim = session.platform();
        assert_eq!(sim.current_cpu_time_limit(), CpuTimeLimit::percent(30));
        assert!(sim.speedup_enabled());
        assert_eq!(sim.soc_buffer_size(), Some(0x10000));
    }

    #[test]
    fn teardown_order_matches_setup_in_reverse() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        drop(Session::open(&mut sim, &Config::DEFAULT).unwrap());

        let journal = sim.journal();
        let n = ServiceKind::ACQUISITION_ORDER.len();
        assert_eq!(
            &journal[n..n + 2],
            &[Event::Speedup(true), Event::CpuTimeLimit(CpuTimeLimit::percent(30))]
        );
        assert_eq!(
            &journal[n + 2..n + 4],
            &[Event::CpuTimeLimit(CpuTimeLimit::percent(80)), Event::Speedup(false)]
        );
        assert_matches!(journal[n + 4], Event::Released(ServiceKind::Soc));
        assert_matches!(journal.last(), Some(Event::Released(ServiceKind::Gfx)));
    }

    #[test]
    fn failed_acquisition_releases_what_was_acquired() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.fail_acquire(ServiceKind::Dsp);

        let res = Session::open(&mut sim, &Config::DEFAULT).map(drop);
        assert_matches!(res, Err(ec) if ec.module() == Ok(Module::Dsp));

        assert!(sim.open_services().is_empty());
        assert_eq!(
            releases(sim.journal()),
            vec![
                ServiceKind::Cfg,
                ServiceKind::Am,
                ServiceKind::AmApp,
                ServiceKind::Act,
                ServiceKind::Aci,
                ServiceKind::Gfx,
            ]
        );
        assert_eq!(sim.current_cpu_time_limit(), CpuTimeLimit::percent(80));
        assert!(!sim.journal().iter().any(|e| matches!(e, Event::CpuTimeLimit(_))));
    }

    #[test]
    fn unset_limit_is_not_restored() {
        let mut profile = SystemProfile::new_3ds_xl();
        profile.cpu_time_limit = CpuTimeLimit::UNSET;
        let mut sim = SimPlatform::new(profile);

        drop(Session::open(&mut sim, &Config::DEFAULT).unwrap());

        let limits: Vec<_> = sim
            .journal()
            .iter()
            .filter(|e| matches!(e, Event::CpuTimeLimit(_)))
            .collect();
        assert_eq!(limits, [&Event::CpuTimeLimit(CpuTimeLimit::percent(30))]);
    }

    #[test]
    fn unreadable_limit_is_left_alone() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.fail(Query::CpuTimeLimit);

        drop(Session::open(&mut sim, &Config::DEFAULT).unwrap());

        assert_eq!(sim.current_cpu_time_limit(), CpuTimeLimit::percent(80));
    }

    #[test]
    fn old_models_keep_normal_clock() {
        let mut profile = SystemProfile::new_3ds_xl();
        profile.model = SystemModel::Spr;
        let mut sim = SimPlatform::new(profile);

        drop(Session::open(&mut sim, &Config::DEFAULT).unwrap());

        assert!(!sim.journal().iter().any(|e| matches!(e, Event::Speedup(_))));
    }
}
