// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::{error, info, warn};

use crate::console::Consoles;
use crate::context::{Config, Context, Privacy};
use crate::platform::Platform;
use crate::poll::Poller;
use crate::report;
use crate::result::Result;
use crate::services::hid::KeyPad;
use crate::session::Session;

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// Frames spent in the live view.
    pub ticks: u64,
}

/// Opens the services, prints the report and runs the live view until an exit key is pressed.
///
/// The platform is restored when this returns, whether it succeeds or not.
pub fn run<P: Platform>(platform: &mut P, config: &Config, consoles: &mut Consoles) -> Result<Exit> {
    let mut session = Session::open(platform, config).map_err(|e| {
        error!("Failed to initialize services: {}", e);
        e
    })?;
    let platform = session.platform();

    let (ctx, boot_keys) = boot_context(platform, config);
    info!("Privacy mode: {:?}", ctx.privacy());

    report::render(platform, &ctx, consoles);

    let ticks = Poller::new(&ctx, boot_keys).run(platform, consoles)?;
    info!("Exiting after {} frames", ticks);

    Ok(Exit { ticks })
}

/// Samples the keys held at boot. Identifying fields stay hidden if the pad cannot be read.
fn boot_context<P: Platform>(platform: &mut P, config: &Config) -> (Context, KeyPad) {
    match platform.read_pad() {
        Ok(held) => (Context::from_boot_keys(*config, held), held),
        Err(e) => {
            warn!("Failed to read keys held at boot, hiding identifying fields: {}", e);
            (Context::new(*config, Privacy::Hide), KeyPad::NONE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sim::{Query, SimPlatform, SystemProfile};

    #[test]
    fn boot_keys_pick_privacy() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.script_pad([KeyPad::SELECT | KeyPad::A]);

        let (ctx, held) = boot_context(&mut sim, &Config::DEFAULT);
        assert_eq!(ctx.privacy(), Privacy::Hide);
        assert_eq!(held, KeyPad::SELECT | KeyPad::A);
    }

    #[test]
    fn unreadable_pad_hides_identifying_fields() {
        let mut sim = SimPlatform::new(SystemProfile::new_3ds_xl());
        sim.fail(Query::ReadPad);

        let (ctx, held) = boot_context(&mut sim, &Config::DEFAULT);
        assert_eq!(ctx.privacy(), Privacy::Hide);
        assert_eq!(held, KeyPad::NONE);
    }
}
