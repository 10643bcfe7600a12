// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The per-frame loop that keeps the volatile readings on the top screen current.

use log::{debug, trace};

use crate::console::{Color, Consoles, TextConsole, RESET};
use crate::context::Context;
use crate::convert::{bars_to_percent, slider_to_percent, voltage_to_volts, volume_to_percent};
use crate::platform::Platform;
use crate::result::Result;
use crate::services::gsp::Screen;
use crate::services::hid::{InputState, KeyPad};

/// 1-based rows of the live block on the top screen.
pub mod rows {
    pub const BATTERY: usize = 20;
    pub const VOLTAGE: usize = 21;
    pub const ADAPTER: usize = 22;
    pub const MCU_FIRMWARE: usize = 23;
    pub const BRIGHTNESS: usize = 25;
    pub const WIFI_SIGNAL: usize = 26;
    pub const VOLUME: usize = 27;
    pub const SLIDER_3D: usize = 28;
    pub const CARD_SLOT: usize = 29;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Running,
    Exiting,
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    exit_keys: KeyPad,
    input: InputState,
}

impl Poller {
    /// Keys in `boot_keys` are treated as already held and do not end the loop until pressed anew.
    pub fn new(ctx: &Context, boot_keys: KeyPad) -> Self {
        Self {
            exit_keys: ctx.config.exit_keys,
            input: InputState::with_held(boot_keys),
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Rewrites every live row whose reading succeeds. Rows with a failed reading keep their
    /// previous contents.
    pub fn render<P: Platform>(&self, platform: &P, con: &mut TextConsole) {
        power(platform, con);
        misc(platform, con);
    }

    /// One frame: render, wait for the vertical blank, sample the pad and present unless a new
    /// press of an exit key ends the loop.
    pub fn tick<P: Platform>(
        &mut self,
        platform: &mut P,
        consoles: &mut Consoles,
    ) -> Result<PollState> {
        self.render(platform, consoles.screen(Screen::Top));

        platform.wait_vblank()?;
        let sample = match platform.read_pad() {
            Ok(sample) => sample,
            Err(e) => {
                trace!("Pad read failed: {}", e);
                self.input.held()
            }
        };
        self.input.update(sample);

        if self.input.down().intersects(self.exit_keys) {
            debug!("Exit requested by {:?}", self.input.down());
            return Ok(PollState::Exiting);
        }

        platform.present(consoles)?;
        Ok(PollState::Running)
    }

    /// Ticks until an exit key is pressed. Returns the number of frames run.
    pub fn run<P: Platform>(&mut self, platform: &mut P, consoles: &mut Consoles) -> Result<u64> {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if self.tick(platform, consoles)? == PollState::Exiting {
                return Ok(ticks);
            }
        }
    }
}

/// 1-based column where the charge state starts, right after `* Battery percentage: 100% `.
const CHARGE_STATE_COLUMN: usize = 28;

fn power<P: Platform>(platform: &P, con: &mut TextConsole) {
    const C: Color = Color::Blue;

    // Level and charge state are separate reads, each refreshing only its own part of the row.
    if let Ok(level) = platform.battery_level() {
        con.set_cursor(rows::BATTERY, 1);
        con.print(format_args!(
            "{}*{RESET} Battery percentage: {}{level:3}%{RESET} ",
            C.bold(),
            C.bold()
        ));
    }

    if let Ok(state) = platform.battery_charge_state() {
        con.set_cursor(rows::BATTERY, CHARGE_STATE_COLUMN);
        con.print(format_args!("({}{state}{RESET})\x1b[K", C.bold()));
    }

    if let Ok(raw) = platform.battery_voltage() {
        con.line_at(
            rows::VOLTAGE,
            C,
            "Battery voltage",
            format_args!(
                "{raw}{RESET} ({}{:.1} V{RESET})",
                C.bold(),
                voltage_to_volts(raw.into())
            ),
        );
    }

    if let Ok(adapter) = platform.adapter_state() {
        con.line_at(rows::ADAPTER, C, "Adapter state", adapter);
    }

    if let Ok(firmware) = platform.mcu_firmware() {
        con.line_at(rows::MCU_FIRMWARE, C, "MCU firmware", firmware);
    }
}

fn misc<P: Platform>(platform: &P, con: &mut TextConsole) {
    const C: Color = Color::Cyan;

    if let Ok(level) = platform.brightness(Screen::Top) {
        con.line_at(rows::BRIGHTNESS, C, "Brightness level", level);
    }

    if let Ok(bars) = platform.wifi_strength() {
        con.line_at(
            rows::WIFI_SIGNAL,
            C,
            "WiFi signal strength",
            format_args!(
                "{bars}{RESET}  ({}{:.0}%{RESET})",
                C.bold(),
                bars_to_percent(bars)
            ),
        );
    }

    if let Ok(volume) = platform.volume() {
        con.line_at(
            rows::VOLUME,
            C,
            "Volume slider state",
            format_args!(
                "{volume}{RESET}  ({}{:.0}%{RESET})",
                C.bold(),
                volume_to_percent(volume)
            ),
        );
    }

    if let Ok(depth) = platform.slider_3d() {
        con.line_at(
            rows::SLIDER_3D,
            C,
            "3D slider state",
            format_args!(
                "{depth:.1}{RESET}  ({}{:.0}%{RESET})",
                C.bold(),
                slider_to_percent(depth)
            ),
        );
    }

    if let Ok(status) = platform.card_slot() {
        con.line_at(rows::CARD_SLOT, C, "Card slot status", status);
    }
}
