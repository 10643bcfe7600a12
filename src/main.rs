// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::process::ExitCode;

use ctru_ident::app;
use ctru_ident::console::Consoles;
use ctru_ident::context::Config;
use ctru_ident::debug::init_log;
use ctru_ident::services::hid::KeyPad;
use ctru_ident::sim::{SimPlatform, SystemProfile};

use log::{error, info};

/// Frames the simulated user waits before pressing A.
const IDLE_FRAMES: usize = 120;

fn stderr_sink(line: &str) {
    eprintln!("{line}");
}

fn main() -> ExitCode {
    if let Err(e) = init_log(stderr_sink) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!("Using the simulated New 3DS XL profile, no real hardware is queried");
    let mut platform = SimPlatform::new(SystemProfile::new_3ds_xl());
    platform.script_pad(
        std::iter::repeat(KeyPad::NONE)
            .take(IDLE_FRAMES)
            .chain([KeyPad::A]),
    );

    let mut consoles = Consoles::new();
    match app::run(&mut platform, &Config::default(), &mut consoles) {
        Ok(_) => {
            println!("Simulated system (SimPlatform), not read from a console:");
            print!("{}", consoles.top.ansi_text());
            print!("{}", consoles.bottom.ansi_text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to run: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
