// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The one-time report: storage, account and Wi-Fi details on the bottom screen, firmware and
//! system identity on the top screen.
//!
//! A failed query drops its line. Nothing else happens.

use crate::console::{Color, Consoles, TextConsole, RESET};
use crate::context::{Context, Placeholder};
use crate::convert::ByteSize;
use crate::os::{SystemVersion, VersionSource};
use crate::platform::Platform;
use crate::services::ac::{WifiSlot, PASSPHRASE_BUFFER_LEN, SSID_BUFFER_LEN};
use crate::services::act::AccountString;
use crate::services::clamp_to_buffer;
use crate::services::fs::MediaType;

/// Shown in the banner on the top screen.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render<P: Platform>(platform: &mut P, ctx: &Context, consoles: &mut Consoles) {
    let bottom = &mut consoles.bottom;
    storage_summary(platform, ctx, bottom);
    account(platform, ctx, bottom);
    for slot in WifiSlot::ALL {
        wifi_slot(platform, ctx, slot, bottom);
    }
    bottom.print(format_args!(
        "{}> Press any key to exit =){RESET}",
        Color::Green.bold()
    ));

    let top = &mut consoles.top;
    top.set_cursor(1, 1);
    top.print(format_args!(
        "{}ctru-ident v{VERSION}{RESET}\n\n",
        Color::Green.bold()
    ));
    firmware(platform, top);
    system_identity(platform, ctx, top);
}

fn storage_summary<P: Platform>(platform: &P, ctx: &Context, con: &mut TextConsole) {
    const C: Color = Color::Cyan;

    for (label, media) in [("SD Size", MediaType::Sd), ("CTR Size", MediaType::Nand)] {
        if let Ok(info) = platform.storage(media) {
            con.line(
                C,
                label,
                format_args!(
                    "{}{RESET} / {}{}",
                    ByteSize(info.free),
                    C.bold(),
                    ByteSize(info.total)
                ),
            );
        }
    }

    if let (Ok(sd), Ok(nand)) = (
        platform.title_count(MediaType::Sd),
        platform.title_count(MediaType::Nand),
    ) {
        con.line(
            C,
            "Installed titles",
            format_args!("SD: {sd}{RESET}  (NAND: {}{nand}{RESET})", C.bold()),
        );
    }

    if let Ok(ip) = platform.hostname() {
        con.line(C, "IP", ctx.identifying(clamp_to_buffer(&ip, 128), Placeholder::Absent));
    }
    con.print(format_args!("\n"));
}

fn account<P: Platform>(platform: &P, ctx: &Context, con: &mut TextConsole) {
    const C: Color = Color::Magenta;

    let principal_id = match platform.principal_id() {
        Ok(id) if id != 0 => id,
        _ => return,
    };

    let text_field = |field: AccountString| {
        platform
            .account_string(field)
            .map(|s| alloc::string::String::from(clamp_to_buffer(&s, field.buffer_len())))
    };

    if let Ok(nnid) = text_field(AccountString::Nnid) {
        con.line(C, "NNID", ctx.identifying(nnid, Placeholder::Absent));
    }

    con.line(C, "Principal ID", ctx.identifying(principal_id, Placeholder::Zero));

    if let Ok(data) = platform.account_data() {
        con.line(
            C,
            "Persistent ID",
            ctx.identifying(data.persistent_id, Placeholder::Zero),
        );
        con.line(
            C,
            "Transferable ID",
            ctx.identifying(data.transferable_id, Placeholder::Zero),
        );
    }

    if let Ok(country) = text_field(AccountString::Country) {
        con.line(C, "Country", ctx.identifying(country, Placeholder::Absent));
    }

    if let Ok(time_zone) = text_field(AccountString::TimeZone) {
        con.line(C, "Time Zone", ctx.identifying(time_zone, Placeholder::Absent));
    }
    con.print(format_args!("\n"));
}

fn wifi_slot<P: Platform>(platform: &mut P, ctx: &Context, slot: WifiSlot, con: &mut TextConsole) {
    const C: Color = Color::Green;

    if platform.load_wifi_slot(slot).is_err() {
        return;
    }
    let n = slot.number();

    if let Ok(ssid) = platform.wifi_ssid() {
        con.line(
            C,
            format_args!("WiFi {n} SSID"),
            clamp_to_buffer(&ssid, SSID_BUFFER_LEN),
        );
    }

    if let Ok(passphrase) = platform.wifi_passphrase() {
        let passphrase = clamp_to_buffer(&passphrase, PASSPHRASE_BUFFER_LEN);
        con.line(
            C,
            format_args!("WiFi {n} pass"),
            ctx.identifying(passphrase, Placeholder::Blank),
        );
    }

    if let Ok(mode) = platform.wifi_security_mode() {
        con.line(
            C,
            format_args!("WiFi {n} security"),
            ctx.identifying(mode, Placeholder::Blank),
        );
    }

    match platform.wifi_slot_config(slot) {
        Ok(config) if config.set => {
            con.line(
                C,
                format_args!("WiFi {n} mac"),
                ctx.identifying(config.mac, Placeholder::Absent),
            );
        }
        _ => {}
    }
    con.print(format_args!("\n"));
}

fn firmware<P: Platform>(platform: &P, con: &mut TextConsole) {
    const C: Color = Color::Yellow;

    if let Ok(version) = platform.kernel_version(VersionSource::Kernel) {
        con.line(C, "Kernel version", version);
    }
    if let Ok(version) = platform.kernel_version(VersionSource::Firm) {
        con.line(C, "Firm version", version);
    }
    if let Ok(version) = platform.system_version(SystemVersion::Current) {
        con.line(C, "System version", clamp_to_buffer(&version, 32));
    }
    if let Ok(version) = platform.system_version(SystemVersion::Initial) {
        con.line(C, "Initial System version", clamp_to_buffer(&version, 32));
    }
    con.print(format_args!("\n"));
}

fn system_identity<P: Platform>(platform: &P, ctx: &Context, con: &mut TextConsole) {
    const C: Color = Color::Red;

    if let (Ok(model), Ok(region)) = (platform.system_model(), platform.region()) {
        con.line(
            C,
            "Model",
            format_args!(
                "{}{RESET} ({}{}{RESET} - {}{}{RESET})",
                model.name(),
                C.bold(),
                model.code(),
                C.bold(),
                region.abbreviation()
            ),
        );
    }
    if let Ok(screens) = platform.screen_types() {
        con.line(C, "Screen type", screens);
    }
    if let Ok(language) = platform.language() {
        con.line(C, "Language", language.name());
    }
    if let Ok(id) = platform.device_id() {
        con.line(C, "Device ID", ctx.identifying(id, Placeholder::Zero));
    }
    if let Ok(id) = platform.soap_id() {
        con.line(C, "ECS Device ID", ctx.identifying(id, Placeholder::Zero));
    }
    if let Ok(seed) = platform.local_friend_code_seed() {
        con.line(
            C,
            "Original Local friend code seed",
            ctx.identifying(seed, Placeholder::Zero),
        );
    }
    if let Ok(seed) = platform.nand_local_friend_code_seed() {
        con.line(
            C,
            "NAND Local friend code seed",
            ctx.identifying(seed, Placeholder::Absent),
        );
    }
    if let Ok(mac) = platform.mac_address() {
        con.line(C, "MAC Address", ctx.identifying(mac, Placeholder::Absent));
    }
    if let Ok(serial) = platform.serial_number() {
        let serial = clamp_to_buffer(&serial, 16);
        con.line(C, "Serial number", ctx.identifying(serial, Placeholder::Absent));
    }
    if let Ok(cid) = platform.sdmc_cid() {
        con.line(C, "SDMC CID", ctx.identifying(cid, Placeholder::Absent));
    }
    if let Ok(cid) = platform.nand_cid() {
        con.line(C, "NAND CID", ctx.identifying(cid, Placeholder::Absent));
    }
    con.print(format_args!("\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::context::{Config, Privacy};
    use crate::services::ServiceKind;
    use crate::sim::{Query, SimPlatform, SystemProfile};

    fn open_sim(profile: SystemProfile) -> SimPlatform {
        let mut sim = SimPlatform::new(profile);
        for service in ServiceKind::ACQUISITION_ORDER {
            sim.acquire(service).unwrap();
        }
        sim
    }

    fn report(sim: &mut SimPlatform, privacy: Privacy) -> Consoles {
        let ctx = Context::new(Config::DEFAULT, privacy);
        let mut consoles = Consoles::new();
        render(sim, &ctx, &mut consoles);
        consoles
    }

    fn lines(console: &TextConsole) -> Vec<String> {
        (0..console.rows()).map(|r| console.row_text(r)).collect()
    }

    fn has_line(console: &TextConsole, line: &str) -> bool {
        lines(console).iter().any(|l| l == line)
    }

    #[test]
    fn bottom_screen_shows_storage_account_and_wifi() {
        let mut sim = open_sim(SystemProfile::new_3ds_xl());
        let consoles = report(&mut sim, Privacy::Show);
        let bottom = &consoles.bottom;

        assert!(has_line(bottom, "* SD Size: 20.00 GB / 29.71 GB"), "{}", bottom.plain_text());
        assert!(has_line(bottom, "* NNID: fluffy_bunny"));
        assert!(has_line(bottom, "* Principal ID: 1234567890"));
        assert!(has_line(bottom, "* Country: DE"));
        assert!(has_line(bottom, "* WiFi 1 pass: correct horse battery"));
        assert!(has_line(bottom, "* WiFi 3 security: Open"));
        assert!(has_line(bottom, "> Press any key to exit =)"));
    }

    #[test]
    fn top_screen_shows_firmware_and_identity() {
        let mut sim = open_sim(SystemProfile::new_3ds_xl());
        let consoles = report(&mut sim, Privacy::Show);
        let top = &consoles.top;

        assert_eq!(top.row_text(0), alloc::format!("ctru-ident v{VERSION}"));
        assert_eq!(top.row_text(2), "* Kernel version: 2.56-0");
        assert!(has_line(top, "* Model: New 3DS XL (RED - EUR)"), "{}", top.plain_text());
        assert!(has_line(top, "* Screen type: upper: IPS lower: TN"));
        assert!(has_line(top, "* Original Local friend code seed: 030F1E2D3C"));
        assert!(has_line(top, "* MAC Address: 40:D2:8A:0F:01:BE"));
    }

    #[test]
    fn hidden_mode_replaces_identifying_fields() {
        let mut sim = open_sim(SystemProfile::new_3ds_xl());
        let consoles = report(&mut sim, Privacy::Hide);

        assert!(has_line(&consoles.bottom, "* NNID: (none)"));
        assert!(has_line(&consoles.bottom, "* Principal ID: 0"));
        assert!(has_line(&consoles.bottom, "* WiFi 1 pass:"));
        assert!(has_line(&consoles.bottom, "* WiFi 1 security:"));
        assert!(has_line(&consoles.bottom, "* WiFi 1 mac: (none)"));
        assert!(has_line(&consoles.bottom, "* IP: (none)"));
        assert!(has_line(&consoles.top, "* Device ID: 0"));
        assert!(has_line(&consoles.top, "* Serial number: (none)"));
        assert!(has_line(&consoles.top, "* NAND CID: (none)"));
    }

    #[test]
    fn non_identifying_lines_do_not_depend_on_privacy() {
        const IDENTIFYING: [&str; 17] = [
            "* NNID:",
            "* Principal ID:",
            "* Persistent ID:",
            "* Transferable ID:",
            "* Country:",
            "* Time Zone:",
            "* IP:",
            "pass:",
            "security:",
            "mac:",
            "* Device ID:",
            "* ECS Device ID:",
            "friend code seed:",
            "* MAC Address:",
            "* Serial number:",
            "* SDMC CID:",
            "* NAND CID:",
        ];
        let is_identifying = |l: &String| IDENTIFYING.iter().any(|p| l.contains(p));

        let shown = report(&mut open_sim(SystemProfile::new_3ds_xl()), Privacy::Show);
        let hidden = report(&mut open_sim(SystemProfile::new_3ds_xl()), Privacy::Hide);

        for (a, b) in [(&shown.top, &hidden.top), (&shown.bottom, &hidden.bottom)] {
            let a = lines(a);
            let b = lines(b);
            assert_eq!(a.len(), b.len());
            for (a, b) in a.iter().zip(&b) {
                if !is_identifying(a) {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn unconfigured_slot_renders_nothing() {
        let mut sim = open_sim(SystemProfile::new_3ds_xl());
        let consoles = report(&mut sim, Privacy::Show);
        let text = consoles.bottom.plain_text();

        assert!(text.contains("WiFi 1 SSID: Heimnetz"));
        assert!(!text.contains("WiFi 2"));
        assert!(text.contains("WiFi 3 SSID: Cafe Guest"));
    }

    #[test]
    fn unlinked_account_hides_account_block() {
        let mut profile = SystemProfile::new_3ds_xl();
        profile.account = None;
        let mut sim = open_sim(profile);
        let text = report(&mut sim, Privacy::Show).bottom.plain_text();

        assert!(!text.contains("Principal ID"));
        assert!(!text.contains("NNID"));
    }

    #[test]
    fn failed_queries_drop_their_lines() {
        let mut sim = open_sim(SystemProfile::new_3ds_xl());
        sim.fail(Query::SerialNumber)
            .fail(Query::AccountString(AccountString::Country))
            .fail(Query::WifiSlotConfig);
        let consoles = report(&mut sim, Privacy::Show);

        assert!(!consoles.top.plain_text().contains("Serial number"));
        assert!(!consoles.bottom.plain_text().contains("Country"));
        assert!(!consoles.bottom.plain_text().contains("mac:"));
        assert!(has_line(&consoles.bottom, "* Time Zone: Europe/Berlin"));
    }

    #[test]
    fn overlong_strings_are_cut_to_their_buffers() {
        let mut profile = SystemProfile::new_3ds_xl();
        if let Some(account) = profile.account.as_mut() {
            account.country = "DEU".into();
        }
        let mut sim = open_sim(profile);
        let consoles = report(&mut sim, Privacy::Show);

        assert!(has_line(&consoles.bottom, "* Country: DE"));
    }
}
