// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt::Write;

use alloc::string::String;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

/// Receives one fully formatted log line at a time.
///
/// On hardware this is `svcOutputDebugString`, on the host it is stderr.
pub type DebugSink = fn(&str);

struct DebugLogger {
    sink: Once<DebugSink>,
}

static LOGGER: DebugLogger = DebugLogger { sink: Once::new() };

impl Log for DebugLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        self.sink.is_completed()
    }

    fn log(&self, record: &Record) {
        if let Some(sink) = self.sink.get() {
            let mut line = String::new();
            let _ = write!(
                line,
                "[{:<5}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
            sink(&line);
        }
    }

    fn flush(&self) {}
}

pub fn init_log(sink: DebugSink) -> Result<(), SetLoggerError> {
    init_log_with_level(sink, LevelFilter::Trace)
}

pub fn init_log_with_level(sink: DebugSink, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    LOGGER.sink.call_once(|| sink);
    log::set_max_level(level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::vec::Vec;

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn capture(line: &str) {
        CAPTURED.lock().unwrap().push(line.into());
    }

    #[test]
    fn lines_are_forwarded_to_sink() {
        init_log(capture).expect("logger installed once per test binary");

        log::info!(target: "ident", "battery at {}%", 42);

        let lines = CAPTURED.lock().unwrap();
        assert!(lines.iter().any(|l| l == "[INFO ] ident: battery at 42%"), "{lines:?}");

        assert!(init_log(capture).is_err());
    }
}
