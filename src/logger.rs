use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::config::LOG_ENV_VAR;

static LOGGER: StdoutLogger = StdoutLogger;

/// Installs the stdout logger, filtered by `BOSSTERM_DEVTOOLS_LOG`.
pub fn init() -> Result<(), SetLoggerError> {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Warn);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
