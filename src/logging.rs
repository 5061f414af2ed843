//! Logger setup.
//!
//! The crate logs through the `log` facade. Native binaries install
//! `env_logger`; in the browser [`init_console_logger`] forwards records to
//! the devtools console.

use log::LevelFilter;

use crate::error::{Result, TablegripError};

/// Parse a level name (`"off"`, `"error"` ... `"trace"`), case-insensitively
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| TablegripError::Other(format!("unknown log level: {level}")))
}

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = wasm_bindgen::JsValue::from_str(&format!(
            "[{}] {}",
            record.target(),
            record.args()
        ));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` records to the browser console.
///
/// Calling it again only changes the level.
#[cfg(target_arch = "wasm32")]
pub fn init_console_logger(level: LevelFilter) {
    if log::set_logger(&CONSOLE_LOGGER).is_err() {
        log::trace!("console logger already installed");
    }
    log::set_max_level(level);
}
