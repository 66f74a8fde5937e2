//! Diagnostic log file.
//!
//! The library itself only talks to the `log` facade. Binaries call
//! [`init_file_logger`] once at start-up to send those records to an
//! append-only file, one `{timestamp} - {LEVEL} - {message}` line each, and
//! [`install_panic_hook`] so crashes end up in the same file.

use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::panic;
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::error::VidframeError;

/// Default location of the log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "Logs/log.log";

/// Route `log` records at or above `level` to `path`.
///
/// Missing parent directories are created and the file is opened in append
/// mode, so earlier sessions are kept.
///
/// # Errors
///
/// Returns [`VidframeError::IoError`] if the file cannot be opened or a
/// global logger is already installed.
pub fn init_file_logger<P: AsRef<Path>>(path: P, level: LevelFilter) -> Result<(), VidframeError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(buf, "{} - {} - {}", buf.timestamp(), record.level(), record.args())
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|error| io::Error::other(error.to_string()))?;
    Ok(())
}

/// Log panics (message, location and backtrace) at error level before the
/// default hook prints them.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = match info.payload().downcast_ref::<&str>() {
            Some(text) => *text,
            None => match info.payload().downcast_ref::<String>() {
                Some(text) => text.as_str(),
                None => "Box<dyn Any>",
            },
        };
        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown".to_string());

        log::error!(
            "Unhandled panic at {location}: {message}\nBacktrace:\n{}",
            Backtrace::capture()
        );
        log::logger().flush();

        previous(info);
    }));
}
