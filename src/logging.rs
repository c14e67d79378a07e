// Conditional logging macros - only active in debug builds

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const APP_DIR: &str = "word-scramble";

/// Directory session logs are written to, if the platform has a cache dir.
#[must_use]
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR))
}

/// `session-YYYYMMDD-HHMMSS.log`, local time.
#[must_use]
pub fn log_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("session-{}.log", now.format("%Y%m%d-%H%M%S"))
}

fn open_log_file() -> io::Result<(File, PathBuf)> {
    let dir = log_dir().ok_or_else(|| io::Error::other("no cache directory"))?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(log_file_name(chrono::Local::now()));
    Ok((File::create(&path)?, path))
}

/// Sets up `env_logger`. The terminal UI owns stdout/stderr, so debug builds
/// log to a file in the cache directory instead. `RUST_LOG` overrides the
/// default `info` filter.
///
/// Returns the log file path when one was opened.
pub fn init_logging() -> Option<PathBuf> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let log_path = if cfg!(debug_assertions) {
        match open_log_file() {
            Ok((file, path)) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                Some(path)
            }
            Err(e) => {
                eprintln!("Logging disabled: {e}");
                return None;
            }
        }
    } else {
        builder.filter_level(log::LevelFilter::Off);
        None
    };

    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    log_path
}
