// src/logging/mod.rs
use std::env;
use log::LevelFilter;

/// Install `env_logger` as the global logger.
///
/// `level` is the default for every module; `RUST_LOG`, when set, is applied
/// on top so individual targets (for example `access`) can be tuned.
pub fn init(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(true);

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A logger installed earlier (tests, embedding) wins.
    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
