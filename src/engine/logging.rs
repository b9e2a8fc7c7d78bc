// Xyna Engine — Logging setup for hosts
// The library only emits through the `log` facade; binaries call `init`.

use log::LevelFilter;

/// Install `env_logger` with `default_level` unless `RUST_LOG` says otherwise.
/// Returns false when a logger was already installed.
pub fn init(default_level: LevelFilter) -> bool {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
