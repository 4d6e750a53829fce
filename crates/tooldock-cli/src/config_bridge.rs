//! Bridge from `tooldock_config::Config` to telemetry settings.

use tooldock_config::{Config, StoragePaths};
use tooldock_telemetry::{LogConfig, LogFormat};

/// Convert the `[logging]` section to a [`LogConfig`].
///
/// `verbose` forces the level to `debug`. With `file = true` logs go to daily
/// files under the storage root's `logs/` directory.
pub(crate) fn to_log_config(cfg: &Config, paths: &StoragePaths, verbose: bool) -> LogConfig {
    let format = cfg
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or_default();

    let level = if verbose { "debug" } else { cfg.logging.level.as_str() };
    let mut log_config = LogConfig::new(level).with_format(format);

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    if cfg.logging.file {
        log_config = log_config.with_file_logging(paths.logs_dir());
    }

    log_config
}
