use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

use crate::formatters::color::color_for_level;

/// Level for our own crates if `RUST_LOG` is not set
pub(crate) const fn log_level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Initialize the logging system according to `--quiet` and `--verbose`.
pub(crate) fn init_logging(quiet: bool, verbose: bool) {
    // Set a base level for all modules to `warn`, which is a reasonable default.
    // It will be overridden by RUST_LOG if it's set.
    let env = Env::default().filter_or("RUST_LOG", "warn");

    let mut builder = Builder::from_env(env);
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if std::env::var("RUST_LOG").is_err() {
        let level_filter = log_level_filter(quiet, verbose);

        // Other crates never log below `warn` unless asked to via RUST_LOG
        builder.filter_level(level_filter.min(LevelFilter::Warn));
        builder
            .filter_module("mdlinkcheck", level_filter)
            .filter_module("mdlinkcheck_lib", level_filter);
    }

    builder.format(|buf, record| {
        let level = record.level();
        let color = color_for_level(level).clone().for_stderr();
        writeln!(
            buf,
            "{} {}",
            color.apply_to(format!("[{level}]")),
            record.args()
        )
    });

    builder.init();
}
