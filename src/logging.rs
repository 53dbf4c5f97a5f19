use std::str::FromStr;

use crate::error::{Result, SimError};

/// Configure the global logger.
///
/// `level` is a `log` level name (`"info"`, `"debug"`, ...). Lines always go to
/// stdout and are mirrored to `log_file` when one is given. The library never
/// calls this itself; binaries and tests opt in.
pub fn init_logging(level: &str, log_file: Option<&str>) -> Result<()> {
    let level = log::LevelFilter::from_str(level)
        .map_err(|_| SimError::Logging(format!("unknown log level '{}'", level)))?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] [{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|e| SimError::Logging(e.to_string()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch
        .apply()
        .map_err(|e| SimError::Logging(e.to_string()))
}
