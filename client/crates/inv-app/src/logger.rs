use crate::error::{AppError, Result as AppErrorResult};

use std::fmt::Arguments;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
pub fn initialize(
    log_level: inv_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> AppErrorResult<()> {
    let level_filter = *log_level;

    dispatch(log_file.clone(), colored)?
        .level(level_filter)
        // reqwest's connection pool is chatty at debug
        .level_for("hyper_util", log::LevelFilter::Warn)
        .apply()
        .map_err(|e| AppError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(path) => info!(
            "Logger initialized: level={level_filter}, file={}",
            path.display()
        ),
        None => info!("Logger initialized: level={level_filter}, stdout"),
    }

    Ok(())
}

/// Build the output chain without installing it.
pub fn dispatch(log_file: Option<PathBuf>, colored: bool) -> AppErrorResult<Dispatch> {
    if let Some(log_path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|source| AppError::LogFile {
                path: log_path.display().to_string(),
                source,
            })?;

        return Ok(Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(file));
    }

    if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        return Ok(Dispatch::new()
            .format(move |out, message, record| {
                write_line(out, message, record, colors.color(record.level()))
            })
            .chain(std::io::stdout()));
    }

    Ok(Dispatch::new()
        .format(|out, message, record| write_line(out, message, record, record.level()))
        .chain(std::io::stdout()))
}

fn write_line(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    level: impl std::fmt::Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
