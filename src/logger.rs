//! log4rs setup for the binary and for embedders that want file logs.
//!
//! Library code only talks to the `log` facade; nothing here runs unless called.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: usize = 7;

/// Initializes logging from a log4rs YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Maps `error|warn|info|debug|trace|off` to a filter; anything else is `info`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Builds the process-wide config: stderr always, plus `file` rolled at 10 MiB
/// keeping `retention` old files (default 7).
///
/// # Errors
/// Returns an error if the file appender or the config cannot be built.
pub fn build_config(
    level: Option<&str>,
    file: Option<&Path>,
    retention: Option<usize>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let lvl = level.map_or(LevelFilter::Info, parse_level);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let mut builder = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");
    if let Some(path) = file {
        let keep = u32::try_from(retention.unwrap_or(DEFAULT_RETENTION)).unwrap_or(u32::MAX);
        let roller = FixedWindowRoller::builder().build(&roll_pattern(path), keep)?;
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
        let appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path, Box::new(policy))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(appender)));
        root = root.appender("file");
    }
    Ok(builder.build(root.build(lvl))?)
}

/// Configures logging globally. A second call is ignored.
///
/// # Errors
/// Returns an error if the configuration cannot be built.
pub fn configure_logging(
    level: Option<&str>,
    file: Option<&Path>,
    retention: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(level, file, retention)?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from environment variables if present:
/// - QUERYLITE_LOG_LEVEL
/// - QUERYLITE_LOG_FILE
/// - QUERYLITE_LOG_RETENTION
///
/// # Errors
/// Returns an error if the configuration cannot be built.
pub fn configure_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("QUERYLITE_LOG_LEVEL").ok();
    let file = std::env::var("QUERYLITE_LOG_FILE").ok().map(PathBuf::from);
    let retention =
        std::env::var("QUERYLITE_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(level.as_deref(), file.as_deref(), retention)
}

// `app.log` rolls to `app.{}.log`.
fn roll_pattern(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("querylite");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{{}}.{ext}"),
        None => format!("{stem}.{{}}"),
    };
    path.with_file_name(name).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_fall_back_to_info() {
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn roll_pattern_keeps_extension() {
        assert_eq!(roll_pattern(Path::new("/tmp/app.log")), "/tmp/app.{}.log");
        assert_eq!(roll_pattern(Path::new("/tmp/app")), "/tmp/app.{}");
    }

    #[test]
    fn file_config_builds() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = build_config(Some("debug"), Some(&dir.path().join("q.log")), Some(2)).unwrap();
        assert_eq!(cfg.root().level(), LevelFilter::Debug);
        assert_eq!(cfg.appenders().len(), 2);
    }
}
