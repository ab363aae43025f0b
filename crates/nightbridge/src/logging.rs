//! File logging. The terminal belongs to the UI, so log lines go to a file in
//! the platform data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use nightbridge_config::Config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "NIGHTBRIDGE_LOG";

const LOG_FILE: &str = "nightbridge.log";

/// Where log output is written, if the platform has a data directory.
pub fn log_path() -> Option<PathBuf> {
    Config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Filter from `directives` when given and valid, else from `default_level`,
/// else `info`.
pub fn build_filter(directives: Option<&str>, default_level: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber writing to [`log_path`]; returns the path.
pub fn init(default_level: &str) -> Result<PathBuf> {
    let path = log_path().ok_or_else(|| eyre!("no data directory for log output"))?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let directives = std::env::var(LOG_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(directives.as_deref(), default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_env_directives_win() {
        let filter = build_filter(Some("trace"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_falls_back_to_config_level() {
        let filter = build_filter(None, "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = build_filter(Some("nightbridge=verbose"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_file_name() {
        if let Some(path) = log_path() {
            assert!(path.ends_with(LOG_FILE));
        }
    }
}
