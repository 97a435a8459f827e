use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global subscriber.
///
/// When the terminal is busy showing the display, logs go to
/// `logging.file` or, failing that, to the default state file.
pub fn init(settings: &LoggingSettings, terminal_busy: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let file = settings
        .file
        .clone()
        .or_else(|| terminal_busy.then(default_log_path).flatten());

    // A subscriber may already be installed (tests); keep the existing one.
    match file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }
    Ok(())
}

/// `$XDG_STATE_HOME/pressplay/pressplay.log` or `~/.local/state/pressplay/pressplay.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("pressplay").join("pressplay.log"))
}
