use std::{env, path::PathBuf};

use super::schema::{DisplayBackend, InputBackend, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `PRESSPLAY__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PRESSPLAY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.poll_interval_ms == 0 {
            return Err("input.poll_interval_ms must be >= 1".to_string());
        }
        if self.input.debounce_ms == 0 {
            return Err("input.debounce_ms must be >= 1".to_string());
        }
        if self.player.executable.trim().is_empty() {
            return Err("player.executable must not be empty".to_string());
        }
        if self.display.width < 4 {
            return Err("display.width must be >= 4".to_string());
        }
        if self.display.height < 3 {
            return Err("display.height must be >= 3".to_string());
        }
        if self.input.backend == InputBackend::Keyboard
            && self.display.backend != DisplayBackend::Terminal
        {
            return Err("input.backend = \"keyboard\" needs display.backend = \"terminal\"".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `PRESSPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PRESSPLAY_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/pressplay/config.toml`
/// or `~/.config/pressplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("pressplay").join("config.toml"))
}
