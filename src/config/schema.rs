use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/pressplay/config.toml` or `~/.config/pressplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PRESSPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
    pub player: PlayerSettings,
    pub display: DisplaySettings,
    pub playlist: PlaylistSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputBackend {
    /// Linux sysfs GPIO (`/sys/class/gpio`).
    Sysfs,
    /// Space/Enter in the terminal act as the button.
    Keyboard,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub backend: InputBackend,
    /// BCM pin number of the button.
    pub gpio_pin: u32,
    /// Label of the gpiochip the pin belongs to (`pinctrl-bcm2711`, `pinctrl-rp1`).
    /// Unset picks the first `pinctrl-*` chip.
    pub gpio_chip: Option<String>,
    /// Read this file instead of `/sys/class/gpio/gpio<pin>/value`.
    pub value_path: Option<PathBuf>,
    /// Treat a low line as pressed (button wired against a pull-up).
    pub active_low: bool,
    /// Sampling period of the button line (milliseconds).
    pub poll_interval_ms: u64,
    /// Minimum time between two accepted presses (milliseconds).
    pub debounce_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            backend: InputBackend::Sysfs,
            gpio_pin: 18,
            gpio_chip: None,
            value_path: None,
            active_low: false,
            poll_interval_ms: 100,
            debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Player executable, looked up in `PATH` unless absolute.
    pub executable: String,
    /// Arguments placed before the track path.
    pub flags: Vec<String>,
    /// Process name used by the shutdown sweep. Defaults to the executable's file name.
    pub sweep_name: Option<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            executable: "mpv".to_string(),
            flags: vec!["--no-video".to_string()],
            sweep_name: None,
        }
    }
}

impl PlayerSettings {
    /// Name passed to the shutdown sweep.
    pub fn sweep_name(&self) -> String {
        if let Some(name) = self.sweep_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return name.to_string();
        }
        std::path::Path::new(&self.executable)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.executable)
            .to_string()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayBackend {
    /// Draw the screen inside the terminal.
    Terminal,
    /// No surface; every frame is written to the log.
    Headless,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub backend: DisplayBackend,
    /// Surface width in text cells.
    pub width: u16,
    /// Surface height in text rows.
    pub height: u16,
    /// How long the splash screen stays up at startup (milliseconds).
    pub splash_ms: u64,
    /// How long the goodbye screen stays up at shutdown (milliseconds).
    pub goodbye_ms: u64,
    /// Title shown on the splash screen.
    pub title: String,
    /// Text shown while waiting for the first press.
    pub idle_prompt: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            backend: DisplayBackend::Terminal,
            width: 21,
            height: 6,
            splash_ms: 1500,
            goodbye_ms: 1000,
            title: "pressplay".to_string(),
            idle_prompt: "Press the button".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Files or URLs played first, in this order, before any scanned tracks.
    pub entries: Vec<String>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned for tracks. The first CLI argument overrides it.
    pub dir: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields to use to build the track name shown on screen.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
