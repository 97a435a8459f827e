use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::DisplayBackend;
use crate::controller::{Controller, Timing};
use crate::display::DisplayPresenter;
use crate::error::Result;
use crate::input::InputMonitor;
use crate::library;
use crate::playback::{PlaybackManager, SystemLauncher};
use crate::playlist::PlaylistCursor;
use crate::shutdown::ShutdownFlag;

mod logging;
mod settings;
mod startup;

/// Command line: `pressplay [MUSIC_DIR]` or `pressplay --button-test`.
struct Args {
    button_test: bool,
    dir: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> (Args, Vec<String>) {
    let mut parsed = Args {
        button_test: false,
        dir: None,
    };
    let mut ignored = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--button-test" => parsed.button_test = true,
            a if a.starts_with("--") || parsed.dir.is_some() => ignored.push(arg),
            _ => parsed.dir = Some(PathBuf::from(arg)),
        }
    }
    (parsed, ignored)
}

pub fn run() -> Result<()> {
    let (args, ignored) = parse_args(env::args().skip(1));
    let (settings, config_warning) = settings::load_settings();

    let terminal_busy = !args.button_test && settings.display.backend == DisplayBackend::Terminal;
    logging::init(&settings.logging, terminal_busy)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    for arg in &ignored {
        warn!(arg = %arg, "ignoring argument");
    }

    let shutdown = ShutdownFlag::new();
    shutdown.register_signals()?;

    if args.button_test {
        return button_test::run(&settings, &shutdown);
    }

    let tracks = library::load_playlist(&settings.playlist, &settings.library, args.dir.as_deref())?;
    let cursor = PlaylistCursor::new(tracks)?;

    // An early return drops the surface, which gives the terminal back.
    let (surface, holds_terminal) = startup::open_surface(&settings.display);
    let line = startup::open_input(&settings.input, &shutdown, holds_terminal)?;

    let mut controller = Controller::new(
        InputMonitor::new(line, Duration::from_millis(settings.input.debounce_ms)),
        cursor,
        PlaybackManager::new(SystemLauncher, &settings.player),
        DisplayPresenter::new(surface, &settings.display),
        shutdown,
        Timing::from_settings(&settings),
    );
    controller.run()?;

    info!("bye");
    Ok(())
}
