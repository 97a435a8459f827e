use tracing::{info, warn};

use crate::config::{DisplayBackend, DisplaySettings, InputBackend, InputSettings};
use crate::display::{HeadlessSurface, Surface, TerminalSurface};
use crate::error::InputError;
use crate::input::{DigitalInput, KeyboardLine, QuitKeys, SysfsLine};
use crate::shutdown::ShutdownFlag;

/// Open the configured button line. Failure here is fatal.
///
/// With `watch_quit_keys` a GPIO line also reads the terminal's quit keys,
/// which raw mode would otherwise swallow.
pub fn open_input(
    settings: &InputSettings,
    shutdown: &ShutdownFlag,
    watch_quit_keys: bool,
) -> Result<Box<dyn DigitalInput>, InputError> {
    let line: Box<dyn DigitalInput> = match settings.backend {
        InputBackend::Sysfs => {
            let mut line = SysfsLine::open(settings)?;
            // Prove the line is readable before anything else starts.
            line.read_level()?;
            info!(pin = settings.gpio_pin, active_low = settings.active_low, "using gpio button");
            if watch_quit_keys {
                Box::new(QuitKeys::new(line, shutdown.clone()))
            } else {
                Box::new(line)
            }
        }
        InputBackend::Keyboard => {
            info!("using keyboard button (space or enter)");
            Box::new(KeyboardLine::new(shutdown.clone()))
        }
    };
    Ok(line)
}

/// Open the configured display, or log frames instead when it is unavailable.
///
/// The flag is true when the surface holds the terminal in raw mode.
pub fn open_surface(settings: &DisplaySettings) -> (Box<dyn Surface>, bool) {
    let headless = || -> Box<dyn Surface> {
        Box::new(HeadlessSurface::new(settings.width, settings.height))
    };
    match settings.backend {
        DisplayBackend::Headless => (headless(), false),
        DisplayBackend::Terminal => match TerminalSurface::open(settings.width, settings.height) {
            Ok(surface) => (Box::new(surface), true),
            Err(e) => {
                warn!(error = %e, "terminal display unavailable, logging screens instead");
                (headless(), false)
            }
        },
    }
}
