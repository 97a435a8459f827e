use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::InputSettings;
use crate::error::InputError;

use super::{DigitalInput, Level};

const GPIO_ROOT: &str = "/sys/class/gpio";

/// One `gpiochipN` entry under the sysfs root.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Chip {
    base: u32,
    ngpio: u32,
    label: String,
}

fn read_chips(root: &Path) -> Vec<Chip> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut chips: Vec<Chip> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("gpiochip"))
        .filter_map(|e| {
            let dir = e.path();
            let read = |name: &str| {
                fs::read_to_string(dir.join(name))
                    .ok()
                    .map(|s| s.trim().to_string())
            };
            Some(Chip {
                base: read("base")?.parse().ok()?,
                ngpio: read("ngpio")?.parse().ok()?,
                label: read("label").unwrap_or_default(),
            })
        })
        .collect();
    chips.sort_by_key(|c| c.base);
    chips
}

/// The sysfs number of `pin`: its offset added to the base of its gpiochip.
///
/// Kernels before 6.6 put the SoC chip at base 0. Later ones start at 512,
/// so BCM 18 becomes `gpio530` or similar.
fn sysfs_number(root: &Path, pin: u32, label: Option<&str>) -> Result<u32, InputError> {
    let chips = read_chips(root);
    if chips.is_empty() {
        return Ok(pin);
    }

    let chip = match label {
        Some(label) => chips.iter().find(|c| c.label == label),
        None => chips
            .iter()
            .find(|c| c.label.starts_with("pinctrl-"))
            .or(chips.first()),
    };
    let Some(chip) = chip else {
        return Err(InputError::Setup {
            pin,
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("no gpiochip labelled {:?}", label.unwrap_or_default()),
            ),
        });
    };

    if pin >= chip.ngpio {
        return Err(InputError::Setup {
            pin,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has only {} lines", chip.label, chip.ngpio),
            ),
        });
    }

    debug!(pin, chip = %chip.label, base = chip.base, "resolved gpio number");
    Ok(chip.base + pin)
}

/// A GPIO pin read through the Linux sysfs interface.
///
/// Pull-up/pull-down cannot be configured through sysfs; wire the resistor
/// externally (or in the device tree) and set `active_low` to match.
pub struct SysfsLine {
    root: PathBuf,
    value_path: PathBuf,
    active_low: bool,
    /// Sysfs number we exported ourselves and must unexport on release.
    exported: Option<u32>,
}

impl SysfsLine {
    /// Open the configured pin, exporting it when nobody has yet.
    pub fn open(settings: &InputSettings) -> Result<Self, InputError> {
        Self::open_in(Path::new(GPIO_ROOT), settings)
    }

    pub(super) fn open_in(root: &Path, settings: &InputSettings) -> Result<Self, InputError> {
        if let Some(path) = &settings.value_path {
            return Ok(Self::at_path(path, settings.active_low));
        }

        let pin = settings.gpio_pin;
        let number = sysfs_number(root, pin, settings.gpio_chip.as_deref())?;
        let pin_dir = root.join(format!("gpio{number}"));
        let mut exported = None;

        if !pin_dir.exists() {
            fs::write(root.join("export"), number.to_string())
                .map_err(|source| InputError::Setup { pin, source })?;
            exported = Some(number);
            debug!(pin, number, "exported gpio pin");
        }

        // Right after export udev may still be fixing permissions; reading
        // works with the kernel default direction anyway.
        if let Err(e) = fs::write(pin_dir.join("direction"), "in") {
            warn!(pin, error = %e, "could not set gpio direction to input");
        }

        Ok(Self {
            root: root.to_path_buf(),
            value_path: pin_dir.join("value"),
            active_low: settings.active_low,
            exported,
        })
    }

    /// Read levels from an arbitrary value file.
    pub fn at_path(path: impl Into<PathBuf>, active_low: bool) -> Self {
        Self {
            root: PathBuf::from(GPIO_ROOT),
            value_path: path.into(),
            active_low,
            exported: None,
        }
    }
}

impl DigitalInput for SysfsLine {
    fn read_level(&mut self) -> Result<Level, InputError> {
        let raw = fs::read_to_string(&self.value_path).map_err(|source| InputError::Read {
            path: self.value_path.clone(),
            source,
        })?;

        let high = match raw.trim() {
            "1" => true,
            "0" => false,
            other => {
                return Err(InputError::BadValue {
                    path: self.value_path.clone(),
                    value: other.to_string(),
                });
            }
        };

        Ok(if high != self.active_low {
            Level::High
        } else {
            Level::Low
        })
    }

    fn release(&mut self) {
        if let Some(number) = self.exported.take() {
            match fs::write(self.root.join("unexport"), number.to_string()) {
                Ok(()) => debug!(number, "unexported gpio pin"),
                Err(e) => warn!(number, error = %e, "failed to unexport gpio pin"),
            }
        }
    }
}

impl Drop for SysfsLine {
    fn drop(&mut self) {
        self.release();
    }
}
