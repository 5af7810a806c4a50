use crate::error::ConfigError;
use crate::pin::{Pin, PinList};
use crate::platform::platform;
use anyhow::{Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};

/// Directory holding pincloud state. Defaults to "$HOME/.config/pincloud".
pub const CONFIG_DIR_ENV: &str = "PINCLOUD_CONFIG_DIR";
/// The pins file. Defaults to "$PINCLOUD_CONFIG_DIR/pins.cfg".
pub const CONFIG_ENV: &str = "PINCLOUD_CONFIG";
/// Managed SDK installs. Defaults to "$PINCLOUD_CONFIG_DIR/versions".
pub const VERSIONS_DIR_ENV: &str = "PINCLOUD_CONFIG_VERSIONS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub pins_path: PathBuf,
    pub versions_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        let config_dir = var(CONFIG_DIR_ENV).unwrap_or_else(|| {
            platform()
                .home_dir()
                .unwrap_or_default()
                .join(".config")
                .join("pincloud")
        });
        let pins_path = var(CONFIG_ENV).unwrap_or_else(|| config_dir.join("pins.cfg"));
        let versions_dir = var(VERSIONS_DIR_ENV).unwrap_or_else(|| config_dir.join("versions"));
        Settings {
            config_dir,
            pins_path,
            versions_dir,
        }
    }

    /// Directory a managed version lives in.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir.join(version)
    }
}

pub fn load_pins(settings: &Settings) -> Result<PinList> {
    let data = fs::read_to_string(&settings.pins_path).context("Could not open pin config")?;
    let pins = parse_pins(&data, &settings.versions_dir).context("Could not load pins")?;
    if pins.is_empty() {
        log::debug!("{} has no pins", settings.pins_path.display());
    } else {
        log::debug!(
            "loaded {} pin(s) from {}",
            pins.len(),
            settings.pins_path.display()
        );
    }
    Ok(pins)
}

/// Parse pins file text. An absolute replacement target is the executable
/// itself; anything else names a directory under `versions_dir` whose
/// `bin/<launcher>` is used. Nothing is checked on disk.
pub fn parse_pins(text: &str, versions_dir: &Path) -> Result<PinList, ConfigError> {
    let mut pins = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((pattern, replacement)) = line.split_once(':') else {
            return Err(ConfigError::MissingColon {
                line_no,
                line: line.to_string(),
            });
        };

        let pattern: Vec<String> = pattern.split_whitespace().map(String::from).collect();
        let mut replacement: Vec<String> =
            replacement.split_whitespace().map(String::from).collect();
        if let Some(target) = replacement.first_mut() {
            *target = launcher_path(versions_dir, target)
                .to_string_lossy()
                .into_owned();
        }
        let pin = Pin::new(pattern, replacement).map_err(|e| e.at(line_no, line))?;
        pins.push(pin);
    }
    Ok(PinList::new(pins))
}

fn launcher_path(versions_dir: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    versions_dir
        .join(target)
        .join("bin")
        .join(platform().launcher_name())
}
