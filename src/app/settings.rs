use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, DEFAULT_FPS, DEFAULT_SCALE};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings file {path} failed")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("writing settings file {path} failed")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serializing settings payload failed")]
    Serialize(#[from] serde_json::Error),
}

/// Display preferences kept between runs. The weather condition is never
/// stored: it always comes from the command line and defaults to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub fps: u8,
    pub scale: u8,
    pub show_label: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            scale: DEFAULT_SCALE,
            show_label: false,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli(cli);
        settings
    }

    /// Layers explicit command-line choices over saved values. Flags left at
    /// their defaults do not override.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.fps != DEFAULT_FPS {
            self.fps = cli.fps;
        }
        if cli.scale != DEFAULT_SCALE {
            self.scale = cli.scale;
        }
        if cli.label {
            self.show_label = true;
        }
        self.fps = self.fps.clamp(15, 60);
        self.scale = self.scale.clamp(1, 32);
    }
}

pub fn load_runtime_settings(cli: &Cli) -> (RuntimeSettings, Option<PathBuf>) {
    if cli.no_save {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let Some(path) = settings_path() else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    let settings = load_runtime_settings_from(&path, cli);
    (settings, Some(path))
}

/// Reads saved settings from `path` and applies CLI overrides. A missing or
/// unreadable file falls back to defaults.
pub fn load_runtime_settings_from(path: &Path, cli: &Cli) -> RuntimeSettings {
    let mut settings = match read_runtime_settings(path) {
        Ok(Some(saved)) => saved,
        Ok(None) => RuntimeSettings::default(),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring saved settings");
            RuntimeSettings::default()
        }
    };
    settings.apply_cli(cli);
    settings
}

pub fn read_runtime_settings(path: &Path) -> Result<Option<RuntimeSettings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("WEATHER_BACKDROP_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-backdrop")
            .join("settings.json"),
    )
}
