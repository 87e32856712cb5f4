use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::WrapMode;

/// Persistent user settings.
///
/// Loaded once at startup and threaded into whatever needs it; never
/// global. Any problem reading the file falls back to defaults, so a
/// corrupt settings file can not keep the app from starting.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub show_grid_lines: bool,
    pub wrap: WrapMode,
    pub speed: f32,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "classic".to_string(),
            show_grid_lines: false,
            wrap: WrapMode::Toroidal,
            speed: 10.0,
            grid_width: 1024,
            grid_height: 512,
        }
    }
}

impl Settings {
    /// Conventional settings location, `~/.config/pocket-life/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("pocket-life")
                .join("settings.json"),
        )
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("settings file {path:?} is malformed ({e}); using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("could not read settings file {path:?} ({e}); using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "pocket-life-settings-{tag}-{}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_roundtrip_through_file() {
        let path = scratch_file("roundtrip");
        let settings = Settings {
            theme: "amber".to_string(),
            show_grid_lines: true,
            wrap: WrapMode::Bounded,
            speed: 30.0,
            grid_width: 640,
            grid_height: 480,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_file("missing-never-written");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let path = scratch_file("corrupt");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let path = scratch_file("partial");
        fs::write(&path, r#"{"theme": "paper", "wrap": "bounded"}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.theme, "paper");
        assert_eq!(settings.wrap, WrapMode::Bounded);
        assert_eq!(settings.speed, Settings::default().speed);
        let _ = fs::remove_file(&path);
    }
}
