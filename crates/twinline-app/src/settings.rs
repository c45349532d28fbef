// Settings persistence: startup preferences stored as JSON in the
// platform-native config dir, e.g. ~/.config/twinline/settings.json on Linux
// or ~/Library/Application Support/twinline/settings.json on macOS.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinlineSettings {
    /// Pad both sides so differences line up row for row.
    pub sync_view: bool,
    /// Skip very frequent lines as alignment anchors in large documents.
    pub autojunk: bool,
    /// Colored output.
    pub color: bool,
    /// Rows shown above and below the current difference.
    pub context: usize,
    /// Line numbers next to each side.
    pub gutter: bool,
}

impl Default for TwinlineSettings {
    fn default() -> Self {
        Self {
            sync_view: false,
            autojunk: true,
            color: true,
            context: 3,
            gutter: true,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("twinline").join("settings.json"))
}

pub fn load_settings() -> TwinlineSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => TwinlineSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> TwinlineSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                TwinlineSettings::default()
            }
        },
        Err(_) => TwinlineSettings::default(),
    }
}

pub fn save_settings(settings: &TwinlineSettings) {
    match settings_path() {
        Some(path) => save_settings_to(settings, &path),
        None => log::warn!("Cannot determine settings path"),
    }
}

pub fn save_settings_to(settings: &TwinlineSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(settings, TwinlineSettings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "sync_view": true, "context": 7 }"#).unwrap();
        let settings = load_settings_from(&path);
        assert!(settings.sync_view);
        assert_eq!(settings.context, 7);
        assert!(settings.autojunk);
        assert!(settings.gutter);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), TwinlineSettings::default());
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("twinline").join("settings.json");
        let settings = TwinlineSettings { color: false, context: 1, ..TwinlineSettings::default() };
        save_settings_to(&settings, &path);
        assert_eq!(load_settings_from(&path), settings);
    }
}
