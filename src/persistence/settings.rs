use crate::domain::WindowPolicy;
use crate::persistence::{atomic_write, read_file};
use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First day of the WEEKLY window
    pub week_start: Weekday,
    /// Show the revise prompt before a stopped session is logged
    pub confirm_before_commit: bool,
    /// Send a desktop notification when a running task reaches its budget
    pub notify_on_budget: bool,
    pub use_emoji: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            confirm_before_commit: false,
            notify_on_budget: true,
            use_emoji: true,
        }
    }
}

impl Settings {
    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy::new(self.week_start)
    }
}

/// Load settings, falling back to defaults when the file is missing or empty
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.window_policy().week_start, Weekday::Mon);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "week_start": "Sunday", "confirm_before_commit": true }"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.week_start, Weekday::Sun);
        assert!(settings.confirm_before_commit);
        assert!(settings.notify_on_budget);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            week_start: Weekday::Sat,
            confirm_before_commit: true,
            notify_on_budget: false,
            use_emoji: false,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "week_start": "Someday" }"#).unwrap();

        assert!(load_settings(&path).is_err());
    }
}
