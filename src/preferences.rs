/// User preferences for the crosshair and the control panel.
///
/// This module provides:
/// - The persisted preference record and its crosshair enumerations
/// - Typed change events emitted by the settings controls, and the single
///   handler that applies them
/// - Loading and saving the record to `app_settings.json`
///
/// Loading never fails from the caller's point of view: a missing, truncated
/// or malformed file leaves the defaults in place and the problem is logged.
use crate::crosshair_overlay::OverlayConfig;
use crate::error::PersistError;
use crate::persistence::{read_json, write_json_atomic};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const SIZE_RANGE: RangeInclusive<u32> = 2..=40;
pub const OPACITY_RANGE: RangeInclusive<f32> = 0.05..=1.0;
pub const OUTLINE_RANGE: RangeInclusive<u32> = 0..=8;

/// Shape the overlay draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CrosshairStyle {
    #[default]
    Dot,
    Plus,
    Cross,
}

impl CrosshairStyle {
    pub const ALL: [CrosshairStyle; 3] = [CrosshairStyle::Dot, CrosshairStyle::Plus, CrosshairStyle::Cross];

    pub fn label(self) -> &'static str {
        match self {
            CrosshairStyle::Dot => "Dot",
            CrosshairStyle::Plus => "Plus",
            CrosshairStyle::Cross => "Cross",
        }
    }

    /// Key understood by the overlay process
    pub fn overlay_key(self) -> &'static str {
        match self {
            CrosshairStyle::Dot => "dot",
            CrosshairStyle::Plus => "plus",
            CrosshairStyle::Cross => "cross",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for CrosshairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CrosshairStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label).unwrap_or_default())
    }
}

/// Crosshair colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CrosshairColor {
    #[default]
    White,
    Red,
    Green,
    Blue,
}

impl CrosshairColor {
    pub const ALL: [CrosshairColor; 4] = [
        CrosshairColor::White,
        CrosshairColor::Red,
        CrosshairColor::Green,
        CrosshairColor::Blue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CrosshairColor::White => "White",
            CrosshairColor::Red => "Red",
            CrosshairColor::Green => "Green",
            CrosshairColor::Blue => "Blue",
        }
    }

    /// Key understood by the overlay process
    pub fn overlay_key(self) -> &'static str {
        match self {
            CrosshairColor::White => "white",
            CrosshairColor::Red => "red",
            CrosshairColor::Green => "green",
            CrosshairColor::Blue => "blue",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for CrosshairColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CrosshairColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label).unwrap_or_default())
    }
}

/// Full persisted preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether the crosshair is shown
    pub enabled: bool,
    #[serde(rename = "style_ui")]
    pub style: CrosshairStyle,
    /// Dot radius, or half-length of the lines
    pub size: u32,
    pub thickness: u32,
    pub outline: u32,
    #[serde(rename = "color_ui")]
    pub color: CrosshairColor,
    #[serde(deserialize_with = "deserialize_opacity")]
    pub opacity: f32,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            enabled: false,
            style: CrosshairStyle::Dot,
            size: 6,
            thickness: 2,
            outline: 0,
            color: CrosshairColor::White,
            opacity: 1.0,
            dark_mode: true,
        }
    }
}

/// Change emitted by one of the crosshair controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    Style(CrosshairStyle),
    Size(u32),
    Color(CrosshairColor),
    Opacity(f32),
    Outline(u32),
}

impl Preferences {
    /// Apply a control change. Returns true if the overlay would render
    /// differently afterwards.
    pub fn apply(&mut self, change: SettingChange) -> bool {
        let before = self.overlay_config();

        match change {
            SettingChange::Style(style) => self.style = style,
            SettingChange::Size(size) => {
                self.size = size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end());
            }
            SettingChange::Color(color) => self.color = color,
            SettingChange::Opacity(opacity) => self.opacity = clamp_opacity(opacity),
            SettingChange::Outline(outline) => {
                self.outline = outline.clamp(*OUTLINE_RANGE.start(), *OUTLINE_RANGE.end());
            }
        }

        self.overlay_config() != before
    }

    /// Projection written for the overlay process
    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig::from(self)
    }
}

/// Opacity limited to 0..=1; non-finite input falls back to fully opaque
pub fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

// Out-of-range floats parse as infinity and would be written back as null
fn deserialize_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    f32::deserialize(deserializer).map(clamp_opacity)
}

/// Reads and writes the preference file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored preferences, distinguishing a missing file from a broken one
    pub fn try_load(&self) -> Result<Option<Preferences>, PersistError> {
        read_json(&self.path)
    }

    /// Load the stored preferences, or defaults if the file is missing or unusable
    pub fn load(&self) -> Preferences {
        match self.try_load() {
            Ok(Some(prefs)) => {
                tracing::info!("Loaded settings from {:?}", self.path);
                prefs
            }
            Ok(None) => {
                tracing::info!("No settings file at {:?}, using defaults", self.path);
                Preferences::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings: {}", e);
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), PersistError> {
        write_json_atomic(&self.path, prefs)?;
        tracing::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScratchDir;
    use std::fs;

    fn store_in(dir: &ScratchDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("app_settings.json"))
    }

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert!(!prefs.enabled);
        assert_eq!(prefs.style, CrosshairStyle::Dot);
        assert_eq!(prefs.size, 6);
        assert_eq!(prefs.thickness, 2);
        assert_eq!(prefs.outline, 0);
        assert_eq!(prefs.color, CrosshairColor::White);
        assert_eq!(prefs.opacity, 1.0);
        assert!(prefs.dark_mode);
    }

    #[test]
    fn test_save_load_round_trip_at_opacity_bounds() {
        let dir = ScratchDir::new("prefs_round_trip");
        let store = store_in(&dir);

        let transparent = Preferences {
            enabled: true,
            style: CrosshairStyle::Cross,
            size: 40,
            thickness: 5,
            outline: 8,
            color: CrosshairColor::Blue,
            opacity: 0.0,
            dark_mode: false,
        };
        store.save(&transparent).unwrap();
        assert_eq!(store.load(), transparent);

        let opaque = Preferences {
            style: CrosshairStyle::Plus,
            color: CrosshairColor::Green,
            opacity: 1.0,
            ..transparent.clone()
        };
        store.save(&opaque).unwrap();
        assert_eq!(store.load(), opaque);
    }

    #[test]
    fn test_fractional_opacity_survives_round_trip() {
        let dir = ScratchDir::new("prefs_fractional");
        let store = store_in(&dir);
        let prefs = Preferences {
            opacity: 0.37,
            ..Preferences::default()
        };

        store.save(&prefs).unwrap();
        assert_eq!(store.load().opacity, 0.37);
    }

    #[test]
    fn test_settings_file_layout() {
        let dir = ScratchDir::new("prefs_layout");
        let store = store_in(&dir);
        store.save(&Preferences::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "enabled": false,
                "style_ui": "Dot",
                "size": 6,
                "thickness": 2,
                "outline": 0,
                "color_ui": "White",
                "opacity": 1.0,
                "dark_mode": true,
            })
        );
    }

    #[test]
    fn test_truncated_file_yields_defaults() {
        let dir = ScratchDir::new("prefs_truncated");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"enabled\": true, \"style_ui\": \"Cr").unwrap();

        assert_eq!(store.load(), Preferences::default());
        assert!(store.try_load().is_err());
    }

    #[test]
    fn test_wrong_types_yield_defaults() {
        let dir = ScratchDir::new("prefs_wrong_types");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"size\": \"huge\", \"enabled\": true}").unwrap();

        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = ScratchDir::new("prefs_missing");
        let store = store_in(&dir);

        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_overflowing_opacity_is_clamped_on_load() {
        let dir = ScratchDir::new("prefs_overflow_opacity");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"size\": 20, \"color_ui\": \"Red\", \"opacity\": 1e39}").unwrap();

        let prefs = store.load();
        assert_eq!(prefs.opacity, 1.0);

        store.save(&prefs).unwrap();
        assert!(!fs::read_to_string(store.path()).unwrap().contains("null"));

        let reloaded = store.load();
        assert_eq!(reloaded, prefs);
        assert_eq!(reloaded.size, 20);
        assert_eq!(reloaded.color, CrosshairColor::Red);
    }

    #[test]
    fn test_out_of_range_opacity_is_clamped_on_load() {
        let prefs: Preferences = serde_json::from_str("{\"opacity\": -3.5}").unwrap();
        assert_eq!(prefs.opacity, 0.0);

        let prefs: Preferences = serde_json::from_str("{\"opacity\": 0.25}").unwrap();
        assert_eq!(prefs.opacity, 0.25);
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let dir = ScratchDir::new("prefs_partial");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"size\": 12, \"color_ui\": \"Red\"}").unwrap();

        let prefs = store.load();
        assert_eq!(prefs.size, 12);
        assert_eq!(prefs.color, CrosshairColor::Red);
        assert_eq!(prefs.thickness, 2);
        assert!(prefs.dark_mode);
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let prefs: Preferences =
            serde_json::from_str("{\"style_ui\": \"Star\", \"color_ui\": \"purple\"}").unwrap();
        assert_eq!(prefs.style, CrosshairStyle::Dot);
        assert_eq!(prefs.color, CrosshairColor::White);
    }

    #[test]
    fn test_labels_match_case_insensitively() {
        assert_eq!(CrosshairStyle::from_label("cross"), Some(CrosshairStyle::Cross));
        assert_eq!(CrosshairColor::from_label(" GREEN "), Some(CrosshairColor::Green));
        assert_eq!(CrosshairStyle::from_label("square"), None);
    }

    #[test]
    fn test_apply_reports_overlay_changes() {
        let mut prefs = Preferences::default();

        assert!(prefs.apply(SettingChange::Style(CrosshairStyle::Plus)));
        assert!(!prefs.apply(SettingChange::Style(CrosshairStyle::Plus)));
        assert!(prefs.apply(SettingChange::Color(CrosshairColor::Red)));
        assert!(prefs.apply(SettingChange::Size(10)));
        assert!(prefs.apply(SettingChange::Outline(3)));
        assert!(prefs.apply(SettingChange::Opacity(0.5)));

        assert_eq!(prefs.style, CrosshairStyle::Plus);
        assert_eq!(prefs.color, CrosshairColor::Red);
        assert_eq!(prefs.size, 10);
        assert_eq!(prefs.outline, 3);
        assert_eq!(prefs.opacity, 0.5);
    }

    #[test]
    fn test_apply_clamps_values() {
        let mut prefs = Preferences::default();

        prefs.apply(SettingChange::Size(500));
        prefs.apply(SettingChange::Outline(99));
        prefs.apply(SettingChange::Opacity(3.0));
        assert_eq!(prefs.size, 40);
        assert_eq!(prefs.outline, 8);
        assert_eq!(prefs.opacity, 1.0);

        prefs.apply(SettingChange::Size(0));
        prefs.apply(SettingChange::Opacity(-1.0));
        assert_eq!(prefs.size, 2);
        assert_eq!(prefs.opacity, 0.0);

        prefs.apply(SettingChange::Opacity(f32::NAN));
        assert_eq!(prefs.opacity, 1.0);
    }
}
