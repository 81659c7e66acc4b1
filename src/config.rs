/// Application directory and the files that live in it.
///
/// Everything the control panel touches sits next to its own executable:
/// the preference file, the overlay configuration polled by the overlay
/// process, the overlay executable itself, and the optional banner image.
/// The overlay finds its configuration by convention, because it is started
/// with the application directory as its working directory.
use std::path::{Path, PathBuf};

pub const APP_SETTINGS_NAME: &str = "app_settings.json";
pub const OVERLAY_JSON_NAME: &str = "overlay_settings.json";
pub const BANNER_FILE: &str = "Dehydrated_Crosshair_Banner.png";

#[cfg(windows)]
pub const OVERLAY_EXE_NAME: &str = "CrosshairOverlay.exe";
#[cfg(not(windows))]
pub const OVERLAY_EXE_NAME: &str = "CrosshairOverlay";

/// Resolved locations of every file the application reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        AppPaths {
            base_dir: base_dir.into(),
        }
    }

    /// Directory of the running executable, falling back to the current
    /// directory when it cannot be determined
    pub fn discover() -> Self {
        let base_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        AppPaths::new(base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(APP_SETTINGS_NAME)
    }

    pub fn overlay_config_file(&self) -> PathBuf {
        self.base_dir.join(OVERLAY_JSON_NAME)
    }

    pub fn overlay_exe(&self) -> PathBuf {
        self.base_dir.join(OVERLAY_EXE_NAME)
    }

    /// Banner image path, only if the file is present
    pub fn banner(&self) -> Option<PathBuf> {
        let path = self.base_dir.join(BANNER_FILE);
        path.exists().then_some(path)
    }
}
