//! Dehydrated Crosshair library
//!
//! Control panel for an external crosshair overlay: preference persistence,
//! overlay process supervision, raid reference tools and the settings GUI.

pub mod config;
pub mod crosshair_overlay;
pub mod error;
pub mod gui;
pub mod persistence;
pub mod preferences;
pub mod raid;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::{bail, Result};
use config::AppPaths;
use std::path::PathBuf;

pub const APP_NAME: &str = "Dehydrated Crosshair";

/// Startup flags parsed from the command line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StartupFlags {
    /// Directory holding the settings files and the overlay executable
    pub app_dir: Option<PathBuf>,
}

impl StartupFlags {
    /// Parse arguments (without the program name). Unknown flags are ignored.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags = StartupFlags::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--app-dir" => match args.next() {
                    Some(dir) => flags.app_dir = Some(PathBuf::from(dir)),
                    None => bail!("--app-dir requires a directory"),
                },
                other => {
                    if let Some(dir) = other.strip_prefix("--app-dir=") {
                        flags.app_dir = Some(PathBuf::from(dir));
                    }
                }
            }
        }

        Ok(flags)
    }

    pub fn app_paths(&self) -> AppPaths {
        match self.app_dir {
            Some(ref dir) => AppPaths::new(dir),
            None => AppPaths::discover(),
        }
    }
}
