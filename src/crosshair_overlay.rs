//! Crosshair overlay supervision.
//!
//! The crosshair is drawn by a separate overlay executable that lives next to
//! this application. It is started detached with the application directory as
//! its working directory and polls `overlay_settings.json` from there. This
//! module owns the single handle to that process and publishes the overlay
//! configuration for it.
//!
//! Liveness is only checked when the overlay is needed again; an overlay that
//! exits on its own is noticed at the next enable or settings change.

use crate::config::AppPaths;
use crate::error::OverlayError;
use crate::persistence::write_json_atomic;
use crate::preferences::{clamp_opacity, Preferences};
use serde::Serialize;
use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// What the overlay process reads from `overlay_settings.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub style: &'static str,
    pub size: u32,
    pub thickness: u32,
    pub outline: u32,
    pub color: &'static str,
    pub opacity: f32,
}

impl From<&Preferences> for OverlayConfig {
    fn from(prefs: &Preferences) -> Self {
        OverlayConfig {
            enabled: prefs.enabled,
            style: prefs.style.overlay_key(),
            size: prefs.size,
            thickness: prefs.thickness,
            outline: prefs.outline,
            color: prefs.color.overlay_key(),
            opacity: clamp_opacity(prefs.opacity),
        }
    }
}

/// A running overlay process
pub trait OverlayProcess: Send {
    fn id(&self) -> u32;
    /// Non-blocking liveness poll
    fn is_running(&mut self) -> bool;
    /// Ask the process to stop without waiting for it
    fn terminate(&mut self) -> io::Result<()>;
}

impl OverlayProcess for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn is_running(&mut self) -> bool {
        matches!(self.try_wait(), Ok(None))
    }

    fn terminate(&mut self) -> io::Result<()> {
        self.kill()
    }
}

/// Starts overlay processes
pub trait Launcher {
    fn launch(&mut self, exe: &Path, working_dir: &Path) -> io::Result<Box<dyn OverlayProcess>>;
}

/// Spawns the real overlay executable, detached and without a console window
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, exe: &Path, working_dir: &Path) -> io::Result<Box<dyn OverlayProcess>> {
        let mut command = Command::new(exe);
        command
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x00000008;
            const CREATE_NO_WINDOW: u32 = 0x08000000;

            command.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
        }

        let child = command.spawn()?;
        Ok(Box::new(child))
    }
}

/// Owns at most one overlay process and the configuration it reads
pub struct OverlaySupervisor<L = SystemLauncher> {
    paths: AppPaths,
    launcher: L,
    process: Option<Box<dyn OverlayProcess>>,
}

impl OverlaySupervisor<SystemLauncher> {
    pub fn new(paths: AppPaths) -> Self {
        Self::with_launcher(paths, SystemLauncher)
    }
}

impl<L: Launcher> OverlaySupervisor<L> {
    pub fn with_launcher(paths: AppPaths, launcher: L) -> Self {
        OverlaySupervisor {
            paths,
            launcher,
            process: None,
        }
    }

    pub fn is_running(&mut self) -> bool {
        self.process
            .as_mut()
            .is_some_and(|process| process.is_running())
    }

    /// Start the overlay unless the process we started earlier is still alive
    pub fn ensure_running(&mut self) -> Result<(), OverlayError> {
        if let Some(process) = self.process.as_mut() {
            if process.is_running() {
                return Ok(());
            }
            tracing::warn!("Overlay process {} has exited", process.id());
            self.process = None;
        }

        let exe = self.paths.overlay_exe();
        if !exe.is_file() {
            return Err(OverlayError::MissingExecutable { path: exe });
        }

        let process = self
            .launcher
            .launch(&exe, self.paths.base_dir())
            .map_err(|source| OverlayError::Spawn {
                path: exe.clone(),
                source,
            })?;

        tracing::info!("Started overlay process {} from {:?}", process.id(), exe);
        self.process = Some(process);
        Ok(())
    }

    /// Atomically publish the overlay projection of `prefs`
    pub fn write_config(&self, prefs: &Preferences) -> Result<(), OverlayError> {
        let path = self.paths.overlay_config_file();
        write_json_atomic(&path, &prefs.overlay_config())?;
        tracing::debug!("Wrote overlay config to {:?}", path);
        Ok(())
    }

    /// Turn the crosshair on or off. A failed start leaves it off.
    pub fn set_enabled(&mut self, prefs: &mut Preferences, enabled: bool) -> Result<(), OverlayError> {
        prefs.enabled = enabled;

        if enabled {
            if let Err(e) = self.ensure_running() {
                prefs.enabled = false;
                return Err(e);
            }
        }

        self.write_config(prefs)
    }

    /// Live update after a settings change. Failures are logged only.
    pub fn preview(&mut self, prefs: &Preferences) {
        if prefs.enabled {
            if let Err(e) = self.ensure_running() {
                tracing::warn!("Skipping overlay update: {}", e);
                return;
            }
        }

        if let Err(e) = self.write_config(prefs) {
            tracing::warn!("Failed to update overlay config: {}", e);
        }
    }

    /// Hide the crosshair, then stop the overlay process
    pub fn shutdown(&mut self, prefs: &mut Preferences) {
        // Written first so a lingering process draws nothing
        prefs.enabled = false;
        if let Err(e) = self.write_config(prefs) {
            tracing::warn!("Failed to disable overlay during shutdown: {}", e);
        }

        if let Some(mut process) = self.process.take() {
            if process.is_running() {
                match process.terminate() {
                    Ok(()) => tracing::info!("Stopped overlay process {}", process.id()),
                    Err(e) => tracing::warn!("Failed to stop overlay process {}: {}", process.id(), e),
                }
            }
        }
    }
}
