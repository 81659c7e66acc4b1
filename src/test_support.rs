//! Scratch directories and a fake overlay launcher for tests

use crate::crosshair_overlay::{Launcher, OverlayProcess};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Unique directory under the system temp dir, removed on drop
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "dehydrated_crosshair_{}_{}_{}",
            label,
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create scratch dir");
        ScratchDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Launcher double that records spawns instead of starting processes
#[derive(Clone, Default)]
pub struct FakeLauncher {
    state: Arc<FakeState>,
    fail: bool,
    stubborn: bool,
}

#[derive(Default)]
struct FakeState {
    spawned: AtomicU32,
    terminated: AtomicU32,
    alive: AtomicBool,
    working_dirs: Mutex<Vec<PathBuf>>,
}

impl FakeLauncher {
    /// Launcher whose every spawn fails
    pub fn failing() -> Self {
        FakeLauncher {
            fail: true,
            ..FakeLauncher::default()
        }
    }

    /// Launcher whose processes refuse to be terminated
    pub fn stubborn() -> Self {
        FakeLauncher {
            stubborn: true,
            ..FakeLauncher::default()
        }
    }

    pub fn spawned(&self) -> u32 {
        self.state.spawned.load(Ordering::SeqCst)
    }

    pub fn terminated(&self) -> u32 {
        self.state.terminated.load(Ordering::SeqCst)
    }

    /// The overlay exits on its own
    pub fn kill_externally(&self) {
        self.state.alive.store(false, Ordering::SeqCst);
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.state.working_dirs.lock().unwrap().clone()
    }
}

struct FakeProcess {
    id: u32,
    state: Arc<FakeState>,
    stubborn: bool,
}

impl OverlayProcess for FakeProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn is_running(&mut self) -> bool {
        self.state.alive.load(Ordering::SeqCst)
    }

    fn terminate(&mut self) -> io::Result<()> {
        if self.stubborn {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        }
        self.state.alive.store(false, Ordering::SeqCst);
        self.state.terminated.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Launcher for FakeLauncher {
    fn launch(&mut self, _exe: &Path, working_dir: &Path) -> io::Result<Box<dyn OverlayProcess>> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        let id = 1000 + self.state.spawned.fetch_add(1, Ordering::SeqCst);
        self.state.alive.store(true, Ordering::SeqCst);
        self.state
            .working_dirs
            .lock()
            .unwrap()
            .push(working_dir.to_path_buf());
        Ok(Box::new(FakeProcess {
            id,
            state: Arc::clone(&self.state),
            stubborn: self.stubborn,
        }))
    }
}
