//! Opening files with the OS default application.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Why a single path failed to open.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("file not found")]
    NotFound,
    #[error("{0}")]
    Failed(String),
}

/// The one OS-facing capability: hand a path to the default handler.
/// Production wires in [`SystemOpener`]; tests substitute a recording stub
/// so no real application is ever launched.
pub trait FileOpener: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens paths through the `open` crate, which picks the right launcher
/// for the host OS family.
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// Per-path result of a launch request. `path` is the path as configured,
/// before tilde expansion, which is what status lines show the user.
#[derive(Debug)]
pub struct LaunchOutcome {
    pub path: String,
    pub result: Result<(), LaunchError>,
}

pub struct FileLauncher {
    opener: Box<dyn FileOpener>,
}

impl FileLauncher {
    /// Launcher wired to the host OS.
    pub fn system() -> Self {
        Self::with_opener(Box::new(SystemOpener))
    }

    pub fn with_opener(opener: Box<dyn FileOpener>) -> Self {
        Self { opener }
    }

    /// Open every path in order, one attempt each. A failed path never
    /// stops the remaining ones.
    pub fn launch(&self, paths: &[String]) -> Vec<LaunchOutcome> {
        paths.iter().map(|path| self.launch_one(path)).collect()
    }

    fn launch_one(&self, path: &str) -> LaunchOutcome {
        let resolved = expand_user_path(path);
        if !resolved.exists() {
            warn!("launch target does not exist: {}", path);
            return LaunchOutcome {
                path: path.to_string(),
                result: Err(LaunchError::NotFound),
            };
        }
        match self.opener.open(&resolved) {
            Ok(()) => {
                info!("opened {} with the default application", path);
                LaunchOutcome {
                    path: path.to_string(),
                    result: Ok(()),
                }
            }
            Err(err) => {
                warn!("failed to open {}: {}", path, err);
                LaunchOutcome {
                    path: path.to_string(),
                    result: Err(LaunchError::Failed(err.to_string())),
                }
            }
        }
    }

    /// Launch and render the per-path status lines in one step.
    pub fn launch_report(&self, paths: &[String]) -> String {
        format_report(&self.launch(paths))
    }
}

/// One status line per outcome, in launch order.
pub fn format_report(outcomes: &[LaunchOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(()) => format!("✅ Opened file: {}", outcome.path),
            Err(LaunchError::NotFound) => format!("❌ File not found: {}", outcome.path),
            Err(LaunchError::Failed(detail)) => {
                format!("❌ Failed to open file: {}\nError: {}", outcome.path, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn expand_user_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
