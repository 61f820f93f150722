//! Match-threshold persistence.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// Default minimum score for accepting a keyword match.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// Persists the threshold slider across runs. Persistence is strictly
/// best-effort: every failure degrades to the caller's default.
#[derive(Debug, Clone)]
pub struct ThresholdStore {
    path: PathBuf,
}

impl ThresholdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored threshold. A missing file, unreadable file, garbage
    /// content, or a value above 100 all yield `default`.
    pub fn load(&self, default: u8) -> u8 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return default,
        };
        match text.trim().parse::<u8>() {
            Ok(value) if value <= 100 => value,
            _ => {
                warn!(
                    "ignoring invalid threshold {:?} in {}",
                    text.trim(),
                    self.path.display()
                );
                default
            }
        }
    }

    /// Overwrite the stored threshold. Write failures are logged, never
    /// propagated; the in-memory value still applies for this run.
    pub fn save(&self, value: u8) {
        if let Err(err) = fs::write(&self.path, value.to_string()) {
            warn!("failed to save threshold to {}: {}", self.path.display(), err);
        }
    }
}
