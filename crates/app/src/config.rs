//! Config file locations and startup settings.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

/// Directory holding `api_key.txt`, `keywords.txt`, and `threshold.txt`.
///
/// `DESKMATE_CONFIG_DIR` wins when set; otherwise the per-user config
/// directory, created on first run; the current directory is the last
/// resort.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("DESKMATE_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(proj) = directories::ProjectDirs::from("com.local", "Deskmate", "Deskmate") {
        let dir = proj.config_dir().to_path_buf();
        let _ = fs::create_dir_all(&dir);
        return dir;
    }
    PathBuf::from(".")
}

pub struct ConfigPaths {
    pub api_key: PathBuf,
    pub keywords: PathBuf,
    pub threshold: PathBuf,
}

impl ConfigPaths {
    pub fn resolve() -> Self {
        let dir = config_dir();
        info!("using config dir {}", dir.display());
        Self::in_dir(&dir)
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            api_key: dir.join("api_key.txt"),
            keywords: dir.join("keywords.txt"),
            threshold: dir.join("threshold.txt"),
        }
    }
}

/// Single-line secret: the file wins, the `OPENAI_API_KEY` environment
/// variable is the fallback. A missing key is not fatal; remote calls
/// will fail visibly instead.
pub fn load_api_key(path: &Path) -> Option<String> {
    if let Ok(text) = fs::read_to_string(path) {
        let key = text.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }
    match env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(key.trim().to_string()),
        _ => None,
    }
}

/// Completion model, overridable via `DESKMATE_MODEL`.
pub fn model() -> String {
    env::var("DESKMATE_MODEL")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| providers::openai::DEFAULT_MODEL.to_string())
}
