//! Keyword trigger configuration.
//!
//! Parses the line-oriented `trigger=path1, path2` format into an ordered
//! index the fuzzy matcher scans on every submission.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

/// One trigger phrase and the files it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub trigger: String,
    pub targets: Vec<String>,
}

/// Trigger-to-targets mapping. Entries keep the order they appear in the
/// config file, which is what makes matcher tie-breaking deterministic.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<KeywordEntry>,
}

impl KeywordIndex {
    /// Load the index from `path`. A missing or unreadable file is not an
    /// error; the assistant simply runs with no triggers.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let index = Self::parse(&text);
                info!(
                    "loaded {} keyword trigger(s) from {}",
                    index.len(),
                    path.display()
                );
                index
            }
            Err(err) => {
                warn!("no keyword config at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Parse `trigger=path1, path2` lines. Lines without `=` are skipped,
    /// both sides are trimmed, and empty target entries are dropped. A
    /// repeated trigger keeps its original position but takes the targets
    /// from its last occurrence.
    pub fn parse(text: &str) -> Self {
        let mut index = Self::default();
        for line in text.lines() {
            let (raw_trigger, raw_targets) = match line.split_once('=') {
                Some(parts) => parts,
                None => continue,
            };
            let trigger = raw_trigger.trim();
            if trigger.is_empty() {
                continue;
            }
            let targets: Vec<String> = raw_targets
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            index.insert(trigger.to_string(), targets);
        }
        index
    }

    fn insert(&mut self, trigger: String, targets: Vec<String>) {
        match self.entries.iter_mut().find(|e| e.trigger == trigger) {
            Some(existing) => existing.targets = targets,
            None => self.entries.push(KeywordEntry { trigger, targets }),
        }
    }

    /// Target paths for an exact trigger, if configured.
    pub fn targets(&self, trigger: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.trigger == trigger)
            .map(|e| e.targets.as_slice())
    }

    /// Triggers in config-file order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.trigger.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
