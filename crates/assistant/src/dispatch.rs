//! Per-submission routing between the local keyword path and the remote
//! session.

use std::sync::Arc;

use services::keyword_index::KeywordIndex;
use services::launcher::FileLauncher;
use services::matcher::best_match;
use tracing::info;

use crate::session::ChatSession;

/// What one user submission produced.
#[derive(Debug, PartialEq)]
pub enum DispatchOutcome {
    /// A trigger matched and its files were launched locally. The remote
    /// API was never contacted and the conversation history is untouched.
    Keyword { trigger: String, report: String },
    /// The remote assistant answered with this text.
    Assistant(String),
    /// The remote call failed; the session was left unchanged.
    Failed(String),
}

/// Routes each submission: local fuzzy dispatch first, remote fallback.
pub struct Dispatcher {
    index: KeywordIndex,
    session: ChatSession,
    launcher: Arc<FileLauncher>,
}

impl Dispatcher {
    pub fn new(index: KeywordIndex, session: ChatSession, launcher: Arc<FileLauncher>) -> Self {
        Self {
            index,
            session,
            launcher,
        }
    }

    /// Handle one submission. Blank input is a no-op.
    ///
    /// The matcher runs on every non-blank submission, but its verdict is
    /// only acted on while function calling is enabled; with the toggle
    /// off everything goes to the remote assistant.
    pub async fn dispatch(
        &mut self,
        input: &str,
        threshold: u8,
        allow_functions: bool,
    ) -> Option<DispatchOutcome> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let matched = best_match(input, &self.index, threshold).map(str::to_string);
        if allow_functions {
            if let Some(trigger) = matched {
                let targets = self
                    .index
                    .targets(&trigger)
                    .map(|targets| targets.to_vec())
                    .unwrap_or_default();
                info!(
                    "keyword {:?} matched, opening {} file(s)",
                    trigger,
                    targets.len()
                );
                let report = self.launcher.launch_report(&targets);
                return Some(DispatchOutcome::Keyword { trigger, report });
            }
        }

        match self.session.send(input, allow_functions).await {
            Ok(text) => Some(DispatchOutcome::Assistant(text)),
            Err(err) => Some(DispatchOutcome::Failed(err.to_string())),
        }
    }

    /// Reset the conversation to its seed system turn.
    pub fn clear_history(&mut self) {
        self.session.reset();
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }
}
