//! Transcript data model and outcome formatting.

use assistant::dispatch::DispatchOutcome;

/// Who a transcript line belongs to, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    /// App-level notices and errors, rendered without a bubble.
    Notice,
}

/// One rendered line of the conversation view.
#[derive(Debug, Clone)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptLine {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Notice,
            text: text.into(),
        }
    }
}

/// Turn a dispatch outcome into the transcript line it should display.
pub fn outcome_line(outcome: DispatchOutcome) -> TranscriptLine {
    match outcome {
        DispatchOutcome::Keyword { trigger, report } => {
            TranscriptLine::assistant(format!("Matched keyword \"{trigger}\"\n{report}"))
        }
        DispatchOutcome::Assistant(text) => TranscriptLine::assistant(text),
        DispatchOutcome::Failed(error) => TranscriptLine::notice(describe_api_error(&error)),
    }
}

/// Friendly phrasing for the common remote-call failures, with the raw
/// error kept underneath for debugging.
pub fn describe_api_error(error: &str) -> String {
    let lower = error.to_lowercase();
    if lower.contains("401") || lower.contains("unauthorized") || lower.contains("invalid api key")
    {
        return format!("⚠️ The API rejected the key. Check api_key.txt.\n{error}");
    }
    if lower.contains("429") || lower.contains("rate limit") {
        return format!("⚠️ The API is rate limiting us. Wait a moment and try again.\n{error}");
    }
    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connect")
        || lower.contains("dns")
    {
        return format!("⚠️ Could not reach the API. Check your network connection.\n{error}");
    }
    format!("⚠️ The request failed: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_outcome_names_the_trigger() {
        let line = outcome_line(DispatchOutcome::Keyword {
            trigger: "open report".to_string(),
            report: "✅ Opened file: report.pdf".to_string(),
        });
        assert_eq!(line.speaker, Speaker::Assistant);
        assert_eq!(
            line.text,
            "Matched keyword \"open report\"\n✅ Opened file: report.pdf"
        );
    }

    #[test]
    fn test_assistant_outcome_passes_text_through() {
        let line = outcome_line(DispatchOutcome::Assistant("hello".to_string()));
        assert_eq!(line.speaker, Speaker::Assistant);
        assert_eq!(line.text, "hello");
    }

    #[test]
    fn test_failed_outcome_becomes_notice() {
        let line = outcome_line(DispatchOutcome::Failed("openai error: 500".to_string()));
        assert_eq!(line.speaker, Speaker::Notice);
        assert!(line.text.starts_with("⚠️"));
    }

    #[test]
    fn test_api_errors_are_bucketed() {
        assert!(describe_api_error("openai error: 401 Unauthorized").contains("api_key.txt"));
        assert!(describe_api_error("openai error: 429 Too Many Requests").contains("rate limiting"));
        assert!(describe_api_error("error sending request: connection refused")
            .contains("network connection"));
        assert!(describe_api_error("something odd").starts_with("⚠️ The request failed"));
    }

    #[test]
    fn test_raw_error_is_preserved_for_debugging() {
        let described = describe_api_error("openai error: 401 Unauthorized");
        assert!(described.contains("openai error: 401 Unauthorized"));
    }
}
