//! View helpers shared by the TUI and the headless CLI. Everything here
//! reads the session state; nothing writes it.

use regex::Regex;
use std::sync::OnceLock;

use crate::state::{Panel, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

fn emphasis_pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*.*?\*\*|__.*?__").expect("emphasis pair pattern is valid"))
}

fn bullet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\*|-)\s*").expect("bullet pattern is valid"))
}

/// Split a summary into plain runs and emphasized spans.
/// `**x**` and `__x__` both mark `x`; anything else is literal.
pub fn emphasis_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in emphasis_pair_pattern().find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Plain(text[cursor..found.start()].to_string()));
        }
        let marked = found.as_str();
        segments.push(Segment::Emphasis(marked[2..marked.len() - 2].to_string()));
        cursor = found.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(text[cursor..].to_string()));
    }
    segments
}

/// One entry per non-blank line, with any leading `*` or `-` bullet removed
pub fn suggestion_items(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| bullet_pattern().replace(line, "").trim().to_string())
        .collect()
}

/// Result panels that have something to show, in draw order
pub fn visible_panels(state: &SessionState) -> Vec<Panel> {
    Panel::ALL
        .into_iter()
        .filter(|panel| match panel {
            Panel::Extracted => !state.extracted_text.is_empty(),
            Panel::Summary => !state.summary.is_empty(),
            Panel::Suggestions => !state.suggestions.is_empty(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub enabled: bool,
    pub label: &'static str,
}

/// Enabled state and labels of the action triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub extract: Trigger,
    pub length_selector: bool,
    pub summary: Trigger,
    pub suggestions: Trigger,
}

impl Controls {
    /// Everything is disabled while any operation is in flight
    pub fn from_state(state: &SessionState) -> Self {
        let busy = state.is_busy();
        let has_text = state.has_extracted_text();

        Self {
            extract: Trigger {
                enabled: state.document.is_some() && !busy,
                label: if state.is_extracting { "Extracting Text..." } else { "Extract Text" },
            },
            length_selector: has_text && !busy,
            summary: Trigger {
                enabled: has_text && !busy,
                label: if state.is_summarizing { "Summarizing..." } else { "Generate Summary" },
            },
            suggestions: Trigger {
                enabled: has_text && !busy,
                label: if state.is_suggesting { "Getting Suggestions..." } else { "Get Suggestions" },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::path::PathBuf;

    #[test]
    fn test_emphasis_segments() {
        let segments = emphasis_segments("The **key finding** is __clear__ now.");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("The ".to_string()),
                Segment::Emphasis("key finding".to_string()),
                Segment::Plain(" is ".to_string()),
                Segment::Emphasis("clear".to_string()),
                Segment::Plain(" now.".to_string()),
            ]
        );
    }

    #[test]
    fn test_unpaired_markers_stay_literal() {
        assert_eq!(
            emphasis_segments("2 ** 3 is eight"),
            vec![Segment::Plain("2 ** 3 is eight".to_string())]
        );
        assert!(emphasis_segments("").is_empty());
    }

    #[test]
    fn test_suggestion_items_strip_bullets() {
        let items = suggestion_items("* First tip.\n\n- Second tip.\n   \nThird tip.");
        assert_eq!(items, vec!["First tip.", "Second tip.", "Third tip."]);
    }

    #[test]
    fn test_controls_follow_state() {
        let mut state = SessionState::default();
        let controls = Controls::from_state(&state);
        assert!(!controls.extract.enabled);
        assert!(!controls.summary.enabled);

        state.document = Some(Document {
            name: "a.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1,
            path: PathBuf::from("a.pdf"),
        });
        assert!(Controls::from_state(&state).extract.enabled);

        state.extracted_text = "Text.".to_string();
        state.is_suggesting = true;
        let controls = Controls::from_state(&state);
        assert!(!controls.extract.enabled);
        assert!(!controls.summary.enabled);
        assert!(!controls.length_selector);
        assert_eq!(controls.suggestions.label, "Getting Suggestions...");
    }

    #[test]
    fn test_visible_panels() {
        let mut state = SessionState::default();
        assert!(visible_panels(&state).is_empty());
        state.extracted_text = "x".to_string();
        state.suggestions = "* y".to_string();
        assert_eq!(visible_panels(&state), vec![Panel::Extracted, Panel::Suggestions]);
    }
}
