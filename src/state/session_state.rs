use tracing::debug;

use crate::actions::{Action, Command};
use crate::document::Document;
use crate::error::{GenerationKind, NoteError};
use crate::extraction::CapabilityReport;
use crate::summarizer::SummaryLength;

/// Core session state - single source of truth for the view
#[derive(Debug, Clone)]
pub struct SessionState {
    pub document: Option<Document>,
    pub extracted_text: String,
    pub summary: String,
    pub suggestions: String,
    pub summary_length: SummaryLength,

    // In-flight flags
    pub is_extracting: bool,
    pub is_summarizing: bool,
    pub is_suggesting: bool,

    pub error: Option<String>,
    pub status_message: String,
    pub capabilities: CapabilityReport,

    /// Bumped on every document selection; completions from an older epoch
    /// belong to a file that is no longer selected.
    pub epoch: u64,
    pub should_quit: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SummaryLength::default())
    }
}

impl SessionState {
    pub fn new(summary_length: SummaryLength) -> Self {
        Self {
            document: None,
            extracted_text: String::new(),
            summary: String::new(),
            suggestions: String::new(),
            summary_length,
            is_extracting: false,
            is_summarizing: false,
            is_suggesting: false,
            error: None,
            status_message: "Select a PDF or image to get started".to_string(),
            capabilities: CapabilityReport::default(),
            epoch: 0,
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_extracting || self.is_summarizing || self.is_suggesting
    }

    pub fn has_extracted_text(&self) -> bool {
        !self.extracted_text.is_empty()
    }

    fn fail(&mut self, error: NoteError) {
        self.error = Some(error.to_string());
    }

    fn is_stale(&self, epoch: u64, what: &str) -> bool {
        if epoch != self.epoch {
            debug!(
                started = epoch,
                current = self.epoch,
                "Dropping {} result for a previously selected file",
                what
            );
            true
        } else {
            false
        }
    }

    /// Pure state transition function
    pub fn update(mut self, action: Action) -> (Self, Option<Command>) {
        match action {
            Action::SelectDocument(document) => {
                self.status_message = format!("Selected: {} ({})", document.name, document.size_label());
                self.document = Some(document);
                self.extracted_text.clear();
                self.summary.clear();
                self.suggestions.clear();
                self.error = None;
                self.epoch += 1;
                (self, None)
            }
            Action::SelectionFailed(error) => {
                self.fail(error);
                (self, None)
            }
            Action::SetSummaryLength(length) => {
                self.summary_length = length;
                self.status_message = format!("Summary length: {}", length);
                (self, None)
            }

            Action::StartExtraction => {
                let Some(document) = self.document.clone() else {
                    self.fail(NoteError::NoFileSelected);
                    return (self, None);
                };
                self.is_extracting = true;
                self.error = None;
                self.extracted_text.clear();
                self.summary.clear();
                self.suggestions.clear();
                self.status_message = format!("Extracting text from {}...", document.name);
                let epoch = self.epoch;
                (self, Some(Command::Extract { epoch, document }))
            }
            Action::ExtractionFinished { epoch, outcome } => {
                self.is_extracting = false;
                if self.is_stale(epoch, "extraction") {
                    return (self, None);
                }
                match outcome {
                    Ok(text) => {
                        self.status_message = if text.is_empty() {
                            "No text found in the document".to_string()
                        } else {
                            format!("Extracted {} characters", text.chars().count())
                        };
                        self.extracted_text = text;
                    }
                    Err(error) => {
                        self.status_message = "Extraction failed".to_string();
                        self.fail(error);
                    }
                }
                (self, None)
            }

            Action::StartSummary => {
                if !self.has_extracted_text() {
                    self.fail(NoteError::NoExtractedText {
                        kind: GenerationKind::Summary,
                    });
                    return (self, None);
                }
                self.is_summarizing = true;
                self.summary.clear();
                self.error = None;
                self.status_message = format!("Generating {} summary...", self.summary_length);
                let command = Command::Summarize {
                    epoch: self.epoch,
                    text: self.extracted_text.clone(),
                    length: self.summary_length,
                };
                (self, Some(command))
            }
            Action::SummaryFinished { epoch, summary } => {
                self.is_summarizing = false;
                if !self.is_stale(epoch, "summary") {
                    self.summary = summary;
                    self.status_message = "Summary ready".to_string();
                }
                (self, None)
            }

            Action::StartSuggestions => {
                if !self.has_extracted_text() {
                    self.fail(NoteError::NoExtractedText {
                        kind: GenerationKind::Suggestions,
                    });
                    return (self, None);
                }
                self.is_suggesting = true;
                self.suggestions.clear();
                self.error = None;
                self.status_message = "Getting suggestions...".to_string();
                let command = Command::Suggest {
                    epoch: self.epoch,
                    text: self.extracted_text.clone(),
                };
                (self, Some(command))
            }
            Action::SuggestionsFinished { epoch, suggestions } => {
                self.is_suggesting = false;
                if !self.is_stale(epoch, "suggestions") {
                    self.suggestions = suggestions;
                    self.status_message = "Suggestions ready".to_string();
                }
                (self, None)
            }

            Action::CapabilitiesProbed(report) => {
                self.capabilities = report;
                (self, None)
            }
            Action::DismissError => {
                self.error = None;
                (self, None)
            }
            Action::Quit => {
                self.should_quit = true;
                (self, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(name: &str, mime: &str) -> Document {
        Document {
            name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: 10,
            path: PathBuf::from(name),
        }
    }

    fn apply(state: SessionState, action: Action) -> SessionState {
        state.update(action).0
    }

    fn populated() -> SessionState {
        let mut state = apply(SessionState::default(), Action::SelectDocument(document("a.pdf", "application/pdf")));
        state.extracted_text = "Some text.".to_string();
        state.summary = "Some text.".to_string();
        state.suggestions = "* tip".to_string();
        state.error = Some("old error".to_string());
        state
    }

    #[test]
    fn test_select_clears_derived_state() {
        let state = apply(populated(), Action::SelectDocument(document("b.png", "image/png")));
        assert_eq!(state.document.as_ref().map(|d| d.name.as_str()), Some("b.png"));
        assert!(state.extracted_text.is_empty());
        assert!(state.summary.is_empty());
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.epoch, 2);
    }

    #[test]
    fn test_extract_without_document() {
        let (state, command) = SessionState::default().update(Action::StartExtraction);
        assert!(command.is_none());
        assert!(!state.is_extracting);
        assert_eq!(
            state.error.as_deref(),
            Some("Please select a file first to extract text.")
        );
    }

    #[test]
    fn test_extraction_round_trip_clears_flag() {
        let state = populated();
        let (state, command) = state.update(Action::StartExtraction);
        assert!(state.is_extracting);
        assert!(state.summary.is_empty() && state.suggestions.is_empty());
        let Some(Command::Extract { epoch, .. }) = command else {
            panic!("expected extract command");
        };

        let failed = apply(
            state.clone(),
            Action::ExtractionFinished {
                epoch,
                outcome: Err(NoteError::dependency_unavailable("PDF engine")),
            },
        );
        assert!(!failed.is_extracting);
        assert!(failed.extracted_text.is_empty());
        assert!(failed.error.unwrap().starts_with("PDF engine not loaded"));

        let ok = apply(
            state,
            Action::ExtractionFinished {
                epoch,
                outcome: Ok("Hello there.".to_string()),
            },
        );
        assert!(!ok.is_extracting);
        assert_eq!(ok.extracted_text, "Hello there.");
    }

    #[test]
    fn test_stale_completion_is_dropped_but_flag_clears() {
        let (state, command) = populated().update(Action::StartExtraction);
        let Some(Command::Extract { epoch, .. }) = command else {
            panic!("expected extract command");
        };
        let state = apply(state, Action::SelectDocument(document("new.png", "image/png")));
        assert!(state.is_extracting);

        let state = apply(
            state,
            Action::ExtractionFinished {
                epoch,
                outcome: Ok("old file text.".to_string()),
            },
        );
        assert!(!state.is_extracting);
        assert!(state.extracted_text.is_empty());
    }

    #[test]
    fn test_generation_requires_text() {
        let state = apply(SessionState::default(), Action::StartSummary);
        assert!(!state.is_summarizing);
        assert_eq!(
            state.error.as_deref(),
            Some("No text has been extracted yet to summarize.")
        );

        let state = apply(SessionState::default(), Action::StartSuggestions);
        assert!(!state.is_suggesting);
        assert_eq!(
            state.error.as_deref(),
            Some("No document content available to generate suggestions from.")
        );
    }

    #[test]
    fn test_summary_command_carries_length() {
        let state = apply(populated(), Action::SetSummaryLength(SummaryLength::Short));
        let (state, command) = state.update(Action::StartSummary);
        assert!(state.is_summarizing && state.is_busy());
        assert!(state.error.is_none());
        match command {
            Some(Command::Summarize { length, text, .. }) => {
                assert_eq!(length, SummaryLength::Short);
                assert_eq!(text, "Some text.");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_errors_keep_existing_results() {
        let mut state = populated();
        state.document = None;
        let state = apply(state, Action::StartExtraction);
        assert_eq!(state.extracted_text, "Some text.");
        assert_eq!(state.summary, "Some text.");
    }
}
