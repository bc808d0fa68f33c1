// Key and paste handling for the Note Summary TUI
// Maps terminal events to UI events, honoring which triggers are enabled

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

use crate::render::Controls;
use crate::state::{SessionState, UiState};
use crate::summarizer::SummaryLength;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    OpenPrompt,
    ClosePrompt,
    PromptInput(char),
    PromptBackspace,
    SubmitPath(PathBuf),
    DropFile(PathBuf),
    Extract,
    SetLength(SummaryLength),
    CycleLength,
    Summarize,
    Suggest,
    CycleFocus,
    ScrollUp,
    ScrollDown,
    DismissError,
    ToggleHelp,
}

/// Turn a pasted or dropped path into something the filesystem understands.
/// Terminals hand drops over quoted, as `file://` URLs, or with `\ ` escapes.
pub fn normalize_dropped_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    PathBuf::from(without_scheme.replace("\\ ", " "))
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_event(&self, event: Event, state: &SessionState, ui: &UiState) -> Option<UiEvent> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key_event(key, state, ui),
            Event::Paste(text) if ui.path_input.is_none() => {
                let path = normalize_dropped_path(&text);
                (!path.as_os_str().is_empty()).then_some(UiEvent::DropFile(path))
            }
            Event::Paste(text) => {
                let path = normalize_dropped_path(&text);
                (!path.as_os_str().is_empty()).then_some(UiEvent::SubmitPath(path))
            }
            _ => None,
        }
    }

    fn handle_key_event(&self, key: KeyEvent, state: &SessionState, ui: &UiState) -> Option<UiEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UiEvent::Quit);
        }

        if let Some(input) = &ui.path_input {
            return match key.code {
                KeyCode::Esc => Some(UiEvent::ClosePrompt),
                KeyCode::Enter => {
                    let path = normalize_dropped_path(input);
                    if path.as_os_str().is_empty() {
                        Some(UiEvent::ClosePrompt)
                    } else {
                        Some(UiEvent::SubmitPath(path))
                    }
                }
                KeyCode::Backspace => Some(UiEvent::PromptBackspace),
                KeyCode::Char(c) => Some(UiEvent::PromptInput(c)),
                _ => None,
            };
        }

        let controls = Controls::from_state(state);
        match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('o') => Some(UiEvent::OpenPrompt),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::CycleFocus),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            KeyCode::Esc if state.error.is_some() => Some(UiEvent::DismissError),

            KeyCode::Char('e') if controls.extract.enabled => Some(UiEvent::Extract),
            KeyCode::Char('s') if controls.summary.enabled => Some(UiEvent::Summarize),
            KeyCode::Char('g') if controls.suggestions.enabled => Some(UiEvent::Suggest),
            KeyCode::Char('l') if controls.length_selector => Some(UiEvent::CycleLength),
            KeyCode::Char(c @ '1'..='3') if controls.length_selector => {
                let index = c as usize - '1' as usize;
                Some(UiEvent::SetLength(SummaryLength::ALL[index]))
            }
            _ => None,
        }
    }
}
