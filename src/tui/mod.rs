// Note Summary - Terminal UI
// Draws the session state and feeds key presses back as actions

pub mod events;
pub mod layout;
pub mod view;

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use crate::actions::Action;
use crate::app::App;
use crate::render::visible_panels;
use crate::state::UiState;
use events::{EventHandler, UiEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Entry point for the interactive interface
pub async fn run_tui(mut app: App, initial: Option<PathBuf>) -> Result<()> {
    info!("Starting Note Summary TUI");

    app.start_probe();
    if let Some(path) = initial {
        app.select_path(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("TUI error: {:?}", err);
        return Err(err);
    }

    info!("TUI shut down");
    Ok(())
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let handler = EventHandler::new();
    let mut ui = UiState::default();

    while !app.state().should_quit {
        app.tick();
        terminal.draw(|frame| view::draw(frame, app.state(), &ui))?;

        if event::poll(POLL_INTERVAL)? {
            let raw = event::read()?;
            if let Some(ui_event) = handler.handle_event(raw, app.state(), &ui) {
                apply_ui_event(app, &mut ui, ui_event);
            }
        } else {
            tokio::task::yield_now().await;
        }
    }

    Ok(())
}

fn apply_ui_event(app: &mut App, ui: &mut UiState, event: UiEvent) {
    match event {
        UiEvent::Quit => app.dispatch(Action::Quit),
        UiEvent::OpenPrompt => ui.open_prompt(),
        UiEvent::ClosePrompt => {
            ui.close_prompt();
        }
        UiEvent::PromptInput(c) => {
            if let Some(input) = ui.path_input.as_mut() {
                input.push(c);
            }
        }
        UiEvent::PromptBackspace => {
            if let Some(input) = ui.path_input.as_mut() {
                input.pop();
            }
        }
        UiEvent::SubmitPath(path) | UiEvent::DropFile(path) => {
            ui.close_prompt();
            ui.reset_scroll();
            app.select_path(path);
        }
        UiEvent::Extract => {
            ui.reset_scroll();
            app.dispatch(Action::StartExtraction);
        }
        UiEvent::SetLength(length) => app.dispatch(Action::SetSummaryLength(length)),
        UiEvent::CycleLength => {
            let next = app.state().summary_length.next();
            app.dispatch(Action::SetSummaryLength(next));
        }
        UiEvent::Summarize => app.dispatch(Action::StartSummary),
        UiEvent::Suggest => app.dispatch(Action::StartSuggestions),
        UiEvent::CycleFocus => ui.cycle_focus(&visible_panels(app.state())),
        UiEvent::ScrollUp => ui.scroll_up(),
        UiEvent::ScrollDown => ui.scroll_down(),
        UiEvent::DismissError => app.dispatch(Action::DismissError),
        UiEvent::ToggleHelp => ui.show_help = !ui.show_help,
    }
}
