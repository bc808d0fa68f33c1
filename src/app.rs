use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::actions::{Action, Command};
use crate::config::AppConfig;
use crate::document::Document;
use crate::extraction::{probe_capabilities, Capabilities, Extractor};
use crate::log_error;
use crate::state::SessionState;
use crate::suggestions::suggest;
use crate::summarizer::{summarize, RandomPicker, SentencePicker};

type SharedPicker = Arc<Mutex<Box<dyn SentencePicker + Send>>>;

/// Main application orchestrator.
///
/// Owns the session state and turns the reducer's commands into tokio tasks.
/// Each task reports back with exactly one action on the completion channel.
pub struct App {
    state: SessionState,
    config: AppConfig,
    capabilities: Arc<RwLock<Capabilities>>,
    picker: SharedPicker,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
}

impl App {
    /// Fresh app with nothing loaded yet; call `start_probe` to load backends
    pub fn new(config: AppConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let picker: Box<dyn SentencePicker + Send> = Box::new(RandomPicker::new(config.generation.seed));

        Self {
            state: SessionState::new(config.generation.default_length),
            config,
            capabilities: Arc::new(RwLock::new(Capabilities::default())),
            picker: Arc::new(Mutex::new(picker)),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// App with backends supplied up front instead of probed
    pub fn with_capabilities(config: AppConfig, capabilities: Capabilities) -> Self {
        let mut app = Self::new(config);
        let report = capabilities.report();
        app.capabilities = Arc::new(RwLock::new(capabilities));
        app.dispatch(Action::CapabilitiesProbed(report));
        app
    }

    pub fn with_picker(self, picker: impl SentencePicker + Send + 'static) -> Self {
        let picker: Box<dyn SentencePicker + Send> = Box::new(picker);
        Self {
            picker: Arc::new(Mutex::new(picker)),
            ..self
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Load extraction backends in the background. Until this finishes,
    /// extraction reports the backends as unavailable.
    pub fn start_probe(&mut self) {
        self.in_flight += 1;
        let tx = self.tx.clone();
        let slot = Arc::clone(&self.capabilities);
        let config = self.config.extraction.clone();

        tokio::spawn(async move {
            let capabilities = probe_capabilities(&config).await;
            let report = capabilities.report();
            info!(pdf = ?report.pdf, ocr = ?report.ocr, "Capability probe finished");

            match slot.write() {
                Ok(mut guard) => *guard = capabilities,
                Err(poisoned) => *poisoned.into_inner() = capabilities,
            }
            let _ = tx.send(Action::CapabilitiesProbed(report));
        });
    }

    /// Build a document from `path` and select it
    pub fn select_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match Document::from_path(path) {
            Ok(document) => {
                info!(file = %document.name, mime_type = %document.mime_type, "Document selected");
                self.dispatch(Action::SelectDocument(document));
            }
            Err(e) => {
                log_error!(e, "file selection");
                self.dispatch(Action::SelectionFailed(e));
            }
        }
    }

    /// Run an action through the reducer and start whatever it asks for
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let (state, command) = state.update(action);
        self.state = state;

        if let Some(command) = command {
            self.spawn(command);
        }
    }

    /// Apply completions that have already arrived. Returns true if any did.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(action) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(action);
            changed = true;
        }
        changed
    }

    /// Wait until every started task has reported back
    pub async fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(action) => {
                    self.in_flight -= 1;
                    self.dispatch(action);
                }
                None => break,
            }
        }
    }

    fn capabilities_snapshot(&self) -> Capabilities {
        match self.capabilities.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn spawn(&mut self, command: Command) {
        debug!(command = command.name(), "Spawning command");
        self.in_flight += 1;
        let tx = self.tx.clone();

        match command {
            Command::Extract { epoch, document } => {
                let extractor = Extractor::new(
                    self.capabilities_snapshot(),
                    self.config.extraction.ocr_language.clone(),
                );
                tokio::spawn(async move {
                    let outcome = extractor.extract(&document).await;
                    let _ = tx.send(Action::ExtractionFinished { epoch, outcome });
                });
            }
            Command::Summarize { epoch, text, length } => {
                let delay = self.config.generation.delay();
                let picker = Arc::clone(&self.picker);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let summary = {
                        let mut picker = match picker.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        summarize(&text, length, &mut **picker)
                    };
                    info!(length = %length, chars = summary.len(), "Summary generated");
                    let _ = tx.send(Action::SummaryFinished { epoch, summary });
                });
            }
            Command::Suggest { epoch, text } => {
                let delay = self.config.generation.delay();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let suggestions = suggest(&text);
                    info!(items = suggestions.lines().count(), "Suggestions generated");
                    let _ = tx.send(Action::SuggestionsFinished { epoch, suggestions });
                });
            }
        }
    }
}
