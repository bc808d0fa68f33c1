use crate::document::Document;
use crate::error::NoteError;
use crate::extraction::CapabilityReport;
use crate::summarizer::SummaryLength;

/// All possible state mutations in the session.
///
/// User intents come from the view; the `*Finished` variants are async
/// completions fed back by the runtime, tagged with the document epoch they
/// were started under.
#[derive(Debug)]
pub enum Action {
    // File selection
    SelectDocument(Document),
    SelectionFailed(NoteError),

    // Triggers
    SetSummaryLength(SummaryLength),
    StartExtraction,
    StartSummary,
    StartSuggestions,

    // Completions
    ExtractionFinished {
        epoch: u64,
        outcome: Result<String, NoteError>,
    },
    SummaryFinished {
        epoch: u64,
        summary: String,
    },
    SuggestionsFinished {
        epoch: u64,
        suggestions: String,
    },
    CapabilitiesProbed(CapabilityReport),

    // System
    DismissError,
    Quit,
}

/// Side effects the reducer asks the runtime to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Extract {
        epoch: u64,
        document: Document,
    },
    Summarize {
        epoch: u64,
        text: String,
        length: SummaryLength,
    },
    Suggest {
        epoch: u64,
        text: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Extract { .. } => "extract",
            Command::Summarize { .. } => "summarize",
            Command::Suggest { .. } => "suggest",
        }
    }
}
