use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::actions::Action;
use crate::app::App;
use crate::config::AppConfig;
use crate::extraction::probe_capabilities;
use crate::logging::PerformanceTimer;
use crate::render::{emphasis_segments, suggestion_items, Segment};
use crate::suggestions::word_count;
use crate::summarizer::SummaryLength;

const WRAP_WIDTH: usize = 88;
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

/// Options for the headless `process` command
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub length: Option<SummaryLength>,
    pub format: OutputFormat,
    pub seed: Option<u64>,
    pub summary: bool,
    pub suggestions: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            length: None,
            format: OutputFormat::Text,
            seed: None,
            summary: true,
            suggestions: true,
        }
    }
}

/// Everything one headless run produced
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub file: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub word_count: usize,
    pub extracted_text: String,
    pub summary_length: SummaryLength,
    pub summary: Option<String>,
    pub suggestions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Drive the same store the TUI uses, one step at a time, failing on the
/// first error banner. `app` is used with whatever backends it already has.
pub async fn run_pipeline(mut app: App, path: &Path, options: &ProcessOptions) -> Result<ProcessReport> {
    let timer = PerformanceTimer::start(format!("process {}", path.display()));

    if let Some(length) = options.length {
        app.dispatch(Action::SetSummaryLength(length));
    }

    app.select_path(path);
    fail_on_error(&app)?;

    app.dispatch(Action::StartExtraction);
    app.wait_idle().await;
    fail_on_error(&app)?;
    timer.checkpoint("extracted");

    if options.summary {
        app.dispatch(Action::StartSummary);
        app.wait_idle().await;
        fail_on_error(&app)?;
        timer.checkpoint("summarized");
    }

    if options.suggestions {
        app.dispatch(Action::StartSuggestions);
        app.wait_idle().await;
        fail_on_error(&app)?;
        timer.checkpoint("suggested");
    }

    let state = app.state();
    let document = state
        .document
        .as_ref()
        .ok_or_else(|| anyhow!("no document was selected"))?;

    Ok(ProcessReport {
        file: document.name.clone(),
        mime_type: document.mime_type.clone(),
        size_bytes: document.size_bytes,
        word_count: word_count(&state.extracted_text),
        extracted_text: state.extracted_text.clone(),
        summary_length: state.summary_length,
        summary: options.summary.then(|| state.summary.clone()),
        suggestions: suggestion_items(&state.suggestions),
        generated_at: Utc::now(),
    })
}

fn fail_on_error(app: &App) -> Result<()> {
    match &app.state().error {
        Some(message) => Err(anyhow!("{}", message)),
        None => Ok(()),
    }
}

/// Extract, summarize and suggest for one file without the TUI
pub async fn process_command(config: AppConfig, file: PathBuf, options: ProcessOptions) -> Result<()> {
    info!("Processing {:?}", file);

    let mut config = config;
    if options.seed.is_some() {
        config.generation.seed = options.seed;
    }

    let mut app = App::new(config);
    app.start_probe();
    app.wait_idle().await;

    let report = run_pipeline(app, &file, &options).await?;

    match options.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", format_text_report(&report)),
    }

    Ok(())
}

/// Human-readable report; emphasized phrases are rendered in bold
pub fn format_text_report(report: &ProcessReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}, {} bytes, {} words)\n\n",
        report.file, report.mime_type, report.size_bytes, report.word_count
    ));

    out.push_str("== Extracted Text ==\n");
    out.push_str(&textwrap::fill(&report.extracted_text, WRAP_WIDTH));
    out.push_str("\n\n");

    if let Some(summary) = &report.summary {
        out.push_str(&format!("== Summary ({}) ==\n", report.summary_length));
        out.push_str(&textwrap::fill(&ansi_emphasis(summary), WRAP_WIDTH));
        out.push_str("\n\n");
    }

    if !report.suggestions.is_empty() {
        out.push_str("== Improvement Suggestions ==\n");
        for item in &report.suggestions {
            let wrapped = textwrap::fill(
                item,
                textwrap::Options::new(WRAP_WIDTH)
                    .initial_indent("  - ")
                    .subsequent_indent("    "),
            );
            out.push_str(&wrapped);
            out.push('\n');
        }
    }

    out
}

fn ansi_emphasis(text: &str) -> String {
    emphasis_segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(plain) => plain,
            Segment::Emphasis(marked) => format!("{}{}{}", ANSI_BOLD, marked, ANSI_RESET),
        })
        .collect()
}

/// Probe the extraction backends and report what is available
pub async fn status_command(config: AppConfig) -> Result<()> {
    let report = probe_capabilities(&config.extraction).await.report();

    println!("Note Summary v{}", env!("CARGO_PKG_VERSION"));
    println!("  PDF engine:  {}", report.pdf.as_deref().unwrap_or("not loaded"));
    println!("  OCR engine:  {}", report.ocr.as_deref().unwrap_or("not loaded"));
    println!("  Summary delay: {}ms", config.generation.delay_ms);
    println!("  Default length: {}", config.generation.default_length);

    Ok(())
}

/// Write the default configuration to `path`
pub fn init_config_command(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{:?} already exists; pass --force to overwrite it",
            path
        ));
    }

    AppConfig::default().save_to_file(&path)?;
    println!("Wrote default configuration to {:?}", path);
    Ok(())
}

/// Interactive session
#[cfg(feature = "tui")]
pub async fn tui_command(config: AppConfig, file: Option<PathBuf>, length: Option<SummaryLength>) -> Result<()> {
    let mut config = config;
    if let Some(length) = length {
        config.generation.default_length = length;
    }
    crate::tui::run_tui(App::new(config), file).await
}

#[cfg(not(feature = "tui"))]
pub async fn tui_command(_config: AppConfig, _file: Option<PathBuf>, _length: Option<SummaryLength>) -> Result<()> {
    Err(anyhow!("this build has no TUI; rebuild with --features tui or use `process`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ProcessReport {
        ProcessReport {
            file: "notes.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 2048,
            word_count: 3,
            extracted_text: "Three short words.".to_string(),
            summary_length: SummaryLength::Short,
            summary: Some("The **key finding** holds.".to_string()),
            suggestions: vec!["Add an intro.".to_string()],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_report_renders_bold() {
        let text = format_text_report(&report());
        assert!(text.contains("\x1b[1mkey finding\x1b[0m"));
        assert!(!text.contains("**"));
        assert!(text.contains("  - Add an intro."));
        assert!(text.contains("== Summary (short) =="));
    }

    #[test]
    fn test_json_report_fields() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["summary_length"], "short");
        assert_eq!(value["word_count"], 3);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notesum.toml");
        init_config_command(path.clone(), false).unwrap();
        assert!(init_config_command(path.clone(), false).is_err());
        init_config_command(path.clone(), true).unwrap();
        assert!(AppConfig::load_from_file(&path).is_ok());
    }
}
