//! Headless `process` pipeline runs against injected backends.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use note_summary::app::App;
use note_summary::cli::{run_pipeline, ProcessOptions};
use note_summary::config::AppConfig;
use note_summary::extraction::{Capabilities, PaginatedDocument, PdfBackend};
use note_summary::summarizer::{StridePicker, SummaryLength};
use note_summary::NoteResult;

struct SinglePage;

impl PaginatedDocument for SinglePage {
    fn page_count(&self) -> u32 {
        1
    }

    fn text_fragments(&self, _page_number: u32) -> NoteResult<Vec<String>> {
        Ok(vec!["Injected text with a key finding.".to_string()])
    }
}

struct InjectedPdf;

impl PdfBackend for InjectedPdf {
    fn name(&self) -> &str {
        "injected"
    }

    fn open(&self, _bytes: &[u8]) -> NoteResult<Box<dyn PaginatedDocument>> {
        Ok(Box::new(SinglePage))
    }
}

fn app() -> App {
    let mut config = AppConfig::default();
    config.generation.delay_ms = 0;
    let capabilities = Capabilities {
        pdf: Some(Arc::new(InjectedPdf)),
        ocr: None,
    };
    App::with_capabilities(config, capabilities).with_picker(StridePicker::default())
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_pipeline_uses_given_backends() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.pdf", b"%PDF-1.4");
    let options = ProcessOptions {
        length: Some(SummaryLength::Short),
        ..ProcessOptions::default()
    };

    let report = run_pipeline(app(), &path, &options).await.unwrap();

    assert_eq!(report.file, "notes.pdf");
    assert_eq!(report.mime_type, "application/pdf");
    assert_eq!(report.extracted_text, "Injected text with a key finding.");
    assert_eq!(report.word_count, 6);
    assert_eq!(report.summary_length, SummaryLength::Short);
    assert_eq!(
        report.summary.as_deref(),
        Some("Injected text with a **key finding**.")
    );
    assert_eq!(report.suggestions.len(), 4);
}

#[tokio::test]
async fn test_pipeline_stops_on_unsupported_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.txt", b"plain words");

    let err = run_pipeline(app(), &path, &ProcessOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unsupported file type. Please upload a PDF or an image file (e.g., JPG, PNG)."
    );
}

#[tokio::test]
async fn test_pipeline_skips_disabled_steps() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.pdf", b"%PDF-1.4");

    let no_summary = ProcessOptions {
        summary: false,
        ..ProcessOptions::default()
    };
    let report = run_pipeline(app(), &path, &no_summary).await.unwrap();
    assert!(report.summary.is_none());
    assert_eq!(report.suggestions.len(), 4);

    let no_suggestions = ProcessOptions {
        suggestions: false,
        ..ProcessOptions::default()
    };
    let report = run_pipeline(app(), &path, &no_suggestions).await.unwrap();
    assert!(report.summary.is_some());
    assert!(report.suggestions.is_empty());
}

#[tokio::test]
async fn test_pipeline_without_backend_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "scan.png", b"\x89PNG");

    let err = run_pipeline(app(), &path, &ProcessOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Tesseract OCR not loaded. Please make sure it is installed and enabled."
    );
}
