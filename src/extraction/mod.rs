//! Text extraction: picks a strategy from the document's MIME type and
//! hands the bytes to whichever backend is loaded for it.

pub mod ocr;
pub mod pdf;

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::document::Document;
use crate::error::{NoteError, NoteResult};
use crate::logging::PerformanceTimer;
use crate::{log_error, log_extraction_start};

pub use ocr::{OcrBackend, TesseractBackend, OCR_LIBRARY};
pub use pdf::{collect_pdf_text, LopdfBackend, PaginatedDocument, PdfBackend, PDF_LIBRARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    Pdf,
    ImageOcr,
}

impl ExtractionStrategy {
    pub fn for_mime(mime_type: &str) -> NoteResult<Self> {
        if mime_type == "application/pdf" {
            Ok(ExtractionStrategy::Pdf)
        } else if mime_type.starts_with("image/") {
            Ok(ExtractionStrategy::ImageOcr)
        } else {
            Err(NoteError::unsupported_type(mime_type))
        }
    }
}

/// Backends that finished loading. A `None` slot means the feature is
/// unavailable and using it fails with `DependencyUnavailable`.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub pdf: Option<Arc<dyn PdfBackend>>,
    pub ocr: Option<Arc<dyn OcrBackend>>,
}

/// Display-friendly snapshot of `Capabilities`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapabilityReport {
    pub probed: bool,
    pub pdf: Option<String>,
    pub ocr: Option<String>,
}

impl Capabilities {
    pub fn report(&self) -> CapabilityReport {
        CapabilityReport {
            probed: true,
            pdf: self.pdf.as_ref().map(|b| b.name().to_string()),
            ocr: self.ocr.as_ref().map(|b| b.name().to_string()),
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = self.report();
        f.debug_struct("Capabilities")
            .field("pdf", &report.pdf)
            .field("ocr", &report.ocr)
            .finish()
    }
}

/// Load the backends the config asks for. Failures are logged and leave the
/// slot empty; they only surface once the user tries to use that backend.
pub async fn probe_capabilities(config: &ExtractionConfig) -> Capabilities {
    let pdf: Option<Arc<dyn PdfBackend>> = if config.enable_pdf {
        Some(Arc::new(LopdfBackend))
    } else {
        info!("PDF extraction disabled by config");
        None
    };

    let ocr: Option<Arc<dyn OcrBackend>> = if config.enable_ocr {
        match TesseractBackend::probe(&config.tesseract_binary).await {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                warn!(
                    "OCR unavailable ({}): {}",
                    config.tesseract_binary.display(),
                    e
                );
                None
            }
        }
    } else {
        info!("OCR disabled by config");
        None
    };

    Capabilities { pdf, ocr }
}

pub struct Extractor {
    capabilities: Capabilities,
    ocr_language: String,
}

impl Extractor {
    pub fn new(capabilities: Capabilities, ocr_language: impl Into<String>) -> Self {
        Self {
            capabilities,
            ocr_language: ocr_language.into(),
        }
    }

    /// Extract plain text from a document.
    ///
    /// The strategy and backend are checked before any bytes are read, so an
    /// unsupported or unavailable format never touches the file.
    pub async fn extract(&self, document: &Document) -> NoteResult<String> {
        let result = self.run(document).await;
        if let Err(e) = &result {
            log_error!(e, "text extraction");
        }
        result
    }

    async fn run(&self, document: &Document) -> NoteResult<String> {
        let strategy = ExtractionStrategy::for_mime(&document.mime_type)?;
        log_extraction_start!(document.name, document.mime_type, document.size_bytes);
        let timer = PerformanceTimer::start(format!("extract {}", document.name));

        let text = match strategy {
            ExtractionStrategy::Pdf => {
                let backend = self
                    .capabilities
                    .pdf
                    .clone()
                    .ok_or_else(|| NoteError::dependency_unavailable(PDF_LIBRARY))?;
                let bytes = read_document(document, |m| NoteError::pdf_failed(m)).await?;
                timer.checkpoint("bytes read");

                // lopdf is synchronous and can chew on big files
                tokio::task::spawn_blocking(move || collect_pdf_text(backend.as_ref(), &bytes))
                    .await
                    .map_err(|e| NoteError::pdf_failed(e.to_string()))??
            }
            ExtractionStrategy::ImageOcr => {
                let backend = self
                    .capabilities
                    .ocr
                    .clone()
                    .ok_or_else(|| NoteError::dependency_unavailable(OCR_LIBRARY))?;
                let bytes = read_document(document, |m| NoteError::image_failed(m)).await?;
                timer.checkpoint("bytes read");

                backend.recognize(&bytes, &self.ocr_language).await?
            }
        };

        info!(
            file = %document.name,
            chars = text.chars().count(),
            elapsed_ms = timer.elapsed_ms(),
            "Text extraction finished"
        );
        Ok(text)
    }
}

async fn read_document(
    document: &Document,
    failed: fn(String) -> NoteError,
) -> NoteResult<Vec<u8>> {
    tokio::fs::read(&document.path)
        .await
        .map_err(|e| failed(format!("could not read {}: {}", document.name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct EchoOcr;

    #[async_trait]
    impl OcrBackend for EchoOcr {
        fn name(&self) -> &str {
            "echo"
        }

        async fn recognize(&self, image: &[u8], language: &str) -> NoteResult<String> {
            Ok(format!("{} bytes in {}", image.len(), language))
        }
    }

    fn doc(name: &str, mime: &str, path: PathBuf) -> Document {
        Document {
            name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: 0,
            path,
        }
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(
            ExtractionStrategy::for_mime("application/pdf").unwrap(),
            ExtractionStrategy::Pdf
        );
        assert_eq!(
            ExtractionStrategy::for_mime("image/png").unwrap(),
            ExtractionStrategy::ImageOcr
        );
        assert!(matches!(
            ExtractionStrategy::for_mime("text/plain"),
            Err(NoteError::UnsupportedType { .. })
        ));
    }

    #[tokio::test]
    async fn test_unsupported_type_never_reads_file() {
        let extractor = Extractor::new(Capabilities::default(), "eng");
        // Path does not exist; an attempted read would surface as ExtractionFailed
        let document = doc("notes.txt", "text/plain", PathBuf::from("/nonexistent/notes.txt"));
        assert!(matches!(
            extractor.extract(&document).await,
            Err(NoteError::UnsupportedType { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_backends_are_dependency_errors() {
        let extractor = Extractor::new(Capabilities::default(), "eng");

        let pdf = doc("a.pdf", "application/pdf", PathBuf::from("/nonexistent/a.pdf"));
        match extractor.extract(&pdf).await {
            Err(NoteError::DependencyUnavailable { library }) => assert_eq!(library, PDF_LIBRARY),
            other => panic!("unexpected: {other:?}"),
        }

        let image = doc("a.png", "image/png", PathBuf::from("/nonexistent/a.png"));
        match extractor.extract(&image).await {
            Err(NoteError::DependencyUnavailable { library }) => assert_eq!(library, OCR_LIBRARY),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_image_goes_through_ocr_with_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let capabilities = Capabilities {
            pdf: None,
            ocr: Some(Arc::new(EchoOcr)),
        };
        let extractor = Extractor::new(capabilities, "eng");
        let text = extractor
            .extract(&doc("scan.png", "image/png", path))
            .await
            .unwrap();
        assert_eq!(text, "4 bytes in eng");
    }

    #[test]
    fn test_capability_report() {
        let capabilities = Capabilities {
            pdf: Some(Arc::new(LopdfBackend)),
            ocr: None,
        };
        let report = capabilities.report();
        assert!(report.probed);
        assert_eq!(report.pdf.as_deref(), Some("lopdf"));
        assert_eq!(report.ocr, None);
    }
}
