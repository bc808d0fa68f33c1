use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{NoteError, NoteResult};

/// Library name reported when no OCR backend is loaded
pub const OCR_LIBRARY: &str = "Tesseract OCR";

/// Recognizes text from encoded image bytes
#[async_trait]
pub trait OcrBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn recognize(&self, image: &[u8], language: &str) -> NoteResult<String>;
}

/// OCR through the `tesseract` command line tool
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    binary: PathBuf,
    version: String,
}

impl TesseractBackend {
    /// Check that the binary runs at all before offering OCR
    pub async fn probe(binary: &Path) -> NoteResult<Self> {
        let output = Command::new(binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| {
                debug!("tesseract probe failed for {}: {}", binary.display(), e);
                NoteError::dependency_unavailable(OCR_LIBRARY)
            })?;

        if !output.status.success() {
            return Err(NoteError::dependency_unavailable(OCR_LIBRARY));
        }

        // Older releases print the banner on stderr
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::from_utf8_lossy(&output.stdout).to_string()
        };
        let version = banner
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| "tesseract".to_string());

        info!("OCR backend available: {}", version);

        Ok(Self {
            binary: binary.to_path_buf(),
            version,
        })
    }
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    fn name(&self) -> &str {
        &self.version
    }

    async fn recognize(&self, image: &[u8], language: &str) -> NoteResult<String> {
        let mut scratch = tempfile::NamedTempFile::new()
            .map_err(|e| NoteError::image_failed(format!("Failed to stage image: {}", e)))?;
        scratch
            .write_all(image)
            .and_then(|_| scratch.flush())
            .map_err(|e| NoteError::image_failed(format!("Failed to stage image: {}", e)))?;

        let output = Command::new(&self.binary)
            .arg(scratch.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .await
            .map_err(|e| NoteError::image_failed(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NoteError::image_failed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
