use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NoteError, NoteResult};

/// A file the user picked. Only metadata lives here; bytes are read when
/// extraction actually runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl Document {
    /// Build a document from a path on disk. No type or size checks happen
    /// here; an unsupported file is only rejected when extraction starts.
    pub fn from_path<P: AsRef<Path>>(path: P) -> NoteResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|e| NoteError::file_io(path.display().to_string(), e))?;

        if !metadata.is_file() {
            return Err(NoteError::NotAFile {
                path: path.display().to_string(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime_type: mime_for_path(path).to_string(),
            size_bytes: metadata.len(),
            path: path.to_path_buf(),
        })
    }

    pub fn size_label(&self) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = KB * 1024.0;

        let size = self.size_bytes as f64;
        if size >= MB {
            format!("{:.1} MB", size / MB)
        } else if size >= KB {
            format!("{:.1} KB", size / KB)
        } else {
            format!("{} B", self.size_bytes)
        }
    }
}

/// Map a file extension to the MIME type the extractor dispatches on
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "pbm" => "image/x-portable-bitmap",
        "pgm" => "image/x-portable-graymap",
        "ppm" => "image/x-portable-pixmap",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
}
