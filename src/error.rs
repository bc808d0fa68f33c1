use thiserror::Error;

/// Which generation step asked for extracted text that isn't there yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Summary,
    Suggestions,
}

impl GenerationKind {
    fn missing_text_message(&self) -> &'static str {
        match self {
            GenerationKind::Summary => "No text has been extracted yet to summarize.",
            GenerationKind::Suggestions => {
                "No document content available to generate suggestions from."
            }
        }
    }
}

/// Main error type for Note Summary.
///
/// `Display` is the text shown in the error banner, so the wording is aimed
/// at the person using the app rather than at the logs.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Please select a file first to extract text.")]
    NoFileSelected,

    #[error("Unsupported file type. Please upload a PDF or an image file (e.g., JPG, PNG).")]
    UnsupportedType { mime_type: String },

    #[error("{library} not loaded. Please make sure it is installed and enabled.")]
    DependencyUnavailable { library: String },

    #[error("Failed to extract text from {format}: {message}")]
    ExtractionFailed {
        format: &'static str,
        message: String,
    },

    #[error("{}", .kind.missing_text_message())]
    NoExtractedText { kind: GenerationKind },

    #[error("File I/O error: {path}")]
    FileIO {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl NoteError {
    pub fn unsupported_type(mime_type: impl Into<String>) -> Self {
        Self::UnsupportedType {
            mime_type: mime_type.into(),
        }
    }

    pub fn dependency_unavailable(library: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            library: library.into(),
        }
    }

    pub fn pdf_failed(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            format: "PDF",
            message: message.into(),
        }
    }

    pub fn image_failed(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            format: "image",
            message: message.into(),
        }
    }

    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIO {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if the session can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, NoteError::Configuration { .. })
    }

    /// Short machine-friendly name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            NoteError::NoFileSelected => "no_file_selected",
            NoteError::UnsupportedType { .. } => "unsupported_type",
            NoteError::DependencyUnavailable { .. } => "dependency_unavailable",
            NoteError::ExtractionFailed { .. } => "extraction_failed",
            NoteError::NoExtractedText { .. } => "no_extracted_text",
            NoteError::FileIO { .. } => "file_io",
            NoteError::NotAFile { .. } => "not_a_file",
            NoteError::Configuration { .. } => "configuration",
        }
    }
}

/// Result type alias for convenience
pub type NoteResult<T> = Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_messages() {
        assert_eq!(
            NoteError::NoFileSelected.to_string(),
            "Please select a file first to extract text."
        );
        assert_eq!(
            NoteError::pdf_failed("bad xref").to_string(),
            "Failed to extract text from PDF: bad xref"
        );
        assert_eq!(
            NoteError::NoExtractedText { kind: GenerationKind::Suggestions }.to_string(),
            "No document content available to generate suggestions from."
        );
        assert!(NoteError::dependency_unavailable("Tesseract OCR")
            .to_string()
            .starts_with("Tesseract OCR not loaded"));
    }

    #[test]
    fn test_recoverability() {
        assert!(NoteError::unsupported_type("text/plain").is_recoverable());
        assert!(!NoteError::configuration("bad toml").is_recoverable());
    }
}
