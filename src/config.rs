use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{NoteError, NoteResult};
use crate::summarizer::SummaryLength;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "notesum.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub extraction: ExtractionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Artificial latency before mock summary/suggestions are produced
    pub delay_ms: u64,

    /// Length preselected when a session starts
    pub default_length: SummaryLength,

    /// Seed for the sentence picker; unseeded runs draw from OS entropy
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub enable_pdf: bool,
    pub enable_ocr: bool,

    /// Binary name or path of the tesseract CLI
    pub tesseract_binary: PathBuf,

    /// Tesseract language model
    pub ocr_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
    pub json: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            default_length: SummaryLength::Medium,
            seed: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_pdf: true,
            enable_ocr: true,
            tesseract_binary: PathBuf::from("tesseract"),
            ocr_language: "eng".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            json: false,
        }
    }
}

impl GenerationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NoteResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| NoteError::file_io(path.display().to_string(), e))?;

        toml::from_str(&content)
            .map_err(|e| NoteError::configuration(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Defaults, then the explicit file (or `notesum.toml` if one exists), then env overrides
    pub fn load(explicit: Option<&Path>) -> NoteResult<Self> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(delay) = std::env::var("NOTESUM_DELAY_MS") {
            if let Ok(value) = delay.parse::<u64>() {
                self.generation.delay_ms = value;
            }
        }

        if let Ok(lang) = std::env::var("NOTESUM_OCR_LANG") {
            if !lang.trim().is_empty() {
                self.extraction.ocr_language = lang.trim().to_string();
            }
        }

        if let Ok(binary) = std::env::var("NOTESUM_TESSERACT") {
            self.extraction.tesseract_binary = PathBuf::from(binary);
        }

        if let Ok(level) = std::env::var("NOTESUM_LOG_LEVEL") {
            self.logging.level = level;
        }

        self
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> NoteResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| NoteError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| NoteError::file_io(path.display().to_string(), e))
    }
}
