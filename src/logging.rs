use std::fs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{NoteError, NoteResult};

/// Where log lines should go for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Compact lines on stderr (headless commands)
    Stderr,
    /// Daily-rolled file only; the TUI owns the terminal
    File,
}

/// Initialize the logging system.
///
/// Returns the appender guard when logging to a file. Dropping it flushes
/// and stops the background writer, so the caller keeps it for the whole run.
pub fn init_logging(config: &LoggingConfig, sink: LogSink) -> NoteResult<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("note_summary={},lopdf=warn,{}", config.level, config.level))
    });

    let registry = Registry::default().with(env_filter);

    let guard = match sink {
        LogSink::File => {
            fs::create_dir_all(&config.log_dir)
                .map_err(|e| NoteError::file_io(config.log_dir.display().to_string(), e))?;

            let file_appender = rolling::daily(&config.log_dir, "notesum.log");
            let (file_writer, guard) = non_blocking(file_appender);

            let file_layer = if config.json {
                fmt::layer().json().with_writer(file_writer).boxed()
            } else {
                fmt::layer().with_writer(file_writer).with_ansi(false).boxed()
            };

            registry.with(file_layer).init();
            Some(guard)
        }
        LogSink::Stderr => {
            let console_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact()
                .boxed();

            registry.with(console_layer).init();
            None
        }
    };

    info!("Note Summary logging initialized");
    info!("Log level: {}", config.level);
    if sink == LogSink::File {
        info!("File logging enabled: {}", config.log_dir.display());
    }

    Ok(guard)
}

/// Log system information for debugging
pub fn log_system_info() {
    info!("Note Summary v{}", env!("CARGO_PKG_VERSION"));
    info!("System: {} {}", std::env::consts::OS, std::env::consts::ARCH);

    if let Ok(cwd) = std::env::current_dir() {
        info!("Working directory: {}", cwd.display());
    }
}

/// Performance logging utilities
pub struct PerformanceTimer {
    start: std::time::Instant,
    operation: String,
}

impl PerformanceTimer {
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        info!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    pub fn checkpoint(&self, checkpoint: &str) {
        info!(
            "{} - {}: {}ms",
            self.operation,
            checkpoint,
            self.start.elapsed().as_millis()
        );
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        info!("Completed {}: {}ms", self.operation, self.start.elapsed().as_millis());
    }
}

/// Macro for logging an error with its kind and recoverability
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = $error.kind(),
            context = $context,
            recoverable = $error.is_recoverable(),
            "Note Summary error occurred"
        );
    };
}

#[macro_export]
macro_rules! log_extraction_start {
    ($file:expr, $mime:expr, $size:expr) => {
        tracing::info!(
            file = %$file,
            mime_type = %$mime,
            size_bytes = $size,
            "Starting text extraction"
        );
    };
}
