//! Note Summary: pull text out of a PDF or an image, then draft a short
//! summary and a list of improvement suggestions for it.

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod render;
pub mod state;
pub mod suggestions;
pub mod summarizer;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{NoteError, NoteResult};
