use crate::error::{NoteError, NoteResult};

/// Library name reported when no PDF backend is loaded
pub const PDF_LIBRARY: &str = "PDF engine";

/// A parsed PDF whose pages can be walked in order (1-indexed)
pub trait PaginatedDocument {
    fn page_count(&self) -> u32;

    /// Ordered text fragments of one page
    fn text_fragments(&self, page_number: u32) -> NoteResult<Vec<String>>;
}

/// Something that can open raw PDF bytes
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &str;

    fn open(&self, bytes: &[u8]) -> NoteResult<Box<dyn PaginatedDocument>>;
}

/// Walk every page in order: fragments are space-joined, pages newline-joined
pub fn collect_pdf_text(backend: &dyn PdfBackend, bytes: &[u8]) -> NoteResult<String> {
    let document = backend.open(bytes)?;
    let page_count = document.page_count();

    let mut pages = Vec::with_capacity(page_count as usize);
    for page_number in 1..=page_count {
        let fragments = document.text_fragments(page_number)?;
        tracing::debug!(page = page_number, fragments = fragments.len(), "Read page text");
        pages.push(fragments.join(" "));
    }

    Ok(pages.join("\n"))
}

/// Pure Rust backend built on lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

struct LopdfDocument {
    document: lopdf::Document,
    page_numbers: Vec<u32>,
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> NoteResult<Box<dyn PaginatedDocument>> {
        let document =
            lopdf::Document::load_mem(bytes).map_err(|e| NoteError::pdf_failed(e.to_string()))?;

        // get_pages is keyed by page number, already sorted
        let page_numbers = document.get_pages().keys().copied().collect();

        Ok(Box::new(LopdfDocument {
            document,
            page_numbers,
        }))
    }
}

impl PaginatedDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.page_numbers.len() as u32
    }

    fn text_fragments(&self, page_number: u32) -> NoteResult<Vec<String>> {
        let actual_page = self
            .page_numbers
            .get(page_number.saturating_sub(1) as usize)
            .copied()
            .ok_or_else(|| NoteError::pdf_failed(format!("Invalid page number: {}", page_number)))?;

        let text = self
            .document
            .extract_text(&[actual_page])
            .map_err(|e| NoteError::pdf_failed(format!("page {}: {}", page_number, e)))?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
