//! PDF text-layer extraction.
//!
//! The extraction capability is a process-wide handle created on first use and
//! reused afterwards. Parsing is CPU-bound, so it runs on the blocking pool and the
//! handle caps how many documents are parsed at once.

use std::sync::OnceLock;

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::files::FileReadError;

pub struct PdfTextLayer {
    permits: Semaphore,
}

impl PdfTextLayer {
    fn load() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);
        info!("PDF text layer initialized ({workers} concurrent documents)");
        Self {
            permits: Semaphore::new(workers),
        }
    }

    /// Extracts the text layer of `bytes`: fragments on a page joined by single
    /// spaces, pages joined by newlines, trimmed.
    ///
    /// Image-only documents have no text layer and fail with `PdfNoText`.
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<String, FileReadError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| FileReadError::Pdf(e.to_string()))?;

        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })
        .await
        .map_err(|e| FileReadError::Pdf(format!("PDF parser aborted: {e}")))?
        .map_err(|e| FileReadError::Pdf(e.to_string()))?;

        debug!("Extracted text layer from {} PDF pages", pages.len());

        let text = join_pages(&pages);
        if text.is_empty() {
            return Err(FileReadError::PdfNoText);
        }
        Ok(text)
    }
}

/// Returns the shared PDF text layer, loading it on first call.
pub fn text_layer() -> &'static PdfTextLayer {
    static LAYER: OnceLock<PdfTextLayer> = OnceLock::new();
    LAYER.get_or_init(PdfTextLayer::load)
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
