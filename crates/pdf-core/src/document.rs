//! Rendered PDF inspection

use crate::{PdfError, Result};
use lopdf::Document;

/// Header every PDF file starts with
pub(crate) const PDF_MAGIC: &[u8] = b"%PDF-";

/// Summary of a produced PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Number of pages
    pub page_count: usize,
    /// Size in bytes
    pub size: usize,
}

impl PdfInfo {
    /// Parse PDF bytes and summarize them
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(PdfError::InvalidOutput("missing %PDF- header".to_string()));
        }

        let doc = Document::load_mem(bytes)?;
        Ok(Self {
            version: doc.version.clone(),
            page_count: doc.get_pages().len(),
            size: bytes.len(),
        })
    }

    /// Whether the document fits on a single page
    pub fn is_single_page(&self) -> bool {
        self.page_count == 1
    }
}
