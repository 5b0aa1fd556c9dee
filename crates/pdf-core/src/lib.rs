//! PDF Core - HTML to PDF rendering backends
//!
//! This crate provides functionality for:
//! - Describing page geometry (size, margins, background printing)
//! - Rendering an HTML document to PDF bytes through a [`PdfBackend`]
//! - Driving a headless Chromium-family browser as the backend
//! - Inspecting produced PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{ChromiumBackend, PageConfig, PdfBackend, PdfInfo, DEFAULT_TIMEOUT};
//!
//! let backend = ChromiumBackend::detect()?;
//! let bytes = backend.render(&html, &PageConfig::a4(), DEFAULT_TIMEOUT)?;
//! let info = PdfInfo::from_bytes(&bytes)?;
//! std::fs::write("invoice.pdf", bytes)?;
//! ```

mod backend;
mod chromium;
mod document;
mod page;

pub use backend::PdfBackend;
pub use chromium::{find_in_path, ChromiumBackend, BROWSER_CANDIDATES, DEFAULT_TIMEOUT};
pub use document::PdfInfo;
pub use page::PageConfig;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during PDF rendering
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Browser not found: {0}")]
    BrowserNotFound(String),

    #[error("Failed to launch browser: {0}")]
    LaunchError(String),

    #[error("Rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("Browser exited with {status}: {stderr}")]
    BackendFailed { status: String, stderr: String },

    #[error("Browser produced no PDF output")]
    MissingOutput,

    #[error("Invalid PDF output: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
