//! einvoice - Taiwan e-invoice proof (format two) generator
//!
//! Reads an invoice JSON file, renders it into the fixed A4 layout, and
//! prints the HTML to PDF through a headless browser.
//!
//! # Example
//!
//! ```ignore
//! use einvoice::{generate, BrowserBackend, GenerateOptions};
//!
//! let options = GenerateOptions::new("invoice.json", "invoice.pdf");
//! let report = generate(&options, &BrowserBackend::new(None))?;
//! println!("{}", report.pdf_path.display());
//! ```

pub mod args;
mod backend;
mod generate;
pub mod logging;

pub use args::{Args, USAGE};
pub use backend::BrowserBackend;
pub use generate::{generate, GenerateOptions, GenerateReport};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating an invoice, one per stage
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot read input file {}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid invoice JSON in {}", .path.display())]
    ParseInput {
        path: PathBuf,
        source: template::TemplateError,
    },

    #[error("cannot load template")]
    LoadTemplate(#[source] template::TemplateError),

    #[error("failed to render HTML")]
    Render(#[source] template::TemplateError),

    #[error("cannot write HTML file {}", .path.display())]
    WriteHtml {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF rendering failed")]
    Backend(#[source] pdf_core::PdfError),

    #[error("cannot write PDF file {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for invoice generation
pub type Result<T> = std::result::Result<T, GenerateError>;
