//! Template Engine - invoice parsing and HTML rendering
//!
//! This crate provides:
//! - Invoice JSON schema types
//! - Invoice parsing from JSON
//! - Fixed-row item table view-models
//! - HTML rendering through a tera layout template
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_invoice, InvoiceRenderer};
//!
//! let invoice = parse_invoice(&std::fs::read_to_string("invoice.json")?)?;
//! let html = InvoiceRenderer::new()?.render(&invoice)?;
//! ```

pub mod parser;
mod renderer;
mod schema;
pub mod table;

pub use parser::{parse_invoice, parse_invoice_bytes};
pub use renderer::{InvoiceRenderer, TotalsPolicy, DEFAULT_TEMPLATE};
pub use schema::*;
pub use table::{build_rows, ItemRow, OverflowPolicy, RowKind, MAX_ITEM_ROWS};

use thiserror::Error;

/// Errors that can occur during invoice processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse invoice: {0}")]
    ParseError(String),

    #[error("Failed to load template: {0}")]
    TemplateLoadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Too many items: {count} (layout holds {max} rows)")]
    TooManyItems { count: usize, max: usize },

    #[error("Line amount overflows for item '{name}'")]
    AmountOverflow { name: String },

    #[error("Totals mismatch: sales {sales} + tax {tax} != total {total}")]
    TotalsMismatch { sales: u64, tax: u64, total: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
