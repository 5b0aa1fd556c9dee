//! Invoice JSON parsing

use crate::{Invoice, Result, TemplateError};

/// Parse an invoice from JSON string
pub fn parse_invoice(json: &str) -> Result<Invoice> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Parse an invoice from raw file bytes
pub fn parse_invoice_bytes(bytes: &[u8]) -> Result<Invoice> {
    serde_json::from_slice(bytes).map_err(|e| TemplateError::ParseError(e.to_string()))
}
