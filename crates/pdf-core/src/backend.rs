//! Rendering backend interface

use crate::{PageConfig, Result};
use std::time::Duration;

/// Converts an HTML document into PDF bytes
///
/// Implementations own their rendering session for the duration of one
/// call and release it before returning, on success and on error.
pub trait PdfBackend {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Render `html` with the given page geometry
    ///
    /// Fails with [`crate::PdfError::Timeout`] when rendering does not
    /// finish within `timeout`.
    fn render(&self, html: &str, page: &PageConfig, timeout: Duration) -> Result<Vec<u8>>;
}
