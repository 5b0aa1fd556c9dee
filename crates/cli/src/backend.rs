//! Browser backend selection

use pdf_core::{ChromiumBackend, PageConfig, PdfBackend, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Chromium backend resolved when the first render happens
///
/// Locating the browser is deferred so input and template errors are
/// reported before a missing browser is.
#[derive(Debug, Clone, Default)]
pub struct BrowserBackend {
    executable: Option<PathBuf>,
}

impl BrowserBackend {
    /// Use `executable` when given, otherwise detect one at render time
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }

    fn resolve(&self) -> Result<ChromiumBackend> {
        match &self.executable {
            Some(path) => Ok(ChromiumBackend::new(path)),
            None => ChromiumBackend::detect(),
        }
    }
}

impl PdfBackend for BrowserBackend {
    fn name(&self) -> &str {
        "chromium"
    }

    fn render(&self, html: &str, page: &PageConfig, timeout: Duration) -> Result<Vec<u8>> {
        let backend = self.resolve()?;
        tracing::debug!(executable = %backend.executable().display(), "using browser");
        backend.render(html, page, timeout)
    }
}
