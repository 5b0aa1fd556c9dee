//! Invoice generation pipeline
//!
//! read JSON -> parse -> render HTML -> (write HTML) -> render PDF -> write PDF

use crate::{GenerateError, Result};
use pdf_core::{PageConfig, PdfBackend, PdfInfo, DEFAULT_TIMEOUT};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use template::{parse_invoice_bytes, InvoiceRenderer, OverflowPolicy, TotalsPolicy};
use tracing::{debug, info, warn};

/// Settings for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Invoice JSON file
    pub input: PathBuf,
    /// PDF output path
    pub output: PathBuf,
    /// Also write `<output stem>.html`
    pub emit_html: bool,
    /// Layout template file, built-in layout when `None`
    pub template: Option<PathBuf>,
    pub overflow: OverflowPolicy,
    pub totals: TotalsPolicy,
    /// Page geometry handed to the backend
    pub page: PageConfig,
    /// Backend deadline
    pub timeout: Duration,
}

impl GenerateOptions {
    /// Options with defaults: no HTML, built-in layout, A4, 30 second deadline
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            emit_html: false,
            template: None,
            overflow: OverflowPolicy::default(),
            totals: TotalsPolicy::default(),
            page: PageConfig::a4(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Path of the sibling HTML file
    pub fn html_path(&self) -> PathBuf {
        self.output.with_extension("html")
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// HTML file written, if requested
    pub html_path: Option<PathBuf>,
    /// Absolute path of the written PDF
    pub pdf_path: PathBuf,
    /// Page summary, `None` when the PDF could not be inspected
    pub pdf_info: Option<PdfInfo>,
}

/// Run the full pipeline for one invoice
///
/// Nothing is written until the invoice has parsed and the HTML has
/// rendered.
pub fn generate(options: &GenerateOptions, backend: &dyn PdfBackend) -> Result<GenerateReport> {
    let bytes = fs::read(&options.input).map_err(|source| GenerateError::ReadInput {
        path: options.input.clone(),
        source,
    })?;

    let invoice = parse_invoice_bytes(&bytes).map_err(|source| GenerateError::ParseInput {
        path: options.input.clone(),
        source,
    })?;
    info!(
        invoice = %invoice.invoice_number,
        items = invoice.items.len(),
        input = %options.input.display(),
        "loaded invoice"
    );

    let renderer = match &options.template {
        Some(path) => InvoiceRenderer::from_file(path),
        None => InvoiceRenderer::new(),
    }
    .map_err(GenerateError::LoadTemplate)?
    .with_overflow(options.overflow)
    .with_totals(options.totals);

    let html = renderer.render(&invoice).map_err(GenerateError::Render)?;
    debug!(bytes = html.len(), "rendered HTML");

    let html_path = if options.emit_html {
        let path = options.html_path();
        fs::write(&path, &html).map_err(|source| GenerateError::WriteHtml {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote HTML");
        Some(path)
    } else {
        None
    };

    info!(backend = backend.name(), timeout = ?options.timeout, "rendering PDF");
    let pdf = backend
        .render(&html, &options.page, options.timeout)
        .map_err(GenerateError::Backend)?;

    let pdf_info = match PdfInfo::from_bytes(&pdf) {
        Ok(info) => {
            if !info.is_single_page() {
                warn!(pages = info.page_count, "layout spilled past one page");
            }
            Some(info)
        }
        Err(e) => {
            warn!(error = %e, "could not inspect rendered PDF");
            None
        }
    };

    let write_error = |source: std::io::Error| GenerateError::WriteOutput {
        path: options.output.clone(),
        source,
    };
    write_atomic(&options.output, &pdf).map_err(write_error)?;
    let pdf_path = fs::canonicalize(&options.output).map_err(write_error)?;
    info!(path = %pdf_path.display(), bytes = pdf.len(), "wrote PDF");

    Ok(GenerateReport {
        html_path,
        pdf_path,
        pdf_info,
    })
}

/// Write through a temporary file in the destination directory, then rename
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
