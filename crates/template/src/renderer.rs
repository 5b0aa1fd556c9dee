//! Invoice HTML rendering

use crate::table::{build_rows, ItemRow, OverflowPolicy};
use crate::{Invoice, Result, TaxFlags, TemplateError};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error as _;
use std::path::Path;
use tera::{Context, Tera, Value};
use tracing::{debug, warn};

/// Built-in layout (single A4 page, zero margins)
pub const DEFAULT_TEMPLATE: &str = include_str!("../data/invoice.html");

/// Name the layout is registered under; the `.html` suffix enables autoescaping
const TEMPLATE_NAME: &str = "invoice.html";

/// Behavior when `total_amount` differs from `sales_amount + tax_amount`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalsPolicy {
    /// Render the supplied totals as-is, logging a warning
    #[default]
    Trust,
    /// Fail with [`TemplateError::TotalsMismatch`]
    Strict,
}

/// Values handed to the layout template
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceView<'a> {
    #[serde(flatten)]
    invoice: &'a Invoice,
    item_rows: Vec<ItemRow>,
    sales_amount_formatted: String,
    tax_amount_formatted: String,
    total_amount_formatted: String,
    total_amount_chinese: String,
    #[serde(flatten)]
    tax_flags: TaxFlags,
    current_page: u32,
    total_pages: u32,
}

/// Invoice renderer
pub struct InvoiceRenderer {
    /// Compiled layout with formatting filters registered
    tera: Tera,
    /// Item table overflow behavior
    overflow: OverflowPolicy,
    /// Totals consistency behavior
    totals: TotalsPolicy,
}

impl InvoiceRenderer {
    /// Create a renderer using the built-in layout
    pub fn new() -> Result<Self> {
        Self::from_template_str(DEFAULT_TEMPLATE)
    }

    /// Create a renderer from layout source
    pub fn from_template_str(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| TemplateError::TemplateLoadError(describe(&e)))?;
        register_filters(&mut tera);

        Ok(Self {
            tera,
            overflow: OverflowPolicy::default(),
            totals: TotalsPolicy::default(),
        })
    }

    /// Create a renderer from a layout file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            TemplateError::TemplateLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_template_str(&source)
    }

    /// Set the item table overflow behavior
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the totals consistency behavior
    pub fn with_totals(mut self, totals: TotalsPolicy) -> Self {
        self.totals = totals;
        self
    }

    /// Render the invoice to a complete HTML document
    pub fn render(&self, invoice: &Invoice) -> Result<String> {
        self.check_totals(invoice)?;

        let tax_flags = TaxFlags::from_tax_type(invoice.tax_type.as_ref());
        if let Some(tax_type) = invoice.tax_type.as_ref().filter(|t| !t.is_known()) {
            warn!(tax_type = %tax_type, "unrecognized tax classification, no checkbox marked");
        }
        debug!(checked = tax_flags.count(), "tax classification");

        let item_rows = build_rows(&invoice.items, self.overflow)?;
        debug!(
            items = invoice.items.len(),
            rows = item_rows.len(),
            blank = item_rows.iter().filter(|r| r.is_blank()).count(),
            "built item table"
        );

        let view = InvoiceView {
            invoice,
            item_rows,
            sales_amount_formatted: zh_text::format_thousands(invoice.sales_amount),
            tax_amount_formatted: zh_text::format_thousands(invoice.tax_amount),
            total_amount_formatted: zh_text::format_thousands(invoice.total_amount),
            total_amount_chinese: zh_text::format_amount_text(invoice.total_amount),
            tax_flags,
            current_page: 1,
            total_pages: 1,
        };

        let context =
            Context::from_serialize(&view).map_err(|e| TemplateError::RenderError(describe(&e)))?;

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| TemplateError::RenderError(describe(&e)))
    }

    /// Apply the totals policy
    fn check_totals(&self, invoice: &Invoice) -> Result<()> {
        if invoice.totals_consistent() {
            return Ok(());
        }

        match self.totals {
            TotalsPolicy::Trust => {
                warn!(
                    sales = invoice.sales_amount,
                    tax = invoice.tax_amount,
                    total = invoice.total_amount,
                    "total amount does not equal sales plus tax"
                );
                Ok(())
            }
            TotalsPolicy::Strict => Err(TemplateError::TotalsMismatch {
                sales: invoice.sales_amount,
                tax: invoice.tax_amount,
                total: invoice.total_amount,
            }),
        }
    }
}

/// Register formatting filters usable from custom layouts
fn register_filters(tera: &mut Tera) {
    tera.register_filter("thousands", thousands_filter);
    tera.register_filter("amount_text", amount_text_filter);
    tera.register_filter("roc_date", roc_date_filter);
}

fn thousands_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let n = expect_amount("thousands", value)?;
    Ok(Value::String(zh_text::format_thousands(n)))
}

fn amount_text_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let n = expect_amount("amount_text", value)?;
    Ok(Value::String(zh_text::format_amount_text(n)))
}

fn roc_date_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value.as_str().ok_or_else(|| {
        tera::Error::msg(format!("Filter `roc_date` expects a date string, got {value}"))
    })?;
    zh_text::format_roc_date_str(text)
        .map(Value::String)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

fn expect_amount(filter: &str, value: &Value) -> tera::Result<u64> {
    value.as_u64().ok_or_else(|| {
        tera::Error::msg(format!(
            "Filter `{filter}` expects a non-negative integer, got {value}"
        ))
    })
}

/// Flatten a tera error and its sources into one line
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
