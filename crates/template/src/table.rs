//! Fixed-capacity line item table
//!
//! The printed layout reserves a fixed number of item rows. Rows are
//! padded here, before rendering, so the template only ever iterates a
//! ready-made list.

use crate::{Item, Result, TemplateError};
use serde::Serialize;
use zh_text::format_thousands;

/// Number of item rows the page layout holds
pub const MAX_ITEM_ROWS: usize = 16;

/// Cell content for padding rows (U+00A0, keeps the row height)
pub const BLANK_CELL: &str = "\u{a0}";

/// Behavior when more items are supplied than the layout holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail with [`TemplateError::TooManyItems`]
    #[default]
    Reject,
    /// Render every item; the table grows past the designed page fit
    Grow,
}

/// Row type, exposed to the template as a CSS class
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Item,
    Blank,
}

/// A rendered table row
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub kind: RowKind,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub amount: String,
    pub remark: String,
}

impl ItemRow {
    /// Build a row from an item, formatting price and line amount
    pub fn from_item(item: &Item) -> Result<Self> {
        let amount = item.amount().ok_or_else(|| TemplateError::AmountOverflow {
            name: item.name.clone(),
        })?;

        Ok(Self {
            kind: RowKind::Item,
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            unit_price: format_thousands(item.unit_price),
            amount: format_thousands(amount),
            remark: item.remark.clone(),
        })
    }

    /// A padding row with every cell blank
    pub fn blank() -> Self {
        Self {
            kind: RowKind::Blank,
            name: BLANK_CELL.to_string(),
            quantity: BLANK_CELL.to_string(),
            unit_price: BLANK_CELL.to_string(),
            amount: BLANK_CELL.to_string(),
            remark: BLANK_CELL.to_string(),
        }
    }

    /// Whether this is a padding row
    pub fn is_blank(&self) -> bool {
        self.kind == RowKind::Blank
    }
}

/// Build the table rows for a list of items
///
/// Returns exactly [`MAX_ITEM_ROWS`] rows when the items fit, real rows
/// first and blank rows after. With [`OverflowPolicy::Grow`] an oversized
/// list is returned unpadded.
pub fn build_rows(items: &[Item], policy: OverflowPolicy) -> Result<Vec<ItemRow>> {
    if items.len() > MAX_ITEM_ROWS && policy == OverflowPolicy::Reject {
        return Err(TemplateError::TooManyItems {
            count: items.len(),
            max: MAX_ITEM_ROWS,
        });
    }

    let mut rows = Vec::with_capacity(items.len().max(MAX_ITEM_ROWS));
    for item in items {
        rows.push(ItemRow::from_item(item)?);
    }

    let padding = MAX_ITEM_ROWS.saturating_sub(rows.len());
    rows.extend(std::iter::repeat_with(ItemRow::blank).take(padding));

    Ok(rows)
}
