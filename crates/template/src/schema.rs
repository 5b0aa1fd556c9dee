//! Invoice JSON schema types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root invoice record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number (e.g., "AB-12345678")
    pub invoice_number: String,

    /// Issue date, rendered verbatim
    pub invoice_date: String,

    /// Invoice format code (e.g., "25")
    pub format_code: String,

    /// Random verification code
    #[serde(default)]
    pub random_code: String,

    /// Issuing company
    pub seller: Company,

    /// Receiving company
    pub buyer: Company,

    /// Line items, in display order
    pub items: Vec<Item>,

    /// Tax classification, absent when the input omits it
    #[serde(default)]
    pub tax_type: Option<TaxType>,

    /// Sales amount before tax
    pub sales_amount: u64,

    /// Business tax amount
    pub tax_amount: u64,

    /// Total amount (sales + tax, as supplied)
    pub total_amount: u64,
}

impl Invoice {
    /// Check whether `total_amount` equals `sales_amount + tax_amount`
    pub fn totals_consistent(&self) -> bool {
        self.sales_amount
            .checked_add(self.tax_amount)
            .is_some_and(|sum| sum == self.total_amount)
    }
}

/// Seller or buyer identity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub tax_id: String,
    pub address: String,
}

/// A single invoice line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub quantity: u64,
    pub unit_price: u64,
    #[serde(default)]
    pub remark: String,
}

impl Item {
    /// Line amount (quantity x unit price), `None` on overflow
    pub fn amount(&self) -> Option<u64> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// Tax classification
///
/// Unrecognized strings are kept as [`TaxType::Unknown`] rather than
/// rejected, so an unexpected value simply marks no checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaxType {
    /// 應稅
    Taxable,
    /// 零稅率
    ZeroTax,
    /// 免稅
    TaxFree,
    /// Any other value, kept verbatim
    Unknown(String),
}

impl TaxType {
    /// Wire name of the classification
    pub fn as_str(&self) -> &str {
        match self {
            TaxType::Taxable => "taxable",
            TaxType::ZeroTax => "zeroTax",
            TaxType::TaxFree => "taxFree",
            TaxType::Unknown(s) => s,
        }
    }

    /// Whether this is one of the three known classifications
    pub fn is_known(&self) -> bool {
        !matches!(self, TaxType::Unknown(_))
    }
}

impl From<String> for TaxType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "taxable" => TaxType::Taxable,
            "zeroTax" => TaxType::ZeroTax,
            "taxFree" => TaxType::TaxFree,
            _ => TaxType::Unknown(s),
        }
    }
}

impl From<TaxType> for String {
    fn from(t: TaxType) -> Self {
        match t {
            TaxType::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkbox markers for the three tax classifications
///
/// At most one flag is set; the others are empty strings.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaxFlags {
    pub taxable_checked: &'static str,
    pub zero_tax_checked: &'static str,
    pub tax_free_checked: &'static str,
}

/// Attribute emitted for the checked classification
pub const CHECKED: &str = "checked";

impl TaxFlags {
    /// Derive flags from an optional classification
    pub fn from_tax_type(tax_type: Option<&TaxType>) -> Self {
        let mut flags = Self::default();
        match tax_type {
            Some(TaxType::Taxable) => flags.taxable_checked = CHECKED,
            Some(TaxType::ZeroTax) => flags.zero_tax_checked = CHECKED,
            Some(TaxType::TaxFree) => flags.tax_free_checked = CHECKED,
            Some(TaxType::Unknown(_)) | None => {}
        }
        flags
    }

    /// Number of flags set
    pub fn count(&self) -> usize {
        [
            self.taxable_checked,
            self.zero_tax_checked,
            self.tax_free_checked,
        ]
        .iter()
        .filter(|f| !f.is_empty())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invoice(sales: u64, tax: u64, total: u64) -> Invoice {
        Invoice {
            invoice_number: "AB-12345678".to_string(),
            invoice_date: "2025-01-22".to_string(),
            format_code: "25".to_string(),
            random_code: "1234".to_string(),
            seller: Company::default(),
            buyer: Company::default(),
            items: Vec::new(),
            tax_type: Some(TaxType::Taxable),
            sales_amount: sales,
            tax_amount: tax,
            total_amount: total,
        }
    }

    #[test]
    fn test_tax_type_from_string() {
        assert_eq!(TaxType::from("taxable".to_string()), TaxType::Taxable);
        assert_eq!(TaxType::from("zeroTax".to_string()), TaxType::ZeroTax);
        assert_eq!(TaxType::from("taxFree".to_string()), TaxType::TaxFree);
        assert_eq!(
            TaxType::from("exempt".to_string()),
            TaxType::Unknown("exempt".to_string())
        );
    }

    #[test]
    fn test_tax_type_serde_keeps_unknown_value() {
        let t: TaxType = serde_json::from_str(r#""mixed""#).unwrap();
        assert!(!t.is_known());
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""mixed""#);
    }

    #[test]
    fn test_tax_flags_known_values() {
        for (tax_type, expected) in [
            (TaxType::Taxable, ("checked", "", "")),
            (TaxType::ZeroTax, ("", "checked", "")),
            (TaxType::TaxFree, ("", "", "checked")),
        ] {
            let flags = TaxFlags::from_tax_type(Some(&tax_type));
            assert_eq!(flags.count(), 1);
            assert_eq!(
                (
                    flags.taxable_checked,
                    flags.zero_tax_checked,
                    flags.tax_free_checked
                ),
                expected
            );
        }
    }

    #[test]
    fn test_tax_flags_unknown_or_missing() {
        let unknown = TaxType::Unknown("other".to_string());
        assert_eq!(TaxFlags::from_tax_type(Some(&unknown)).count(), 0);
        assert_eq!(TaxFlags::from_tax_type(None).count(), 0);
    }

    #[test]
    fn test_item_amount() {
        let item = Item {
            name: "Widget".to_string(),
            quantity: 3,
            unit_price: 250,
            remark: String::new(),
        };
        assert_eq!(item.amount(), Some(750));

        let huge = Item {
            quantity: u64::MAX,
            unit_price: 2,
            ..item
        };
        assert_eq!(huge.amount(), None);
    }

    #[test]
    fn test_totals_consistent() {
        assert!(sample_invoice(1429, 71, 1500).totals_consistent());
        assert!(!sample_invoice(1429, 71, 1600).totals_consistent());
        assert!(!sample_invoice(u64::MAX, 1, 0).totals_consistent());
    }
}
