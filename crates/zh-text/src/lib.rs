//! Zh Text - Traditional Chinese formatting for invoice documents
//!
//! This crate provides:
//! - Thousands-grouped number formatting (1,234,567)
//! - Capital-numeral amount text (壹仟伍佰元整)
//! - Republic of China calendar dates (中華民國114年01月22日)
//!
//! # Example
//!
//! ```
//! use zh_text::ChineseFormatter;
//!
//! assert_eq!(ChineseFormatter::format_thousands(1500), "1,500");
//! assert_eq!(ChineseFormatter::format_amount_text(1500), "壹仟伍佰元整");
//! ```

mod formatter;

pub use formatter::ChineseFormatter;

pub use formatter::{format_amount_text, format_roc_date, format_roc_date_str, format_thousands};

use thiserror::Error;

/// Errors that can occur during Chinese text formatting
#[derive(Debug, Error)]
pub enum ZhTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for Chinese text operations
pub type Result<T> = std::result::Result<T, ZhTextError>;
