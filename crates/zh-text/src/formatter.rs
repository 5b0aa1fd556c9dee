//! Chinese number, currency, and date formatting

use crate::{Result, ZhTextError};
use chrono::{Datelike, NaiveDate};

/// Capital digit glyphs (0-9)
const DIGIT_NAMES: [&str; 10] = ["零", "壹", "貳", "參", "肆", "伍", "陸", "柒", "捌", "玖"];

/// Unit names within a four-digit group
const UNIT_NAMES: [&str; 4] = ["", "拾", "佰", "仟"];

/// Scale markers, one per four-digit group.
/// 兆 and 京 cover amounts up to `u64::MAX`.
const SCALE_NAMES: [&str; 5] = ["", "萬", "億", "兆", "京"];

/// Suffix appended to every amount ("currency, exact")
const AMOUNT_SUFFIX: &str = "元整";

/// Amount text for zero
const ZERO_AMOUNT: &str = "零元整";

/// First year of the Republic of China calendar, in Gregorian years
const ROC_EPOCH: i32 = 1911;

/// Accepted input layouts for date strings
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Chinese text formatting utilities
pub struct ChineseFormatter;

impl ChineseFormatter {
    /// Format a number with thousands separators
    pub fn format_thousands(n: u64) -> String {
        format_thousands(n)
    }

    /// Format an amount as capital-numeral text
    pub fn format_amount_text(n: u64) -> String {
        format_amount_text(n)
    }

    /// Format a date in the Republic of China calendar
    pub fn format_roc_date(year: i32, month: u32, day: u32) -> String {
        format_roc_date(year, month, day)
    }
}

/// Format an integer with a comma every three digits from the right
///
/// # Examples
/// ```
/// use zh_text::format_thousands;
/// assert_eq!(format_thousands(999), "999");
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    if len <= 3 {
        return digits;
    }

    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format an amount as traditional Chinese capital-numeral text
///
/// Digits are walked from the most significant end. A run of zeros
/// collapses into a single 零 that is only written once a nonzero digit
/// follows. A scale marker (萬, 億, ...) is written at every four-digit
/// group boundary, even when the digit on the boundary is zero.
///
/// # Examples
/// ```
/// use zh_text::format_amount_text;
/// assert_eq!(format_amount_text(0), "零元整");
/// assert_eq!(format_amount_text(100), "壹佰元整");
/// assert_eq!(format_amount_text(1005), "壹仟零伍元整");
/// assert_eq!(format_amount_text(100000000), "壹億萬元整");
/// ```
pub fn format_amount_text(n: u64) -> String {
    if n == 0 {
        return ZERO_AMOUNT.to_string();
    }

    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::new();
    let mut pending_zero = false;

    for (i, b) in digits.bytes().enumerate() {
        let digit = (b - b'0') as usize;
        let pos = len - i - 1;
        let unit_pos = pos % 4;
        let scale_pos = pos / 4;
        let on_boundary = unit_pos == 0 && scale_pos > 0;

        if digit == 0 {
            pending_zero = true;
            if on_boundary {
                result.push_str(SCALE_NAMES[scale_pos]);
            }
            continue;
        }

        if pending_zero {
            result.push_str(DIGIT_NAMES[0]);
            pending_zero = false;
        }
        result.push_str(DIGIT_NAMES[digit]);
        result.push_str(UNIT_NAMES[unit_pos]);
        if on_boundary {
            result.push_str(SCALE_NAMES[scale_pos]);
        }
    }

    result.push_str(AMOUNT_SUFFIX);
    result
}

/// Format a date in the Republic of China calendar (e.g., "中華民國114年01月22日")
///
/// # Arguments
/// * `year` - Gregorian year (converted to ROC year)
/// * `month` - Month (1-12)
/// * `day` - Day of month
pub fn format_roc_date(year: i32, month: u32, day: u32) -> String {
    let roc_year = year - ROC_EPOCH;
    if roc_year >= 1 {
        format!("中華民國{roc_year}年{month:02}月{day:02}日")
    } else {
        // Years before 1912 count backwards from the founding year
        format!("民國前{}年{month:02}月{day:02}日", 1 - roc_year)
    }
}

/// Parse a Gregorian date string and format it in the ROC calendar
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
pub fn format_roc_date_str(text: &str) -> Result<String> {
    let text = text.trim();
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| {
            ZhTextError::InvalidDate(format!("{text}. Expected YYYY-MM-DD"))
        })?;

    Ok(format_roc_date(date.year(), date.month(), date.day()))
}
