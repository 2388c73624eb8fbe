//! Currency formatting for balance rows.
//!
//! Produces en-US style currency text such as `£1,234.50`, `-€3.00` or
//! `¥1,235`. Currencies without a well-known symbol fall back to the ISO
//! code: `CHF 12.50`. Amounts are rounded half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;

/// en-US symbols for currencies that have a widely recognised one.
const SYMBOLS: &[(&str, &str)] = &[
    ("AUD", "A$"),
    ("BRL", "R$"),
    ("CAD", "CA$"),
    ("CNY", "CN¥"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("MXN", "MX$"),
    ("NZD", "NZ$"),
    ("TWD", "NT$"),
    ("USD", "$"),
    ("VND", "₫"),
];

/// Currencies without minor units.
const ZERO_DECIMAL: &[&str] = &["CLP", "ISK", "JPY", "KRW", "PYG", "UGX", "VND", "XAF", "XOF"];

/// Currencies with three minor-unit digits.
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Formats an amount as currency text.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCurrency`] if `code` is not three ASCII
/// letters, and [`CoreError::InvalidData`] if `amount` is not finite or too
/// large to format.
///
/// # Example
/// ```
/// use balance_core::format_currency;
///
/// assert_eq!(format_currency(12.5, "GBP").unwrap(), "£12.50");
/// assert_eq!(format_currency(-1234.5, "usd").unwrap(), "-$1,234.50");
/// ```
pub fn format_currency(amount: f64, code: &str) -> Result<String, CoreError> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(CoreError::InvalidCurrency(code.to_string()));
    }
    if !amount.is_finite() {
        return Err(CoreError::InvalidData(format!(
            "balance is not a finite number: {amount}"
        )));
    }

    let code = code.to_ascii_uppercase();
    let digits = minor_digits(&code);
    let number = group_thousands(&round_to_string(amount.abs(), digits)?);

    // "-0.00" is printed without a sign
    let negative = amount < 0.0 && number.bytes().any(|b| (b'1'..=b'9').contains(&b));
    let sign = if negative { "-" } else { "" };

    Ok(match symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code} {number}"),
    })
}

/// Renders a non-negative amount with exactly `digits` decimals.
///
/// The exact binary value is rounded, so `0.125` becomes `0.13` while
/// `1.005` (stored just below the midpoint) becomes `1.00`.
fn round_to_string(amount: f64, digits: u32) -> Result<String, CoreError> {
    let exact = Decimal::from_f64_retain(amount).ok_or_else(|| {
        CoreError::InvalidData(format!("balance out of range: {amount}"))
    })?;
    let rounded = exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{:.*}", digits as usize, rounded))
}

fn symbol(code: &str) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}

fn minor_digits(code: &str) -> u32 {
    if ZERO_DECIMAL.contains(&code) {
        0
    } else if THREE_DECIMAL.contains(&code) {
        3
    } else {
        2
    }
}

/// Inserts `,` separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

// ============================================================================
// Tests
// ============================================================================
