//! Currency strings with thousands grouping.
//!
//! Amounts with a fractional part get exactly two decimals; whole amounts get
//! none. Grouping is always en-US style (`,` every three digits, `.` decimal
//! point) regardless of the locale passed in.

use serde::{Deserialize, Serialize};

/// Fractional parts at or below this are treated as floating-point noise.
fn fraction_tolerance() -> f64 {
    f64::from_bits(1) * 100.0
}

/// Reusable currency formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Text placed before the number, after the sign
    pub prefix: Option<String>,
    /// Text placed after the number
    pub postfix: Option<String>,
    /// Requested locale; accepted for API compatibility, grouping is always en-US
    pub locale: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            prefix: Some("$".to_string()),
            postfix: None,
            locale: "en-US".to_string(),
        }
    }
}

impl CurrencyFormat {
    /// Dollar prefix, no postfix, en-US
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set or clear the prefix
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    /// Builder: set or clear the postfix
    pub fn with_postfix(mut self, postfix: Option<&str>) -> Self {
        self.postfix = postfix.map(str::to_string);
        self
    }

    /// Builder: set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Format an amount with these options.
    pub fn format(&self, amount: impl Into<f64>) -> String {
        format_currency(
            amount,
            self.prefix.as_deref(),
            self.postfix.as_deref(),
            &self.locale,
        )
    }
}

/// Format `amount` as `{sign}{prefix}{number}{postfix}`.
///
/// The sign is `-` only for amounts below zero. Non-finite amounts put their
/// textual form (`NaN`, `inf`) in the number slot.
///
/// ```rust
/// use rutilslib::format_currency;
///
/// assert_eq!(format_currency(1234, Some("$"), None, "en-US"), "$1,234");
/// assert_eq!(format_currency(1234.5, Some("$"), None, "en-US"), "$1,234.50");
/// assert_eq!(format_currency(-5, Some("$"), None, "en-US"), "-$5");
/// assert_eq!(format_currency(12, None, Some(" EUR"), "de-DE"), "12 EUR");
/// ```
pub fn format_currency(
    amount: impl Into<f64>,
    prefix: Option<&str>,
    postfix: Option<&str>,
    _locale: &str,
) -> String {
    let amount = amount.into();
    let sign = if amount < 0.0 { "-" } else { "" };

    format!(
        "{}{}{}{}",
        sign,
        prefix.unwrap_or(""),
        format_magnitude(amount),
        postfix.unwrap_or("")
    )
}

fn format_magnitude(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.abs().to_string();
    }

    let has_decimals = (amount % 1.0).abs() > fraction_tolerance();
    if has_decimals {
        let fixed = round_to_cents(amount.abs());
        match fixed.split_once('.') {
            Some((whole, cents)) => format!("{}.{}", group_thousands(whole), cents),
            None => group_thousands(&fixed),
        }
    } else {
        // Saturates for magnitudes beyond u64
        let whole = amount.abs().trunc() as u64;
        group_thousands(&whole.to_string())
    }
}

/// Render a non-negative amount with two decimals.
///
/// The value is first reduced to 15 significant digits, then rounded half away
/// from zero, so `2.675` (stored as 2.67499999...) gives `2.68`.
fn round_to_cents(amount: f64) -> String {
    let scientific = format!("{:.14e}", amount);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    // Significant digits left of the second decimal place
    let keep = exponent + 3;
    let mut cents: Vec<u8> = if keep > 0 {
        digits
            .iter()
            .copied()
            .chain(std::iter::repeat(0))
            .take(keep as usize)
            .collect()
    } else {
        Vec::new()
    };

    let round_up = keep >= 0 && digits.get(keep as usize).is_some_and(|&d| d >= 5);
    if round_up {
        increment_digits(&mut cents);
    }
    while cents.len() < 3 {
        cents.insert(0, 0);
    }

    let text: String = cents.iter().map(|&d| char::from(b'0' + d)).collect();
    let (whole, fraction) = text.split_at(text.len() - 2);
    format!("{}.{}", whole, fraction)
}

fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

/// Insert `,` between groups of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(amount: impl Into<f64>) -> String {
        format_currency(amount, Some("$"), None, "en-US")
    }

    #[test]
    fn test_whole_amounts() {
        assert_eq!(dollars(0), "$0");
        assert_eq!(dollars(5), "$5");
        assert_eq!(dollars(999), "$999");
        assert_eq!(dollars(1000), "$1,000");
        assert_eq!(dollars(1234), "$1,234");
        assert_eq!(dollars(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(dollars(1234.5), "$1,234.50");
        assert_eq!(dollars(0.25), "$0.25");
        assert_eq!(dollars(1_000_000.75), "$1,000,000.75");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(dollars(-5), "-$5");
        assert_eq!(dollars(-1234.5), "-$1,234.50");
        assert_eq!(dollars(-0.5), "-$0.50");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(dollars(-0.0), "$0");
    }

    #[test]
    fn test_float_amounts() {
        assert_eq!(dollars(2.5f32), "$2.50");
        assert_eq!(dollars(3.0f32), "$3");
    }

    #[test]
    fn test_prefix_and_postfix() {
        assert_eq!(format_currency(10, None, None, "en-US"), "10");
        assert_eq!(format_currency(10, Some("€"), Some(" EUR"), "en-US"), "€10 EUR");
        assert_eq!(format_currency(-10, Some("£"), Some("!"), "en-US"), "-£10!");
    }

    #[test]
    fn test_locale_is_ignored() {
        assert_eq!(
            format_currency(1234.5, Some("$"), None, "de-DE"),
            format_currency(1234.5, Some("$"), None, "en-US")
        );
    }

    #[test]
    fn test_tiny_fraction_is_still_fractional() {
        // Well above the subnormal tolerance, rounds to zero cents
        assert_eq!(dollars(1.000001), "$1.00");
    }

    #[test]
    fn test_midpoints_round_away_from_zero() {
        assert_eq!(dollars(0.125), "$0.13");
        assert_eq!(dollars(2.675), "$2.68");
        assert_eq!(dollars(1.005), "$1.01");
        assert_eq!(dollars(-2.675), "-$2.68");
        assert_eq!(dollars(0.005), "$0.01");
    }

    #[test]
    fn test_rounding_carries_into_whole_part() {
        assert_eq!(dollars(9.995), "$10.00");
        assert_eq!(dollars(999.999), "$1,000.00");
        assert_eq!(dollars(0.004), "$0.00");
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(0.5), "0.50");
        assert_eq!(round_to_cents(1234.5), "1234.50");
        assert_eq!(round_to_cents(0.0001), "0.00");
        assert_eq!(round_to_cents(12345678.91), "12345678.91");
    }

    #[test]
    fn test_fraction_tolerance_boundary() {
        let tolerance = fraction_tolerance();
        assert_eq!(tolerance, f64::from_bits(100));

        // At or below the tolerance the amount counts as whole
        assert_eq!(format_magnitude(f64::from_bits(50)), "0");
        assert_eq!(format_magnitude(tolerance), "0");
        // Just above it the amount is fractional
        assert_eq!(format_magnitude(f64::from_bits(101)), "0.00");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(dollars(f64::NAN), "$NaN");
        assert_eq!(dollars(f64::INFINITY), "$inf");
        assert_eq!(dollars(f64::NEG_INFINITY), "-$inf");
    }

    #[test]
    fn test_currency_format_builder() {
        let format = CurrencyFormat::new()
            .with_prefix(None)
            .with_postfix(Some(" coins"))
            .with_locale("fr-FR");
        assert_eq!(format.format(2500), "2,500 coins");
        assert_eq!(CurrencyFormat::default().format(-7.25), "-$7.25");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("12"), "12");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
