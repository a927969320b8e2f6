//! Formatting helpers

use chrono::NaiveDate;
use finnboard_config::{CurrencyConfig, SymbolPosition};
use rust_decimal::{Decimal, RoundingStrategy};

/// Group the digits of an unsigned integer string with a separator
pub fn format_number(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format an amount as currency, e.g. `-$5.49` or `$5,000.00`
pub fn format_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    let places = currency.decimal_places;
    let rounded = amount
        .abs()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", places as usize, rounded);

    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut number = format_number(whole, &currency.thousands_separator);
    if let Some(fraction) = fraction {
        number.push_str(&currency.decimal_separator);
        number.push_str(fraction);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}{}", sign, currency.symbol, number),
        SymbolPosition::After => format!("{}{}{}", sign, number, currency.symbol),
    }
}

/// Currency with an explicit `+` on inflows
pub fn format_signed_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    let formatted = format_currency(amount, currency);
    if amount > Decimal::ZERO {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

/// One decimal place plus a percent sign
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

/// Short display date, e.g. `Jan 15, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Escape text for HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("5000", ","), "5,000");
        assert_eq!(format_number("1234567", "."), "1.234.567");
        assert_eq!(format_number("999", ","), "999");
        assert_eq!(format_number("0", ","), "0");
    }

    #[test]
    fn test_format_currency_defaults() {
        let currency = CurrencyConfig::default();
        assert_eq!(format_currency(dec("-5.49"), &currency), "-$5.49");
        assert_eq!(format_currency(dec("5000"), &currency), "$5,000.00");
        assert_eq!(format_currency(dec("1200.005"), &currency), "$1,200.01");
        assert_eq!(format_currency(Decimal::ZERO, &currency), "$0.00");
    }

    #[test]
    fn test_format_currency_symbol_after() {
        let currency = CurrencyConfig {
            symbol: " EUR".to_string(),
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            symbol_position: SymbolPosition::After,
            ..CurrencyConfig::default()
        };
        assert_eq!(format_currency(dec("-1234.5"), &currency), "-1.234,50 EUR");
    }

    #[test]
    fn test_format_currency_no_decimals() {
        let currency = CurrencyConfig {
            decimal_places: 0,
            ..CurrencyConfig::default()
        };
        assert_eq!(format_currency(dec("2915"), &currency), "$2,915");
    }

    #[test]
    fn test_format_signed_currency() {
        let currency = CurrencyConfig::default();
        assert_eq!(format_signed_currency(dec("5000"), &currency), "+$5,000.00");
        assert_eq!(format_signed_currency(dec("-12.30"), &currency), "-$12.30");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec("26.3")), "26.3%");
        assert_eq!(format_percentage(dec("82")), "82.0%");
        assert_eq!(format_percentage(dec("96.186")), "96.2%");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Food & Dining"), "Food &amp; Dining");
        assert_eq!(escape_html("<script>\"x\"</script>"), "&lt;script&gt;&quot;x&quot;&lt;/script&gt;");
    }
}
